//! Serde schema for mapping rule files.
//!
//! Rule files are JSON with four top-level sections: `text_fields`,
//! `checkbox_rules`, `post_processing`, and `meta`. Everything is optional
//! except the pattern lists themselves; absent sections fall back to empty
//! defaults so a minimal rule file stays minimal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One extractable text field: ordered patterns plus an optional transform
/// or composition rule. Pattern order encodes precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternFieldSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compose: Option<ComposeSpec>,
}

/// Capture-group transforms applied to a winning match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    FirstGroup,
    SecondGroup,
    FirstGroupTitle,
    SecondGroupTitle,
    DigitsOnly,
    /// Unknown transform names deserialize here and leave the value as is.
    #[serde(other)]
    Passthrough,
}

/// Builds one field out of two independent sub-searches, e.g. the engine
/// descriptor composed of a cylinder count and a displacement volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeSpec {
    #[serde(default)]
    pub cyl_from: Vec<String>,
    #[serde(default)]
    pub disp_from: Vec<String>,
    /// Normalization lookup applied to the captured cylinder value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub normalize: BTreeMap<String, String>,
    /// Placeholder template; `{cyl}` and `{disp}` are substituted.
    #[serde(default = "default_compose_format")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_only_displacement_found_assume: Option<String>,
}

impl Default for ComposeSpec {
    fn default() -> Self {
        Self {
            cyl_from: Vec::new(),
            disp_from: Vec::new(),
            normalize: BTreeMap::new(),
            format: default_compose_format(),
            if_only_displacement_found_assume: None,
        }
    }
}

fn default_compose_format() -> String {
    "{cyl}-{disp}".to_string()
}

/// Checkbox detection rules plus conflict preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckboxRules {
    #[serde(default)]
    pub rules: Vec<CheckboxRule>,
    /// When both 4DR and 2DR match, drop 2DR. Optional so a patch file can
    /// override the base either way during merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_4dr_over_2dr: Option<bool>,
}

impl CheckboxRules {
    pub fn prefers_4dr(&self) -> bool {
        self.prefer_4dr_over_2dr.unwrap_or(false)
    }
}

/// A checkbox token is present iff any of its patterns matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckboxRule {
    pub field: String,
    #[serde(default)]
    pub match_any: Vec<String>,
}

/// How the ZIP field is cleaned up after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZipSelection {
    FirstFiveDigits,
}

/// Whole-record cleanups applied after all fields are extracted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostProcessing {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titlecase_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_selection: Option<ZipSelection>,
    /// CCC make abbreviation -> full make name (CHEV -> Chevrolet).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub make_mapping: BTreeMap<String, String>,
}

/// Rule-file provenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Stamped by the merge operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<String>,
}

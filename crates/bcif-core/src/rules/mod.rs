//! Mapping rule sets: loading, merging, and built-in presets.
//!
//! A rule set is immutable once loaded; extractors borrow it and never write
//! back. Load failures degrade to built-in presets rather than aborting.

pub mod builtin;
pub mod schema;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RulesError;
pub use schema::{
    CheckboxRule, CheckboxRules, ComposeSpec, PatternFieldSpec, PostProcessing, RulesMeta,
    Transform, ZipSelection,
};

/// A complete mapping rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingRules {
    #[serde(default)]
    pub meta: RulesMeta,
    #[serde(default)]
    pub text_fields: BTreeMap<String, PatternFieldSpec>,
    #[serde(default)]
    pub checkbox_rules: CheckboxRules,
    #[serde(default)]
    pub post_processing: PostProcessing,
}

impl MappingRules {
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a rule file, degrading to the minimal built-in fallback when it
    /// cannot be read or parsed. Extraction never aborts on rule I/O.
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(rules) => {
                debug!("Loaded mapping rules from {}", path.display());
                rules
            }
            Err(err) => {
                warn!(
                    "Failed to load mapping rules from {} ({}), using fallback",
                    path.display(),
                    err
                );
                builtin::fallback_rules()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RulesError> {
        let json = serde_json::to_string_pretty(self).map_err(RulesError::Parse)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Number of fields a full extraction is expected to produce.
    pub fn expected_field_count(&self) -> usize {
        self.text_fields.len() + self.checkbox_rules.rules.len()
    }

    /// Deep-merge a patch rule set over this one.
    ///
    /// Pattern lists are unioned preserving base order; the patch wins on
    /// scalar choices (transform, compose, zip selection, meta fields).
    pub fn merge(&self, patch: &MappingRules) -> MappingRules {
        let mut merged = MappingRules {
            meta: merge_meta(&self.meta, &patch.meta),
            text_fields: self.text_fields.clone(),
            checkbox_rules: merge_checkbox_rules(&self.checkbox_rules, &patch.checkbox_rules),
            post_processing: merge_post_processing(&self.post_processing, &patch.post_processing),
        };

        for (field, patch_spec) in &patch.text_fields {
            match merged.text_fields.get_mut(field) {
                Some(spec) => {
                    for pattern in &patch_spec.patterns {
                        if !spec.patterns.contains(pattern) {
                            spec.patterns.push(pattern.clone());
                        }
                    }
                    if patch_spec.transform.is_some() {
                        spec.transform = patch_spec.transform;
                    }
                    if patch_spec.compose.is_some() {
                        spec.compose = patch_spec.compose.clone();
                    }
                }
                None => {
                    merged.text_fields.insert(field.clone(), patch_spec.clone());
                }
            }
        }

        merged
    }
}

fn merge_checkbox_rules(base: &CheckboxRules, patch: &CheckboxRules) -> CheckboxRules {
    let mut rules = base.rules.clone();
    for patch_rule in &patch.rules {
        match rules.iter_mut().find(|r| r.field == patch_rule.field) {
            Some(rule) => {
                for pattern in &patch_rule.match_any {
                    if !rule.match_any.contains(pattern) {
                        rule.match_any.push(pattern.clone());
                    }
                }
            }
            None => rules.push(patch_rule.clone()),
        }
    }
    CheckboxRules {
        rules,
        prefer_4dr_over_2dr: patch.prefer_4dr_over_2dr.or(base.prefer_4dr_over_2dr),
    }
}

fn merge_post_processing(base: &PostProcessing, patch: &PostProcessing) -> PostProcessing {
    let mut titlecase_fields = base.titlecase_fields.clone();
    for field in &patch.titlecase_fields {
        if !titlecase_fields.contains(field) {
            titlecase_fields.push(field.clone());
        }
    }
    let mut make_mapping = base.make_mapping.clone();
    make_mapping.extend(patch.make_mapping.clone());
    PostProcessing {
        titlecase_fields,
        zip_selection: patch.zip_selection.or(base.zip_selection),
        make_mapping,
    }
}

fn merge_meta(base: &RulesMeta, patch: &RulesMeta) -> RulesMeta {
    let mut notes = base.notes.clone();
    for note in &patch.notes {
        if !notes.contains(note) {
            notes.push(note.clone());
        }
    }
    RulesMeta {
        name: patch.name.clone().or_else(|| base.name.clone()),
        version: patch.version.clone().or_else(|| base.version.clone()),
        pdf_template: patch.pdf_template.clone().or_else(|| base.pdf_template.clone()),
        notes,
        merged_at: Some(chrono::Utc::now().to_rfc3339()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_rules() -> MappingRules {
        MappingRules::from_json(
            r#"{
                "meta": { "name": "base", "version": "1.0", "notes": ["tuned for CCC"] },
                "text_fields": {
                    "claim_number": { "patterns": ["Claim #:\\s*(\\S+)"] },
                    "vin": { "patterns": ["VIN:\\s*(\\S+)"], "transform": "first_group" }
                },
                "checkbox_rules": {
                    "prefer_4dr_over_2dr": true,
                    "rules": [
                        { "field": "4DR", "match_any": ["4\\s?DR"] }
                    ]
                },
                "post_processing": {
                    "titlecase_fields": ["insured_last_name"],
                    "zip_selection": "first_five_digits"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_merge_unions_patterns_in_base_order() {
        let base = base_rules();
        let patch = MappingRules::from_json(
            r#"{
                "text_fields": {
                    "claim_number": { "patterns": ["Claim Number:\\s*(\\S+)", "Claim #:\\s*(\\S+)"] }
                }
            }"#,
        )
        .unwrap();

        let merged = base.merge(&patch);
        let patterns = &merged.text_fields["claim_number"].patterns;
        assert_eq!(
            patterns,
            &vec![
                "Claim #:\\s*(\\S+)".to_string(),
                "Claim Number:\\s*(\\S+)".to_string()
            ]
        );
    }

    #[test]
    fn test_merge_prefers_patch_transform_and_meta() {
        let base = base_rules();
        let patch = MappingRules::from_json(
            r#"{
                "meta": { "name": "patched", "notes": ["office overrides"] },
                "text_fields": {
                    "vin": { "patterns": [], "transform": "digits_only" }
                }
            }"#,
        )
        .unwrap();

        let merged = base.merge(&patch);
        assert_eq!(merged.text_fields["vin"].transform, Some(Transform::DigitsOnly));
        assert_eq!(merged.meta.name.as_deref(), Some("patched"));
        assert_eq!(merged.meta.version.as_deref(), Some("1.0"));
        assert_eq!(
            merged.meta.notes,
            vec!["tuned for CCC".to_string(), "office overrides".to_string()]
        );
        assert!(merged.meta.merged_at.is_some());
    }

    #[test]
    fn test_merge_indexes_checkbox_rules_by_field() {
        let base = base_rules();
        let patch = MappingRules::from_json(
            r#"{
                "checkbox_rules": {
                    "rules": [
                        { "field": "4DR", "match_any": ["Four\\s+Door"] },
                        { "field": "PS", "match_any": ["Power\\s+Steering"] }
                    ]
                }
            }"#,
        )
        .unwrap();

        let merged = base.merge(&patch);
        assert_eq!(merged.checkbox_rules.rules.len(), 2);
        let four_dr = &merged.checkbox_rules.rules[0];
        assert_eq!(four_dr.field, "4DR");
        assert_eq!(four_dr.match_any.len(), 2);
        assert!(merged.checkbox_rules.prefers_4dr());
    }

    #[test]
    fn test_merge_keeps_base_zip_selection_when_patch_silent() {
        let base = base_rules();
        let merged = base.merge(&MappingRules::default());
        assert_eq!(
            merged.post_processing.zip_selection,
            Some(ZipSelection::FirstFiveDigits)
        );
    }

    #[test]
    fn test_load_or_fallback_on_missing_file() {
        let rules = MappingRules::load_or_fallback("/nonexistent/bcif-mapping.json");
        assert_eq!(rules.meta.name.as_deref(), Some("bcif_minimal_fallback"));
        assert_eq!(rules.text_fields.len(), 3);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let rules = base_rules();
        rules.save(&path).unwrap();

        let reloaded = MappingRules::from_file(&path).unwrap();
        assert_eq!(reloaded, rules);
    }
}

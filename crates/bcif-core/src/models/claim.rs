//! The reconciled claim: one merged, backfilled record per document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Fixed vehicle-condition ratings on the BCIF 0-3 scale.
///
/// Ratings are not extracted from CCC estimates; every claim carries these
/// defaults until a user edits them downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    pub engine: u8,
    pub transmission: u8,
    pub paint: u8,
    pub front_tires: u8,
    pub rear_tires: u8,
    pub body_glass: u8,
    pub interior: u8,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            engine: 2,
            transmission: 2,
            paint: 1,
            front_tires: 2,
            rear_tires: 2,
            body_glass: 1,
            interior: 2,
        }
    }
}

impl Conditions {
    /// Ratings keyed by internal condition name, in declaration order.
    pub fn entries(&self) -> [(&'static str, u8); 7] {
        [
            ("engine", self.engine),
            ("transmission", self.transmission),
            ("paint", self.paint),
            ("front_tires", self.front_tires),
            ("rear_tires", self.rear_tires),
            ("body_glass", self.body_glass),
            ("interior", self.interior),
        ]
    }
}

/// How the two extraction passes combined for this claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeMetadata {
    /// Overall confidence over the merged record, 0..=100.
    pub confidence: u8,
    pub pattern_confidence: u8,
    pub zone_confidence: u8,
    pub pattern_fields_found: usize,
    pub zone_fields_found: usize,
}

/// The merged record both the BCIF mapper and any UI consume.
///
/// Created once per uploaded document and treated as immutable afterwards;
/// processing a new document replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciledClaim {
    /// Canonical field name -> non-empty trimmed value.
    pub text_fields: BTreeMap<String, String>,
    /// Checkbox tokens, taken solely from the pattern pass.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub checkbox_fields: BTreeSet<String>,
    /// Union of zone-detected options and pattern checkbox tokens.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub vehicle_options: BTreeSet<String>,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub packages: BTreeSet<String>,
    #[serde(default)]
    pub metadata: MergeMetadata,
}

impl ReconciledClaim {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.text_fields.get(name).map(String::as_str)
    }

    /// True when the field is absent or holds only whitespace.
    pub fn is_blank(&self, name: &str) -> bool {
        self.field(name).map_or(true, |v| v.trim().is_empty())
    }

    /// Set a field, trimming the value; whitespace-only values are dropped.
    pub fn set_field(&mut self, name: impl Into<String>, value: &str) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.text_fields.insert(name.into(), trimmed.to_string());
        }
    }
}

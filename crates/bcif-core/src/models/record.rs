//! Intermediate records produced by the individual extraction passes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Completeness metadata for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Percentage of expected fields found, always in 0..=100.
    pub confidence: u8,
    pub fields_found: usize,
    pub total_fields: usize,
}

impl RecordMetadata {
    pub fn from_counts(fields_found: usize, total_fields: usize) -> Self {
        Self {
            confidence: confidence_pct(fields_found, total_fields),
            fields_found,
            total_fields,
        }
    }
}

/// `round(100 * found / expected)`, clamped to 0..=100 and defined as 0 when
/// nothing was expected.
pub fn confidence_pct(found: usize, expected: usize) -> u8 {
    if expected == 0 {
        return 0;
    }
    let pct = (found as f64 / expected as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Output of a single extraction pass.
///
/// For the pattern pass `options` holds the present checkbox tokens; for the
/// zone pass it holds normalized vehicle-option tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub text_fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub options: BTreeSet<String>,
    #[serde(default)]
    pub metadata: RecordMetadata,
}

impl ExtractedRecord {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.text_fields.get(name).map(String::as_str)
    }

    /// Record a field value, trimming it first. Whitespace-only values are
    /// dropped so a field is either present and non-empty or absent.
    pub fn insert_trimmed(&mut self, name: impl Into<String>, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.text_fields.insert(name.into(), trimmed.to_string());
        true
    }
}

//! Built-in mapping rule presets.

use tracing::warn;

use super::schema::PatternFieldSpec;
use super::MappingRules;
use crate::fields;

/// Default CCC mapping shipped with the crate.
const DEFAULT_MAPPING: &str = include_str!("../../../../rules/bcif-mapping.json");

/// The full built-in rule set, used when no rule file is configured.
pub fn default_rules() -> MappingRules {
    match serde_json::from_str(DEFAULT_MAPPING) {
        Ok(rules) => rules,
        Err(err) => {
            // Embedded JSON, so this only fires on a broken build.
            warn!("Embedded default mapping is invalid ({}), using minimal fallback", err);
            fallback_rules()
        }
    }
}

/// Minimal rule subset covering the three most critical fields. Used when an
/// explicitly configured rule file cannot be loaded: extraction degrades
/// instead of aborting.
pub fn fallback_rules() -> MappingRules {
    let mut rules = MappingRules::default();
    rules.text_fields.insert(
        fields::CLAIM_NUMBER.to_string(),
        PatternFieldSpec {
            patterns: vec![r"Claim #:\s*([A-Z0-9\-\/]+)".to_string()],
            ..Default::default()
        },
    );
    rules.text_fields.insert(
        fields::VIN.to_string(),
        PatternFieldSpec {
            patterns: vec![r"VIN:\s*([A-HJ-NPR-Z0-9]{11,17})".to_string()],
            ..Default::default()
        },
    );
    rules.text_fields.insert(
        fields::YEAR.to_string(),
        PatternFieldSpec {
            patterns: vec![r"(\d{4})\s+[A-Z]{3,}\s+[A-Za-z0-9]+".to_string()],
            ..Default::default()
        },
    );
    rules.meta.name = Some("bcif_minimal_fallback".to_string());
    rules
}

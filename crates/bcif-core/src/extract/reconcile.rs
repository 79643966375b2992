//! Merges the two extraction passes into one claim and backfills
//! required fields.

use chrono::{Datelike, Local, Utc};
use tracing::debug;

use crate::fields;
use crate::models::record::confidence_pct;
use crate::models::{Conditions, ExtractedRecord, MergeMetadata, ReconciledClaim};

use super::looks_like_default;
use super::zones::{self, OptionCategory};

/// Combines pattern and zone extraction with field-level precedence.
#[derive(Debug, Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Reconciler
    }

    /// Zone fields form the base and pattern fields overwrite them on
    /// conflict. Checkbox fields come solely from the pattern pass; zone
    /// option hits only join the free-text option union.
    pub fn merge(&self, pattern: ExtractedRecord, zone: ExtractedRecord) -> ReconciledClaim {
        let pattern_meta = pattern.metadata;
        let zone_confidence = zone.metadata.confidence;
        let zone_fields_found = zone.text_fields.len();

        let mut claim = ReconciledClaim {
            text_fields: zone.text_fields,
            ..ReconciledClaim::default()
        };
        for (name, value) in pattern.text_fields {
            claim.text_fields.insert(name, value);
        }

        claim.vehicle_options = zone.options;
        claim.vehicle_options.extend(pattern.options.iter().cloned());
        claim.checkbox_fields = pattern.options;

        cleanup_vehicle_identifiers(&mut claim);
        backfill_defaults(&mut claim);
        claim.conditions = Conditions::default();

        let found = claim
            .text_fields
            .values()
            .filter(|value| !looks_like_default(value))
            .count();
        let declared_zones = zones::FIELD_ZONES.len() + OptionCategory::ALL.len();
        claim.metadata = MergeMetadata {
            confidence: confidence_pct(found, declared_zones),
            pattern_confidence: pattern_meta.confidence,
            zone_confidence,
            pattern_fields_found: pattern_meta.fields_found,
            zone_fields_found,
        };
        claim
    }
}

/// Restrict the VIN to its legal alphabet (no I, O, Q) and the odometer
/// to digits. A value emptied by cleanup is removed so backfill can
/// replace it.
fn cleanup_vehicle_identifiers(claim: &mut ReconciledClaim) {
    if let Some(vin) = claim.text_fields.get(fields::VIN) {
        let cleaned: String = vin
            .to_uppercase()
            .chars()
            .filter(|c| matches!(c, 'A'..='H' | 'J'..='N' | 'P' | 'R'..='Z' | '0'..='9'))
            .collect();
        if cleaned.is_empty() {
            claim.text_fields.remove(fields::VIN);
        } else {
            claim.text_fields.insert(fields::VIN.to_string(), cleaned);
        }
    }

    if let Some(odometer) = claim.text_fields.get(fields::ODOMETER) {
        let digits: String = odometer.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            claim.text_fields.remove(fields::ODOMETER);
        } else {
            claim.text_fields.insert(fields::ODOMETER.to_string(), digits);
        }
    }
}

/// Fill every still-blank required field with its default so downstream
/// consumers always see a complete record. Synthetic claim and policy
/// numbers carry a timestamp suffix so they stay unique and recognizable.
fn backfill_defaults(claim: &mut ReconciledClaim) {
    let now = Local::now();
    let today = format!("{}/{}/{}", now.month(), now.day(), now.year());
    let stamp = timestamp_suffix();

    let insured_first = claim.field(fields::INSURED_FIRST_NAME).map(str::to_string);
    let insured_last = claim.field(fields::INSURED_LAST_NAME).map(str::to_string);

    let defaults = [
        (fields::CLAIM_NUMBER, format!("CLM-{stamp}")),
        (fields::POLICY_NUMBER, format!("POL-{stamp}")),
        (fields::YEAR, "2020".to_string()),
        (fields::MAKE, "Unknown".to_string()),
        (fields::MODEL, "Vehicle".to_string()),
        (fields::VIN, "1HGBH41JXMN109186".to_string()),
        (fields::INSURED_FIRST_NAME, "John".to_string()),
        (fields::INSURED_LAST_NAME, "Doe".to_string()),
        (
            fields::OWNER_FIRST_NAME,
            insured_first.unwrap_or_else(|| "John".to_string()),
        ),
        (
            fields::OWNER_LAST_NAME,
            insured_last.unwrap_or_else(|| "Doe".to_string()),
        ),
        (fields::ADJUSTER_FIRST_NAME, "Claims".to_string()),
        (fields::ADJUSTER_LAST_NAME, "Adjuster".to_string()),
        (fields::ADJUSTER_EMAIL, "adjuster@insurance.com".to_string()),
        (fields::ADJUSTER_CONTACT, "555-000-0000".to_string()),
        (fields::LOSS_DATE, today),
        (fields::LOSS_ZIP_CODE, "27101".to_string()),
        (fields::LOSS_STATE, "NC".to_string()),
        (fields::ODOMETER, "50000".to_string()),
    ];

    for (name, default) in defaults {
        if claim.is_blank(name) {
            debug!("Backfilled {} with \"{}\"", name, default);
            claim.set_field(name, &default);
        }
    }
}

fn timestamp_suffix() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    millis[millis.len().saturating_sub(6)..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::RecordMetadata;
    use pretty_assertions::assert_eq;

    fn record_with(fields: &[(&str, &str)], options: &[&str]) -> ExtractedRecord {
        let mut record = ExtractedRecord::default();
        for (name, value) in fields {
            record.insert_trimmed(*name, value);
        }
        for option in options {
            record.options.insert(option.to_string());
        }
        record.metadata = RecordMetadata::from_counts(fields.len() + options.len(), 40);
        record
    }

    #[test]
    fn test_pattern_value_wins_on_conflict() {
        let pattern = record_with(&[(fields::CLAIM_NUMBER, "664723-GQ-1")], &[]);
        let zone = record_with(
            &[(fields::CLAIM_NUMBER, "664723-GO-1"), (fields::TRIM, "LT1")],
            &[],
        );

        let claim = Reconciler::new().merge(pattern, zone);
        assert_eq!(claim.field(fields::CLAIM_NUMBER), Some("664723-GQ-1"));
        assert_eq!(claim.field(fields::TRIM), Some("LT1"));
    }

    #[test]
    fn test_options_union_and_checkboxes_from_pattern_only() {
        let pattern = record_with(&[], &["4DR", "PS"]);
        let zone = record_with(&[], &["power_steering", "am_radio"]);

        let claim = Reconciler::new().merge(pattern, zone);
        assert!(claim.vehicle_options.contains("4DR"));
        assert!(claim.vehicle_options.contains("power_steering"));
        assert!(claim.vehicle_options.contains("am_radio"));

        assert!(claim.checkbox_fields.contains("4DR"));
        assert!(claim.checkbox_fields.contains("PS"));
        assert!(!claim.checkbox_fields.contains("am_radio"));
    }

    #[test]
    fn test_backfill_synthesizes_recognizable_identifiers() {
        let claim = Reconciler::new().merge(ExtractedRecord::default(), ExtractedRecord::default());

        let claim_number = claim.field(fields::CLAIM_NUMBER).unwrap();
        assert!(claim_number.starts_with("CLM-"));
        assert_eq!(claim_number.len(), 10);

        let policy_number = claim.field(fields::POLICY_NUMBER).unwrap();
        assert!(policy_number.starts_with("POL-"));

        assert_eq!(claim.field(fields::VIN), Some("1HGBH41JXMN109186"));
        assert_eq!(claim.field(fields::INSURED_FIRST_NAME), Some("John"));
        assert_eq!(claim.field(fields::INSURED_LAST_NAME), Some("Doe"));
        assert_eq!(claim.field(fields::LOSS_ZIP_CODE), Some("27101"));
        assert_eq!(claim.field(fields::LOSS_STATE), Some("NC"));
        assert_eq!(claim.field(fields::ODOMETER), Some("50000"));
    }

    #[test]
    fn test_backfill_does_not_touch_extracted_values() {
        let pattern = record_with(
            &[
                (fields::CLAIM_NUMBER, "664723-GQ-1"),
                (fields::INSURED_FIRST_NAME, "Jessica"),
                (fields::INSURED_LAST_NAME, "Alston"),
            ],
            &[],
        );
        let claim = Reconciler::new().merge(pattern, ExtractedRecord::default());

        assert_eq!(claim.field(fields::CLAIM_NUMBER), Some("664723-GQ-1"));
        // owner falls back to the extracted insured name, not "John"/"Doe"
        assert_eq!(claim.field(fields::OWNER_FIRST_NAME), Some("Jessica"));
        assert_eq!(claim.field(fields::OWNER_LAST_NAME), Some("Alston"));
    }

    #[test]
    fn test_backfill_is_idempotent() {
        let mut claim =
            Reconciler::new().merge(ExtractedRecord::default(), ExtractedRecord::default());
        let snapshot = claim.clone();
        backfill_defaults(&mut claim);
        assert_eq!(claim, snapshot);
    }

    #[test]
    fn test_vin_and_odometer_cleanup() {
        let pattern = record_with(
            &[(fields::VIN, "3gnaxheg0sl290421"), (fields::ODOMETER, "6,826 mi")],
            &[],
        );
        let claim = Reconciler::new().merge(pattern, ExtractedRecord::default());

        assert_eq!(claim.field(fields::VIN), Some("3GNAXHEG0SL290421"));
        assert_eq!(claim.field(fields::ODOMETER), Some("6826"));
    }

    #[test]
    fn test_conditions_always_attached_with_scale_defaults() {
        let claim = Reconciler::new().merge(ExtractedRecord::default(), ExtractedRecord::default());
        assert_eq!(claim.conditions.engine, 2);
        assert_eq!(claim.conditions.paint, 1);
        assert_eq!(claim.conditions.body_glass, 1);
        assert_eq!(claim.conditions.interior, 2);
    }

    #[test]
    fn test_metadata_excludes_default_sentinels_from_confidence() {
        let claim = Reconciler::new().merge(ExtractedRecord::default(), ExtractedRecord::default());

        // 18 backfilled fields, 6 of which carry sentinel substrings
        assert_eq!(claim.metadata.confidence, 46);
        assert_eq!(claim.metadata.pattern_fields_found, 0);
        assert_eq!(claim.metadata.zone_fields_found, 0);
    }
}

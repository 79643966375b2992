//! Claim-to-form mapping.
//!
//! Translates a [`ReconciledClaim`] into the flat field map a fillable BCIF
//! form understands: printed labels for text fields, two-letter tokens for
//! checkboxes. The mapper only renames and routes values; it never invents
//! them.

pub mod tables;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fields::normalize_option;
use crate::models::ReconciledClaim;

pub use tables::CheckboxCategory;

/// Flat form-field map keyed by the BCIF form's own vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BcifMapping {
    #[serde(default)]
    pub text_fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub checkbox_fields: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub condition_ratings: BTreeMap<String, u8>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub packages: BTreeMap<String, bool>,
}

impl BcifMapping {
    /// Number of checkboxes switched on.
    pub fn checked_count(&self) -> usize {
        self.checkbox_fields.values().filter(|on| **on).count()
    }
}

/// Outcome of [`validate`]: hard errors block form filling, warnings do not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Renames reconciled claim fields into the form's vocabulary.
#[derive(Debug, Default)]
pub struct BcifMapper;

impl BcifMapper {
    pub fn new() -> Self {
        BcifMapper
    }

    pub fn map(&self, claim: &ReconciledClaim) -> BcifMapping {
        let mut mapping = BcifMapping::default();

        for (internal, external) in tables::TEXT_FIELD_NAMES {
            if let Some(value) = claim.field(internal) {
                mapping
                    .text_fields
                    .insert((*external).to_string(), value.to_string());
            }
        }

        // Zone options carry free-form names and go through the category
        // tables; pattern checkboxes already hold form tokens.
        for option in &claim.vehicle_options {
            match tables::checkbox_token(&normalize_option(option)) {
                Some(token) => {
                    mapping.checkbox_fields.insert(token.to_string(), true);
                }
                None => debug!("Unmapped vehicle option: {}", option),
            }
        }
        for token in &claim.checkbox_fields {
            mapping.checkbox_fields.insert(token.clone(), true);
        }

        for (key, rating) in claim.conditions.entries() {
            if let Some(label) = tables::label_for(tables::CONDITION_LABELS, key) {
                mapping.condition_ratings.insert(label.to_string(), rating);
            }
        }

        for package in &claim.packages {
            if let Some(label) = tables::label_for(tables::PACKAGE_LABELS, package) {
                mapping.packages.insert(label.to_string(), true);
            }
        }

        debug!(
            "Mapped claim to form: {} text fields, {} checkboxes",
            mapping.text_fields.len(),
            mapping.checked_count()
        );
        mapping
    }
}

const REQUIRED_FIELDS: [&str; 2] = ["Claim Number", "Insured Last Name"];
const VEHICLE_FIELDS: [&str; 3] = ["Year", "Make", "Model"];

/// Checks a mapping before it is sent to a form-filling service. Missing
/// identity fields are errors; missing vehicle basics only warn.
pub fn validate(mapping: &BcifMapping) -> MappingValidation {
    let mut validation = MappingValidation {
        valid: true,
        ..MappingValidation::default()
    };

    for field in REQUIRED_FIELDS {
        let blank = mapping
            .text_fields
            .get(field)
            .map_or(true, |value| value.trim().is_empty());
        if blank {
            validation.valid = false;
            validation.errors.push(format!("Required field missing: {}", field));
        }
    }

    for field in VEHICLE_FIELDS {
        let blank = mapping
            .text_fields
            .get(field)
            .map_or(true, |value| value.trim().is_empty());
        if blank {
            validation
                .warnings
                .push(format!("Vehicle field missing: {}", field));
        }
    }

    validation
}

/// Renders the plain-text stand-in used when no form-filling service is
/// reachable.
pub fn render_summary(mapping: &BcifMapping) -> String {
    let mut out = String::new();
    out.push_str("CCC BCIF Extraction Results\n");
    out.push_str(&"=".repeat(30));
    out.push_str("\n\n");

    out.push_str("Text Fields:\n");
    for (field, value) in &mapping.text_fields {
        out.push_str(&format!("{}: {}\n", field, value));
    }

    out.push_str("\nSelected Options:\n");
    for (token, on) in &mapping.checkbox_fields {
        if *on {
            out.push_str(&format!("CHECKED: {}\n", token));
        }
    }

    out.push_str("\nCondition Ratings:\n");
    for (label, rating) in &mapping.condition_ratings {
        out.push_str(&format!("{}: {}\n", label, rating));
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Conditions;

    fn claim_with(fields: &[(&str, &str)]) -> ReconciledClaim {
        let mut claim = ReconciledClaim::default();
        for (name, value) in fields {
            claim.set_field(*name, value);
        }
        claim
    }

    #[test]
    fn test_map_renames_text_fields() {
        let claim = claim_with(&[
            ("claim_number", "664723-GQ-1"),
            ("vin", "3GNAXHEG0SL290421"),
            ("loss_date", "8/21/2026"),
        ]);

        let mapping = BcifMapper::new().map(&claim);

        assert_eq!(
            mapping.text_fields.get("Claim Number").map(String::as_str),
            Some("664723-GQ-1")
        );
        assert_eq!(
            mapping.text_fields.get("VIN").map(String::as_str),
            Some("3GNAXHEG0SL290421")
        );
        assert_eq!(
            mapping
                .text_fields
                .get("Date of loss (mm/dd/yyyy)")
                .map(String::as_str),
            Some("8/21/2026")
        );
        assert!(!mapping.text_fields.contains_key("Year"));
    }

    #[test]
    fn test_map_routes_options_through_categories() {
        let mut claim = ReconciledClaim::default();
        claim.vehicle_options.insert("power_steering".to_string());
        claim.vehicle_options.insert("Keyless Entry".to_string());
        claim.vehicle_options.insert("Teleporter".to_string());

        let mapping = BcifMapper::new().map(&claim);

        assert_eq!(mapping.checkbox_fields.get("PS"), Some(&true));
        assert_eq!(mapping.checkbox_fields.get("KE"), Some(&true));
        assert_eq!(mapping.checkbox_fields.len(), 2);
    }

    #[test]
    fn test_map_carries_pattern_tokens_directly() {
        let mut claim = ReconciledClaim::default();
        claim.checkbox_fields.insert("4DR".to_string());
        claim.checkbox_fields.insert("AC".to_string());

        let mapping = BcifMapper::new().map(&claim);

        assert_eq!(mapping.checkbox_fields.get("4DR"), Some(&true));
        assert_eq!(mapping.checkbox_fields.get("AC"), Some(&true));
    }

    #[test]
    fn test_map_copies_conditions_and_packages() {
        let mut claim = ReconciledClaim::default();
        claim.conditions = Conditions::default();
        claim.packages.insert("package_1".to_string());
        claim.packages.insert("package_9".to_string());

        let mapping = BcifMapper::new().map(&claim);

        assert_eq!(mapping.condition_ratings.get("Engine"), Some(&2));
        assert_eq!(mapping.condition_ratings.get("Body/Glass"), Some(&1));
        assert_eq!(mapping.condition_ratings.len(), 7);
        assert_eq!(mapping.packages.get("Package 1"), Some(&true));
        assert_eq!(mapping.packages.len(), 1);
    }

    #[test]
    fn test_validate_flags_missing_identity_fields() {
        let mapping = BcifMapper::new().map(&claim_with(&[("year", "2025")]));

        let validation = validate(&mapping);

        assert!(!validation.valid);
        assert_eq!(
            validation.errors,
            vec![
                "Required field missing: Claim Number".to_string(),
                "Required field missing: Insured Last Name".to_string(),
            ]
        );
        assert_eq!(
            validation.warnings,
            vec![
                "Vehicle field missing: Make".to_string(),
                "Vehicle field missing: Model".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_passes_complete_mapping() {
        let mapping = BcifMapper::new().map(&claim_with(&[
            ("claim_number", "CLM-123456"),
            ("insured_last_name", "Alston"),
            ("year", "2025"),
            ("make", "Chevrolet"),
            ("model", "Equinox"),
        ]));

        let validation = validate(&mapping);

        assert!(validation.valid);
        assert!(validation.errors.is_empty());
        assert!(validation.warnings.is_empty());
    }

    #[test]
    fn test_validate_treats_blank_as_missing() {
        let mut mapping = BcifMapper::new().map(&claim_with(&[("insured_last_name", "Alston")]));
        mapping
            .text_fields
            .insert("Claim Number".to_string(), "  ".to_string());

        let validation = validate(&mapping);

        assert!(!validation.valid);
        assert_eq!(
            validation.errors,
            vec!["Required field missing: Claim Number".to_string()]
        );
    }

    #[test]
    fn test_render_summary_layout() {
        let mut claim = claim_with(&[("claim_number", "CLM-123456")]);
        claim.checkbox_fields.insert("4DR".to_string());
        claim.conditions = Conditions::default();
        let mapping = BcifMapper::new().map(&claim);

        let summary = render_summary(&mapping);

        assert!(summary.starts_with("CCC BCIF Extraction Results\n"));
        assert!(summary.contains(&"=".repeat(30)));
        assert!(summary.contains("Claim Number: CLM-123456\n"));
        assert!(summary.contains("CHECKED: 4DR\n"));
        assert!(summary.contains("Interior: 2\n"));
    }
}

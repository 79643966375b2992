//! Canonical internal field names.
//!
//! Both extraction passes and the BCIF mapper speak this vocabulary; only
//! the mapper translates it into the external form's field names.

pub const OFFICE_ID: &str = "office_id";
pub const COMPANY: &str = "company";
pub const CLAIM_NUMBER: &str = "claim_number";
pub const POLICY_NUMBER: &str = "policy_number";
pub const VIN: &str = "vin";

pub const YEAR: &str = "year";
pub const MAKE: &str = "make";
pub const MODEL: &str = "model";
pub const TRIM: &str = "trim";
pub const CYLINDERS: &str = "cylinders";
pub const DISPLACEMENT: &str = "displacement";

pub const ADJUSTER_FIRST_NAME: &str = "adjuster_first_name";
pub const ADJUSTER_LAST_NAME: &str = "adjuster_last_name";
pub const ADJUSTER_EMAIL: &str = "adjuster_email";
pub const ADJUSTER_CONTACT: &str = "adjuster_contact";
pub const INSURED_FIRST_NAME: &str = "insured_first_name";
pub const INSURED_LAST_NAME: &str = "insured_last_name";
pub const OWNER_FIRST_NAME: &str = "owner_first_name";
pub const OWNER_LAST_NAME: &str = "owner_last_name";

pub const LOSS_ZIP_CODE: &str = "loss_zip_code";
pub const LOSS_STATE: &str = "loss_state";
pub const LOSS_DATE: &str = "loss_date";
pub const ODOMETER: &str = "odometer";

/// Normalize an option keyword into its canonical token: lowercase,
/// non-alphanumerics to underscores, runs collapsed, edges trimmed.
pub fn normalize_option(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            token.push(ch.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            token.push('_');
            last_was_sep = true;
        }
    }
    token.trim_matches('_').to_string()
}

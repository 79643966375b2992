//! Data models for extraction records and reconciled claims.

pub mod claim;
pub mod record;

pub use claim::{Conditions, MergeMetadata, ReconciledClaim};
pub use record::{ExtractedRecord, RecordMetadata};

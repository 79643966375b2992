//! Core library for CCC estimate extraction.
//!
//! This crate provides:
//! - Positioned-token document model with a pluggable tokenizer seam
//! - Dual-pass field extraction (regex patterns + coordinate zones)
//! - Reconciliation into a single backfilled claim record
//! - Mapping-rule schema with JSON loading and deep merge
//! - BCIF form field mapping and validation

pub mod document;
pub mod error;
pub mod extract;
pub mod fields;
pub mod mapping;
pub mod models;
pub mod pdf;
pub mod rules;

pub use document::{DocumentPage, PositionedToken, TokenDocument, Tokenizer};
pub use error::{BcifError, Result, RulesError, TokenizeError};
pub use extract::{EstimateExtractor, PatternExtractor, Reconciler, ZoneExtractor};
pub use mapping::{BcifMapper, BcifMapping, MappingValidation};
pub use models::{Conditions, ExtractedRecord, MergeMetadata, ReconciledClaim, RecordMetadata};
pub use pdf::PdfTextTokenizer;
pub use rules::MappingRules;

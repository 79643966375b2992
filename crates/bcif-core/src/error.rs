//! Error types for the bcif-core library.

use thiserror::Error;

/// Main error type for the bcif library.
#[derive(Error, Debug)]
pub enum BcifError {
    /// Mapping rule set error.
    #[error("rules error: {0}")]
    Rules(#[from] RulesError),

    /// Document tokenization error.
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to loading and merging mapping rule sets.
#[derive(Error, Debug)]
pub enum RulesError {
    /// Failed to read the rule file.
    #[error("failed to read rule file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse the rule file as JSON.
    #[error("failed to parse rule file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors related to turning raw document bytes into positioned tokens.
///
/// These are the only extraction errors that abort a document: a single bad
/// regex pattern or empty zone is skipped and logged, never surfaced here.
#[derive(Error, Debug)]
pub enum TokenizeError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The document is encrypted and cannot be processed.
    #[error("document is encrypted")]
    Encrypted,

    /// The document is empty or has no pages.
    #[error("document has no pages")]
    NoPages,

    /// Failed to parse a positioned-token dump.
    #[error("invalid token dump: {0}")]
    InvalidDump(#[from] serde_json::Error),
}

/// Result type for the bcif library.
pub type Result<T> = std::result::Result<T, BcifError>;

//! Estimate extraction: two independent passes over one document,
//! reconciled into a single claim.
//!
//! The pattern pass reads the full text through configurable regex rules;
//! the zone pass reads positioned tokens through a static coordinate map.
//! Each survives the failure mode that blinds the other (phrasing drift
//! for patterns, layout drift for zones), and the reconciler merges them
//! with pattern precedence.

mod pattern;
mod reconcile;
mod zone;
pub mod zones;

pub use pattern::PatternExtractor;
pub use reconcile::Reconciler;
pub use zone::ZoneExtractor;

use crate::document::TokenDocument;
use crate::models::ReconciledClaim;
use crate::rules::MappingRules;

/// Substrings marking a value as a backfilled default rather than a real
/// extraction. Such values never count toward confidence.
pub(crate) const DEFAULT_SENTINELS: &[&str] = &["Unknown", "Doe", "CLM-", "POL-", "adjuster@"];

pub(crate) fn looks_like_default(value: &str) -> bool {
    DEFAULT_SENTINELS
        .iter()
        .any(|sentinel| value.contains(sentinel))
}

/// Runs both extraction passes against one document and reconciles them.
pub struct EstimateExtractor<'a> {
    pattern: PatternExtractor<'a>,
    zone: ZoneExtractor,
    reconciler: Reconciler,
}

impl<'a> EstimateExtractor<'a> {
    pub fn new(rules: &'a MappingRules) -> Self {
        EstimateExtractor {
            pattern: PatternExtractor::new(rules),
            zone: ZoneExtractor::new(),
            reconciler: Reconciler::new(),
        }
    }

    pub fn extract(&self, doc: &TokenDocument) -> ReconciledClaim {
        let pattern = self.pattern.extract(&doc.full_text);
        let zone = self.zone.extract(doc);
        self.reconciler.merge(pattern, zone)
    }

    /// Pattern-only path for callers holding plain text without
    /// coordinates.
    pub fn extract_from_text(&self, text: &str) -> ReconciledClaim {
        let doc = TokenDocument::from_text(text);
        self.extract(&doc)
    }
}

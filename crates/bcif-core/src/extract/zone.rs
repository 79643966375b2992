//! Coordinate-zone extraction over positioned tokens.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::document::{PositionedToken, TokenDocument};
use crate::fields::normalize_option;
use crate::models::{ExtractedRecord, RecordMetadata};

use super::looks_like_default;
use super::zones::{self, OptionCategory, Zone};

/// Tokens within this many y-units are treated as one visual line.
const SAME_LINE_TOLERANCE: f32 = 5.0;

lazy_static! {
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").unwrap();
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^\w\s\-.@/]").unwrap();
}

/// Extracts fields by spatial position, independent of text phrasing.
/// Brittle to layout drift, so the reconciler treats its output as the
/// lower-precedence base.
#[derive(Debug, Default)]
pub struct ZoneExtractor;

impl ZoneExtractor {
    pub fn new() -> Self {
        ZoneExtractor
    }

    pub fn extract(&self, doc: &TokenDocument) -> ExtractedRecord {
        let mut record = ExtractedRecord::default();

        for field_zone in zones::FIELD_ZONES {
            let Some(text) = zone_text(doc, &field_zone.zone) else {
                continue;
            };
            let value = field_zone
                .parse
                .and_then(|parse| parse.apply(&text))
                .unwrap_or(text);
            if record.insert_trimmed(field_zone.field, &value) {
                debug!("Zone {}: \"{}\"", field_zone.field, value.trim());
            }
        }

        scan_option_zones(doc, &mut record);

        let found = record
            .text_fields
            .values()
            .filter(|value| !looks_like_default(value))
            .count();
        let declared_zones = zones::FIELD_ZONES.len() + OptionCategory::ALL.len();
        record.metadata = RecordMetadata::from_counts(found, declared_zones);
        record
    }
}

/// Reconstruct the readable text inside a zone, or `None` when no token
/// lands in it.
fn zone_text(doc: &TokenDocument, zone: &Zone) -> Option<String> {
    let page = doc.page(zone.page)?;
    let mut hits: Vec<&PositionedToken> =
        page.tokens.iter().filter(|token| zone.contains(token)).collect();
    if hits.is_empty() {
        return None;
    }

    order_for_reading(&mut hits);
    let joined = hits
        .iter()
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned = clean_zone_text(&joined);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Order an unsegmented token soup into reading order: lines top to
/// bottom (descending y, 5-unit tolerance), tokens left to right within
/// a line.
fn order_for_reading(tokens: &mut [&PositionedToken]) {
    tokens.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut start = 0;
    while start < tokens.len() {
        let line_y = tokens[start].y;
        let mut end = start + 1;
        while end < tokens.len() && (line_y - tokens[end].y).abs() <= SAME_LINE_TOLERANCE {
            end += 1;
        }
        tokens[start..end].sort_by(|a, b| a.x.total_cmp(&b.x));
        start = end;
    }
}

/// Collapse whitespace runs and drop characters outside the conservative
/// allow-list (word characters, space, hyphen, period, @, slash).
fn clean_zone_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(text, " ");
    DISALLOWED_CHARS.replace_all(&collapsed, "").trim().to_string()
}

fn scan_option_zones(doc: &TokenDocument, record: &mut ExtractedRecord) {
    for category in OptionCategory::ALL {
        let Some(text) = zone_text(doc, &category.zone()) else {
            continue;
        };
        let zone_text_lower = text.to_lowercase();

        for keyword in category.keywords() {
            let keyword_lower = keyword.to_lowercase();
            if zone_text_lower.contains(&keyword_lower)
                || fuzzy_match(&keyword_lower, &zone_text_lower)
            {
                record.options.insert(normalize_option(keyword));
                debug!("Found option {} in {} zone", keyword, category.name());
            }
        }
    }
}

/// Abbreviation-aware keyword match. A keyword with an abbreviation table
/// entry matches through its abbreviations only; otherwise every word of
/// the keyword must appear somewhere in the zone text.
fn fuzzy_match(keyword: &str, text: &str) -> bool {
    if let Some(abbreviations) = zones::abbreviations_for(keyword) {
        return abbreviations.iter().any(|abbrev| text.contains(abbrev));
    }
    keyword.split(' ').all(|word| text.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use pretty_assertions::assert_eq;

    fn doc_from(tokens: Vec<PositionedToken>) -> TokenDocument {
        TokenDocument::from_tokens(tokens)
    }

    #[test]
    fn test_same_line_tokens_order_left_to_right() {
        let mut tokens = vec![
            PositionedToken::new("GQ-1", 1, 480.0, 562.0),
            PositionedToken::new("664723-", 1, 450.0, 560.0),
        ];
        let mut refs: Vec<&PositionedToken> = tokens.iter().collect();
        order_for_reading(&mut refs);
        let texts: Vec<&str> = refs.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["664723-", "GQ-1"]);

        // and the higher line comes first when y differs by more than 5
        tokens.push(PositionedToken::new("Claim", 1, 400.0, 570.0));
        let mut refs: Vec<&PositionedToken> = tokens.iter().collect();
        order_for_reading(&mut refs);
        let texts: Vec<&str> = refs.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Claim", "664723-", "GQ-1"]);
    }

    #[test]
    fn test_three_tokens_within_tolerance_sort_by_x() {
        let tokens = vec![
            PositionedToken::new("c", 1, 300.0, 560.0),
            PositionedToken::new("a", 1, 100.0, 564.0),
            PositionedToken::new("b", 1, 200.0, 562.0),
        ];
        let mut refs: Vec<&PositionedToken> = tokens.iter().collect();
        order_for_reading(&mut refs);
        let texts: Vec<&str> = refs.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_zone_field_extraction_with_cleanup() {
        let doc = doc_from(vec![
            PositionedToken::new("664723-GQ-1*", 1, 450.0, 560.0),
            PositionedToken::new("elsewhere", 1, 10.0, 10.0),
        ]);
        let record = ZoneExtractor::new().extract(&doc);
        assert_eq!(record.field(fields::CLAIM_NUMBER), Some("664723-GQ-1"));
    }

    #[test]
    fn test_empty_zone_produces_no_entry() {
        let doc = doc_from(vec![PositionedToken::new("stray", 1, 10.0, 10.0)]);
        let record = ZoneExtractor::new().extract(&doc);
        assert_eq!(record.field(fields::CLAIM_NUMBER), None);
        assert!(!record.text_fields.contains_key(fields::CLAIM_NUMBER));
    }

    #[test]
    fn test_vehicle_line_zone_parses_split_fields() {
        // the year/make/model zones overlap the same vehicle line and each
        // parse pulls out its own word
        let doc = doc_from(vec![PositionedToken::new(
            "2025 CHEV Equinox LT1",
            1,
            60.0,
            380.0,
        )]);
        let record = ZoneExtractor::new().extract(&doc);
        assert_eq!(record.field(fields::YEAR), Some("2025"));
        assert_eq!(record.field(fields::MAKE), Some("CHEV"));
        assert_eq!(record.field(fields::MODEL), Some("Equinox"));
    }

    #[test]
    fn test_option_zone_direct_and_abbreviated_matches() {
        let doc = doc_from(vec![
            PositionedToken::new("Power", 1, 50.0, 180.0),
            PositionedToken::new("Windows", 1, 80.0, 180.0),
            PositionedToken::new("P/S", 1, 50.0, 170.0),
        ]);
        let record = ZoneExtractor::new().extract(&doc);
        assert!(record.options.contains("power_windows"));
        assert!(record.options.contains("power_steering"));
    }

    #[test]
    fn test_word_presence_fallback_for_unabbreviated_keyword() {
        let doc = doc_from(vec![
            PositionedToken::new("Mirrors", 1, 50.0, 180.0),
            PositionedToken::new("Heated", 1, 50.0, 170.0),
        ]);
        let record = ZoneExtractor::new().extract(&doc);
        assert!(record.options.contains("heated_mirrors"));
    }

    #[test]
    fn test_options_do_not_count_toward_found_fields() {
        let doc = doc_from(vec![
            PositionedToken::new("664723-GQ-1", 1, 450.0, 560.0),
            PositionedToken::new("Power", 1, 50.0, 180.0),
            PositionedToken::new("Steering", 1, 85.0, 180.0),
        ]);
        let record = ZoneExtractor::new().extract(&doc);
        assert_eq!(record.metadata.fields_found, 1);
        assert_eq!(record.metadata.total_fields, 26);
    }

    #[test]
    fn test_clean_zone_text_allow_list() {
        assert_eq!(
            clean_zone_text("  adj@ins.com   (833)  369-2567 "),
            "adj@ins.com 833 369-2567"
        );
    }
}

//! Pattern-driven extraction over the document's full text.

use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::fields;
use crate::models::{ExtractedRecord, RecordMetadata};
use crate::rules::{ComposeSpec, MappingRules, Transform, ZipSelection};

lazy_static! {
    static ref INLINE_FLAGS: Regex = Regex::new(r"\(\?[imsx]+\)").unwrap();
    static ref FIVE_DIGIT_RUN: Regex = Regex::new(r"\b(\d{5})\b").unwrap();
}

/// Remove inline mode-modifier groups that rule files authored for other
/// regex engines may carry.
fn strip_inline_flags(pattern: &str) -> String {
    INLINE_FLAGS.replace_all(pattern, "").trim().to_string()
}

/// Compile a field pattern: case-insensitive, with multiline anchor
/// semantics when the pattern uses `^` or `$`.
fn compile_portable(pattern: &str) -> Result<Regex, regex::Error> {
    let stripped = strip_inline_flags(pattern);
    RegexBuilder::new(&stripped)
        .case_insensitive(true)
        .multi_line(stripped.contains('^') || stripped.contains('$'))
        .build()
}

/// Compile a compose or checkbox pattern: case-insensitive only.
fn compile_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    let stripped = strip_inline_flags(pattern);
    RegexBuilder::new(&stripped).case_insensitive(true).build()
}

fn compile_list(
    patterns: &[String],
    field: &str,
    compile: fn(&str) -> Result<Regex, regex::Error>,
) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match compile(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!("Skipping invalid pattern for {}: {}", field, err);
                None
            }
        })
        .collect()
}

struct FieldMatcher<'a> {
    name: &'a str,
    transform: Option<Transform>,
    patterns: Vec<Regex>,
    compose: Option<ComposeMatcher<'a>>,
}

struct ComposeMatcher<'a> {
    spec: &'a ComposeSpec,
    cyl_from: Vec<Regex>,
    disp_from: Vec<Regex>,
}

struct CheckboxMatcher<'a> {
    field: &'a str,
    patterns: Vec<Regex>,
}

/// Extracts fields from unsegmented text using the rule set's ordered
/// pattern lists. Patterns are compiled once at construction; malformed
/// patterns are skipped, never fatal.
pub struct PatternExtractor<'a> {
    rules: &'a MappingRules,
    fields: Vec<FieldMatcher<'a>>,
    checkboxes: Vec<CheckboxMatcher<'a>>,
}

impl<'a> PatternExtractor<'a> {
    pub fn new(rules: &'a MappingRules) -> Self {
        let fields = rules
            .text_fields
            .iter()
            .map(|(name, spec)| FieldMatcher {
                name,
                transform: spec.transform,
                patterns: compile_list(&spec.patterns, name, compile_portable),
                compose: spec.compose.as_ref().map(|compose| ComposeMatcher {
                    spec: compose,
                    cyl_from: compile_list(&compose.cyl_from, name, compile_case_insensitive),
                    disp_from: compile_list(&compose.disp_from, name, compile_case_insensitive),
                }),
            })
            .collect();
        let checkboxes = rules
            .checkbox_rules
            .rules
            .iter()
            .map(|rule| CheckboxMatcher {
                field: &rule.field,
                patterns: compile_list(&rule.match_any, &rule.field, compile_case_insensitive),
            })
            .collect();
        PatternExtractor {
            rules,
            fields,
            checkboxes,
        }
    }

    pub fn extract(&self, text: &str) -> ExtractedRecord {
        let mut record = ExtractedRecord::default();

        for field in &self.fields {
            let value = match &field.compose {
                Some(compose) => compose.build(text),
                None => field.find(text),
            };
            if let Some(value) = value {
                if record.insert_trimmed(field.name, &value) {
                    debug!("Found {}: \"{}\"", field.name, value.trim());
                }
            }
        }

        self.apply_post_processing(&mut record);

        for checkbox in &self.checkboxes {
            if checkbox.patterns.iter().any(|re| re.is_match(text)) {
                record.options.insert(checkbox.field.to_string());
                debug!("Found checkbox: {}", checkbox.field);
            }
        }
        if self.rules.checkbox_rules.prefers_4dr()
            && record.options.contains("4DR")
            && record.options.remove("2DR")
        {
            debug!("Dropped 2DR in favor of 4DR");
        }

        let found = record.text_fields.len() + record.options.len();
        record.metadata = RecordMetadata::from_counts(found, self.rules.expected_field_count());
        record
    }

    fn apply_post_processing(&self, record: &mut ExtractedRecord) {
        let post = &self.rules.post_processing;

        for field in &post.titlecase_fields {
            if let Some(value) = record.text_fields.get_mut(field) {
                *value = title_case(value);
            }
        }

        if post.zip_selection == Some(ZipSelection::FirstFiveDigits) {
            if let Some(value) = record.text_fields.get_mut(fields::LOSS_ZIP_CODE) {
                if let Some(caps) = FIVE_DIGIT_RUN.captures(value) {
                    *value = caps[1].to_string();
                }
            }
        }

        if let Some(value) = record.text_fields.get_mut(fields::MAKE) {
            if let Some(full_name) = post.make_mapping.get(value.as_str()) {
                *value = full_name.clone();
            }
        }
    }
}

impl FieldMatcher<'_> {
    /// Try each pattern in order and return the first success, transformed.
    fn find(&self, text: &str) -> Option<String> {
        for re in &self.patterns {
            if let Some(caps) = re.captures(text) {
                let candidate = candidate_value(&caps);
                return apply_transform(self.transform, &caps, &candidate);
            }
        }
        None
    }
}

impl ComposeMatcher<'_> {
    /// Assemble a two-part field, e.g. "6-3.5L" from a cylinder count and a
    /// displacement volume found independently.
    fn build(&self, text: &str) -> Option<String> {
        let normalize = &self.spec.normalize;

        let mut cylinders = self.cyl_from.iter().find_map(|re| {
            re.captures(text).and_then(|caps| {
                caps.get(1).map(|m| {
                    let raw = m.as_str();
                    normalize.get(raw).cloned().unwrap_or_else(|| raw.to_string())
                })
            })
        });

        let displacement = self.disp_from.iter().find_map(|re| {
            re.captures(text).and_then(|caps| {
                caps.get(1).map(|m| {
                    let mut value = m.as_str().to_string();
                    if !value.to_lowercase().ends_with('l') {
                        value.push('L');
                    }
                    value
                })
            })
        });

        if cylinders.is_none() && displacement.is_some() {
            if let Some(assumed) = &self.spec.if_only_displacement_found_assume {
                cylinders =
                    Some(normalize.get(assumed).cloned().unwrap_or_else(|| assumed.clone()));
            }
        }

        match (cylinders, displacement) {
            (Some(cyl), Some(disp)) => Some(
                self.spec
                    .format
                    .replacen("{cyl}", &cyl, 1)
                    .replacen("{disp}", &disp, 1),
            ),
            _ => None,
        }
    }
}

/// The highest-numbered capture group that participated in the match, or
/// the whole match when no group captured anything.
fn candidate_value(caps: &Captures) -> String {
    (1..caps.len())
        .rev()
        .find_map(|i| caps.get(i))
        .map_or_else(|| caps[0].to_string(), |m| m.as_str().to_string())
}

fn apply_transform(
    transform: Option<Transform>,
    caps: &Captures,
    candidate: &str,
) -> Option<String> {
    match transform {
        None | Some(Transform::Passthrough) => Some(candidate.to_string()),
        Some(Transform::FirstGroup) => select_group(caps, 1, candidate),
        Some(Transform::SecondGroup) => select_group(caps, 2, candidate),
        Some(Transform::FirstGroupTitle) => {
            select_group(caps, 1, candidate).map(|v| title_case(&v))
        }
        Some(Transform::SecondGroupTitle) => {
            select_group(caps, 2, candidate).map(|v| title_case(&v))
        }
        Some(Transform::DigitsOnly) => {
            Some(candidate.chars().filter(char::is_ascii_digit).collect())
        }
    }
}

/// Re-select a specific capture group. A pattern without that group keeps
/// the candidate; a group that exists but did not participate drops the
/// field entirely.
fn select_group(caps: &Captures, index: usize, candidate: &str) -> Option<String> {
    if caps.len() > index {
        caps.get(index).map(|m| m.as_str().to_string())
    } else {
        Some(candidate.to_string())
    }
}

/// Capitalize the first letter of each space-separated word, lowercasing
/// the rest.
fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

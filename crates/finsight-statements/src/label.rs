//! Display labels for statement lines
//!
//! Resolution order: preferred label, then the humanized taxonomy concept
//! name, then the humanized snake_case normalized label.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Lower-to-upper case boundary: "CashFlow" -> "Cash Flow"
static LOWER_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));

/// Acronym followed by a word: "OCIReserve" -> "OCI Reserve"
static ACRONYM_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z])([A-Z][a-z])").expect("valid regex"));

static HEADER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+[Hh]eader\s*$").expect("valid regex"));

static WORD_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w").expect("valid regex"));

/// Prefixes implied by the comprehensive income statement itself
const REDUNDANT_PREFIXES: [&str; 2] = [
    "Other Comprehensive Income Net Of Tax ",
    "Other Comprehensive Income Net Of Tax",
];

/// Labels with a fixed display name regardless of concept
const FIXED_LABELS: [(&str, &str); 1] = [("earnings_per_share_header", "Earnings per share")];

/// Pick the display label for a line
pub fn resolve_label(preferred_label: Option<&str>, concept_name: Option<&str>, normalized_label: &str) -> String {
    match preferred_label.map(str::trim).filter(|s| !s.is_empty()) {
        Some(preferred) => preferred.to_string(),
        None => humanize_label(normalized_label, concept_name),
    }
}

/// Turn a concept name (or, failing that, a normalized label) into a title
pub fn humanize_label(normalized_label: &str, concept_name: Option<&str>) -> String {
    if let Some((_, fixed)) = FIXED_LABELS.iter().find(|(key, _)| *key == normalized_label) {
        return fixed.to_string();
    }

    match concept_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(concept) => humanize_concept(concept),
        None => humanize_snake_case(normalized_label),
    }
}

fn split_camel_case(concept: &str) -> String {
    let spaced = LOWER_UPPER.replace_all(concept, "${1} ${2}");
    ACRONYM_WORD.replace_all(&spaced, "${1} ${2}").trim().to_string()
}

/// "GainsLossesOnCashFlowHedgesBeforeTax" -> "Gains Losses On Cash Flow Hedges Before Tax"
pub fn humanize_concept(concept: &str) -> String {
    let mut humanized = split_camel_case(concept);

    for prefix in REDUNDANT_PREFIXES {
        if humanized.starts_with(prefix) && humanized.len() > prefix.len() {
            humanized = humanized[prefix.len()..].trim().to_string();
            break;
        }
    }

    if humanized.is_empty() {
        humanized = split_camel_case(concept);
    }

    let humanized = HEADER_SUFFIX.replace(&humanized, "");

    humanized
        .trim()
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// "total_assets" -> "Total Assets"
pub fn humanize_snake_case(label: &str) -> String {
    let spaced = label.replace('_', " ");
    WORD_START
        .replace_all(&spaced, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

//! Total / subtotal classification of statement lines
//!
//! Classification is lexical: English label patterns decide what reads as a
//! total. The data service has no structural "is total" flag, so the rules
//! sit behind [`TotalPolicy`] and can be replaced per deployment.

use crate::constants;

/// Decides which lines are totals and how heavily they are ruled
pub trait TotalPolicy {
    /// Line is a total or subtotal (bold, ruled above)
    fn is_total(&self, label: &str, hierarchy_level: Option<u8>) -> bool;

    /// Statement-level total that gets the heavier rule
    fn is_final_total(&self, label: &str) -> bool;

    /// Section total that also gets a rule below it
    fn is_section_total(&self, label: &str) -> bool;
}

/// Label patterns used by published English-language statements
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabelPolicy;

const TOTAL_SUBSTRINGS: [&str; 6] = [
    "total",
    "subtotal",
    "net cash flows from operating activities",
    "net cash flows from investing activities",
    "net cash flows from financing activities",
    "net increase decrease in cash and cash equivalents",
];

const TOTAL_EXACT: [&str; 8] = [
    "gross profit",
    "operating profit",
    "operating income",
    "profit before income taxes",
    "income before tax",
    "net profit",
    "net income",
    "other comprehensive income",
];

const FINAL_TOTAL_SUBSTRINGS: [&str; 2] = [
    "total comprehensive income",
    "net increase decrease in cash and cash equivalents",
];

const FINAL_TOTAL_EXACT: [&str; 3] = ["total assets", "total equity and liabilities", "total liabilities"];

const SECTION_TOTAL_EXACT: [&str; 4] = [
    "total non-current assets",
    "total current assets",
    "total non-current liabilities",
    "total current liabilities",
];

impl TotalPolicy for EnglishLabelPolicy {
    fn is_total(&self, label: &str, hierarchy_level: Option<u8>) -> bool {
        let lower = label.trim().to_lowercase();
        let lexical = TOTAL_SUBSTRINGS.iter().any(|p| lower.contains(p)) || TOTAL_EXACT.contains(&lower.as_str());

        // Unleveled lines only become totals through their label
        let structural = hierarchy_level.is_some_and(|level| level >= constants::LEVEL_SECTION_TOTAL);

        lexical || structural
    }

    fn is_final_total(&self, label: &str) -> bool {
        let lower = label.trim().to_lowercase();
        FINAL_TOTAL_SUBSTRINGS.iter().any(|p| lower.contains(p)) || FINAL_TOTAL_EXACT.contains(&lower.as_str())
    }

    fn is_section_total(&self, label: &str) -> bool {
        let lower = label.trim().to_lowercase();
        SECTION_TOTAL_EXACT.contains(&lower.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_totals() {
        let policy = EnglishLabelPolicy;
        assert!(policy.is_total("Total current assets", Some(1)));
        assert!(policy.is_total("Subtotal", Some(2)));
        assert!(policy.is_total("Gross profit", Some(2)));
        assert!(policy.is_total("Net income", Some(1)));
        assert!(policy.is_total("Net Cash Flows From Operating Activities", Some(2)));
        assert!(!policy.is_total("Cost of sales", Some(1)));
        // Exact matches only for the named subtotals
        assert!(!policy.is_total("Net income attributable to parent", Some(1)));
    }

    #[test]
    fn test_level_based_totals() {
        let policy = EnglishLabelPolicy;
        assert!(policy.is_total("Equity", Some(3)));
        assert!(policy.is_total("Assets", Some(4)));
        assert!(!policy.is_total("Inventories", Some(2)));
        assert!(!policy.is_total("Inventories", None));
        assert!(policy.is_total("Total inventories", None));
    }

    #[test]
    fn test_final_and_section_totals() {
        let policy = EnglishLabelPolicy;
        assert!(policy.is_final_total("Total assets"));
        assert!(policy.is_final_total("Total comprehensive income for the year"));
        assert!(!policy.is_final_total("Total current assets"));

        assert!(policy.is_section_total("Total current assets"));
        assert!(policy.is_section_total("TOTAL NON-CURRENT LIABILITIES"));
        assert!(!policy.is_section_total("Total assets"));
    }
}

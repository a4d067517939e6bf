//! Statement line items: the wire row and the normalized input model
//!
//! The data service returns one [`StatementRow`] per (concept, fiscal year).
//! Rows are converted to [`LineItem`]s at the boundary, where blank strings
//! become `None` and missing order indexes get the sort-last sentinel, so the
//! tree builder never has to second-guess its input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants;

/// One reported fact as delivered by the financial-data API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub normalized_label: String,
    #[serde(default)]
    pub concept_name: Option<String>,
    #[serde(default)]
    pub preferred_label: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub period_date: Option<String>,
    pub period_year: i32,
    #[serde(default)]
    pub period_type: Option<String>,
    #[serde(default)]
    pub hierarchy_level: Option<u8>,
    #[serde(default)]
    pub parent_normalized_label: Option<String>,
    #[serde(default)]
    pub presentation_order_index: Option<i64>,
    #[serde(default)]
    pub presentation_source: Option<String>,
    /// Synthetic section heading with no numeric data
    #[serde(default)]
    pub is_header: bool,
    /// Balance sheet column: "assets" or "liabilities_equity"
    #[serde(default)]
    pub side: Option<String>,
    /// Equity statement column; `None` for the total column
    #[serde(default)]
    pub equity_component: Option<String>,
}

/// Balance sheet column a line item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementSide {
    Assets,
    LiabilitiesEquity,
}

impl StatementSide {
    /// Parse the wire discriminator; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "assets" => Some(StatementSide::Assets),
            "liabilities_equity" => Some(StatementSide::LiabilitiesEquity),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatementSide::Assets => "Assets",
            StatementSide::LiabilitiesEquity => "Equity and liabilities",
        }
    }
}

/// A financial concept with its values for one or more fiscal years
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Stable cross-filing key, e.g. "total_assets"
    pub normalized_label: String,
    /// Taxonomy concept name, e.g. "AssetsCurrent"
    pub concept_name: Option<String>,
    /// Human-readable override
    pub preferred_label: Option<String>,
    /// Fiscal year -> value; `None` means reported but absent
    pub values_by_year: BTreeMap<i32, Option<f64>>,
    pub unit: String,
    /// 1 = detail, 2 = subtotal, 3 = section total, 4 = statement total
    pub hierarchy_level: Option<u8>,
    /// Label of the owning line; dangling references make this a root
    pub parent_normalized_label: Option<String>,
    pub presentation_order_index: i64,
    pub is_header: bool,
    pub side: Option<StatementSide>,
}

impl LineItem {
    pub fn new(normalized_label: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            normalized_label: normalized_label.into(),
            concept_name: None,
            preferred_label: None,
            values_by_year: BTreeMap::new(),
            unit: unit.into(),
            hierarchy_level: None,
            parent_normalized_label: None,
            presentation_order_index: constants::UNORDERED_INDEX,
            is_header: false,
            side: None,
        }
    }

    pub fn with_value(mut self, year: i32, value: Option<f64>) -> Self {
        self.values_by_year.insert(year, value);
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.hierarchy_level = Some(level);
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_normalized_label = Some(parent.into());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.presentation_order_index = order;
        self
    }

    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept_name = Some(concept.into());
        self
    }

    pub fn with_preferred_label(mut self, label: impl Into<String>) -> Self {
        self.preferred_label = Some(label.into());
        self
    }

    pub fn with_side(mut self, side: StatementSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn as_header(mut self) -> Self {
        self.is_header = true;
        self
    }

    /// Most recent fiscal year this item carries an entry for
    pub fn latest_year(&self) -> Option<i32> {
        self.values_by_year.keys().next_back().copied()
    }
}

/// Treat empty and whitespace-only strings as absent
fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

impl From<StatementRow> for LineItem {
    fn from(row: StatementRow) -> Self {
        let mut values_by_year = BTreeMap::new();
        values_by_year.insert(row.period_year, row.value);

        Self {
            normalized_label: row.normalized_label,
            concept_name: non_blank(row.concept_name),
            preferred_label: non_blank(row.preferred_label),
            values_by_year,
            unit: row.unit,
            hierarchy_level: row.hierarchy_level,
            parent_normalized_label: non_blank(row.parent_normalized_label),
            presentation_order_index: row.presentation_order_index.unwrap_or(constants::UNORDERED_INDEX),
            is_header: row.is_header,
            side: row.side.as_deref().and_then(StatementSide::parse),
        }
    }
}

/// Convert a batch of wire rows into line items, preserving order
pub fn line_items(rows: &[StatementRow]) -> Vec<LineItem> {
    rows.iter().cloned().map(LineItem::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, year: i32, value: Option<f64>) -> StatementRow {
        StatementRow {
            normalized_label: label.to_string(),
            concept_name: None,
            preferred_label: None,
            value,
            unit: "USD".to_string(),
            period_date: None,
            period_year: year,
            period_type: None,
            hierarchy_level: None,
            parent_normalized_label: None,
            presentation_order_index: None,
            presentation_source: None,
            is_header: false,
            side: None,
            equity_component: None,
        }
    }

    #[test]
    fn test_row_conversion_defaults() {
        let item = LineItem::from(row("revenue", 2024, Some(10.0)));
        assert_eq!(item.presentation_order_index, constants::UNORDERED_INDEX);
        assert_eq!(item.values_by_year.get(&2024), Some(&Some(10.0)));
        assert!(!item.is_header);
        assert_eq!(item.side, None);
    }

    #[test]
    fn test_blank_strings_become_none() {
        let mut r = row("revenue", 2024, None);
        r.concept_name = Some("  ".to_string());
        r.parent_normalized_label = Some(String::new());
        r.preferred_label = Some("Revenue".to_string());

        let item = LineItem::from(r);
        assert_eq!(item.concept_name, None);
        assert_eq!(item.parent_normalized_label, None);
        assert_eq!(item.preferred_label.as_deref(), Some("Revenue"));
        // Absent value is kept as an explicit None entry
        assert_eq!(item.values_by_year.get(&2024), Some(&None));
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!(StatementSide::parse("assets"), Some(StatementSide::Assets));
        assert_eq!(
            StatementSide::parse("liabilities_equity"),
            Some(StatementSide::LiabilitiesEquity)
        );
        assert_eq!(StatementSide::parse("equity"), None);
    }

    #[test]
    fn test_row_deserializes_with_missing_optionals() {
        let json = r#"{"normalized_label": "revenue", "period_year": 2023, "value": 12.5, "unit": "EUR"}"#;
        let r: StatementRow = serde_json::from_str(json).unwrap();
        assert_eq!(r.normalized_label, "revenue");
        assert_eq!(r.hierarchy_level, None);
        assert!(!r.is_header);
    }

    #[test]
    fn test_latest_year() {
        let item = LineItem::new("cash", "USD")
            .with_value(2022, Some(1.0))
            .with_value(2024, None)
            .with_value(2023, Some(2.0));
        assert_eq!(item.latest_year(), Some(2024));
        assert_eq!(LineItem::new("empty", "USD").latest_year(), None);
    }
}

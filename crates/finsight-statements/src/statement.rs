//! Statement catalogue and the statements API payload
//!
//! Each statement array is decoded on its own, so a malformed or missing
//! statement leaves the others renderable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{Result, StatementError};
use crate::item::StatementRow;

/// The financial statements the service can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    IncomeStatement,
    ComprehensiveIncome,
    BalanceSheet,
    CashFlow,
    EquityStatement,
}

impl StatementKind {
    pub const ALL: [StatementKind; 5] = [
        StatementKind::IncomeStatement,
        StatementKind::ComprehensiveIncome,
        StatementKind::BalanceSheet,
        StatementKind::CashFlow,
        StatementKind::EquityStatement,
    ];

    /// Payload key, e.g. "income_statement"
    pub fn key(&self) -> &'static str {
        match self {
            StatementKind::IncomeStatement => "income_statement",
            StatementKind::ComprehensiveIncome => "comprehensive_income",
            StatementKind::BalanceSheet => "balance_sheet",
            StatementKind::CashFlow => "cash_flow",
            StatementKind::EquityStatement => "equity_statement",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatementKind::IncomeStatement => "Income Statement",
            StatementKind::ComprehensiveIncome => "Statement of Comprehensive Income",
            StatementKind::BalanceSheet => "Balance Sheet",
            StatementKind::CashFlow => "Cash Flow Statement",
            StatementKind::EquityStatement => "Statement of Changes in Equity",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Reporting framework, which decides the income statement layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountingStandard {
    #[serde(rename = "IFRS")]
    Ifrs,
    #[serde(rename = "US-GAAP")]
    UsGaap,
}

impl AccountingStandard {
    /// Anything that is not IFRS is presented as US-GAAP
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("IFRS") {
            AccountingStandard::Ifrs
        } else {
            AccountingStandard::UsGaap
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountingStandard::Ifrs => "IFRS",
            AccountingStandard::UsGaap => "US-GAAP",
        }
    }
}

/// Response of `GET /api/statements/{ticker}/{year}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementsResponse {
    pub company: String,
    pub year: i32,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub accounting_standard: String,
    #[serde(default)]
    pub fiscal_year_end: Option<String>,
    /// Statement arrays keyed by statement, decoded lazily per statement
    #[serde(default)]
    pub statements: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub count: usize,
}

/// Load state of one statement within a payload
#[derive(Debug, Clone, PartialEq)]
pub enum SectionData {
    Loaded(Vec<StatementRow>),
    Missing,
    Failed(String),
}

impl SectionData {
    pub fn rows(&self) -> &[StatementRow] {
        match self {
            SectionData::Loaded(rows) => rows,
            SectionData::Missing | SectionData::Failed(_) => &[],
        }
    }
}

impl StatementsResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        let response: Self = serde_json::from_str(json)?;
        if response.company.trim().is_empty() {
            return Err(StatementError::InvalidPayload("missing company".to_string()));
        }
        Ok(response)
    }

    pub fn standard(&self) -> AccountingStandard {
        AccountingStandard::parse(&self.accounting_standard)
    }

    /// Year columns; the selected year and the two before it when unspecified
    pub fn years(&self) -> Vec<i32> {
        if self.years.is_empty() {
            vec![self.year, self.year - 1, self.year - 2]
        } else {
            self.years.clone()
        }
    }

    /// Decode a single statement without touching the others
    pub fn section(&self, kind: StatementKind) -> SectionData {
        match self.statements.get(kind.key()) {
            None | Some(serde_json::Value::Null) => SectionData::Missing,
            Some(value) => match Vec::<StatementRow>::deserialize(value) {
                Ok(rows) => SectionData::Loaded(rows),
                Err(e) => {
                    warn!(statement = kind.key(), error = %e, "failed to decode statement");
                    SectionData::Failed(e.to_string())
                }
            },
        }
    }

    /// Every statement, decoded independently
    pub fn sections(&self) -> BTreeMap<StatementKind, SectionData> {
        StatementKind::ALL.into_iter().map(|kind| (kind, self.section(kind))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "company": "NOVO-B",
        "year": 2024,
        "accounting_standard": "IFRS",
        "fiscal_year_end": "2024-12-31",
        "statements": {
            "income_statement": [
                {"normalized_label": "revenue", "period_year": 2024, "value": 290403000000, "unit": "DKK"}
            ],
            "balance_sheet": [{"normalized_label": 42}],
            "cash_flow": null
        },
        "count": 1
    }"#;

    #[test]
    fn test_sections_decode_independently() {
        let response = StatementsResponse::from_json(PAYLOAD).unwrap();

        assert!(matches!(response.section(StatementKind::IncomeStatement), SectionData::Loaded(rows) if rows.len() == 1));
        assert!(matches!(response.section(StatementKind::BalanceSheet), SectionData::Failed(_)));
        assert_eq!(response.section(StatementKind::CashFlow), SectionData::Missing);
        assert_eq!(response.section(StatementKind::EquityStatement), SectionData::Missing);
    }

    #[test]
    fn test_default_years() {
        let response = StatementsResponse::from_json(PAYLOAD).unwrap();
        assert_eq!(response.years(), vec![2024, 2023, 2022]);
        assert_eq!(response.standard(), AccountingStandard::Ifrs);
    }

    #[test]
    fn test_standard_parsing() {
        assert_eq!(AccountingStandard::parse("IFRS"), AccountingStandard::Ifrs);
        assert_eq!(AccountingStandard::parse("US-GAAP"), AccountingStandard::UsGaap);
        assert_eq!(AccountingStandard::parse(""), AccountingStandard::UsGaap);
    }

    #[test]
    fn test_missing_company_rejected() {
        let result = StatementsResponse::from_json(r#"{"company": "", "year": 2024}"#);
        assert!(matches!(result, Err(StatementError::InvalidPayload(_))));
    }

    #[test]
    fn test_kind_keys_round_trip() {
        for kind in StatementKind::ALL {
            assert_eq!(StatementKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(StatementKind::from_key("notes"), None);
    }
}

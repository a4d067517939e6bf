//! Flat row export (CSV and JSON)
//!
//! Exports the rows exactly as the service sent them, tagged with their
//! statement. The derived tree is never exported.

use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::item::StatementRow;
use crate::statement::{StatementKind, StatementsResponse};

/// One exported row: the wire row plus the statement it belongs to
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub statement: &'static str,
    #[serde(flatten)]
    pub row: &'a StatementRow,
}

const CSV_HEADER: [&str; 16] = [
    "statement",
    "normalized_label",
    "concept_name",
    "preferred_label",
    "value",
    "unit",
    "period_date",
    "period_year",
    "period_type",
    "hierarchy_level",
    "parent_normalized_label",
    "presentation_order_index",
    "presentation_source",
    "is_header",
    "side",
    "equity_component",
];

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Every loaded row of the given statements, in statement order
pub fn collect_rows(sections: &[(StatementKind, Vec<StatementRow>)]) -> Vec<ExportRow<'_>> {
    sections
        .iter()
        .flat_map(|(kind, rows)| rows.iter().map(move |row| ExportRow { statement: kind.key(), row }))
        .collect()
}

/// Loaded statements of a payload; missing or undecodable ones are skipped
pub fn loaded_sections(response: &StatementsResponse, kinds: &[StatementKind]) -> Vec<(StatementKind, Vec<StatementRow>)> {
    kinds
        .iter()
        .map(|&kind| (kind, response.section(kind).rows().to_vec()))
        .filter(|(_, rows)| !rows.is_empty())
        .collect()
}

pub fn export_csv<W: Write>(rows: &[ExportRow<'_>], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for ExportRow { statement, row } in rows {
        wtr.write_record([
            statement.to_string(),
            row.normalized_label.clone(),
            opt(&row.concept_name),
            opt(&row.preferred_label),
            opt(&row.value),
            row.unit.clone(),
            opt(&row.period_date),
            row.period_year.to_string(),
            opt(&row.period_type),
            opt(&row.hierarchy_level),
            opt(&row.parent_normalized_label),
            opt(&row.presentation_order_index),
            opt(&row.presentation_source),
            row.is_header.to_string(),
            opt(&row.side),
            opt(&row.equity_component),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_json<W: Write>(rows: &[ExportRow<'_>], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<(StatementKind, Vec<StatementRow>)> {
        let revenue: StatementRow = serde_json::from_value(serde_json::json!({
            "normalized_label": "revenue",
            "concept_name": "Revenue",
            "period_year": 2024,
            "value": -1500.5,
            "unit": "USD",
            "hierarchy_level": 1,
        }))
        .unwrap();
        let cash: StatementRow = serde_json::from_value(serde_json::json!({
            "normalized_label": "cash",
            "period_year": 2024,
            "unit": "USD",
            "side": "assets",
        }))
        .unwrap();
        vec![
            (StatementKind::IncomeStatement, vec![revenue]),
            (StatementKind::BalanceSheet, vec![cash]),
        ]
    }

    #[test]
    fn test_csv_export() {
        let sections = rows();
        let mut out = Vec::new();
        export_csv(&collect_rows(&sections), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("statement,normalized_label,concept_name"));
        assert_eq!(
            lines[1],
            "income_statement,revenue,Revenue,,-1500.5,USD,,2024,,1,,,,false,,"
        );
        assert!(lines[2].starts_with("balance_sheet,cash,"));
        assert!(lines[2].contains(",assets,"));
    }

    #[test]
    fn test_json_export_is_flat() {
        let sections = rows();
        let mut out = Vec::new();
        export_json(&collect_rows(&sections), &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["statement"], "income_statement");
        assert_eq!(array[0]["normalized_label"], "revenue");
        assert_eq!(array[1]["side"], "assets");
        assert!(array[0].get("children").is_none());
    }

    #[test]
    fn test_loaded_sections_skip_missing() {
        let response = StatementsResponse::from_json(
            r#"{"company": "AAPL", "year": 2024, "statements": {
                "cash_flow": [{"normalized_label": "capex", "period_year": 2024, "unit": "USD"}],
                "balance_sheet": {"broken": true}
            }}"#,
        )
        .unwrap();
        let sections = loaded_sections(&response, &StatementKind::ALL);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, StatementKind::CashFlow);
    }
}

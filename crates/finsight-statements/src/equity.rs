//! Statement of changes in equity as a movement-by-component matrix
//!
//! Rows are movements (one per normalized label). For every year there is
//! one column per equity component plus a Total column.

use std::collections::{BTreeMap, HashMap};

use crate::constants;
use crate::format::format_cell;
use crate::item::StatementRow;
use crate::label::resolve_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquityComponent {
    ShareCapital,
    TreasuryShares,
    RetainedEarnings,
    OtherReserves,
}

impl EquityComponent {
    pub const ALL: [EquityComponent; 4] = [
        EquityComponent::ShareCapital,
        EquityComponent::TreasuryShares,
        EquityComponent::RetainedEarnings,
        EquityComponent::OtherReserves,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "share_capital" => Some(EquityComponent::ShareCapital),
            "treasury_shares" => Some(EquityComponent::TreasuryShares),
            "retained_earnings" => Some(EquityComponent::RetainedEarnings),
            "other_reserves" => Some(EquityComponent::OtherReserves),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EquityComponent::ShareCapital => "Share capital",
            EquityComponent::TreasuryShares => "Treasury shares",
            EquityComponent::RetainedEarnings => "Retained earnings",
            EquityComponent::OtherReserves => "Other reserves",
        }
    }
}

/// Column within one year: a component, or the total (`None`)
pub type EquityColumn = Option<EquityComponent>;

/// Column order inside each year group
pub const EQUITY_COLUMNS: [EquityColumn; 5] = [
    Some(EquityComponent::ShareCapital),
    Some(EquityComponent::TreasuryShares),
    Some(EquityComponent::RetainedEarnings),
    Some(EquityComponent::OtherReserves),
    None,
];

pub fn column_title(column: EquityColumn) -> &'static str {
    column.map(|c| c.title()).unwrap_or("Total")
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityCell {
    pub year: i32,
    pub column: EquityColumn,
    pub text: String,
    pub negative: bool,
    /// Total column of the selected year
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityRow {
    pub normalized_label: String,
    pub label: String,
    pub is_header: bool,
    pub cells: Vec<EquityCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityMatrix {
    pub years: Vec<i32>,
    pub selected_year: i32,
    pub rows: Vec<EquityRow>,
}

/// Values reported for one movement: year -> column -> value
type MovementValues = HashMap<i32, HashMap<EquityColumn, Option<f64>>>;

struct Movement<'a> {
    first: &'a StatementRow,
    values: MovementValues,
}

/// Explicit total, else the sum of the components when it is non-zero
fn total_value(columns: &HashMap<EquityColumn, Option<f64>>) -> Option<f64> {
    if let Some(Some(total)) = columns.get(&None) {
        return Some(*total);
    }

    let sum: f64 = EquityComponent::ALL
        .iter()
        .filter_map(|c| columns.get(&Some(*c)).copied().flatten())
        .sum();

    if sum != 0.0 { Some(sum) } else { None }
}

pub fn build_equity_matrix(rows: &[StatementRow], years: &[i32], selected_year: i32, unit: &str) -> EquityMatrix {
    let mut order: Vec<&str> = Vec::new();
    let mut movements: HashMap<&str, Movement<'_>> = HashMap::new();

    for row in rows {
        let movement = movements.entry(row.normalized_label.as_str()).or_insert_with(|| {
            order.push(row.normalized_label.as_str());
            Movement {
                first: row,
                values: HashMap::new(),
            }
        });

        let columns = movement.values.entry(row.period_year).or_default();
        if row.is_header {
            columns.insert(None, None);
            continue;
        }

        match row.equity_component.as_deref() {
            None | Some("") => {
                columns.insert(None, row.value);
            }
            Some(key) => {
                // Components outside the four presented columns are not shown
                if let Some(component) = EquityComponent::parse(key) {
                    columns.insert(Some(component), row.value);
                }
            }
        }
    }

    let mut sorted: Vec<&Movement<'_>> = order.iter().filter_map(|label| movements.get(label)).collect();
    sorted.sort_by(|a, b| {
        let order_a = a.first.presentation_order_index.unwrap_or(constants::UNORDERED_INDEX);
        let order_b = b.first.presentation_order_index.unwrap_or(constants::UNORDERED_INDEX);
        order_a
            .cmp(&order_b)
            .then_with(|| a.first.normalized_label.cmp(&b.first.normalized_label))
    });

    let rows = sorted
        .into_iter()
        .map(|movement| {
            let first = movement.first;
            let cells = years
                .iter()
                .flat_map(|&year| {
                    let columns = movement.values.get(&year);
                    EQUITY_COLUMNS.iter().map(move |&column| {
                        let value = columns.and_then(|cols| match column {
                            None => total_value(cols),
                            Some(_) => cols.get(&column).copied().flatten(),
                        });
                        (year, column, value)
                    })
                })
                .map(|(year, column, value)| EquityCell {
                    year,
                    column,
                    text: if first.is_header { String::new() } else { format_cell(value, unit) },
                    negative: !first.is_header && value.is_some_and(|v| v < 0.0),
                    highlighted: year == selected_year && column.is_none(),
                })
                .collect();

            EquityRow {
                normalized_label: first.normalized_label.clone(),
                label: resolve_label(
                    first.preferred_label.as_deref(),
                    first.concept_name.as_deref(),
                    &first.normalized_label,
                ),
                is_header: first.is_header,
                cells,
            }
        })
        .collect();

    EquityMatrix {
        years: years.to_vec(),
        selected_year,
        rows,
    }
}

/// Column headers for the second header row, year by year
pub fn column_headers(years: &[i32]) -> BTreeMap<i32, Vec<&'static str>> {
    years
        .iter()
        .map(|&year| (year, EQUITY_COLUMNS.iter().map(|&c| column_title(c)).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, year: i32, component: Option<&str>, value: Option<f64>, order: i64) -> StatementRow {
        StatementRow {
            normalized_label: label.to_string(),
            concept_name: None,
            preferred_label: None,
            value,
            unit: "DKK".to_string(),
            period_date: None,
            period_year: year,
            period_type: None,
            hierarchy_level: None,
            parent_normalized_label: None,
            presentation_order_index: Some(order),
            presentation_source: None,
            is_header: false,
            side: None,
            equity_component: component.map(str::to_string),
        }
    }

    fn cell<'a>(matrix: &'a EquityMatrix, label: &str, year: i32, column: EquityColumn) -> &'a EquityCell {
        matrix
            .rows
            .iter()
            .find(|r| r.normalized_label == label)
            .unwrap()
            .cells
            .iter()
            .find(|c| c.year == year && c.column == column)
            .unwrap()
    }

    #[test]
    fn test_total_summed_when_missing() {
        let rows = vec![
            row("dividends_paid", 2024, Some("retained_earnings"), Some(-3_000_000.0), 2),
            row("dividends_paid", 2024, Some("treasury_shares"), Some(1_000_000.0), 2),
        ];
        let matrix = build_equity_matrix(&rows, &[2024], 2024, "DKK");
        let total = cell(&matrix, "dividends_paid", 2024, None);
        assert_eq!(total.text, "(2.00M)");
        assert!(total.negative);
        assert!(total.highlighted);
        assert!(!cell(&matrix, "dividends_paid", 2024, Some(EquityComponent::TreasuryShares)).highlighted);
    }

    #[test]
    fn test_explicit_total_wins() {
        let rows = vec![
            row("profit_for_year", 2024, Some("retained_earnings"), Some(5_000_000.0), 1),
            row("profit_for_year", 2024, None, Some(7_000_000.0), 1),
        ];
        let matrix = build_equity_matrix(&rows, &[2024], 2024, "DKK");
        assert_eq!(cell(&matrix, "profit_for_year", 2024, None).text, "7.00M");
    }

    #[test]
    fn test_zero_sum_and_missing_year_are_placeholders() {
        let rows = vec![row("transfer", 2024, Some("other_reserves"), Some(0.0), 1)];
        let matrix = build_equity_matrix(&rows, &[2024, 2023], 2024, "DKK");
        assert_eq!(cell(&matrix, "transfer", 2024, None).text, "\u{2014}");
        assert_eq!(cell(&matrix, "transfer", 2023, None).text, "\u{2014}");
        assert_eq!(matrix.rows[0].cells.len(), 10);
    }

    #[test]
    fn test_movement_order_and_headers() {
        let mut header = row("transactions_with_owners_header", 2024, None, None, 3);
        header.is_header = true;
        header.concept_name = Some("TransactionsWithOwnersHeader".to_string());
        let rows = vec![
            row("b_movement", 2024, None, Some(1.0), 5),
            row("a_movement", 2024, None, Some(1.0), 5),
            header,
            row("unordered", 2024, None, Some(1.0), constants::UNORDERED_INDEX),
        ];
        let matrix = build_equity_matrix(&rows, &[2024], 2024, "DKK");
        let labels: Vec<&str> = matrix.rows.iter().map(|r| r.normalized_label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["transactions_with_owners_header", "a_movement", "b_movement", "unordered"]
        );
        assert!(matrix.rows[0].is_header);
        assert_eq!(matrix.rows[0].label, "Transactions With Owners");
        assert!(matrix.rows[0].cells.iter().all(|c| c.text.is_empty()));
    }

    #[test]
    fn test_column_headers() {
        let headers = column_headers(&[2024]);
        assert_eq!(
            headers[&2024],
            vec!["Share capital", "Treasury shares", "Retained earnings", "Other reserves", "Total"]
        );
    }
}

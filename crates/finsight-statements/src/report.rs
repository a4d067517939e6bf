//! Full statements report: captions, section order, and per-section bodies
//!
//! Sections render independently. A statement that failed to load or came
//! back empty becomes an empty-state section; the rest are unaffected.

use std::collections::HashMap;
use tracing::debug;

use crate::balance::build_balance_sheet;
use crate::classify::TotalPolicy;
use crate::constants;
use crate::equity::{EquityMatrix, build_equity_matrix};
use crate::format::{Scale, format_fiscal_year_end, normalize_unit};
use crate::item::{StatementRow, line_items};
use crate::layout::{LayoutOptions, TableLayout, layout_table_with};
use crate::statement::{AccountingStandard, SectionData, StatementKind, StatementsResponse};
use crate::tree::build_tree_with;
use crate::view_state::ViewState;

/// Title of the combined IFRS income section
pub const COMBINED_INCOME_TITLE: &str = "Income statement and Statement of comprehensive income";

/// Most frequent unit among the rows, ignoring ratios; first seen wins ties
pub fn common_unit(rows: &[StatementRow]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for row in rows {
        let unit = row.unit.trim();
        if unit.is_empty() || unit == constants::PURE_UNIT {
            continue;
        }
        let count = counts.entry(unit).or_insert(0);
        if *count == 0 {
            first_seen.push(unit);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for unit in first_seen {
        let count = counts[unit];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((unit, count));
        }
    }

    best.map(|(unit, _)| unit.to_string())
        .unwrap_or_else(|| constants::DEFAULT_UNIT.to_string())
}

/// Caption scale from the first non-zero value; millions when there is none
pub fn unit_scale(rows: &[StatementRow]) -> Scale {
    let sample = rows.iter().filter_map(|row| row.value).find(|value| *value != 0.0);

    match sample.map(f64::abs) {
        Some(abs) if abs >= 1e9 => Scale::Billions,
        Some(abs) if abs >= 1e6 => Scale::Millions,
        Some(_) => Scale::Thousands,
        None => Scale::Millions,
    }
}

/// "(millions USD)"
pub fn scale_caption(rows: &[StatementRow]) -> String {
    let unit = common_unit(rows);
    format!("({} {})", unit_scale(rows).caption(), normalize_unit(&unit))
}

/// What a statement panel shows when expanded
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Empty { message: String },
    Table(TableLayout),
    BalanceSheet {
        assets: TableLayout,
        liabilities_equity: TableLayout,
    },
    Equity(EquityMatrix),
}

/// One statement with its captions
#[derive(Debug, Clone, PartialEq)]
pub struct StatementPanel {
    pub kind: StatementKind,
    pub title: String,
    pub unit: String,
    /// "(millions USD)"
    pub scale_caption: String,
    /// "at 31 December"
    pub fiscal_year_end: Option<String>,
    pub item_count: usize,
    pub expanded: bool,
    pub body: SectionBody,
}

impl StatementPanel {
    pub fn is_empty(&self) -> bool {
        matches!(self.body, SectionBody::Empty { .. })
    }
}

/// Top-level block of the report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSection {
    Single(StatementPanel),
    /// IFRS income statement beside the statement of comprehensive income
    SideBySide {
        title: String,
        fiscal_year_end: Option<String>,
        scale_caption: String,
        left: StatementPanel,
        right: Option<StatementPanel>,
    },
}

impl ReportSection {
    pub fn panels(&self) -> Vec<&StatementPanel> {
        match self {
            ReportSection::Single(panel) => vec![panel],
            ReportSection::SideBySide { left, right, .. } => std::iter::once(left).chain(right.as_ref()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub company: String,
    pub year: i32,
    pub standard: AccountingStandard,
    pub years: Vec<i32>,
    /// "NOVO-B - 2024 Financial Statements (IFRS)"
    pub heading: String,
    /// "Showing 2024, 2023, 2022 | Total: ..."
    pub summary: String,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn panels(&self) -> Vec<&StatementPanel> {
        self.sections.iter().flat_map(ReportSection::panels).collect()
    }

    pub fn panel(&self, kind: StatementKind) -> Option<&StatementPanel> {
        self.panels().into_iter().find(|panel| panel.kind == kind)
    }
}

fn empty_message(kind: StatementKind, data: &SectionData) -> String {
    match data {
        SectionData::Failed(reason) => format!("Failed to load {}: {}", kind.title(), reason),
        SectionData::Loaded(_) | SectionData::Missing => format!("No {} data available", kind.title()),
    }
}

fn build_body(kind: StatementKind, rows: &[StatementRow], unit: &str, options: &LayoutOptions, policy: &dyn TotalPolicy) -> SectionBody {
    match kind {
        StatementKind::BalanceSheet => {
            let sheet = build_balance_sheet(&line_items(rows), policy);
            if sheet.assets.is_empty() && sheet.liabilities_equity.is_empty() {
                return SectionBody::Empty {
                    message: format!(
                        "No {} data available ({} lines without a side)",
                        kind.title(),
                        sheet.unassigned
                    ),
                };
            }
            SectionBody::BalanceSheet {
                assets: layout_table_with(&sheet.assets, options, policy),
                liabilities_equity: layout_table_with(&sheet.liabilities_equity, options, policy),
            }
        }
        StatementKind::EquityStatement => {
            SectionBody::Equity(build_equity_matrix(rows, &options.years, options.selected_year, unit))
        }
        StatementKind::IncomeStatement | StatementKind::ComprehensiveIncome | StatementKind::CashFlow => {
            let tree = build_tree_with(&line_items(rows), policy);
            SectionBody::Table(layout_table_with(&tree, options, policy))
        }
    }
}

/// Build one panel; never fails, a bad section turns into an empty state
pub fn build_panel(
    kind: StatementKind,
    data: &SectionData,
    fiscal_year_end: Option<&str>,
    options: &LayoutOptions,
    expanded: bool,
    policy: &dyn TotalPolicy,
) -> StatementPanel {
    let rows = data.rows();
    let unit = common_unit(rows);

    let body = if rows.is_empty() {
        SectionBody::Empty {
            message: empty_message(kind, data),
        }
    } else {
        build_body(kind, rows, &unit, options, policy)
    };

    StatementPanel {
        kind,
        title: kind.title().to_string(),
        scale_caption: scale_caption(rows),
        fiscal_year_end: fiscal_year_end.and_then(format_fiscal_year_end),
        item_count: rows.len(),
        unit,
        expanded,
        body,
    }
}

fn summary_line(years: &[i32], sections: &HashMap<StatementKind, SectionData>) -> String {
    let years = years.iter().map(i32::to_string).collect::<Vec<_>>().join(", ");
    let count = |kind: StatementKind| sections.get(&kind).map(|data| data.rows().len()).unwrap_or(0);

    format!(
        "Showing {} | Total: {} income statement items, {} comprehensive income items, {} balance sheet items, {} cash flow items, {} equity statement items",
        years,
        count(StatementKind::IncomeStatement),
        count(StatementKind::ComprehensiveIncome),
        count(StatementKind::BalanceSheet),
        count(StatementKind::CashFlow),
        count(StatementKind::EquityStatement),
    )
}

/// Optional statements are left out entirely when the service has none
fn is_optional_absent(data: &SectionData) -> bool {
    match data {
        SectionData::Missing => true,
        SectionData::Loaded(rows) => rows.is_empty(),
        SectionData::Failed(_) => false,
    }
}

/// Lay out every statement in report order
///
/// Order: income (with comprehensive income), cash flow, balance sheet,
/// equity statement. Under IFRS the two income statements share one
/// side-by-side section.
pub fn build_report(response: &StatementsResponse, view: &ViewState, policy: &dyn TotalPolicy) -> Report {
    let years = response.years();
    let mut options = LayoutOptions::new(years.clone(), response.year);
    options.show_details = view.show_details;

    let standard = response.standard();
    let fiscal_year_end = response.fiscal_year_end.as_deref();
    let data: HashMap<StatementKind, SectionData> = response.sections().into_iter().collect();
    let missing = SectionData::Missing;
    let section = |kind: StatementKind| data.get(&kind).unwrap_or(&missing);
    let panel = |kind: StatementKind| {
        build_panel(kind, section(kind), fiscal_year_end, &options, view.is_expanded(kind), policy)
    };

    let mut sections = Vec::new();

    let comprehensive_absent = is_optional_absent(section(StatementKind::ComprehensiveIncome));
    match standard {
        AccountingStandard::Ifrs => {
            let income_rows = section(StatementKind::IncomeStatement).rows();
            sections.push(ReportSection::SideBySide {
                title: COMBINED_INCOME_TITLE.to_string(),
                fiscal_year_end: fiscal_year_end.and_then(format_fiscal_year_end),
                scale_caption: scale_caption(income_rows),
                left: panel(StatementKind::IncomeStatement),
                right: (!comprehensive_absent).then(|| panel(StatementKind::ComprehensiveIncome)),
            });
        }
        AccountingStandard::UsGaap => {
            sections.push(ReportSection::Single(panel(StatementKind::IncomeStatement)));
            if !comprehensive_absent {
                sections.push(ReportSection::Single(panel(StatementKind::ComprehensiveIncome)));
            }
        }
    }

    sections.push(ReportSection::Single(panel(StatementKind::CashFlow)));
    sections.push(ReportSection::Single(panel(StatementKind::BalanceSheet)));
    if !is_optional_absent(section(StatementKind::EquityStatement)) {
        sections.push(ReportSection::Single(panel(StatementKind::EquityStatement)));
    }

    debug!(
        company = %response.company,
        year = response.year,
        sections = sections.len(),
        "built statements report"
    );

    Report {
        company: response.company.clone(),
        year: response.year,
        standard,
        heading: format!(
            "{} - {} Financial Statements ({})",
            response.company,
            response.year,
            standard.as_str()
        ),
        summary: summary_line(&years, &data),
        years,
        sections,
    }
}

//! Terminal rendering of laid-out statements

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use finsight_statements::equity::{EQUITY_COLUMNS, EquityMatrix, column_title};
use finsight_statements::layout::{BorderWeight, RowKind, Spacing};
use finsight_statements::{Report, ReportSection, SectionBody, StatementKind, StatementPanel, StatementSide, TableLayout};

/// Spaces per tree depth
const INDENT: usize = 2;

/// Marker appended to the selected year's column heading
const SELECTED_MARKER: &str = "*";

fn rule(weight: BorderWeight, width: usize) -> String {
    let c = match weight {
        BorderWeight::Light => '─',
        BorderWeight::Medium => '═',
        BorderWeight::Heavy => '━',
    };
    c.to_string().repeat(width)
}

fn year_heading(year: i32, selected_year: i32) -> String {
    if year == selected_year {
        format!("{}{}", year, SELECTED_MARKER)
    } else {
        year.to_string()
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Render one statement table with indentation, rules and spacing
pub fn render_table(table: &TableLayout) -> String {
    let labels: Vec<String> = table
        .rows
        .iter()
        .map(|row| {
            let label = if row.kind == RowKind::Header {
                row.label.to_uppercase()
            } else {
                row.label.clone()
            };
            format!("{}{}", " ".repeat(row.depth * INDENT), label)
        })
        .collect();

    let headings: Vec<String> = table.years.iter().map(|y| year_heading(*y, table.selected_year)).collect();

    let label_width = labels.iter().map(|l| width(l)).chain([width("Item")]).max().unwrap_or(0);
    let column_widths: Vec<usize> = headings
        .iter()
        .enumerate()
        .map(|(col, heading)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.cells.get(col))
                .map(|cell| width(&cell.text))
                .chain([width(heading)])
                .max()
                .unwrap_or(0)
        })
        .collect();
    let total_width = label_width + column_widths.iter().map(|w| w + 2).sum::<usize>();

    let mut out = String::new();
    out.push_str(&format!("{:<label_width$}", "Item"));
    for (heading, w) in headings.iter().zip(column_widths.iter().copied()) {
        out.push_str(&format!("  {:>w$}", heading));
    }
    out.push('\n');
    out.push_str(&rule(BorderWeight::Light, total_width));
    out.push('\n');

    let mut previous_bottom: Option<BorderWeight> = None;
    for (row, label) in table.rows.iter().zip(&labels) {
        // A rule below the previous row and above this one is drawn once, at the heavier weight
        let top = match (previous_bottom, row.border_top) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        if let Some(weight) = top {
            out.push_str(&rule(weight, total_width));
            out.push('\n');
        }

        out.push_str(&format!("{:<label_width$}", label));
        for (cell, w) in row.cells.iter().zip(column_widths.iter().copied()) {
            out.push_str(&format!("  {:>w$}", cell.text));
        }
        out.push('\n');

        previous_bottom = row.border_bottom;
        if row.spacing != Spacing::None {
            if let Some(weight) = previous_bottom.take() {
                out.push_str(&rule(weight, total_width));
                out.push('\n');
            }
            out.push('\n');
            if row.spacing == Spacing::Large {
                out.push('\n');
            }
        }
    }

    if let Some(weight) = previous_bottom {
        out.push_str(&rule(weight, total_width));
        out.push('\n');
    }

    out
}

/// Render the equity matrix: one column group per year
pub fn render_equity(matrix: &EquityMatrix) -> String {
    let mut builder = Builder::default();

    let mut years_row = vec![String::new()];
    let mut titles_row = vec!["Item".to_string()];
    for year in &matrix.years {
        for (i, column) in EQUITY_COLUMNS.iter().enumerate() {
            years_row.push(if i == 0 { year.to_string() } else { String::new() });
            let title = column_title(*column);
            titles_row.push(if *year == matrix.selected_year && column.is_none() {
                format!("{}{}", title, SELECTED_MARKER)
            } else {
                title.to_string()
            });
        }
    }
    builder.push_record(years_row);
    builder.push_record(titles_row);

    for row in &matrix.rows {
        let label = if row.is_header {
            row.label.to_uppercase()
        } else {
            row.label.clone()
        };
        builder.push_record(std::iter::once(label).chain(row.cells.iter().map(|c| c.text.clone())));
    }

    let mut table = builder.build();
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    table.to_string()
}

fn render_body(panel: &StatementPanel) -> String {
    match &panel.body {
        SectionBody::Empty { message } => format!("{}\n", message),
        SectionBody::Table(table) => render_table(table),
        SectionBody::BalanceSheet {
            assets,
            liabilities_equity,
        } => format!(
            "{}\n{}\n{}\n{}",
            StatementSide::Assets.title(),
            render_table(assets),
            StatementSide::LiabilitiesEquity.title(),
            render_table(liabilities_equity)
        ),
        SectionBody::Equity(matrix) => format!("{}\n", render_equity(matrix)),
    }
}

fn render_panel(panel: &StatementPanel, with_captions: bool) -> String {
    let mut out = format!("{}\n", panel.title);
    if with_captions {
        if let Some(date) = &panel.fiscal_year_end {
            out.push_str(&format!("{}\n", date));
        }
        out.push_str(&format!("{}\n", panel.scale_caption));
    }
    out.push('\n');
    if panel.expanded {
        out.push_str(&render_body(panel));
    }
    out
}

/// Render the report, limited to the given statements
pub fn render_report(report: &Report, kinds: &[StatementKind]) -> String {
    let mut out = format!("{}\n{}\n", report.heading, report.summary);

    for section in &report.sections {
        match section {
            ReportSection::Single(panel) => {
                if kinds.contains(&panel.kind) {
                    out.push_str(&format!("\n{}", render_panel(panel, true)));
                }
            }
            ReportSection::SideBySide {
                title,
                fiscal_year_end,
                scale_caption,
                left,
                right,
            } => {
                let panels: Vec<&StatementPanel> = std::iter::once(left)
                    .chain(right.as_ref())
                    .filter(|p| kinds.contains(&p.kind))
                    .collect();
                if panels.is_empty() {
                    continue;
                }

                // Stacked rather than side by side
                out.push_str(&format!("\n{}\n", title));
                if let Some(date) = fiscal_year_end {
                    out.push_str(&format!("{}\n", date));
                }
                out.push_str(&format!("{}\n", scale_caption));
                for panel in panels {
                    out.push_str(&format!("\n{}", render_panel(panel, false)));
                }
            }
        }
    }

    out
}

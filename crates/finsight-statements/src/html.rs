//! Standalone HTML rendering of a statements report

use html_escape::encode_text;
use std::fmt::Write as _;
use std::io;

use crate::equity::{EQUITY_COLUMNS, EquityMatrix, column_title};
use crate::error::Result;
use crate::item::StatementSide;
use crate::layout::{BorderWeight, RowKind, RowLayout, Spacing, TableLayout};
use crate::report::{Report, ReportSection, SectionBody, StatementPanel};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; color: #111827; margin: 2rem; }
.summary { background: #eff6ff; border-left: 4px solid #60a5fa; padding: 1rem; color: #1d4ed8; }
.summary .counts { font-size: 0.75rem; }
.section { background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,0.15); border-radius: 8px; padding: 1.5rem; margin: 1.5rem 0; }
.caption { font-size: 0.875rem; color: #4b5563; margin: 0.25rem 0; }
.date { font-size: 0.75rem; color: #6b7280; margin: 0.25rem 0; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
.empty { color: #6b7280; font-style: italic; }
table { border-collapse: collapse; min-width: 100%; font-size: 0.875rem; }
th { background: #f9fafb; text-align: right; padding: 0.75rem 1rem; font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em; }
th.item { text-align: left; min-width: 200px; }
td { padding: 0.25rem 1rem; text-align: right; white-space: nowrap; }
td.label { text-align: left; white-space: normal; }
th.selected-year, td.selected-year { background: #eff6ff; }
tr.row-total td { font-weight: 600; }
tr.row-header td { background: #f3f4f6; font-weight: 600; text-transform: uppercase; letter-spacing: 0.05em; font-size: 0.75rem; }
tr.top-light td { border-top: 1px solid #d1d5db; }
tr.top-medium td { border-top: 2px solid #9ca3af; }
tr.top-heavy td { border-top: 2px solid #374151; }
tr.bottom-light td { border-bottom: 1px solid #d1d5db; }
tr.bottom-medium td { border-bottom: 2px solid #9ca3af; }
tr.bottom-heavy td { border-bottom: 2px solid #374151; }
tr.gap-small td { padding-bottom: 0.5rem; }
tr.gap-large td { padding-bottom: 1rem; }
td.negative { color: #dc2626; }
"#;

fn weight_class(weight: BorderWeight) -> &'static str {
    match weight {
        BorderWeight::Light => "light",
        BorderWeight::Medium => "medium",
        BorderWeight::Heavy => "heavy",
    }
}

/// CSS classes of one statement row
pub fn row_classes(row: &RowLayout) -> String {
    let mut classes = vec![match row.kind {
        RowKind::Header => "row-header".to_string(),
        RowKind::Total => "row-total".to_string(),
        RowKind::Detail => "row-detail".to_string(),
    }];

    if let Some(weight) = row.border_top {
        classes.push(format!("top-{}", weight_class(weight)));
    }
    if let Some(weight) = row.border_bottom {
        classes.push(format!("bottom-{}", weight_class(weight)));
    }
    match row.spacing {
        Spacing::None => {}
        Spacing::Small => classes.push("gap-small".to_string()),
        Spacing::Large => classes.push("gap-large".to_string()),
    }

    classes.join(" ")
}

fn cell_classes(negative: bool, highlighted: bool) -> &'static str {
    match (negative, highlighted) {
        (true, true) => "negative selected-year",
        (true, false) => "negative",
        (false, true) => "selected-year",
        (false, false) => "",
    }
}

fn year_class(year: i32, selected_year: i32) -> &'static str {
    if year == selected_year { "selected-year" } else { "" }
}

fn write_table(out: &mut String, table: &TableLayout) -> std::fmt::Result {
    writeln!(out, "<table>")?;
    write!(out, "<thead><tr><th class=\"item\">Item</th>")?;
    for year in &table.years {
        write!(out, "<th class=\"{}\">{}</th>", year_class(*year, table.selected_year), year)?;
    }
    writeln!(out, "</tr></thead>")?;

    writeln!(out, "<tbody>")?;
    for row in &table.rows {
        let label = if row.kind == RowKind::Header {
            row.label.to_uppercase()
        } else {
            row.label.clone()
        };
        write!(
            out,
            "<tr class=\"{}\"><td class=\"label\" style=\"padding-left: {}px\">{}</td>",
            row_classes(row),
            row.label_padding_px(),
            encode_text(&label)
        )?;
        for cell in &row.cells {
            write!(
                out,
                "<td class=\"{}\">{}</td>",
                cell_classes(cell.negative, cell.highlighted),
                encode_text(&cell.text)
            )?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>\n</table>")
}

fn write_equity(out: &mut String, matrix: &EquityMatrix) -> std::fmt::Result {
    writeln!(out, "<table>")?;
    write!(out, "<thead><tr><th class=\"item\" rowspan=\"2\">Item</th>")?;
    for year in &matrix.years {
        write!(
            out,
            "<th class=\"{}\" colspan=\"{}\">{}</th>",
            year_class(*year, matrix.selected_year),
            EQUITY_COLUMNS.len(),
            year
        )?;
    }
    write!(out, "</tr>\n<tr>")?;
    for year in &matrix.years {
        for column in EQUITY_COLUMNS {
            let highlighted = *year == matrix.selected_year && column.is_none();
            write!(
                out,
                "<th class=\"{}\">{}</th>",
                cell_classes(false, highlighted),
                column_title(column)
            )?;
        }
    }
    writeln!(out, "</tr></thead>")?;

    writeln!(out, "<tbody>")?;
    for row in &matrix.rows {
        let class = if row.is_header { "row-header" } else { "row-detail" };
        write!(
            out,
            "<tr class=\"{}\"><td class=\"label\">{}</td>",
            class,
            encode_text(&row.label)
        )?;
        for cell in &row.cells {
            write!(
                out,
                "<td class=\"{}\">{}</td>",
                cell_classes(cell.negative, cell.highlighted),
                encode_text(&cell.text)
            )?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>\n</table>")
}

fn write_body(out: &mut String, panel: &StatementPanel) -> std::fmt::Result {
    if !panel.expanded {
        return Ok(());
    }

    match &panel.body {
        SectionBody::Empty { message } => writeln!(out, "<p class=\"empty\">{}</p>", encode_text(message)),
        SectionBody::Table(table) => write_table(out, table),
        SectionBody::BalanceSheet {
            assets,
            liabilities_equity,
        } => {
            writeln!(out, "<div class=\"columns\">\n<div>\n<h4>{}</h4>", StatementSide::Assets.title())?;
            write_table(out, assets)?;
            writeln!(out, "</div>\n<div>\n<h4>{}</h4>", StatementSide::LiabilitiesEquity.title())?;
            write_table(out, liabilities_equity)?;
            writeln!(out, "</div>\n</div>")
        }
        SectionBody::Equity(matrix) => write_equity(out, matrix),
    }
}

fn write_captions(out: &mut String, fiscal_year_end: Option<&str>, scale_caption: &str) -> std::fmt::Result {
    if let Some(date) = fiscal_year_end {
        writeln!(out, "<p class=\"date\">{}</p>", encode_text(date))?;
    }
    writeln!(out, "<p class=\"caption\">{}</p>", encode_text(scale_caption))
}

fn write_panel(out: &mut String, panel: &StatementPanel) -> std::fmt::Result {
    writeln!(
        out,
        "<section class=\"section\" id=\"{}\">\n<h2>{}</h2>",
        panel.kind.key(),
        encode_text(&panel.title)
    )?;
    write_captions(out, panel.fiscal_year_end.as_deref(), &panel.scale_caption)?;
    write_body(out, panel)?;
    writeln!(out, "</section>")
}

fn write_section(out: &mut String, section: &ReportSection) -> std::fmt::Result {
    match section {
        ReportSection::Single(panel) => write_panel(out, panel),
        ReportSection::SideBySide {
            title,
            fiscal_year_end,
            scale_caption,
            left,
            right,
        } => {
            writeln!(out, "<section class=\"section\">\n<h2>{}</h2>", encode_text(title))?;
            write_captions(out, fiscal_year_end.as_deref(), scale_caption)?;
            writeln!(out, "<div class=\"columns\">")?;
            for panel in std::iter::once(left).chain(right.as_ref()) {
                writeln!(
                    out,
                    "<div id=\"{}\">\n<h3>{}</h3>",
                    panel.kind.key(),
                    encode_text(&panel.title)
                )?;
                write_body(out, panel)?;
                writeln!(out, "</div>")?;
            }
            writeln!(out, "</div>\n</section>")
        }
    }
}

/// Render the whole report as one self-contained HTML document
pub fn render_report(report: &Report) -> Result<String> {
    let mut out = String::new();
    write_document(&mut out, report)?;
    Ok(out)
}

fn write_document(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", encode_text(&report.heading))?;
    writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE)?;
    writeln!(
        out,
        "<div class=\"summary\">\n<p><strong>{}</strong></p>\n<p class=\"counts\">{}</p>\n</div>",
        encode_text(&report.heading),
        encode_text(&report.summary)
    )?;
    for section in &report.sections {
        write_section(out, section)?;
    }
    writeln!(out, "</body>\n</html>")
}

pub fn write_report<W: io::Write>(report: &Report, mut writer: W) -> Result<()> {
    writer.write_all(render_report(report)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

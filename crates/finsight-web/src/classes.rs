//! Tailwind classes for laid-out statement rows

use finsight_statements::equity::EquityCell;
use finsight_statements::layout::{BorderWeight, CellLayout, RowKind, RowLayout, Spacing};

fn top_border(weight: BorderWeight) -> &'static str {
    match weight {
        BorderWeight::Light => "border-t border-gray-300",
        BorderWeight::Medium => "border-t-2 border-gray-400",
        BorderWeight::Heavy => "border-t-2 border-gray-500",
    }
}

fn bottom_border(weight: BorderWeight) -> &'static str {
    match weight {
        BorderWeight::Light => "border-b border-gray-300",
        BorderWeight::Medium => "border-b-2 border-gray-400",
        BorderWeight::Heavy => "border-b-2 border-gray-500",
    }
}

fn spacing(spacing: Spacing) -> Option<&'static str> {
    match spacing {
        Spacing::None => None,
        Spacing::Small => Some("mb-1"),
        Spacing::Large => Some("mb-2"),
    }
}

/// `<tr>` classes
pub fn row(row: &RowLayout) -> String {
    let base = match row.kind {
        RowKind::Header => "bg-blue-50/30 border-t border-blue-200",
        RowKind::Total => "bg-gray-50 font-bold hover:bg-gray-100",
        RowKind::Detail => "hover:bg-gray-50",
    };

    let mut classes = vec![base];
    // Headers carry their own top rule in the base classes
    if row.kind != RowKind::Header {
        classes.extend(row.border_top.map(top_border));
    }
    classes.extend(row.border_bottom.map(bottom_border));
    classes.extend(spacing(row.spacing));
    classes.join(" ")
}

/// Label `<td>` classes
pub fn label_cell(kind: RowKind) -> &'static str {
    match kind {
        RowKind::Header => "px-4 py-3 text-xs sticky left-0 z-10 bg-blue-50/30 font-semibold text-blue-900 uppercase tracking-wide",
        RowKind::Total => "px-4 py-3 text-sm sticky left-0 z-10 bg-gray-50 font-bold text-gray-900",
        RowKind::Detail => "px-4 py-3 text-sm sticky left-0 z-10 bg-white font-normal text-gray-900",
    }
}

fn amount_cell(negative: bool, highlighted: bool, bold: bool) -> String {
    let mut classes = vec!["px-4 py-3 text-sm text-right font-mono"];
    classes.push(if negative { "text-red-600" } else { "text-gray-900" });
    if bold {
        classes.push("font-bold");
    }
    if highlighted {
        classes.push("bg-purple-100");
    }
    classes.join(" ")
}

/// Value `<td>` classes
pub fn value_cell(kind: RowKind, cell: &CellLayout) -> String {
    match kind {
        RowKind::Header => "px-4 py-3 text-sm text-right bg-blue-50/30".to_string(),
        RowKind::Total | RowKind::Detail => amount_cell(cell.negative, cell.highlighted, kind == RowKind::Total),
    }
}

/// Equity matrix `<td>` classes
pub fn equity_cell(cell: &EquityCell) -> String {
    amount_cell(cell.negative, cell.highlighted, cell.column.is_none())
}

/// Year `<th>` classes
pub fn year_heading(year: i32, selected_year: i32) -> &'static str {
    if year == selected_year {
        "px-4 py-3 text-right text-xs font-semibold text-gray-900 uppercase tracking-wider bg-purple-100"
    } else {
        "px-4 py-3 text-right text-xs font-semibold text-gray-900 uppercase tracking-wider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(kind: RowKind, top: Option<BorderWeight>, bottom: Option<BorderWeight>, spacing: Spacing) -> RowLayout {
        RowLayout {
            normalized_label: "x".to_string(),
            label: "X".to_string(),
            depth: 0,
            indent_px: 0,
            kind,
            border_top: top,
            border_bottom: bottom,
            spacing,
            cells: Vec::new(),
        }
    }

    #[test]
    fn test_total_row_classes() {
        let classes = row(&layout(
            RowKind::Total,
            Some(BorderWeight::Heavy),
            None,
            Spacing::Large,
        ));
        assert_eq!(classes, "bg-gray-50 font-bold hover:bg-gray-100 border-t-2 border-gray-500 mb-2");
    }

    #[test]
    fn test_detail_row_before_total() {
        let classes = row(&layout(RowKind::Detail, None, Some(BorderWeight::Light), Spacing::None));
        assert_eq!(classes, "hover:bg-gray-50 border-b border-gray-300");
    }

    #[test]
    fn test_header_row_keeps_tinted_rule() {
        let classes = row(&layout(RowKind::Header, Some(BorderWeight::Light), None, Spacing::None));
        assert_eq!(classes, "bg-blue-50/30 border-t border-blue-200");
    }

    #[test]
    fn test_value_cells() {
        let cell = CellLayout {
            year: 2024,
            text: "(5)".to_string(),
            negative: true,
            highlighted: true,
        };
        assert_eq!(
            value_cell(RowKind::Total, &cell),
            "px-4 py-3 text-sm text-right font-mono text-red-600 font-bold bg-purple-100"
        );
        assert!(!value_cell(RowKind::Header, &cell).contains("text-red-600"));
    }
}

//! End-to-end scenarios over a captured statements payload

use finsight_statements::layout::RowKind;
use finsight_statements::{
    EnglishLabelPolicy, LayoutOptions, SectionBody, StatementKind, StatementsResponse, TreeNode, ViewState,
    build_report, build_tree, flatten, format_number, item::line_items, label::humanize_label, layout_table,
};

const PAYLOAD: &str = r#"{
    "company": "ACME",
    "year": 2024,
    "years": [2024, 2023],
    "accounting_standard": "US-GAAP",
    "fiscal_year_end": "2024-12-31",
    "statements": {
        "balance_sheet": [
            {"normalized_label": "total_assets", "period_year": 2023, "value": 100, "unit": "USD", "hierarchy_level": 4, "side": "assets", "presentation_order_index": 10},
            {"normalized_label": "total_assets", "period_year": 2024, "value": 120, "unit": "USD", "hierarchy_level": 4, "side": "assets", "presentation_order_index": 10},
            {"normalized_label": "cash_and_equivalents", "period_year": 2023, "value": 30, "unit": "USD", "hierarchy_level": 1, "parent_normalized_label": "total_assets", "side": "assets", "presentation_order_index": 1},
            {"normalized_label": "cash_and_equivalents", "period_year": 2024, "value": 40, "unit": "USD", "hierarchy_level": 1, "parent_normalized_label": "total_assets", "side": "assets", "presentation_order_index": 1},
            {"normalized_label": "total_equity_and_liabilities", "period_year": 2024, "value": 120, "unit": "USD", "hierarchy_level": 4, "side": "liabilities_equity", "presentation_order_index": 20}
        ],
        "income_statement": [
            {"normalized_label": "revenue", "period_year": 2024, "value": 50, "unit": "USD", "hierarchy_level": 1, "parent_normalized_label": "gross_profit", "presentation_order_index": 1},
            {"normalized_label": "cost_of_sales", "period_year": 2024, "value": -20, "unit": "USD", "hierarchy_level": 1, "parent_normalized_label": "gross_profit", "presentation_order_index": 2},
            {"normalized_label": "gross_profit", "period_year": 2024, "value": 30, "unit": "USD", "hierarchy_level": 2, "presentation_order_index": 2},
            {"normalized_label": "other_income", "period_year": 2024, "value": 1, "unit": "USD", "hierarchy_level": 1, "parent_normalized_label": "not_in_statement", "presentation_order_index": 3},
            {"normalized_label": "restructuring", "period_year": 2024, "value": null, "unit": "USD", "hierarchy_level": 1, "presentation_order_index": 4}
        ]
    }
}"#;

fn response() -> StatementsResponse {
    StatementsResponse::from_json(PAYLOAD).unwrap()
}

fn tree(kind: StatementKind) -> Vec<TreeNode> {
    build_tree(&line_items(response().section(kind).rows()))
}

fn assert_children_point_back(nodes: &[TreeNode]) {
    for node in nodes {
        for child in &node.children {
            assert_eq!(child.parent_normalized_label.as_deref(), Some(node.normalized_label.as_str()));
        }
        assert_children_point_back(&node.children);
    }
}

#[test]
fn test_total_assets_scenario() {
    let roots = tree(StatementKind::BalanceSheet);
    let assets: Vec<&TreeNode> = roots.iter().filter(|n| n.normalized_label == "total_assets").collect();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].children.len(), 1);
    assert_eq!(assets[0].children[0].normalized_label, "cash_and_equivalents");
    assert_eq!(assets[0].value(2023), Some(100.0));
    assert_eq!(assets[0].children[0].value(2024), Some(40.0));

    let order: Vec<&str> = flatten(&roots).iter().map(|n| n.normalized_label.as_str()).collect();
    assert_eq!(
        order,
        vec!["total_assets", "cash_and_equivalents", "total_equity_and_liabilities"]
    );
}

#[test]
fn test_children_reference_their_parent() {
    for kind in StatementKind::ALL {
        assert_children_point_back(&tree(kind));
    }
}

#[test]
fn test_dangling_parent_becomes_root() {
    let roots = tree(StatementKind::IncomeStatement);
    let labels: Vec<&str> = roots.iter().map(|n| n.normalized_label.as_str()).collect();
    assert_eq!(labels, vec!["gross_profit", "other_income", "restructuring"]);
}

#[test]
fn test_flatten_is_deterministic() {
    let first: Vec<String> = flatten(&tree(StatementKind::IncomeStatement))
        .iter()
        .map(|n| n.normalized_label.clone())
        .collect();
    for _ in 0..5 {
        let again: Vec<String> = flatten(&tree(StatementKind::IncomeStatement))
            .iter()
            .map(|n| n.normalized_label.clone())
            .collect();
        assert_eq!(first, again);
    }
}

#[test]
fn test_missing_values_render_as_placeholder() {
    let roots = tree(StatementKind::IncomeStatement);
    let table = layout_table(&roots, &LayoutOptions::new(vec![2024, 2023], 2024));

    let restructuring = table.rows.iter().find(|r| r.normalized_label == "restructuring").unwrap();
    // Every value is null, so the line reads as a heading
    assert_eq!(restructuring.kind, RowKind::Header);

    let revenue = table.rows.iter().find(|r| r.normalized_label == "revenue").unwrap();
    assert_eq!(revenue.cells[1].text, "\u{2014}");
    assert_eq!(revenue.cells[0].text, "50");
}

#[test]
fn test_formatting_properties() {
    assert_eq!(format_number(1_500_000_000.0, "USD"), "1.50B USD");
    assert_eq!(format_number(-500.0, "USD"), "(500) USD");
    assert_eq!(format_number(2_000_000.0, "DKK"), "2.00M DKK");
    assert_eq!(format_number(3.14, "USD per share"), "3.14");
}

#[test]
fn test_label_properties() {
    assert_eq!(
        humanize_label("gains_losses", Some("GainsLossesOnCashFlowHedgesBeforeTax")),
        "Gains Losses On Cash Flow Hedges Before Tax"
    );
    assert_eq!(humanize_label("total_assets", None), "Total Assets");
    assert_eq!(humanize_label("x", Some("RevenueHeader")), "Revenue");
}

#[test]
fn test_report_keeps_rendering_around_missing_sections() {
    let report = build_report(&response(), &ViewState::new("ACME", 2024), &EnglishLabelPolicy);

    let balance = report.panel(StatementKind::BalanceSheet).unwrap();
    match &balance.body {
        SectionBody::BalanceSheet {
            assets,
            liabilities_equity,
        } => {
            assert_eq!(assets.rows.len(), 2);
            assert_eq!(liabilities_equity.rows.len(), 1);
            assert_eq!(assets.years, liabilities_equity.years);
        }
        other => panic!("expected a balance sheet, got {other:?}"),
    }

    assert!(report.panel(StatementKind::CashFlow).unwrap().is_empty());
    assert_eq!(
        report.panel(StatementKind::IncomeStatement).unwrap().fiscal_year_end.as_deref(),
        Some("at 31 December")
    );
}

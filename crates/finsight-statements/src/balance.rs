//! Two-column balance sheet: assets beside equity and liabilities
//!
//! Each side is an independent tree. No cross-side linkage or balancing
//! check is made.

use tracing::warn;

use crate::classify::TotalPolicy;
use crate::item::{LineItem, StatementSide};
use crate::tree::{TreeNode, build_tree_with};

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheetTrees {
    pub assets: Vec<TreeNode>,
    pub liabilities_equity: Vec<TreeNode>,
    /// Lines without a recognized side; not shown
    pub unassigned: usize,
}

/// Split line items by balance sheet side, preserving input order
pub fn partition_by_side(items: &[LineItem]) -> (Vec<LineItem>, Vec<LineItem>, usize) {
    let mut assets = Vec::new();
    let mut liabilities_equity = Vec::new();
    let mut unassigned = 0;

    for item in items {
        match item.side {
            Some(StatementSide::Assets) => assets.push(item.clone()),
            Some(StatementSide::LiabilitiesEquity) => liabilities_equity.push(item.clone()),
            None => unassigned += 1,
        }
    }

    (assets, liabilities_equity, unassigned)
}

pub fn build_balance_sheet(items: &[LineItem], policy: &dyn TotalPolicy) -> BalanceSheetTrees {
    let (assets, liabilities_equity, unassigned) = partition_by_side(items);
    if unassigned > 0 {
        warn!(unassigned, "balance sheet lines without a side were left out");
    }

    BalanceSheetTrees {
        assets: build_tree_with(&assets, policy),
        liabilities_equity: build_tree_with(&liabilities_equity, policy),
        unassigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::EnglishLabelPolicy;
    use crate::tree::flatten;

    #[test]
    fn test_sides_build_independent_trees() {
        let items = vec![
            LineItem::new("total_assets", "USD")
                .with_level(4)
                .with_side(StatementSide::Assets)
                .with_value(2024, Some(10.0)),
            LineItem::new("cash", "USD")
                .with_level(1)
                .with_parent("total_assets")
                .with_side(StatementSide::Assets)
                .with_value(2024, Some(10.0)),
            LineItem::new("total_equity_and_liabilities", "USD")
                .with_level(4)
                .with_side(StatementSide::LiabilitiesEquity)
                .with_value(2024, Some(10.0)),
            // Parent lives on the other side, so this becomes a root there
            LineItem::new("borrowings", "USD")
                .with_level(1)
                .with_parent("total_assets")
                .with_side(StatementSide::LiabilitiesEquity)
                .with_value(2024, Some(4.0)),
            LineItem::new("memo_line", "USD").with_level(1).with_value(2024, Some(1.0)),
        ];

        let sheet = build_balance_sheet(&items, &EnglishLabelPolicy);
        assert_eq!(sheet.unassigned, 1);
        assert_eq!(flatten(&sheet.assets).len(), 2);
        assert_eq!(sheet.assets.len(), 1);
        assert_eq!(sheet.liabilities_equity.len(), 2);
    }

    #[test]
    fn test_empty_balance_sheet() {
        let sheet = build_balance_sheet(&[], &EnglishLabelPolicy);
        assert!(sheet.assets.is_empty());
        assert!(sheet.liabilities_equity.is_empty());
        assert_eq!(sheet.unassigned, 0);
    }
}

//! Row layout policy for a flattened statement
//!
//! Rules are ruled above every total (heavier for statement totals and
//! section boundaries) and below the last line before a total, using
//! one-step lookahead over the flattened sequence. Extra spacing follows
//! level 3 and level 4 lines.

use crate::classify::{EnglishLabelPolicy, TotalPolicy};
use crate::constants;
use crate::format::format_cell;
use crate::tree::{FlatNode, TreeNode, flatten_with_depth};

/// How a row is emphasized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Section heading: tinted, upper-cased, no values
    Header,
    /// Total or subtotal: bold
    Total,
    Detail,
}

/// Weight of a horizontal rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BorderWeight {
    /// 1-unit light rule
    Light,
    /// 2-unit rule
    Medium,
    /// 2-unit dark rule
    Heavy,
}

/// Gap below a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    #[default]
    None,
    /// After a section total
    Small,
    /// After a statement total
    Large,
}

/// One value cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub year: i32,
    pub text: String,
    pub negative: bool,
    /// Column of the currently selected fiscal year
    pub highlighted: bool,
}

/// Everything needed to draw one statement row
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub normalized_label: String,
    pub label: String,
    pub depth: usize,
    pub indent_px: u32,
    pub kind: RowKind,
    pub border_top: Option<BorderWeight>,
    pub border_bottom: Option<BorderWeight>,
    pub spacing: Spacing,
    pub cells: Vec<CellLayout>,
}

impl RowLayout {
    /// Left padding of the label cell: base padding plus indentation
    pub fn label_padding_px(&self) -> u32 {
        constants::LABEL_BASE_PADDING_PX + self.indent_px
    }

    pub fn is_bold(&self) -> bool {
        self.kind == RowKind::Total
    }
}

/// Inputs that change between renders of the same tree
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Year columns, in display order
    pub years: Vec<i32>,
    pub selected_year: i32,
    /// Show plain detail leaves
    pub show_details: bool,
}

impl LayoutOptions {
    pub fn new(years: Vec<i32>, selected_year: i32) -> Self {
        Self {
            years,
            selected_year,
            show_details: true,
        }
    }
}

/// A laid-out statement table
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub years: Vec<i32>,
    pub selected_year: i32,
    pub rows: Vec<RowLayout>,
}

/// Lines drawn as totals; headers keep their own styling
fn reads_as_total(node: &TreeNode) -> bool {
    node.is_total && !node.is_header
}

fn is_plain_detail(node: &TreeNode) -> bool {
    node.hierarchy_level == Some(constants::LEVEL_DETAIL) && !node.is_total && !node.is_header && node.is_leaf()
}

/// Rule drawn for a total line
fn total_rule(node: &TreeNode, policy: &dyn TotalPolicy) -> BorderWeight {
    let is_final = policy.is_final_total(&node.label);
    match (node.is_section_boundary, is_final) {
        (true, true) => BorderWeight::Heavy,
        (true, false) | (false, true) => BorderWeight::Medium,
        (false, false) => BorderWeight::Light,
    }
}

fn spacing_after(node: &TreeNode) -> Spacing {
    if !node.is_section_boundary {
        return Spacing::None;
    }
    match node.hierarchy_level {
        Some(constants::LEVEL_STATEMENT_TOTAL) => Spacing::Large,
        Some(constants::LEVEL_SECTION_TOTAL) => Spacing::Small,
        _ => Spacing::None,
    }
}

fn cells(node: &TreeNode, options: &LayoutOptions) -> Vec<CellLayout> {
    options
        .years
        .iter()
        .map(|&year| {
            let value = node.value(year);
            CellLayout {
                year,
                text: if node.is_header { String::new() } else { format_cell(value, &node.unit) },
                negative: !node.is_header && value.is_some_and(|v| v < 0.0),
                highlighted: year == options.selected_year,
            }
        })
        .collect()
}

/// Lay out an already flattened, already filtered sequence
pub fn layout_rows(flat: &[FlatNode<'_>], options: &LayoutOptions, policy: &dyn TotalPolicy) -> Vec<RowLayout> {
    flat.iter()
        .enumerate()
        .map(|(index, flat_node)| {
            let node = flat_node.node;
            let is_total = reads_as_total(node);

            let kind = if node.is_header {
                RowKind::Header
            } else if is_total {
                RowKind::Total
            } else {
                RowKind::Detail
            };

            let mut border_top = None;
            let mut border_bottom = None;

            if is_total {
                border_top = Some(total_rule(node, policy));
                if policy.is_section_total(&node.label) {
                    border_bottom = Some(BorderWeight::Light);
                }
            } else if node.is_header {
                border_top = Some(BorderWeight::Light);
            }

            // Close off the run of lines that a following total summarizes
            if !is_total {
                if let Some(next) = flat.get(index + 1).map(|f| f.node).filter(|n| reads_as_total(n)) {
                    border_bottom = Some(total_rule(next, policy));
                }
            }

            let depth = flat_node.depth;
            RowLayout {
                normalized_label: node.normalized_label.clone(),
                label: node.label.clone(),
                depth,
                indent_px: depth as u32 * constants::INDENT_PX_PER_LEVEL,
                kind,
                border_top,
                border_bottom,
                spacing: spacing_after(node),
                cells: cells(node, options),
            }
        })
        .collect()
}

/// Flatten and lay out a statement tree
pub fn layout_table_with(tree: &[TreeNode], options: &LayoutOptions, policy: &dyn TotalPolicy) -> TableLayout {
    let flat: Vec<FlatNode<'_>> = flatten_with_depth(tree)
        .into_iter()
        .filter(|f| options.show_details || !is_plain_detail(f.node))
        .collect();

    TableLayout {
        years: options.years.clone(),
        selected_year: options.selected_year,
        rows: layout_rows(&flat, options, policy),
    }
}

pub fn layout_table(tree: &[TreeNode], options: &LayoutOptions) -> TableLayout {
    layout_table_with(tree, options, &EnglishLabelPolicy)
}

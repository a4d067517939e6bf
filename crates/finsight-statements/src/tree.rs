//! Presentation tree construction from flat statement lines
//!
//! Lines are grouped by normalized label, linked to their parents through a
//! flat label index, and sorted at every level. Nodes own their children
//! outright; the tree is rebuilt from scratch for every render and never
//! mutated afterwards.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::classify::{EnglishLabelPolicy, TotalPolicy};
use crate::constants;
use crate::item::{LineItem, StatementSide};
use crate::label::resolve_label;

/// One line of a rendered statement
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Resolved display label
    pub label: String,
    pub normalized_label: String,
    /// Parent link as reported by the source (may be dangling)
    pub parent_normalized_label: Option<String>,
    pub values_by_year: BTreeMap<i32, Option<f64>>,
    pub unit: String,
    pub hierarchy_level: Option<u8>,
    pub order_index: i64,
    pub side: Option<StatementSide>,
    pub children: Vec<TreeNode>,
    pub is_total: bool,
    pub is_header: bool,
    /// Section or statement total (hierarchy level 3 or 4)
    pub is_section_boundary: bool,
}

impl TreeNode {
    /// Value for a fiscal year; absent years and reported nulls are both `None`
    pub fn value(&self, year: i32) -> Option<f64> {
        self.values_by_year.get(&year).copied().flatten()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_len).sum::<usize>()
    }
}

/// Build the presentation forest with the default English label policy
pub fn build_tree(items: &[LineItem]) -> Vec<TreeNode> {
    build_tree_with(items, &EnglishLabelPolicy)
}

/// Build the presentation forest, classifying totals with `policy`
pub fn build_tree_with(items: &[LineItem], policy: &dyn TotalPolicy) -> Vec<TreeNode> {
    if items.is_empty() {
        return Vec::new();
    }

    // Group by normalized label, keeping first-appearance order
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&LineItem>> = Vec::new();
    for item in items {
        match group_index.get(item.normalized_label.as_str()) {
            Some(&idx) => groups[idx].push(item),
            None => {
                group_index.insert(item.normalized_label.as_str(), groups.len());
                groups.push(vec![item]);
            }
        }
    }

    let mut slots: Vec<Option<TreeNode>> = groups.iter().map(|group| Some(merge_group(group, policy))).collect();

    // Link children through the flat label index
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); slots.len()];
    let mut is_root = vec![false; slots.len()];
    for (idx, slot) in slots.iter().enumerate() {
        let parent = slot
            .as_ref()
            .and_then(|node| node.parent_normalized_label.as_deref())
            .and_then(|parent| group_index.get(parent).copied());

        match parent {
            Some(parent_idx) if parent_idx != idx => children[parent_idx].push(idx),
            _ => is_root[idx] = true,
        }
    }

    break_parent_cycles(&mut children, &mut is_root, &slots);

    let roots: Vec<TreeNode> = (0..slots.len())
        .filter(|&idx| is_root[idx])
        .filter_map(|idx| assemble(idx, &mut slots, &children))
        .collect();

    let roots = sort_nodes(roots);
    debug!(
        items = items.len(),
        nodes = groups.len(),
        roots = roots.len(),
        "built statement tree"
    );
    roots
}

/// Merge every line sharing one normalized label into a single node
fn merge_group(group: &[&LineItem], policy: &dyn TotalPolicy) -> TreeNode {
    let first = group[0];

    // Later lines overwrite earlier ones for the same year
    let mut values_by_year = BTreeMap::new();
    for item in group {
        for (year, value) in &item.values_by_year {
            values_by_year.insert(*year, *value);
        }
    }

    // Unit of the line holding the most recent year, else the first line's
    let unit = values_by_year
        .keys()
        .next_back()
        .and_then(|latest| group.iter().rev().find(|item| item.values_by_year.contains_key(latest)))
        .map(|item| item.unit.as_str())
        .filter(|unit| !unit.is_empty())
        .unwrap_or(first.unit.as_str())
        .to_string();

    // Last reported parent wins when lines disagree
    let parent_normalized_label = group.iter().rev().find_map(|item| item.parent_normalized_label.clone());

    let label = resolve_label(
        first.preferred_label.as_deref(),
        first.concept_name.as_deref(),
        &first.normalized_label,
    );
    let hierarchy_level = first.hierarchy_level;

    let is_total = policy.is_total(&label, hierarchy_level);
    let is_header = group.iter().any(|item| item.is_header) || values_by_year.values().all(Option::is_none);
    let is_section_boundary = matches!(
        hierarchy_level,
        Some(constants::LEVEL_SECTION_TOTAL) | Some(constants::LEVEL_STATEMENT_TOTAL)
    );

    TreeNode {
        label,
        normalized_label: first.normalized_label.clone(),
        parent_normalized_label,
        values_by_year,
        unit,
        hierarchy_level,
        order_index: first.presentation_order_index,
        side: first.side,
        children: Vec::new(),
        is_total,
        is_header,
        is_section_boundary,
    }
}

/// Mark everything reachable from a root; whatever is left hangs off a
/// parent cycle. Each cycle is cut at its earliest line, which becomes a root.
fn break_parent_cycles(children: &mut [Vec<usize>], is_root: &mut [bool], slots: &[Option<TreeNode>]) {
    let mut reached = vec![false; children.len()];
    let mut stack: Vec<usize> = (0..children.len()).filter(|&idx| is_root[idx]).collect();
    mark_reachable(&mut stack, children, &mut reached);

    for idx in 0..children.len() {
        if reached[idx] {
            continue;
        }

        for siblings in children.iter_mut() {
            siblings.retain(|&child| child != idx);
        }
        is_root[idx] = true;

        if let Some(node) = &slots[idx] {
            warn!(
                label = %node.normalized_label,
                parent = ?node.parent_normalized_label,
                "parent cycle detected, promoting line to root"
            );
        }

        stack.push(idx);
        mark_reachable(&mut stack, children, &mut reached);
    }
}

fn mark_reachable(stack: &mut Vec<usize>, children: &[Vec<usize>], reached: &mut [bool]) {
    while let Some(idx) = stack.pop() {
        if reached[idx] {
            continue;
        }
        reached[idx] = true;
        stack.extend(children[idx].iter().copied());
    }
}

/// Move a node and its subtree out of the slot table
fn assemble(idx: usize, slots: &mut [Option<TreeNode>], children: &[Vec<usize>]) -> Option<TreeNode> {
    let mut node = slots[idx].take()?;
    node.children = children[idx]
        .iter()
        .filter_map(|&child| assemble(child, slots, children))
        .collect();
    Some(node)
}

/// Order index ascending, then hierarchy level descending, then label
pub fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    a.order_index
        .cmp(&b.order_index)
        .then_with(|| b.hierarchy_level.unwrap_or(0).cmp(&a.hierarchy_level.unwrap_or(0)))
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        .then_with(|| a.label.cmp(&b.label))
}

/// Sort a sibling list and, recursively, every child list
fn sort_nodes(mut nodes: Vec<TreeNode>) -> Vec<TreeNode> {
    nodes.sort_by(compare_nodes);
    for node in &mut nodes {
        if !node.children.is_empty() {
            node.children = sort_nodes(std::mem::take(&mut node.children));
        }
    }
    nodes
}

/// A node in depth-first order together with its depth
#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
}

/// Depth-first pre-order sequence of the forest: each node, then its children
pub fn flatten(nodes: &[TreeNode]) -> Vec<&TreeNode> {
    flatten_with_depth(nodes).into_iter().map(|flat| flat.node).collect()
}

/// Pre-order sequence with each node's depth below the roots
pub fn flatten_with_depth(nodes: &[TreeNode]) -> Vec<FlatNode<'_>> {
    let mut result = Vec::with_capacity(nodes.iter().map(TreeNode::subtree_len).sum());
    let mut stack: Vec<FlatNode<'_>> = nodes.iter().rev().map(|node| FlatNode { node, depth: 0 }).collect();

    while let Some(flat) = stack.pop() {
        result.push(flat);
        stack.extend(flat.node.children.iter().rev().map(|child| FlatNode {
            node: child,
            depth: flat.depth + 1,
        }));
    }

    result
}

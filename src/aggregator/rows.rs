//! Derived display values and the visible-row walk.
//!
//! The walk turns the trace tree plus an [`ExpandedState`] into a flat
//! list of rows, one per visible node, carrying everything a rendering
//! layer needs. Quantities do not chain across levels: each row's
//! effective total is its own node total times the quantity on its own
//! child reference, nothing more.

use super::expand::{node_key, ExpandedState};
use crate::trace::schema::{EmissionSource, EmissionTrace, Mention};
use crate::utils::config::KEY_SEPARATOR;
use log::debug;
use serde::{Deserialize, Serialize};

/// One lifecycle-stage subtotal line, in kg CO2e
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtotalEntry {
    pub stage: String,
    pub biogenic: f64,
    pub non_biogenic: f64,
}

/// Everything the rendering layer needs for one visible node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Structural path key, stable across renders
    pub key: String,
    pub label: String,
    pub source: EmissionSource,
    pub methodology: String,

    /// Nesting depth, root-level children at 0
    pub depth: usize,

    /// Quantity carried on the parent's child reference
    pub quantity: f64,

    /// Unit of that quantity, taken from the parent node
    pub unit: String,

    /// The node's own total with absent/non-finite degraded to zero
    pub own_total: f64,

    /// `own_total` times `quantity`, never NaN
    pub effective_total: f64,

    pub is_open: bool,
    pub has_children: bool,

    /// Stage subtotals in document order
    pub subtotals: Vec<SubtotalEntry>,
    pub mentions: Vec<Mention>,
}

/// Effective contribution of a node under a given quantity
///
/// **Public** - core arithmetic shared by rows, stats and reports
///
/// `total × quantity`, with an absent or non-finite total treated as
/// zero. The result is clamped back to zero if the multiplication
/// itself produced a non-finite value, so downstream display code
/// never sees NaN.
pub fn effective_total(total: Option<f64>, quantity: f64) -> f64 {
    let own = total.filter(|t| t.is_finite()).unwrap_or(0.0);
    let effective = own * quantity;
    if effective.is_finite() {
        effective
    } else {
        0.0
    }
}

/// Whether a node is expandable
///
/// A node with only mentions and no child traces still expands, to
/// reveal the mentions.
pub fn has_children(node: &EmissionTrace) -> bool {
    node.children.len() + node.mentions.len() > 0
}

/// Stage subtotal pairs of a node, in document order
///
/// No cross-stage summation happens here or anywhere in the core: the
/// backend-computed `total` is authoritative and a partial stage map
/// may legitimately disagree with it.
pub fn subtotal_entries(node: &EmissionTrace) -> Vec<SubtotalEntry> {
    node.emissions_subtotal
        .iter()
        .map(|(stage, pair)| SubtotalEntry {
            stage: stage.to_string(),
            biogenic: pair.biogenic,
            non_biogenic: pair.non_biogenic,
        })
        .collect()
}

/// Compute the flat list of visible rows
///
/// **Public** - main entry point for the row walk
///
/// Root-level children are always visible; a node's children are
/// visited only while its key is open in `state`. The path handed to
/// [`node_key`] for a child is `parent_key/child_index`, which makes
/// every descendant key a strict string extension of its ancestor's
/// key, exactly the property the prefix scan in
/// [`ExpandedState::close_descendants`] relies on.
pub fn visible_rows(root: &EmissionTrace, state: &ExpandedState) -> Vec<Row> {
    let mut rows = Vec::new();
    push_child_rows(root, "", 0, state, &mut rows);
    debug!("Computed {} visible rows", rows.len());
    rows
}

fn push_child_rows(
    parent: &EmissionTrace,
    parent_path: &str,
    depth: usize,
    state: &ExpandedState,
    rows: &mut Vec<Row>,
) {
    for (index, child) in parent.children.iter().enumerate() {
        let node = &child.emission_trace;
        let path = child_path(parent_path, index);
        let key = node_key(&node.label, &path);
        let is_open = state.is_open(&key);
        let own_total = effective_total(node.total, 1.0);

        rows.push(Row {
            key: key.clone(),
            label: node.label.clone(),
            source: node.source,
            methodology: node.methodology.clone(),
            depth,
            quantity: child.quantity,
            unit: parent.reference_impact_unit.clone(),
            own_total,
            effective_total: effective_total(node.total, child.quantity),
            is_open,
            has_children: has_children(node),
            subtotals: subtotal_entries(node),
            mentions: node.mentions.clone(),
        });

        if is_open {
            push_child_rows(node, &key, depth + 1, state, rows);
        }
    }
}

fn child_path(parent_path: &str, index: usize) -> String {
    if parent_path.is_empty() {
        index.to_string()
    } else {
        format!("{}{}{}", parent_path, KEY_SEPARATOR, index)
    }
}

/// Open every node above the given depth
///
/// **Public** - convenience transition used by the CLI
///
/// `depth` is the deepest row level that becomes visible: 0 leaves
/// everything closed (only root-level rows show), 1 opens the
/// root-level rows, and so on. Built entirely from [`ExpandedState::toggle_row`].
pub fn expand_to_depth(root: &EmissionTrace, state: &mut ExpandedState, depth: usize) {
    expand_children(root, "", 0, depth, state);
}

/// Open every node in the tree
pub fn expand_all(root: &EmissionTrace, state: &mut ExpandedState) {
    expand_to_depth(root, state, usize::MAX);
}

fn expand_children(
    parent: &EmissionTrace,
    parent_path: &str,
    current: usize,
    depth: usize,
    state: &mut ExpandedState,
) {
    if current >= depth {
        return;
    }
    for (index, child) in parent.children.iter().enumerate() {
        let node = &child.emission_trace;
        let path = child_path(parent_path, index);
        let key = node_key(&node.label, &path);
        state.toggle_row(&key, true);
        expand_children(node, &key, current + 1, depth, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::schema::{ChildRef, MentionClass, StageSubtotals, SubtotalPair};

    fn node(label: &str, source: EmissionSource, total: Option<f64>) -> EmissionTrace {
        EmissionTrace {
            label: label.to_string(),
            source,
            methodology: String::new(),
            total,
            emissions_subtotal: StageSubtotals::new(),
            reference_impact_unit: "kg".to_string(),
            children: Vec::new(),
            mentions: Vec::new(),
        }
    }

    #[test]
    fn test_effective_total_arithmetic() {
        assert_eq!(effective_total(Some(2.5), 3.0), 7.5);
        assert_eq!(effective_total(None, 3.0), 0.0);
        assert_eq!(effective_total(Some(f64::NAN), 3.0), 0.0);
        assert_eq!(effective_total(Some(f64::INFINITY), 2.0), 0.0);
        assert_eq!(effective_total(Some(1.0), f64::NAN), 0.0);
    }

    #[test]
    fn test_has_children_counts_mentions() {
        let mut leaf = node("Leaf", EmissionSource::Material, Some(1.0));
        assert!(!has_children(&leaf));

        leaf.mentions.push(Mention {
            mention_class: MentionClass::Warning,
            message: "x".to_string(),
        });
        assert!(has_children(&leaf));
    }

    #[test]
    fn test_subtotal_entries_keep_document_order() {
        let mut n = node("Widget", EmissionSource::Product, Some(1.0));
        n.emissions_subtotal
            .insert("C: Production", SubtotalPair { biogenic: 0.5, non_biogenic: 1.5 });
        n.emissions_subtotal
            .insert("A: Raw material supply", SubtotalPair { biogenic: 0.1, non_biogenic: 0.2 });

        let entries = subtotal_entries(&n);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].stage, "C: Production");
        assert_eq!(entries[1].stage, "A: Raw material supply");
    }

    #[test]
    fn test_rows_do_not_chain_quantities() {
        // root -> A (quantity 2, total 1.0) -> B (quantity 4, total 0.5)
        let mut a = node("A", EmissionSource::Product, Some(1.0));
        let b = node("B", EmissionSource::Material, Some(0.5));
        a.children.push(ChildRef { emission_trace: b, quantity: 4.0 });

        let mut root = node("root", EmissionSource::Product, None);
        root.children.push(ChildRef { emission_trace: a, quantity: 2.0 });

        let mut state = ExpandedState::new();
        let rows = visible_rows(&root, &state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].effective_total, 2.0);
        assert!(!rows[0].is_open);

        state.toggle_row(&rows[0].key, true);
        let rows = visible_rows(&root, &state);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label, "B");
        assert_eq!(rows[1].depth, 1);
        // B's own quantity only, independent of A's multiplier
        assert_eq!(rows[1].effective_total, 2.0);
    }

    #[test]
    fn test_descendant_keys_extend_ancestor_key() {
        let mut a = node("A", EmissionSource::Product, Some(1.0));
        a.children.push(ChildRef {
            emission_trace: node("B", EmissionSource::Material, Some(0.5)),
            quantity: 1.0,
        });
        let mut root = node("root", EmissionSource::Product, None);
        root.children.push(ChildRef { emission_trace: a, quantity: 1.0 });

        let mut state = ExpandedState::new();
        expand_all(&root, &mut state);

        let rows = visible_rows(&root, &state);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "0/A");
        assert_eq!(rows[1].key, "0/A/0/B");
        assert!(rows[1].key.starts_with(&format!("{}/", rows[0].key)));
    }

    #[test]
    fn test_collapse_cascade() {
        let mut b = node("B", EmissionSource::Material, Some(0.5));
        b.children.push(ChildRef {
            emission_trace: node("C", EmissionSource::Material, Some(0.1)),
            quantity: 1.0,
        });
        let mut a = node("A", EmissionSource::Product, Some(1.0));
        a.children.push(ChildRef { emission_trace: b, quantity: 1.0 });
        let mut root = node("root", EmissionSource::Product, None);
        root.children.push(ChildRef { emission_trace: a, quantity: 1.0 });

        let mut state = ExpandedState::new();
        expand_all(&root, &mut state);
        assert_eq!(visible_rows(&root, &state).len(), 3);

        // Collapse A: its expanded descendant must close too
        state.toggle_row("0/A", false);
        state.close_descendants("0/A");

        let rows = visible_rows(&root, &state);
        assert_eq!(rows.len(), 1);
        assert!(!state.is_open("0/A/0/B"));

        // Re-opening A shows B closed, not in its previous open state
        state.toggle_row("0/A", true);
        let rows = visible_rows(&root, &state);
        assert_eq!(rows.len(), 2);
        assert!(!rows[1].is_open);
    }

    #[test]
    fn test_expand_to_depth_zero_leaves_everything_closed() {
        let mut a = node("A", EmissionSource::Product, Some(1.0));
        a.children.push(ChildRef {
            emission_trace: node("B", EmissionSource::Material, None),
            quantity: 1.0,
        });
        let mut root = node("root", EmissionSource::Product, None);
        root.children.push(ChildRef { emission_trace: a, quantity: 1.0 });

        let mut state = ExpandedState::new();
        expand_to_depth(&root, &mut state, 0);
        assert_eq!(state.known_keys(), 0);
        assert_eq!(visible_rows(&root, &state).len(), 1);
    }

    #[test]
    fn test_row_unit_comes_from_parent() {
        let mut root = node("root", EmissionSource::Product, None);
        root.reference_impact_unit = "piece".to_string();
        root.children.push(ChildRef {
            emission_trace: node("A", EmissionSource::Material, Some(1.0)),
            quantity: 3.0,
        });

        let rows = visible_rows(&root, &ExpandedState::new());
        assert_eq!(rows[0].unit, "piece");
        assert_eq!(rows[0].quantity, 3.0);
    }
}

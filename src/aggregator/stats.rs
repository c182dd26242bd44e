//! Source distribution and top-contributor metrics.
//!
//! Summaries over the whole tree, independent of expansion state:
//! where the kilograms come from by contributor kind, and which
//! individual nodes contribute the most. These feed the text summary
//! and the JSON breakdown report.

use super::expand::{node_key, ExpandedState};
use super::rows::effective_total;
use crate::trace::schema::{EmissionSource, EmissionTrace};
use crate::utils::config::KEY_SEPARATOR;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Count and kg accumulation for one contributor kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub count: u64,
    pub kg_co2e: f64,
}

/// Aggregated per-source statistics over a whole tree
#[derive(Debug, Clone, Default)]
pub struct SourceStats {
    entries: HashMap<EmissionSource, SourceEntry>,
    total_kg: f64,
    node_count: u64,
}

impl SourceStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one node's effective contribution
    pub fn add(&mut self, source: EmissionSource, kg: f64) {
        let entry = self.entries.entry(source).or_default();
        entry.count += 1;
        entry.kg_co2e += kg;
        self.total_kg += kg;
        self.node_count += 1;
    }

    /// Number of nodes seen for a specific source kind
    pub fn count_for(&self, source: EmissionSource) -> u64 {
        self.entries.get(&source).map(|e| e.count).unwrap_or(0)
    }

    /// Accumulated kg CO2e for a specific source kind
    pub fn kg_for(&self, source: EmissionSource) -> f64 {
        self.entries.get(&source).map(|e| e.kg_co2e).unwrap_or(0.0)
    }

    /// Total kg CO2e across all nodes (sum of effective totals per level)
    pub fn total_kg(&self) -> f64 {
        self.total_kg
    }

    /// Total number of nodes seen
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// Convert to a map keyed by display label, for report serialization
    pub fn to_map(&self) -> HashMap<String, SourceEntry> {
        self.entries
            .iter()
            .map(|(source, entry)| (source.display_label().to_string(), *entry))
            .collect()
    }
}

/// Walk the whole tree and accumulate per-source statistics
///
/// **Public** - used by the summary output and report builder
///
/// Every node is counted once with its effective total (own total
/// times the quantity on its own child reference). Reference variants
/// accumulate under their own label, distinct from product-local ones.
pub fn collect_source_stats(root: &EmissionTrace) -> SourceStats {
    let mut stats = SourceStats::new();
    collect_node(root, &mut stats);
    debug!(
        "Collected source stats for {} nodes, {} kg CO2e",
        stats.node_count(),
        stats.total_kg()
    );
    stats
}

fn collect_node(parent: &EmissionTrace, stats: &mut SourceStats) {
    for child in &parent.children {
        let node = &child.emission_trace;
        stats.add(node.source, effective_total(node.total, child.quantity));
        collect_node(node, stats);
    }
}

/// One top-ranked contributing node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// Structural path key of the node
    pub key: String,
    pub label: String,
    pub source: EmissionSource,
    pub kg_co2e: f64,

    /// Percentage of the root node's total; zero when the root total
    /// is absent or zero
    pub percentage: f64,
}

/// Rank the tree's nodes by effective total, descending
///
/// **Public** - used by the summary output and report builder
///
/// # Arguments
/// * `root` - trace tree to rank
/// * `top_n` - number of contributors to return
///
/// Percentages are computed against the root's own authoritative
/// total, never against a re-derived stage sum.
pub fn top_contributors(root: &EmissionTrace, top_n: usize) -> Vec<Contributor> {
    let root_total = effective_total(root.total, 1.0);

    let mut contributors = Vec::new();
    flatten_contributors(root, "", &mut contributors);

    contributors.sort_by(|a, b| {
        b.kg_co2e
            .partial_cmp(&a.kg_co2e)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    contributors.truncate(top_n);

    for contributor in &mut contributors {
        contributor.percentage = if root_total > 0.0 {
            (contributor.kg_co2e / root_total) * 100.0
        } else {
            0.0
        };
    }

    debug!("Ranked top {} contributors", contributors.len());
    contributors
}

fn flatten_contributors(parent: &EmissionTrace, parent_path: &str, out: &mut Vec<Contributor>) {
    for (index, child) in parent.children.iter().enumerate() {
        let node = &child.emission_trace;
        let path = if parent_path.is_empty() {
            index.to_string()
        } else {
            format!("{}{}{}", parent_path, KEY_SEPARATOR, index)
        };
        let key = node_key(&node.label, &path);

        out.push(Contributor {
            key: key.clone(),
            label: node.label.clone(),
            source: node.source,
            kg_co2e: effective_total(node.total, child.quantity),
            percentage: 0.0,
        });

        flatten_contributors(node, &key, out);
    }
}

/// Open exactly the nodes on the paths to the top contributors
///
/// Convenience for "show me where the big numbers are" flows: returns
/// a fresh state with every ancestor of a top contributor opened.
pub fn expand_top_contributors(root: &EmissionTrace, top_n: usize) -> ExpandedState {
    let contributors = top_contributors(root, top_n);
    let mut state = ExpandedState::new();

    for contributor in &contributors {
        // Ancestor keys are the prefixes ending right before "/<index>/<label>"
        let mut prefix = contributor.key.as_str();
        while let Some(label_sep) = prefix.rfind(KEY_SEPARATOR) {
            let without_label = &prefix[..label_sep];
            let Some(index_sep) = without_label.rfind(KEY_SEPARATOR) else {
                break;
            };
            prefix = &without_label[..index_sep];
            state.toggle_row(prefix, true);
        }
    }

    state
}

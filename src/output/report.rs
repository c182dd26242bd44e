//! Breakdown report schema and builder.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{
    collect_source_stats, effective_total, expand_all, top_contributors, visible_rows, Contributor,
    ExpandedState, Row, SourceEntry,
};
use crate::trace::schema::EmissionTrace;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level breakdown report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Label of the product the trace belongs to
    pub product: String,

    /// The root node's authoritative total in kg CO2e, zero when absent
    pub total_kg_co2e: f64,

    /// Per-source distribution keyed by display label
    pub source_summary: HashMap<String, SourceEntry>,

    /// Largest individual contributors, ranked descending
    pub top_contributors: Vec<Contributor>,

    /// Every row of the fully expanded tree
    pub rows: Vec<Row>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Build a breakdown report over the fully expanded tree
///
/// **Public** - used by commands to create final output
///
/// # Arguments
/// * `root` - trace tree to report on
/// * `top_n` - number of top contributors to include
///
/// The report's total is the root node's own total, not a sum over
/// rows or stages: the backend value stays authoritative even when
/// stage subtotals are partial.
pub fn build_report(root: &EmissionTrace, top_n: usize) -> BreakdownReport {
    debug!("Building breakdown report for '{}'", root.label);

    let mut state = ExpandedState::new();
    expand_all(root, &mut state);

    BreakdownReport {
        version: SCHEMA_VERSION.to_string(),
        product: root.label.clone(),
        total_kg_co2e: effective_total(root.total, 1.0),
        source_summary: collect_source_stats(root).to_map(),
        top_contributors: top_contributors(root, top_n),
        rows: visible_rows(root, &state),
        generated_at: Utc::now().to_rfc3339(),
    }
}

//! Aggregation over emission trace trees.
//!
//! This module transforms a loaded trace tree into:
//! - A flat list of visible rows under an expand/collapse state
//! - Per-source distribution statistics
//! - Top contributor rankings

pub mod expand;
pub mod rows;
pub mod stats;

// Re-export main types and functions
pub use expand::{node_key, ExpandedState};
pub use rows::{
    effective_total, expand_all, expand_to_depth, has_children, subtotal_entries, visible_rows,
    Row, SubtotalEntry,
};
pub use stats::{
    collect_source_stats, expand_top_contributors, top_contributors, Contributor, SourceEntry,
    SourceStats,
};

//! Emission trace model and loading.
//!
//! This module handles:
//! - The tree data model for emission contributions
//! - Deserializing trace JSON documents
//! - Soft validation of loaded trees

pub mod load;
pub mod schema;

// Re-export main types
pub use load::{parse_trace, read_trace, validate_trace};
pub use schema::{
    ChildRef, EmissionSource, EmissionTrace, Mention, MentionClass, StageSubtotals, SubtotalPair,
};

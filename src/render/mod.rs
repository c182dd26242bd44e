//! Text rendering of aggregated breakdown data.

pub mod text;

// Re-export main functions
pub use text::{render_contributors, render_rows, render_summary};

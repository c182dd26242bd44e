//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod show;
pub mod utils;

// Re-export main command functions
pub use show::{execute_show, validate_args, ShowArgs};
pub use utils::{display_schema, display_version, validate_trace_file};

//! Show command implementation.
//!
//! The show command:
//! 1. Loads an emission trace JSON file
//! 2. Expands the tree to the requested depth
//! 3. Renders the breakdown to stdout
//! 4. Optionally prints the source summary
//! 5. Optionally writes a JSON breakdown report

use crate::aggregator::{
    collect_source_stats, expand_all, expand_to_depth, top_contributors, visible_rows,
    ExpandedState,
};
use crate::output::{build_report, write_report};
use crate::render::{render_contributors, render_rows, render_summary};
use crate::trace::read_trace;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the show command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ShowArgs {
    /// Path to the emission trace JSON file
    pub input: PathBuf,

    /// Deepest row level to expand to
    pub depth: usize,

    /// Expand the whole tree, overriding depth
    pub expand_all: bool,

    /// Output path for the JSON breakdown report (optional)
    pub report: Option<PathBuf>,

    /// Number of top contributors in summary and report
    pub top: usize,

    /// Print source distribution and top contributors to stdout
    pub print_summary: bool,
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            depth: crate::utils::config::DEFAULT_SHOW_DEPTH,
            expand_all: false,
            report: None,
            top: crate::utils::config::DEFAULT_TOP_CONTRIBUTORS,
            print_summary: false,
        }
    }
}

/// Validate show command arguments
///
/// **Public** - called from main.rs before execution
pub fn validate_args(args: &ShowArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path must not be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.top == 0 {
        anyhow::bail!("--top must be at least 1");
    }

    Ok(())
}

/// Execute the show command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file read or parse errors
/// * Report write errors
pub fn execute_show(args: ShowArgs) -> Result<()> {
    info!("Loading emission trace: {}", args.input.display());

    let trace = read_trace(&args.input).context("Failed to load emission trace")?;

    debug!(
        "Loaded trace '{}' with {} direct children",
        trace.label,
        trace.children.len()
    );

    let mut state = ExpandedState::new();
    if args.expand_all {
        expand_all(&trace, &mut state);
    } else {
        expand_to_depth(&trace, &mut state, args.depth);
    }

    let rows = visible_rows(&trace, &state);
    println!("{}", trace.label);
    print!("{}", render_rows(&rows));

    if args.print_summary {
        let stats = collect_source_stats(&trace);
        let contributors = top_contributors(&trace, args.top);
        println!();
        print!("{}", render_summary(&stats));
        println!();
        print!("{}", render_contributors(&contributors));
    }

    if let Some(report_path) = &args.report {
        let report = build_report(&trace, args.top);
        write_report(&report, report_path).context("Failed to write breakdown report")?;
        println!("Report written to: {}", report_path.display());
    }

    Ok(())
}

//! PCF Trace CLI
//!
//! Emission trace exploration for product carbon footprints.
//! Renders breakdown trees and reports from trace JSON documents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use pcf_trace_studio::commands::{
    display_schema, display_version, execute_show, validate_args, validate_trace_file, ShowArgs,
};
use pcf_trace_studio::utils::config::{DEFAULT_SHOW_DEPTH, DEFAULT_TOP_CONTRIBUTORS};

/// PCF Trace Studio - Emission breakdown exploration
#[derive(Parser, Debug)]
#[command(name = "pcf-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the emission breakdown of a trace file
    Show {
        /// Path to the emission trace JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Deepest row level to expand to
        #[arg(short, long, default_value_t = DEFAULT_SHOW_DEPTH)]
        depth: usize,

        /// Expand the whole tree
        #[arg(long)]
        expand_all: bool,

        /// Output path for a JSON breakdown report (optional)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Number of top contributors to include
        #[arg(long, default_value_t = DEFAULT_TOP_CONTRIBUTORS)]
        top: usize,

        /// Print source distribution and top contributors
        #[arg(long)]
        summary: bool,
    },

    /// Validate an emission trace JSON file
    Validate {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Show {
            input,
            depth,
            expand_all,
            report,
            top,
            summary,
        } => {
            let args = ShowArgs {
                input,
                depth,
                expand_all,
                report,
                top,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_show(args)?;
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

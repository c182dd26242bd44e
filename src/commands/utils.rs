use crate::trace::{read_trace, validate_trace};
use crate::utils::config::{KG_CO2E, SCHEMA_VERSION};
use anyhow::Result;
use std::path::PathBuf;

/// Validate an emission trace JSON file
pub fn validate_trace_file(file_path: PathBuf) -> Result<()> {
    println!("Validating emission trace: {}", file_path.display());

    let trace = read_trace(&file_path)?;
    let findings = validate_trace(&trace);

    println!("✓ Valid emission trace JSON");
    println!("  Product: {}", trace.label);
    println!(
        "  Total: {}",
        trace
            .total
            .map(|t| format!("{:.3} {}", t, KG_CO2E))
            .unwrap_or_else(|| "not computed".to_string())
    );
    println!("  Direct children: {}", trace.children.len());
    println!("  Lifecycle stages: {}", trace.emissions_subtotal.len());
    println!("  Mentions: {}", trace.mentions.len());

    if findings.is_empty() {
        println!("  No findings");
    } else {
        println!("  Findings ({}):", findings.len());
        for finding in findings {
            println!("    - {}", finding);
        }
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("PCF Trace Studio Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  product: string          - Product label of the trace root");
        println!("  total_kg_co2e: number    - Root total in kg CO2e");
        println!("  source_summary: object   - Per-source distribution");
        println!("    count: number          - Nodes of this source kind");
        println!("    kg_co2e: number        - Accumulated kg CO2e");
        println!("  top_contributors: array  - Largest individual contributors");
        println!("    key: string            - Structural path key");
        println!("    kg_co2e: number        - Effective contribution");
        println!("    percentage: number     - Share of the root total");
        println!("  rows: array              - Fully expanded breakdown rows");
        println!("    key: string            - Structural path key");
        println!("    effective_total: number - Own total times quantity");
        println!("    subtotals: array       - Per-stage biogenic split");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("PCF Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Emission trace aggregation for product carbon footprints.");
}

//! Loading and validation of emission trace documents.
//!
//! Traces arrive as fully materialized JSON, typically the body of
//! `GET /companies/{companyId}/products/{productId}/emission_traces/`
//! saved to disk. Loading deserializes the whole tree; validation is
//! soft and reports findings without rejecting the document.

use super::schema::EmissionTrace;
use crate::utils::error::ParseError;
use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse an emission trace from a materialized JSON value
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw` - JSON document matching the trace shape
///
/// # Returns
/// The deserialized trace tree
///
/// # Errors
/// * `ParseError::JsonError` - document does not match the trace shape
pub fn parse_trace(raw: &serde_json::Value) -> Result<EmissionTrace, ParseError> {
    debug!("Parsing emission trace document");

    let trace: EmissionTrace = serde_json::from_value(raw.clone())?;

    debug!(
        "Parsed trace '{}' with {} direct children",
        trace.label,
        trace.children.len()
    );

    Ok(trace)
}

/// Read and parse an emission trace JSON file
///
/// **Public** - used by CLI commands
///
/// # Errors
/// * `ParseError::IoError` - file cannot be opened or read
/// * `ParseError::JsonError` - file is not a valid trace document
pub fn read_trace(path: impl AsRef<Path>) -> Result<EmissionTrace, ParseError> {
    let path = path.as_ref();
    debug!("Reading emission trace from: {}", path.display());

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let trace: EmissionTrace = serde_json::from_reader(reader)?;

    debug!(
        "Loaded trace '{}' ({} direct children)",
        trace.label,
        trace.children.len()
    );

    Ok(trace)
}

/// Soft-validate a trace tree
///
/// **Public** - used by the `validate` command
///
/// Walks the whole tree and collects human-readable findings for data
/// that the aggregator will degrade to zero/empty: non-finite totals,
/// negative subtotal components, non-finite or negative quantities,
/// empty labels. Findings are logged at `warn!` level and returned;
/// a malformed value never fails validation because the aggregation
/// core is defined to tolerate it.
pub fn validate_trace(trace: &EmissionTrace) -> Vec<String> {
    let mut findings = Vec::new();
    validate_node(trace, "(root)", &mut findings);

    for finding in &findings {
        warn!("{}", finding);
    }

    findings
}

fn validate_node(node: &EmissionTrace, location: &str, findings: &mut Vec<String>) {
    if node.label.trim().is_empty() {
        findings.push(format!("{}: node has an empty label", location));
    }

    if let Some(total) = node.total {
        if !total.is_finite() {
            findings.push(format!(
                "{}: total is not a finite number ({})",
                location, total
            ));
        }
    }

    for (stage, pair) in node.emissions_subtotal.iter() {
        if pair.biogenic < 0.0 || pair.non_biogenic < 0.0 {
            findings.push(format!(
                "{}: stage '{}' has a negative subtotal component",
                location, stage
            ));
        }
        if !pair.biogenic.is_finite() || !pair.non_biogenic.is_finite() {
            findings.push(format!(
                "{}: stage '{}' has a non-finite subtotal component",
                location, stage
            ));
        }
    }

    for (index, child) in node.children.iter().enumerate() {
        let child_location = format!("{} > child {}", location, index);

        if !child.quantity.is_finite() {
            findings.push(format!(
                "{}: quantity is not a finite number",
                child_location
            ));
        } else if child.quantity < 0.0 {
            findings.push(format!("{}: quantity is negative", child_location));
        }

        validate_node(&child.emission_trace, &child_location, findings);
    }
}

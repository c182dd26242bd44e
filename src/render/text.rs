//! Text rendering of breakdown rows and summaries.
//!
//! Formatting only: every number printed here was computed by the
//! aggregator. The renderer maps each row to an indented line with a
//! per-source color, stage subtotal lines and mention lines beneath it.

use crate::aggregator::{Contributor, Row, SourceStats};
use crate::trace::schema::{EmissionSource, MentionClass};
use crate::utils::config::KG_CO2E;
use std::fmt::Write;

const RESET: &str = "\x1b[0m";

/// ANSI color per contributor kind
///
/// **Private** - lookup table shared by tree and summary rendering
fn ansi_color(source: EmissionSource) -> &'static str {
    match source {
        EmissionSource::Product | EmissionSource::ProductReference => "\x1b[36m", // Cyan
        EmissionSource::TransportEmission | EmissionSource::TransportEmissionReference => {
            "\x1b[34m" // Blue
        }
        EmissionSource::Material | EmissionSource::MaterialReference => "\x1b[33m", // Yellow
        EmissionSource::UserEnergy | EmissionSource::UserEnergyReference => "\x1b[32m", // Green
        EmissionSource::ProductionEnergy | EmissionSource::ProductionEnergyReference => {
            "\x1b[35m" // Magenta
        }
    }
}

fn mention_color(class: MentionClass) -> &'static str {
    match class {
        MentionClass::Error => "\x1b[31;1m",  // Red
        MentionClass::Warning => "\x1b[33m",  // Yellow
        MentionClass::Info => "\x1b[90m",     // Gray
    }
}

/// Render visible rows as an indented text tree
///
/// **Public** - main entry point for tree rendering
///
/// Expandable rows carry a disclosure marker reflecting their open
/// flag; stage subtotals and mentions print beneath their row, one
/// level deeper.
pub fn render_rows(rows: &[Row]) -> String {
    let mut out = String::new();

    for row in rows {
        let indent = "  ".repeat(row.depth);
        let marker = if row.has_children {
            if row.is_open {
                "▾"
            } else {
                "▸"
            }
        } else {
            "·"
        };
        let color = ansi_color(row.source);

        let quantity_part = if row.unit.is_empty() {
            format!("{} ×", row.quantity)
        } else {
            format!("{} {}", row.quantity, row.unit)
        };

        let _ = writeln!(
            out,
            "{}{} {}[{}] {}{}  {:.3} {}  ({})",
            indent,
            marker,
            color,
            row.source.short_code(),
            row.label,
            RESET,
            row.effective_total,
            KG_CO2E,
            quantity_part
        );

        for entry in &row.subtotals {
            let _ = writeln!(
                out,
                "{}    {}: {:.3} non-biogenic / {:.3} biogenic {}",
                indent, entry.stage, entry.non_biogenic, entry.biogenic, KG_CO2E
            );
        }

        for mention in &row.mentions {
            let color = mention_color(mention.mention_class);
            let _ = writeln!(
                out,
                "{}    {}{} {}{}",
                indent,
                color,
                mention.mention_class.marker(),
                mention.message,
                RESET
            );
        }
    }

    out
}

/// Render the per-source distribution as bar lines
///
/// **Public** - used by the `show --summary` flow
pub fn render_summary(stats: &SourceStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "  EMISSIONS BY SOURCE");

    let total_kg = stats.total_kg();
    let mut kinds: Vec<(EmissionSource, f64, u64)> = all_sources()
        .iter()
        .map(|&source| (source, stats.kg_for(source), stats.count_for(source)))
        .filter(|(_, _, count)| *count > 0)
        .collect();
    kinds.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (source, kg, count) in kinds {
        let percentage = if total_kg > 0.0 {
            (kg / total_kg) * 100.0
        } else {
            0.0
        };
        let bar_width = (percentage / 2.0) as usize; // Max 50 chars
        let bar = "█".repeat(bar_width);
        let color = ansi_color(source);

        let _ = writeln!(
            out,
            "  └─ {}{:<30}{} {}{:<50}{} {:>5.1}%  ({} nodes, {:.3} {})",
            color,
            source.display_label(),
            RESET,
            color,
            bar,
            RESET,
            percentage,
            count,
            kg,
            KG_CO2E
        );
    }

    out
}

/// Render the top contributor ranking
///
/// **Public** - used by the `show --summary` flow
pub fn render_contributors(contributors: &[Contributor]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "  TOP CONTRIBUTORS");

    for contributor in contributors {
        let color = ansi_color(contributor.source);

        // Truncate key if too long for display
        let display_key = if contributor.key.len() > 40 {
            format!("...{}", &contributor.key[contributor.key.len() - 37..])
        } else {
            contributor.key.clone()
        };

        let _ = writeln!(
            out,
            "  └─ {}{:<40}{} {:>12.3} {} {:>6.1}%",
            color, display_key, RESET, contributor.kg_co2e, KG_CO2E, contributor.percentage
        );
    }

    out
}

fn all_sources() -> [EmissionSource; 10] {
    [
        EmissionSource::Product,
        EmissionSource::ProductReference,
        EmissionSource::TransportEmission,
        EmissionSource::TransportEmissionReference,
        EmissionSource::Material,
        EmissionSource::MaterialReference,
        EmissionSource::UserEnergy,
        EmissionSource::UserEnergyReference,
        EmissionSource::ProductionEnergy,
        EmissionSource::ProductionEnergyReference,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{collect_source_stats, visible_rows, ExpandedState};
    use crate::trace::parse_trace;
    use serde_json::json;

    fn sample_rows() -> Vec<Row> {
        let raw = json!({
            "label": "Widget",
            "source": "Product",
            "reference_impact_unit": "piece",
            "children": [
                {
                    "emission_trace": {
                        "label": "Steel",
                        "source": "Material",
                        "total": 4.0,
                        "mentions": [
                            { "mention_class": "Warning", "message": "estimated factor" }
                        ]
                    },
                    "quantity": 2.0
                }
            ]
        });
        visible_rows(&parse_trace(&raw).unwrap(), &ExpandedState::new())
    }

    #[test]
    fn test_render_rows_contains_values() {
        let text = render_rows(&sample_rows());

        assert!(text.contains("Steel"));
        assert!(text.contains("8.000"));
        assert!(text.contains("2 piece"));
        assert!(text.contains("estimated factor"));
        assert!(text.contains("▸")); // mentions make the row expandable
    }

    #[test]
    fn test_render_summary_lists_sources() {
        let raw = json!({
            "label": "Widget",
            "source": "Product",
            "total": 8.0,
            "children": [
                { "emission_trace": { "label": "Steel", "source": "Material", "total": 8.0 }, "quantity": 1.0 }
            ]
        });
        let stats = collect_source_stats(&parse_trace(&raw).unwrap());
        let text = render_summary(&stats);

        assert!(text.contains("Material"));
        assert!(text.contains("100.0%"));
        assert!(!text.contains("Transport"));
    }
}

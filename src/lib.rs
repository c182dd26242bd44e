//! PCF Trace Studio
//!
//! Emission trace aggregation and breakdown exploration for
//! product carbon footprints.
//!
//! An emission trace is a hierarchical breakdown of a product's
//! carbon footprint: every node is one contributing source (a
//! material, a transport leg, an energy use, a sub-product) with
//! its own total in kg CO2e and an optional per-lifecycle-stage
//! subtotal split into biogenic and non-biogenic emissions.
//!
//! This crate provides the core implementation for the
//! `pcf-trace` CLI tool: the tree data model, expand/collapse
//! state keyed by structural path, derived per-node display
//! values, and report generation.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod render;
pub mod trace;
pub mod utils;

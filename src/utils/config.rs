//! Configuration and constants for the CLI.

/// Current breakdown report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Separator used when deriving structural path keys
pub const KEY_SEPARATOR: char = '/';

/// Quantity assumed for a child reference that carries none
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Default tree depth shown by the `show` command
pub const DEFAULT_SHOW_DEPTH: usize = 1;

/// Default number of top contributors in reports and summaries
pub const DEFAULT_TOP_CONTRIBUTORS: usize = 10;

/// Display unit for emission values
pub const KG_CO2E: &str = "kg CO₂e";

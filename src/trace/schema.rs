//! Emission trace data model.
//!
//! This module defines the tree of emission contributions as fetched
//! from the accounting backend: one node per contributing source, with
//! child references that each carry their own quantity multiplier.
//! Deserialization is permissive: absent arrays become empty, an absent
//! total stays unknown instead of failing the document.

use crate::utils::config::DEFAULT_QUANTITY;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of emission contributor behind a trace node
///
/// The wire format uses the exact variant name (e.g. `"TransportEmission"`).
/// `*Reference` variants point at shared library entities instead of
/// product-local ones; they aggregate identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmissionSource {
    Product,
    ProductReference,
    TransportEmission,
    TransportEmissionReference,
    Material,
    MaterialReference,
    UserEnergy,
    UserEnergyReference,
    ProductionEnergy,
    ProductionEnergyReference,
}

impl EmissionSource {
    /// Human-readable label for display rows
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::ProductReference => "Product (reference)",
            Self::TransportEmission => "Transport",
            Self::TransportEmissionReference => "Transport (reference)",
            Self::Material => "Material",
            Self::MaterialReference => "Material (reference)",
            Self::UserEnergy => "Energy, use phase",
            Self::UserEnergyReference => "Energy, use phase (reference)",
            Self::ProductionEnergy => "Energy, production",
            Self::ProductionEnergyReference => "Energy, production (reference)",
        }
    }

    /// One-letter code used in text rendering
    pub fn short_code(&self) -> &'static str {
        match self {
            Self::Product | Self::ProductReference => "P",
            Self::TransportEmission | Self::TransportEmissionReference => "T",
            Self::Material | Self::MaterialReference => "M",
            Self::UserEnergy | Self::UserEnergyReference => "U",
            Self::ProductionEnergy | Self::ProductionEnergyReference => "E",
        }
    }

    /// True for variants that reference shared library entities
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::ProductReference
                | Self::TransportEmissionReference
                | Self::MaterialReference
                | Self::UserEnergyReference
                | Self::ProductionEnergyReference
        )
    }
}

/// Severity of an informational annotation on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentionClass {
    Error,
    Warning,
    Info,
}

impl MentionClass {
    /// Marker used in text rendering
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Error => "[E]",
            Self::Warning => "[W]",
            Self::Info => "[i]",
        }
    }
}

/// Annotation attached to a node itself, not to its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    #[serde(alias = "mentionClass")]
    pub mention_class: MentionClass,
    pub message: String,
}

/// Biogenic / non-biogenic split for one lifecycle stage, in kg CO2e
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubtotalPair {
    #[serde(default)]
    pub biogenic: f64,
    #[serde(default)]
    pub non_biogenic: f64,
}

/// Lifecycle-stage subtotals in document order
///
/// Serialized as a JSON map keyed by stage label. A plain `HashMap`
/// would lose the stage ordering chosen by the backend, so entries are
/// kept in a vector and (de)serialized through the map interface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageSubtotals {
    entries: Vec<(String, SubtotalPair)>,
}

impl StageSubtotals {
    /// Create an empty subtotal mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the pair for a stage, preserving first-insert order
    pub fn insert(&mut self, stage: impl Into<String>, pair: SubtotalPair) {
        let stage = stage.into();
        if let Some(existing) = self.entries.iter_mut().find(|(s, _)| *s == stage) {
            existing.1 = pair;
        } else {
            self.entries.push((stage, pair));
        }
    }

    /// Look up the pair for a stage label
    pub fn get(&self, stage: &str) -> Option<&SubtotalPair> {
        self.entries
            .iter()
            .find(|(s, _)| s == stage)
            .map(|(_, pair)| pair)
    }

    /// Iterate stages in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubtotalPair)> {
        self.entries.iter().map(|(s, pair)| (s.as_str(), pair))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StageSubtotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (stage, pair) in &self.entries {
            map.serialize_entry(stage, pair)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StageSubtotals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StageSubtotalsVisitor;

        impl<'de> Visitor<'de> for StageSubtotalsVisitor {
            type Value = StageSubtotals;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of lifecycle stage labels to subtotal pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((stage, pair)) = access.next_entry::<String, SubtotalPair>()? {
                    entries.push((stage, pair));
                }
                Ok(StageSubtotals { entries })
            }
        }

        deserializer.deserialize_map(StageSubtotalsVisitor)
    }
}

/// One node in the emission breakdown hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionTrace {
    /// Display name of the contributing entity
    pub label: String,

    /// Kind of contributor
    pub source: EmissionSource,

    /// Calculation method descriptor (may be empty)
    #[serde(default)]
    pub methodology: String,

    /// Computed total for this node alone, kg CO2e; absent when the
    /// backend has not computed it yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Per-lifecycle-stage breakdown; empty when no breakdown is available
    #[serde(default, alias = "emissionsSubtotal")]
    pub emissions_subtotal: StageSubtotals,

    /// Unit for the quantities carried on this node's child references
    #[serde(default, alias = "referenceImpactUnit")]
    pub reference_impact_unit: String,

    /// Child contributions, each with its own quantity multiplier
    #[serde(default)]
    pub children: Vec<ChildRef>,

    /// Annotations attached to this node
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

/// Reference from a parent node to one child contribution
///
/// The quantity is a property of the relationship, not of the child
/// entity: the same trace can appear under two parents with different
/// quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRef {
    #[serde(alias = "emissionTrace")]
    pub emission_trace: EmissionTrace,

    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    DEFAULT_QUANTITY
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::light::LightSpectrum;

/// Position of a plant in the population list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub usize);

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plant-{}", self.0)
    }
}

/// Per-unit-health exchange rates: category -> resource key -> rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    categories: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rate for `category.key`.
    pub fn with(mut self, category: impl Into<String>, key: impl Into<String>, rate: f64) -> Self {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), rate);
        self
    }

    /// Rate for `category.key`, if listed.
    pub fn get(&self, category: &str, key: &str) -> Option<f64> {
        self.categories.get(category)?.get(key).copied()
    }

    /// All `(category, key, rate)` triples, sorted by category then key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.categories.iter().flat_map(|(category, rates)| {
            rates
                .iter()
                .map(move |(key, rate)| (category.as_str(), key.as_str(), *rate))
        })
    }

    /// Whether `category.key` appears in the table.
    pub fn references(&self, category: &str, key: &str) -> bool {
        self.get(category, key).is_some()
    }

    /// Returns `true` if no rate is listed.
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(BTreeMap::is_empty)
    }
}

/// Environmental preferences carried by a plant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// Preferred intensity per light band.
    #[serde(default)]
    pub light: LightSpectrum,
}

/// A living (or formerly living) organism in the population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plant {
    /// Index in the population list.
    pub id: PlantId,
    /// Template identifier this plant was spawned from.
    #[serde(rename = "type")]
    pub kind: String,
    /// Cleared exactly once, when health drops to zero.
    pub alive: bool,
    /// Ticks survived.
    pub age: u64,
    /// Current health in `[0, max_health]`. Scales consumption and production.
    pub health: f64,
    /// Whether every input was satisfiable on the most recent tick.
    pub healthy: bool,
    /// Upper bound on `health`.
    pub max_health: f64,
    /// Health gained on a healthy tick.
    pub healing_rate: f64,
    /// Consumption per unit of health.
    pub input: RateTable,
    /// Production per unit of health.
    pub output: RateTable,
    /// Advisory environmental preferences.
    pub conditions: Conditions,
}

impl Plant {
    /// Whether this plant consumes or produces `category.key`.
    pub fn references(&self, category: &str, key: &str) -> bool {
        self.input.references(category, key) || self.output.references(category, key)
    }
}

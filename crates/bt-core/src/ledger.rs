use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Quantities of one resource category, keyed by resource name.
pub type CategoryMap = BTreeMap<String, f64>;

/// The shared resource store: category name -> resource key -> quantity.
///
/// Slots are created lazily. Reading an absent slot yields 0 without
/// creating it; any mutating access goes through [`ResourceLedger::slot`],
/// which materializes the slot at 0 first. Quantities are not bounded and
/// may go negative if a caller skips the feasibility check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceLedger {
    categories: BTreeMap<String, CategoryMap>,
}

impl ResourceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quantity of `category.key`. Absent slots read as 0.
    pub fn get(&self, category: &str, key: &str) -> f64 {
        self.categories
            .get(category)
            .and_then(|c| c.get(key))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mutable access to `category.key`, creating it at 0 if absent.
    pub fn slot(&mut self, category: &str, key: &str) -> &mut f64 {
        self.categories
            .entry(category.to_owned())
            .or_default()
            .entry(key.to_owned())
            .or_insert(0.0)
    }

    /// Add `delta` (possibly negative) to `category.key`.
    pub fn add(&mut self, category: &str, key: &str, delta: f64) {
        *self.slot(category, key) += delta;
    }

    /// Overwrite `category.key` with `quantity`.
    pub fn set(&mut self, category: &str, key: &str, quantity: f64) {
        *self.slot(category, key) = quantity;
    }

    /// Whether the slot has been materialized.
    pub fn contains(&self, category: &str, key: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|c| c.contains_key(key))
    }

    /// Read-only view of one category.
    pub fn category(&self, category: &str) -> Option<&CategoryMap> {
        self.categories.get(category)
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// All `(category, key, quantity)` triples, sorted by category then key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.categories.iter().flat_map(|(category, slots)| {
            slots
                .iter()
                .map(move |(key, qty)| (category.as_str(), key.as_str(), *qty))
        })
    }

    /// Number of materialized slots across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no slot has been materialized.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C, K> FromIterator<(C, K, f64)> for ResourceLedger
where
    C: Into<String>,
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, K, f64)>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for (category, key, qty) in iter {
            ledger
                .categories
                .entry(category.into())
                .or_default()
                .insert(key.into(), qty);
        }
        ledger
    }
}

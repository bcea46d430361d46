use bt_core::{LightSpectrum, Plant, PlantId, ResourceLedger};
use serde::Serialize;

/// The scalar, display-facing fields of one plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantSnapshot {
    /// Index in the population list.
    pub id: PlantId,
    /// Template type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the plant is still processed each tick.
    pub alive: bool,
    /// Ticks survived.
    pub age: u64,
    /// Current health.
    pub health: f64,
    /// Whether the last tick's inputs were met.
    pub healthy: bool,
}

impl From<&Plant> for PlantSnapshot {
    fn from(plant: &Plant) -> Self {
        Self {
            id: plant.id,
            kind: plant.kind.clone(),
            alive: plant.alive,
            age: plant.age,
            health: plant.health,
            healthy: plant.healthy,
        }
    }
}

/// An owned, read-only copy of simulation state for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    /// Ticks completed.
    pub tick: u64,
    /// Resource quantities.
    pub resources: ResourceLedger,
    /// Ambient light.
    pub light: LightSpectrum,
    /// Every plant ever spawned, dead ones included, in population order.
    pub plants: Vec<PlantSnapshot>,
}

impl SimSnapshot {
    /// Number of plants still alive.
    pub fn living(&self) -> usize {
        self.plants.iter().filter(|p| p.alive).count()
    }
}

use bt_core::{Plant, ResourceLedger};

/// Health lost on a tick where any input could not be met.
pub const STARVATION_PENALTY: f64 = 1.0;

/// What happened to one plant during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metabolism {
    /// Whether every input was satisfiable this tick.
    pub healthy: bool,
    /// The plant's `healthy` flag going into the tick.
    pub was_healthy: bool,
    /// Health at the start of the tick; scaled the exchange.
    pub health_before: f64,
    /// Health after adjustment, capping, and the death check.
    pub health_after: f64,
    /// Whether the plant died this tick.
    pub died: bool,
}

/// Run one tick of metabolism for `plant` against `ledger`.
///
/// Returns `None` without touching anything if the plant is dead.
///
/// Demand scales with current health: each input costs `rate * health`.
/// Every input slot is visited (and materialized) even after a shortfall
/// is found. Resources are exchanged only if all inputs can be met; the
/// plant then heals by its healing rate, otherwise it loses
/// [`STARVATION_PENALTY`]. Health is capped at `max_health`, age advances,
/// and a plant at or below zero health dies with its health floored at 0.
pub fn metabolize(plant: &mut Plant, ledger: &mut ResourceLedger) -> Option<Metabolism> {
    if !plant.alive {
        return None;
    }

    // TODO: weigh `plant.conditions.light` against the ambient spectrum once
    // a light-response curve is defined; light is carried but not consulted.

    let was_healthy = plant.healthy;
    let health = plant.health;

    let mut healthy = true;
    for (category, key, rate) in plant.input.iter() {
        let available = *ledger.slot(category, key);
        if available - rate * health < 0.0 {
            healthy = false;
        }
    }
    plant.healthy = healthy;

    if healthy {
        for (category, key, rate) in plant.input.iter() {
            ledger.add(category, key, -(rate * health));
        }
        for (category, key, rate) in plant.output.iter() {
            ledger.add(category, key, rate * health);
        }
        plant.health += plant.healing_rate;
    } else {
        plant.health -= STARVATION_PENALTY;
    }

    if plant.health >= plant.max_health {
        plant.health = plant.max_health;
    }

    plant.age += 1;

    let died = plant.health <= 0.0;
    if died {
        plant.health = 0.0;
        plant.alive = false;
    }

    Some(Metabolism {
        healthy,
        was_healthy,
        health_before: health,
        health_after: plant.health,
        died,
    })
}

//! Tick-based metabolism engine for Biotope.
//!
//! A [`Simulation`] owns the environment and the plant population. Each
//! tick visits every living plant in spawn order and runs
//! [`metabolism::metabolize`] against the shared resource ledger, so the
//! order plants were spawned in is observable within a tick. Runs are fully
//! deterministic: the same starting state and tick count always produce the
//! same result.

/// Simulation clock for tracking ticks.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Per-plant, per-tick consumption, production, and health update.
pub mod metabolism;
/// Top-level simulation orchestrator.
pub mod simulation;
/// Read-only copies of simulation state for renderers.
pub mod snapshot;
/// Validated step counts for externally supplied input.
pub mod steps;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-exports of [`metabolism::metabolize`] and [`metabolism::Metabolism`].
pub use metabolism::{Metabolism, metabolize};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-exports of [`snapshot::SimSnapshot`] and [`snapshot::PlantSnapshot`].
pub use snapshot::{PlantSnapshot, SimSnapshot};
/// Re-exports of [`steps::StepCount`] and [`steps::parse_steps`].
pub use steps::{StepCount, parse_steps};

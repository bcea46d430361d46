//! Core types for Biotope: the shared resource ledger, the environment,
//! plants, and the templates they are spawned from.
//!
//! Nothing here advances time. The tick engine lives in `bt-simulation`
//! and is the only code that mutates these values during a run.

/// The shared world state: resources plus ambient light.
pub mod environment;
/// Error types used throughout the crate.
pub mod error;
/// Two-level resource store with lazy slot creation.
pub mod ledger;
/// Light spectra for the environment and plant preferences.
pub mod light;
/// Plants, their identifiers, and exchange-rate tables.
pub mod plant;
/// Plant templates and the catalog they are loaded into.
pub mod template;

/// Re-export of [`environment::Environment`].
pub use environment::Environment;
/// Re-exports of [`error::CoreError`] and [`error::CoreResult`].
pub use error::{CoreError, CoreResult};
/// Re-export of [`ledger::ResourceLedger`].
pub use ledger::ResourceLedger;
/// Re-export of [`light::LightSpectrum`].
pub use light::LightSpectrum;
/// Re-exports of plant types.
pub use plant::{Conditions, Plant, PlantId, RateTable};
/// Re-exports of template types.
pub use template::{PlantTemplate, TemplateCatalog};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::ledger::ResourceLedger;
use crate::light::LightSpectrum;

/// The shared world state: resource quantities plus the ambient light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Substrate, atmosphere, and any other resource categories.
    pub resources: ResourceLedger,
    /// Ambient light intensities. Not consulted by metabolism.
    #[serde(default)]
    pub light: LightSpectrum,
}

impl Default for Environment {
    /// 500 units each of substrate water and nutrient and atmospheric CO2,
    /// under the daylight spectrum.
    fn default() -> Self {
        let resources = [
            ("substrate", "water", 500.0),
            ("substrate", "nutrient", 500.0),
            ("atmosphere", "co2", 500.0),
        ]
        .into_iter()
        .collect();
        Self {
            resources,
            light: LightSpectrum::daylight(),
        }
    }
}

impl Environment {
    /// An environment with the given resources and no light bands.
    pub fn new(resources: ResourceLedger) -> Self {
        Self {
            resources,
            light: LightSpectrum::new(),
        }
    }

    /// Parse and validate an environment document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let env: Self = serde_json::from_str(json)?;
        env.validate()?;
        Ok(env)
    }

    /// Read, parse, and validate an environment file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every quantity is finite and every light band is in `[0, 1]`.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some((category, key, qty)) = self.resources.iter().find(|(_, _, q)| !q.is_finite())
        {
            return Err(CoreError::InvalidEnvironment(format!(
                "{category}.{key} is not a finite quantity ({qty})"
            )));
        }
        if let Some((band, intensity)) = self.light.first_out_of_range() {
            return Err(CoreError::InvalidEnvironment(format!(
                "light band {band} must be within [0, 1], got {intensity}"
            )));
        }
        Ok(())
    }
}

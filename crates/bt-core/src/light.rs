use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named wavelength bands mapped to intensities in `[0, 1]`.
///
/// Used both for the ambient spectrum and for a plant's light preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightSpectrum {
    bands: BTreeMap<String, f64>,
}

impl LightSpectrum {
    /// Create an empty spectrum.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ambient spectrum a fresh environment starts with.
    pub fn daylight() -> Self {
        [
            ("uv", 0.3),
            ("violet", 0.6),
            ("blue", 0.8),
            ("green", 1.0),
            ("yellow", 0.9),
            ("orange", 0.8),
            ("red", 0.7),
            ("ir", 0.5),
        ]
        .into_iter()
        .collect()
    }

    /// Intensity of a band, if present.
    pub fn get(&self, band: &str) -> Option<f64> {
        self.bands.get(band).copied()
    }

    /// Set a band's intensity.
    pub fn set(&mut self, band: impl Into<String>, intensity: f64) {
        self.bands.insert(band.into(), intensity);
    }

    /// Bands and intensities in sorted band order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.bands.iter().map(|(b, i)| (b.as_str(), *i))
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Returns `true` if the spectrum has no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// The first band whose intensity is not a finite value in `[0, 1]`.
    pub fn first_out_of_range(&self) -> Option<(&str, f64)> {
        self.iter()
            .find(|(_, i)| !i.is_finite() || !(0.0..=1.0).contains(i))
    }
}

impl<B: Into<String>> FromIterator<(B, f64)> for LightSpectrum {
    fn from_iter<I: IntoIterator<Item = (B, f64)>>(iter: I) -> Self {
        Self {
            bands: iter.into_iter().map(|(b, i)| (b.into(), i)).collect(),
        }
    }
}

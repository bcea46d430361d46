use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// A validated number of ticks to advance.
///
/// Step counts that arrive from outside the type system (command lines,
/// config files) pass through here so that negative or fractional values
/// are rejected instead of coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StepCount(pub u64);

impl StepCount {
    /// The number of ticks.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StepCount {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SimError::InvalidStepCount(s.to_owned()));
        }
        trimmed
            .parse()
            .map(Self)
            .map_err(|_| SimError::InvalidStepCount(s.to_owned()))
    }
}

impl TryFrom<i64> for StepCount {
    type Error = SimError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| SimError::InvalidStepCount(value.to_string()))
    }
}

impl TryFrom<f64> for StepCount {
    type Error = SimError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
            return Err(SimError::InvalidStepCount(value.to_string()));
        }
        Ok(Self(value as u64))
    }
}

/// Parse a step count, for use as a `clap` value parser.
pub fn parse_steps(s: &str) -> Result<StepCount, SimError> {
    s.parse()
}

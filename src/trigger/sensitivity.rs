//! Sensitivity setting and its mapping onto quartile thresholds

use crate::trigger::{Quartile, Quartiles, TriggerError, TriggerResult};
use serde::Serialize;
use std::fmt;

/// User sensitivity in `0..=100`. Higher values flag fewer fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Sensitivity(u8);

impl Sensitivity {
    pub const MAX: u32 = 100;

    /// Validate a raw setting. Out-of-range values are rejected, not clamped.
    pub fn new(value: u32) -> TriggerResult<Self> {
        if value > Self::MAX {
            return Err(TriggerError::InvalidSensitivity(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u32 {
        u32::from(self.0)
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u32> for Sensitivity {
    type Error = TriggerError;

    fn try_from(value: u32) -> TriggerResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps sensitivity to the quartile used as a category's threshold.
///
/// | sensitivity | threshold |
/// |-------------|-----------|
/// | 0..=25      | Q1        |
/// | 26..=50     | Q2        |
/// | 51..=75     | Q3        |
/// | 76..=100    | Q3        |
///
/// There is no tier stricter than Q3: settings above 75 keep using it.
pub struct SensitivityPolicy;

impl SensitivityPolicy {
    pub fn tier(sensitivity: Sensitivity) -> Quartile {
        match sensitivity.0 {
            0..=25 => Quartile::Q1,
            26..=50 => Quartile::Q2,
            _ => Quartile::Q3,
        }
    }

    pub fn select_threshold(sensitivity: Sensitivity, quartiles: &Quartiles) -> f64 {
        quartiles.get(Self::tier(sensitivity))
    }
}

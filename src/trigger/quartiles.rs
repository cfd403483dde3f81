//! Order statistics over a metric distribution

use crate::trigger::{TriggerError, TriggerResult};
use serde::Serialize;

/// Which of the three quartiles a threshold is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quartile {
    /// 25th percentile
    Q1,
    /// Median
    Q2,
    /// 75th percentile
    Q3,
}

impl Quartile {
    pub fn name(&self) -> &'static str {
        match self {
            Quartile::Q1 => "Q1",
            Quartile::Q2 => "Q2",
            Quartile::Q3 => "Q3",
        }
    }

    fn fraction(&self) -> f64 {
        match self {
            Quartile::Q1 => 0.25,
            Quartile::Q2 => 0.50,
            Quartile::Q3 => 0.75,
        }
    }
}

/// Q1, Q2 and Q3 of one distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Compute quartiles from unsorted values.
    ///
    /// Repeated values keep their multiplicity. Non-finite values are
    /// ignored; if nothing finite remains the result is
    /// [`TriggerError::InsufficientData`].
    pub fn from_values(values: &[f64]) -> TriggerResult<Self> {
        let sorted = sorted_finite(values);
        Self::from_sorted(&sorted)
    }

    /// Compute quartiles from values already sorted ascending.
    pub fn from_sorted(sorted: &[f64]) -> TriggerResult<Self> {
        if sorted.is_empty() {
            return Err(TriggerError::InsufficientData);
        }
        Ok(Self {
            q1: interpolate(sorted, Quartile::Q1.fraction()),
            q2: interpolate(sorted, Quartile::Q2.fraction()),
            q3: interpolate(sorted, Quartile::Q3.fraction()),
        })
    }

    pub fn get(&self, quartile: Quartile) -> f64 {
        match quartile {
            Quartile::Q1 => self.q1,
            Quartile::Q2 => self.q2,
            Quartile::Q3 => self.q3,
        }
    }

    /// Interquartile range (Q3 - Q1)
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear interpolation between order statistics at zero-based rank
/// `fraction * (n - 1)`. For `[1, 2, 3, 4, 5]` this gives Q1=2, Q2=3, Q3=4.
fn interpolate(sorted: &[f64], fraction: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = fraction * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let dropped = values.len() - sorted.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} non-finite values from distribution", dropped);
    }
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Descriptive statistics for one category's distribution
#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    /// Number of finite data points
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub quartiles: Quartiles,
}

impl DistributionSummary {
    pub fn from_values(values: &[f64]) -> TriggerResult<Self> {
        let sorted = sorted_finite(values);
        let quartiles = Quartiles::from_sorted(&sorted)?;
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Ok(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            quartiles,
        })
    }
}

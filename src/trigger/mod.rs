//! Metric-category trigger engine
//!
//! Decides whether a freshly extracted code fragment is size-anomalous
//! compared with the fragments seen so far. Each metric category reduces
//! the fragment's feature vector to one scalar, derives Q1/Q2/Q3 from the
//! history, and picks one quartile as the threshold according to the
//! user's sensitivity. The fragment is flagged when any category's scalar
//! strictly exceeds its threshold.
//!
//! # Example
//!
//! ```rust
//! use anticopypaster::trigger::{MetricVector, TriggerEngine};
//!
//! let history: Vec<MetricVector> = (1..=5)
//!     .map(|n| MetricVector::with_values(&[(0, n as f32)]).unwrap())
//!     .collect();
//! let candidate = MetricVector::with_values(&[(0, 4.0)]).unwrap();
//!
//! let engine = TriggerEngine::default();
//! assert!(engine.is_flag_triggered(&history, Some(&candidate), 50).unwrap());
//! ```

mod category;
mod engine;
mod quartiles;
mod sensitivity;
mod vector;

pub use category::{MetricCategory, Reduction};
pub use engine::{CategoryOutcome, TriggerEngine, Verdict};
pub use quartiles::{DistributionSummary, Quartile, Quartiles};
pub use sensitivity::{Sensitivity, SensitivityPolicy};
pub use vector::{MetricSource, MetricVector, METRIC_COUNT};

use thiserror::Error;

/// Errors raised by the trigger engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriggerError {
    /// A distribution had no usable values. Handled per category by the
    /// engine and never returned from a decision.
    #[error("Insufficient data: distribution has no values")]
    InsufficientData,

    #[error("Invalid configuration for category '{category}': {reason}")]
    InvalidConfiguration { category: String, reason: String },

    #[error("Invalid sensitivity {0}: must be between 0 and 100")]
    InvalidSensitivity(u32),

    #[error("Metric index {index} is out of range (vector has {} metrics)", METRIC_COUNT)]
    MetricIndex { index: usize },

    #[error("Metric vector has {actual} values, expected {expected}")]
    VectorLength { expected: usize, actual: usize },
}

pub type TriggerResult<T> = Result<T, TriggerError>;

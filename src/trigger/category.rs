//! Metric categories: named reductions of a vector to one scalar

use crate::trigger::{MetricVector, TriggerError, TriggerResult, METRIC_COUNT};
use serde::{Deserialize, Serialize};

/// How a category combines the measurements it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    #[default]
    Sum,
    Mean,
    Max,
    Min,
}

impl Reduction {
    fn apply(&self, values: impl Iterator<Item = f64>) -> f64 {
        match self {
            Reduction::Sum => values.sum(),
            Reduction::Mean => {
                let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                if n == 0 {
                    0.0
                } else {
                    sum / n as f64
                }
            }
            Reduction::Max => values.fold(f64::NEG_INFINITY, f64::max),
            Reduction::Min => values.fold(f64::INFINITY, f64::min),
        }
    }
}

/// A size dimension of a fragment, e.g. method length or parameter count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCategory {
    pub name: String,
    /// Vector indices this category reads
    pub indices: Vec<usize>,
    #[serde(default)]
    pub reduction: Reduction,
}

impl MetricCategory {
    /// Index of "number of statements" in the feature vector
    pub const STATEMENT_COUNT_INDEX: usize = 0;

    pub fn new(name: impl Into<String>, indices: Vec<usize>, reduction: Reduction) -> Self {
        Self {
            name: name.into(),
            indices,
            reduction,
        }
    }

    /// Category that reads one index unchanged
    pub fn single(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, vec![index], Reduction::Sum)
    }

    /// Built-in method size category (statement count)
    pub fn method_size() -> Self {
        Self::single("size", Self::STATEMENT_COUNT_INDEX)
    }

    /// Check the indices against the vector length.
    pub fn validate(&self) -> TriggerResult<()> {
        if self.indices.is_empty() {
            return Err(self.invalid("no metric indices configured".to_string()));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= METRIC_COUNT) {
            return Err(self.invalid(format!(
                "index {} is out of range (vector has {} metrics)",
                bad, METRIC_COUNT
            )));
        }
        Ok(())
    }

    /// Reduce a vector to this category's scalar.
    ///
    /// Indices are checked by [`validate`](Self::validate); any index that
    /// slipped past it reads as zero.
    pub fn reduce(&self, vector: &MetricVector) -> f64 {
        self.reduction.apply(
            self.indices
                .iter()
                .map(|&i| f64::from(vector.get(i).unwrap_or(0.0))),
        )
    }

    fn invalid(&self, reason: String) -> TriggerError {
        TriggerError::InvalidConfiguration {
            category: self.name.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector() -> MetricVector {
        MetricVector::with_values(&[(0, 3.0), (1, 5.0), (11, 1.0)]).unwrap()
    }

    #[test]
    fn test_method_size_reads_index_zero() {
        assert_eq!(MetricCategory::method_size().reduce(&vector()), 3.0);
    }

    #[test]
    fn test_single_index_is_identity_for_every_reduction() {
        for reduction in [Reduction::Sum, Reduction::Mean, Reduction::Max, Reduction::Min] {
            let category = MetricCategory::new("x", vec![1], reduction);
            assert_eq!(category.reduce(&vector()), 5.0, "{:?}", reduction);
        }
    }

    #[test]
    fn test_multi_index_reductions() {
        let v = vector();
        let indices = vec![0, 1, 11];
        assert_eq!(MetricCategory::new("s", indices.clone(), Reduction::Sum).reduce(&v), 9.0);
        assert_eq!(MetricCategory::new("a", indices.clone(), Reduction::Mean).reduce(&v), 3.0);
        assert_eq!(MetricCategory::new("hi", indices.clone(), Reduction::Max).reduce(&v), 5.0);
        assert_eq!(MetricCategory::new("lo", indices, Reduction::Min).reduce(&v), 1.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let category = MetricCategory::new("broken", vec![0, 78], Reduction::Max);
        match category.validate() {
            Err(TriggerError::InvalidConfiguration { category, reason }) => {
                assert_eq!(category, "broken");
                assert!(reason.contains("78"));
            }
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
        assert!(MetricCategory::single("last", 77).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_indices() {
        let category = MetricCategory::new("empty", vec![], Reduction::Sum);
        assert!(matches!(
            category.validate(),
            Err(TriggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_deserialize_defaults_to_sum() {
        let category: MetricCategory =
            toml::from_str("name = \"size\"\nindices = [0]").unwrap();
        assert_eq!(category, MetricCategory::method_size());
    }
}

//! Fixed-length metric vectors and the capability to produce them

use crate::trigger::{TriggerError, TriggerResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of measurements in every fragment's feature vector.
pub const METRIC_COUNT: usize = 78;

/// One fragment's measurements, indexed by metric.
///
/// Index meanings are fixed by the feature extractor (index 0 is the
/// number of statements). The length can't change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricVector {
    values: Box<[f32; METRIC_COUNT]>,
}

impl MetricVector {
    /// A vector with every measurement set to zero
    pub fn zeroed() -> Self {
        Self {
            values: Box::new([0.0; METRIC_COUNT]),
        }
    }

    /// Build from a slice, which must hold exactly [`METRIC_COUNT`] values.
    pub fn from_slice(values: &[f32]) -> TriggerResult<Self> {
        let array: [f32; METRIC_COUNT] =
            values.try_into().map_err(|_| TriggerError::VectorLength {
                expected: METRIC_COUNT,
                actual: values.len(),
            })?;
        Ok(Self {
            values: Box::new(array),
        })
    }

    /// Zeroed vector with the given `(index, value)` pairs set.
    pub fn with_values(entries: &[(usize, f32)]) -> TriggerResult<Self> {
        let mut vector = Self::zeroed();
        for &(index, value) in entries {
            let slot = vector
                .values
                .get_mut(index)
                .ok_or(TriggerError::MetricIndex { index })?;
            *slot = value;
        }
        Ok(vector)
    }

    /// Measurement at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        self.values.as_slice()
    }
}

impl Default for MetricVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

// Serialized as a plain array of numbers
impl Serialize for MetricVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MetricVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f32>::deserialize(deserializer)?;
        Self::from_slice(&values).map_err(serde::de::Error::custom)
    }
}

/// Anything that can produce a fragment's metric vector.
///
/// The engine only needs this one capability, so callers can feed it
/// their own fragment types without converting up front.
pub trait MetricSource {
    fn metric_vector(&self) -> MetricVector;
}

impl MetricSource for MetricVector {
    fn metric_vector(&self) -> MetricVector {
        self.clone()
    }
}

impl<T: MetricSource + ?Sized> MetricSource for &T {
    fn metric_vector(&self) -> MetricVector {
        (**self).metric_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_requires_exact_length() {
        let err = MetricVector::from_slice(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            TriggerError::VectorLength {
                expected: METRIC_COUNT,
                actual: 2
            }
        ));

        let ok = MetricVector::from_slice(&[0.5; METRIC_COUNT]).unwrap();
        assert_eq!(ok.get(77), Some(0.5));
        assert_eq!(ok.get(78), None);
    }

    #[test]
    fn test_with_values_sets_only_given_indices() {
        let vector = MetricVector::with_values(&[(0, 3.0), (11, 7.0)]).unwrap();
        assert_eq!(vector.get(0), Some(3.0));
        assert_eq!(vector.get(11), Some(7.0));
        assert_eq!(vector.as_slice().iter().filter(|v| **v != 0.0).count(), 2);
    }

    #[test]
    fn test_with_values_rejects_out_of_range_index() {
        assert_eq!(
            MetricVector::with_values(&[(0, 1.0), (78, 2.0)]),
            Err(TriggerError::MetricIndex { index: 78 })
        );
    }

    #[test]
    fn test_json_array_roundtrip() {
        let vector = MetricVector::with_values(&[(0, 4.0)]).unwrap();
        let json = serde_json::to_string(&vector).unwrap();
        assert!(json.starts_with("[4.0,0.0"));
        let back: MetricVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);
    }

    #[test]
    fn test_json_wrong_length_rejected() {
        let result: Result<MetricVector, _> = serde_json::from_str("[1.0, 2.0, 3.0]");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("expected 78"), "unexpected error: {}", err);
    }
}

//! Property tests for quartiles and the trigger decision
//!
//! Uses proptest to verify:
//! 1. Quartile ordering — Q1 <= Q2 <= Q3 for any non-empty distribution
//! 2. Order independence — shuffling the history never changes quartiles
//! 3. Strict boundary — a candidate equal to the threshold never triggers
//! 4. Determinism — repeated calls return the same verdict

use anticopypaster::trigger::{Quartiles, Sensitivity, SensitivityPolicy, TriggerEngine};
use anticopypaster::MetricVector;
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_sizes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u32..500).prop_map(f64::from), 1..60)
}

/// Any finite measurement, negative and fractional included
fn arb_finite_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        any::<f32>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(f64::from),
        1..60,
    )
}

fn arb_sensitivity() -> impl Strategy<Value = u32> {
    0u32..=100
}

fn history_from(sizes: &[f64]) -> Vec<MetricVector> {
    sizes
        .iter()
        .map(|&s| MetricVector::with_values(&[(0, s as f32)]).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn quartiles_are_ordered(values in arb_finite_values()) {
        let q = Quartiles::from_values(&values).unwrap();
        prop_assert!(q.q1 <= q.q2);
        prop_assert!(q.q2 <= q.q3);
    }

    #[test]
    fn quartiles_ignore_input_order(values in arb_finite_values()) {
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(
            Quartiles::from_values(&values).unwrap(),
            Quartiles::from_values(&reversed).unwrap()
        );
    }

    #[test]
    fn threshold_value_never_triggers(sizes in arb_sizes(), sensitivity in arb_sensitivity()) {
        let engine = TriggerEngine::default();
        let history = history_from(&sizes);
        let q = Quartiles::from_values(&sizes).unwrap();
        let threshold = SensitivityPolicy::select_threshold(
            Sensitivity::new(sensitivity).unwrap(),
            &q,
        );

        // Thresholds from integer sizes are multiples of 0.25, exact in f32
        let at = MetricVector::with_values(&[(0, threshold as f32)]).unwrap();
        let above = MetricVector::with_values(&[(0, threshold as f32 + 1.0)]).unwrap();
        prop_assert!(!engine.is_flag_triggered(&history, Some(&at), sensitivity).unwrap());
        prop_assert!(engine.is_flag_triggered(&history, Some(&above), sensitivity).unwrap());
    }

    #[test]
    fn decision_is_deterministic(
        sizes in arb_sizes(),
        candidate in 0u32..600,
        sensitivity in arb_sensitivity(),
    ) {
        let engine = TriggerEngine::default();
        let history = history_from(&sizes);
        let candidate = MetricVector::with_values(&[(0, candidate as f32)]).unwrap();
        let first = engine.is_flag_triggered(&history, Some(&candidate), sensitivity).unwrap();
        let second = engine.is_flag_triggered(&history, Some(&candidate), sensitivity).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn absent_candidate_never_triggers(sizes in prop::collection::vec(0u32..500, 0..20), sensitivity in arb_sensitivity()) {
        let engine = TriggerEngine::default();
        let sizes: Vec<f64> = sizes.into_iter().map(f64::from).collect();
        let history = history_from(&sizes);
        prop_assert!(!engine.is_flag_triggered(&history, None, sensitivity).unwrap());
    }
}

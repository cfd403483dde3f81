//! Trigger engine: combines category thresholds into one verdict

use crate::trigger::{
    MetricCategory, MetricSource, MetricVector, Quartile, Quartiles, Sensitivity,
    SensitivityPolicy, TriggerResult,
};
use serde::Serialize;
use tracing::debug;

/// Decides whether a candidate fragment is anomalous against its history.
///
/// Holds only the validated category list, so one engine can be shared
/// between threads; every call works on its own snapshot of the history.
#[derive(Debug, Clone)]
pub struct TriggerEngine {
    categories: Vec<MetricCategory>,
}

impl TriggerEngine {
    /// Create an engine, rejecting any category with bad indices.
    pub fn new(categories: Vec<MetricCategory>) -> TriggerResult<Self> {
        for category in &categories {
            category.validate()?;
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[MetricCategory] {
        &self.categories
    }

    /// Whether `candidate` should be flagged as a copy-paste candidate.
    ///
    /// Returns `Ok(false)` when there is no candidate or no history.
    /// Fails only for a sensitivity above 100.
    pub fn is_flag_triggered<S: MetricSource>(
        &self,
        history: &[S],
        candidate: Option<&S>,
        sensitivity: u32,
    ) -> TriggerResult<bool> {
        self.evaluate(history, candidate, sensitivity)
            .map(|verdict| verdict.triggered)
    }

    /// Same decision as [`is_flag_triggered`](Self::is_flag_triggered),
    /// with the per-category thresholds that produced it.
    pub fn evaluate<S: MetricSource>(
        &self,
        history: &[S],
        candidate: Option<&S>,
        sensitivity: u32,
    ) -> TriggerResult<Verdict> {
        let sensitivity: Sensitivity = sensitivity.try_into()?;

        let candidate = match candidate {
            Some(c) if !history.is_empty() => c.metric_vector(),
            _ => {
                debug!("No candidate or empty history, not flagging");
                return Ok(Verdict::not_triggered(sensitivity));
            }
        };

        let snapshot: Vec<MetricVector> = history.iter().map(|s| s.metric_vector()).collect();

        let categories: Vec<CategoryOutcome> = self
            .categories
            .iter()
            .map(|category| evaluate_category(category, &snapshot, &candidate, sensitivity))
            .collect();

        Ok(Verdict {
            triggered: categories.iter().any(|c| c.triggered),
            sensitivity,
            categories,
        })
    }
}

impl Default for TriggerEngine {
    fn default() -> Self {
        Self {
            categories: vec![MetricCategory::method_size()],
        }
    }
}

fn evaluate_category(
    category: &MetricCategory,
    history: &[MetricVector],
    candidate: &MetricVector,
    sensitivity: Sensitivity,
) -> CategoryOutcome {
    let distribution: Vec<f64> = history.iter().map(|v| category.reduce(v)).collect();
    let candidate_value = category.reduce(candidate);
    let tier = SensitivityPolicy::tier(sensitivity);

    let Ok(quartiles) = Quartiles::from_values(&distribution) else {
        debug!("{}: insufficient data, skipping", category.name);
        return CategoryOutcome {
            category: category.name.clone(),
            sample_count: 0,
            candidate_value,
            quartiles: None,
            iqr: None,
            tier,
            threshold: None,
            triggered: false,
        };
    };

    let threshold = quartiles.get(tier);
    let triggered = candidate_value > threshold;
    debug!(
        "{}: candidate={} threshold={} ({}, n={}) triggered={}",
        category.name,
        candidate_value,
        threshold,
        tier.name(),
        distribution.len(),
        triggered
    );

    CategoryOutcome {
        category: category.name.clone(),
        sample_count: distribution.iter().filter(|v| v.is_finite()).count(),
        candidate_value,
        quartiles: Some(quartiles),
        iqr: Some(quartiles.iqr()),
        tier,
        threshold: Some(threshold),
        triggered,
    }
}

/// Outcome of one decision
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub triggered: bool,
    pub sensitivity: Sensitivity,
    /// One entry per category; empty when the decision short-circuited
    pub categories: Vec<CategoryOutcome>,
}

impl Verdict {
    fn not_triggered(sensitivity: Sensitivity) -> Self {
        Self {
            triggered: false,
            sensitivity,
            categories: Vec::new(),
        }
    }
}

/// How one category contributed to a verdict
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOutcome {
    pub category: String,
    /// Finite history values the quartiles were computed from
    pub sample_count: usize,
    pub candidate_value: f64,
    pub quartiles: Option<Quartiles>,
    /// Spread of the history (Q3 - Q1)
    pub iqr: Option<f64>,
    pub tier: Quartile,
    pub threshold: Option<f64>,
    pub triggered: bool,
}

impl CategoryOutcome {
    /// Format as a one-line human-readable note
    pub fn to_note(&self) -> String {
        match (self.threshold, self.quartiles) {
            (Some(threshold), Some(q)) => format!(
                "{}: {} {} {} ({}) | Q1={} Q2={} Q3={} IQR={} n={}",
                self.category,
                self.candidate_value,
                if self.triggered { ">" } else { "<=" },
                threshold,
                self.tier.name(),
                q.q1,
                q.q2,
                q.q3,
                q.iqr(),
                self.sample_count
            ),
            _ => format!("{}: no history data", self.category),
        }
    }
}

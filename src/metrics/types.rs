//! @ai:module:intent Report and indicator types shared by all metrics
//! @ai:module:layer domain
//! @ai:module:public_api MetricReport, RecognitionMetric, resolve_indicator
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::sample::Recognition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ACCURACY: &str = "accuracy";
pub const NORMALIZED_EDIT_SIMILARITY: &str = "normalized_edit_similarity";
pub const EDIT_DISTANCE_SCORE: &str = "edit_distance_score";

/// Short indicator prefixes accepted in configuration.
const SHORT_PREFIXES: [(&str, &str); 3] = [
    ("norm_edit_dis", NORMALIZED_EDIT_SIMILARITY),
    ("edit_dis", EDIT_DISTANCE_SCORE),
    ("acc", ACCURACY),
];

/// @ai:intent Scores keyed by indicator name, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricReport {
    scores: BTreeMap<String, f64>,
}

impl MetricReport {
    /// @ai:intent Create an empty report
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Record a score under a key
    /// @ai:effects mutates self
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.scores.insert(key.into(), value);
    }

    /// @ai:intent Look up a score by its full key
    /// @ai:effects pure
    pub fn get(&self, key: &str) -> Option<f64> {
        self.scores.get(key).copied()
    }

    /// @ai:intent Look up the primary indicator, accepting short names
    /// @ai:effects pure
    pub fn main_value(&self, indicator: &str) -> Result<f64> {
        let key = resolve_indicator(indicator, self)?;
        self.get(&key)
            .ok_or_else(|| Error::UnknownIndicator(indicator.to_string()))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// @ai:intent Iterate scores in key order
    /// @ai:effects pure
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// @ai:intent Map an indicator name to the report key it denotes
/// @ai:effects pure
pub fn resolve_indicator(indicator: &str, report: &MetricReport) -> Result<String> {
    if report.get(indicator).is_some() {
        return Ok(indicator.to_string());
    }

    for (short, long) in SHORT_PREFIXES {
        if let Some(rest) = indicator.strip_prefix(short) {
            if rest.is_empty() || rest.starts_with('_') {
                let key = format!("{long}{rest}");
                if report.get(&key).is_some() {
                    return Ok(key);
                }
            }
        }
    }

    Err(Error::UnknownIndicator(indicator.to_string()))
}

/// @ai:intent Stateful accumulator scoring prediction/label batches
/// @ai:invariant running totals only grow between resets
pub trait RecognitionMetric: Send + Sync {
    /// @ai:intent Name used to select this metric in configuration
    fn name(&self) -> &'static str;

    /// @ai:intent Indicator a caller treats as the headline score
    fn main_indicator(&self) -> &str;

    /// @ai:intent Score one batch and fold it into the running totals
    /// @ai:effects mutates self
    fn update(&mut self, predictions: &[Recognition], labels: &[Recognition])
        -> Result<MetricReport>;

    /// @ai:intent Report on the running totals, then reset them
    /// @ai:effects mutates self
    fn report(&mut self) -> Result<MetricReport>;

    /// @ai:intent Zero all running totals
    /// @ai:effects mutates self
    fn reset(&mut self);
}

//! @ai:module:intent Exact-match accuracy and normalized edit similarity over all samples
//! @ai:module:layer domain
//! @ai:module:public_api BasicAccuracyMetric
//! @ai:module:stateless false

use crate::distance::{normalized_edit_distance, strip_spaces};
use crate::error::{Error, Result};
use crate::metrics::types::{MetricReport, RecognitionMetric, ACCURACY, NORMALIZED_EDIT_SIMILARITY};
use crate::sample::{pair_up, Recognition};

pub const DEFAULT_MAIN_INDICATOR: &str = "acc";

/// Counts and sums for one batch or for the running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    samples: u64,
    matches: u64,
    norm_edit_sum: f64,
}

impl Tally {
    fn merge(&mut self, other: &Tally) {
        self.samples += other.samples;
        self.matches += other.matches;
        self.norm_edit_sum += other.norm_edit_sum;
    }

    /// @ai:pre samples > 0
    fn to_report(self) -> MetricReport {
        let count = self.samples as f64;
        let mut report = MetricReport::new();
        report.insert(ACCURACY, self.matches as f64 / count);
        report.insert(NORMALIZED_EDIT_SIMILARITY, 1.0 - self.norm_edit_sum / count);
        report
    }
}

/// @ai:intent Running accuracy and normalized edit similarity across batches
#[derive(Debug, Clone)]
pub struct BasicAccuracyMetric {
    main_indicator: String,
    totals: Tally,
}

impl BasicAccuracyMetric {
    /// @ai:intent Create a metric with the default primary indicator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_main_indicator(DEFAULT_MAIN_INDICATOR)
    }

    /// @ai:intent Create a metric reporting the given primary indicator
    /// @ai:effects pure
    pub fn with_main_indicator(main_indicator: impl Into<String>) -> Self {
        Self {
            main_indicator: main_indicator.into(),
            totals: Tally::default(),
        }
    }

    /// @ai:intent Number of samples accumulated since the last reset
    /// @ai:effects pure
    pub fn sample_count(&self) -> u64 {
        self.totals.samples
    }
}

impl Default for BasicAccuracyMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionMetric for BasicAccuracyMetric {
    fn name(&self) -> &'static str {
        "RecMetric"
    }

    fn main_indicator(&self) -> &str {
        &self.main_indicator
    }

    /// @ai:intent Score one batch, fold it into the totals, return the batch scores
    /// @ai:pre at least one (prediction, label) pair
    /// @ai:effects mutates self
    fn update(&mut self, predictions: &[Recognition], labels: &[Recognition]) -> Result<MetricReport> {
        let mut batch = Tally::default();

        for (pred, label) in pair_up(predictions, labels) {
            let pred = strip_spaces(pred);
            let label = strip_spaces(label);

            batch.norm_edit_sum += normalized_edit_distance(&pred, &label);
            if pred == label {
                batch.matches += 1;
            }
            batch.samples += 1;
        }

        if batch.samples == 0 {
            return Err(Error::EmptyBatch);
        }

        self.totals.merge(&batch);
        tracing::debug!(
            samples = batch.samples,
            matches = batch.matches,
            total_samples = self.totals.samples,
            "Scored batch"
        );

        Ok(batch.to_report())
    }

    /// @ai:intent Report on all samples since the last reset, then reset
    /// @ai:effects mutates self
    fn report(&mut self) -> Result<MetricReport> {
        if self.totals.samples == 0 {
            return Err(Error::NoSamples);
        }

        let report = self.totals.to_report();
        self.reset();
        Ok(report)
    }

    fn reset(&mut self) {
        self.totals = Tally::default();
    }
}

//! @ai:module:intent Batched evaluation loop feeding records into a metric
//! @ai:module:layer application
//! @ai:module:public_api Evaluator
//! @ai:module:depends_on metrics, corpus

use crate::corpus::record::{unzip_records, EvalRecord};
use crate::error::Result;
use crate::metrics::{MetricReport, RecognitionMetric};

/// @ai:intent Feeds records through a metric in fixed-size batches
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    batch_size: usize,
}

impl Evaluator {
    /// @ai:intent Create an evaluator; a zero batch size is treated as one
    /// @ai:effects pure
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// @ai:intent Score every batch, then return the cumulative report
    /// @ai:post metric totals are reset
    /// @ai:effects mutates metric
    pub fn run(
        &self,
        metric: &mut dyn RecognitionMetric,
        records: &[EvalRecord],
    ) -> Result<MetricReport> {
        for (n, chunk) in records.chunks(self.batch_size).enumerate() {
            let (predictions, labels) = unzip_records(chunk);
            let batch = metric.update(&predictions, &labels)?;

            if let Ok(value) = batch.main_value(metric.main_indicator()) {
                tracing::debug!(
                    batch = n,
                    size = chunk.len(),
                    "{} = {:.4}",
                    metric.main_indicator(),
                    value
                );
            }
        }

        let report = metric.report()?;
        tracing::info!(
            "Evaluated {} records with {} in batches of {}",
            records.len(),
            metric.name(),
            self.batch_size
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::metrics::{BasicAccuracyMetric, StratifiedAccuracyMetric};

    fn record(prediction: &str, label: &str) -> EvalRecord {
        EvalRecord {
            prediction: prediction.to_string(),
            label: label.to_string(),
            confidence: 0.5,
        }
    }

    #[test]
    fn test_batch_size_does_not_change_basic_report() {
        let records = vec![
            record("cat", "cat"),
            record("dog", "cog"),
            record("bird", "bird"),
            record("fsh", "fish"),
            record("owl", "owl"),
        ];

        let mut metric = BasicAccuracyMetric::new();
        let single = Evaluator::new(100).run(&mut metric, &records).unwrap();
        let batched = Evaluator::new(2).run(&mut metric, &records).unwrap();

        assert!((single.get("accuracy").unwrap() - 0.6).abs() < 1e-9);
        for (key, value) in single.iter() {
            assert!((value - batched.get(key).unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        assert_eq!(Evaluator::new(0).batch_size(), 1);
    }

    #[test]
    fn test_no_records_propagates_error() {
        let mut metric = BasicAccuracyMetric::new();
        let result = Evaluator::new(4).run(&mut metric, &[]);
        assert!(matches!(result, Err(Error::NoSamples)));
    }

    #[test]
    fn test_stratified_run() {
        let records = vec![record("Cat", "cat"), record("internationa1", "international")];
        let mut metric = StratifiedAccuracyMetric::new();
        let report = Evaluator::new(1).run(&mut metric, &records).unwrap();

        assert!((report.get("accuracy_mc_full").unwrap() - 0.5).abs() < 1e-9);
        assert!((report.get("accuracy_luc_long").unwrap() - 0.0).abs() < 1e-9);
        assert!((report.get("edit_distance_score_mc_long").unwrap() - (1.0 - 1.0 / 13.0)).abs() < 1e-9);
    }
}

//! @ai:module:intent Accuracy and edit-distance metrics for text recognition
//! @ai:module:layer domain
//! @ai:module:public_api metrics, distance, sample, config, corpus, evaluator, output, error
//!
//! # Rec Metrics
//!
//! Stateful accumulators that compare predicted strings against ground-truth
//! labels batch by batch and report running accuracy and edit-distance scores.
//!
//! ## Example
//!
//! ```rust
//! use rec_metrics::{BasicAccuracyMetric, Recognition, RecognitionMetric};
//!
//! let mut metric = BasicAccuracyMetric::new();
//! let preds = vec![Recognition::new("cat", 0.9), Recognition::new("dog", 0.8)];
//! let labels = vec![Recognition::new("cat", 1.0), Recognition::new("cog", 1.0)];
//!
//! metric.update(&preds, &labels).unwrap();
//! let report = metric.report().unwrap();
//! assert_eq!(report.get("accuracy"), Some(0.5));
//! ```

pub mod config;
pub mod corpus;
pub mod distance;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod output;
pub mod sample;

pub use config::{EvalConfig, MetricConfig, MetricKind, RunConfig};
pub use corpus::{EvalRecord, PairLoader, PairLoaderTrait};
pub use error::{Error, Result};
pub use evaluator::Evaluator;
pub use metrics::{
    BasicAccuracyMetric, CaseMode, MetricReport, RecognitionMetric, Scope,
    StratifiedAccuracyMetric, Stratum,
};
pub use output::{format_report, OutputFormat};
pub use sample::Recognition;

//! @ai:module:intent Recognition metric accumulators
//! @ai:module:layer domain
//! @ai:module:public_api RecognitionMetric, MetricReport, BasicAccuracyMetric, StratifiedAccuracyMetric, Stratum

pub mod basic;
pub mod stratified;
pub mod types;

pub use basic::BasicAccuracyMetric;
pub use stratified::{CaseMode, Scope, StratifiedAccuracyMetric, Stratum};
pub use types::{resolve_indicator, MetricReport, RecognitionMetric};

//! @ai:module:intent Configuration structs for metric selection and evaluation runs
//! @ai:module:layer infrastructure
//! @ai:module:public_api EvalConfig, MetricConfig, RunConfig, MetricKind
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::metrics::stratified::{self, DEFAULT_LONG_WORD_MIN_LEN};
use crate::metrics::{BasicAccuracyMetric, RecognitionMetric, StratifiedAccuracyMetric};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// @ai:intent Main configuration for an evaluation run
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub metric: MetricConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// @ai:intent Which metric to build and how
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    #[serde(default = "default_metric_name")]
    pub name: String,
    /// Falls back to the metric's own default when unset.
    #[serde(default)]
    pub main_indicator: Option<String>,
    #[serde(default = "default_long_word_min_len")]
    pub long_word_min_len: usize,
}

/// @ai:intent Batching configuration for the evaluation loop
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

/// @ai:intent Known metric implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Basic,
    Stratified,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Basic => "RecMetric",
            MetricKind::Stratified => "RecFullMetric",
        }
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RecMetric" | "basic" => Ok(MetricKind::Basic),
            "RecFullMetric" | "stratified" => Ok(MetricKind::Stratified),
            other => Err(Error::UnknownMetric(other.to_string())),
        }
    }
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            name: default_metric_name(),
            main_indicator: None,
            long_word_min_len: default_long_word_min_len(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_metric_name() -> String {
    MetricKind::Basic.as_str().to_string()
}

fn default_long_word_min_len() -> usize {
    DEFAULT_LONG_WORD_MIN_LEN
}

fn default_batch_size() -> usize {
    256
}

impl MetricConfig {
    /// @ai:intent Build the configured metric with zeroed totals
    /// @ai:effects pure
    pub fn build(&self) -> Result<Box<dyn RecognitionMetric>> {
        let kind: MetricKind = self.name.parse()?;

        let metric: Box<dyn RecognitionMetric> = match (kind, &self.main_indicator) {
            (MetricKind::Basic, Some(indicator)) => {
                Box::new(BasicAccuracyMetric::with_main_indicator(indicator.clone()))
            }
            (MetricKind::Basic, None) => Box::new(BasicAccuracyMetric::new()),
            (MetricKind::Stratified, indicator) => {
                let indicator = indicator
                    .clone()
                    .unwrap_or_else(|| stratified::DEFAULT_MAIN_INDICATOR.to_string());
                Box::new(StratifiedAccuracyMetric::with_options(
                    indicator,
                    self.long_word_min_len,
                ))
            }
        };

        Ok(metric)
    }
}

impl EvalConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.metric.name, "RecMetric");
        assert_eq!(config.metric.long_word_min_len, 10);
        assert_eq!(config.run.batch_size, 256);
    }

    #[test]
    fn test_build_basic_uses_default_indicator() {
        let metric = MetricConfig::default().build().unwrap();
        assert_eq!(metric.name(), "RecMetric");
        assert_eq!(metric.main_indicator(), "acc");
    }

    #[test]
    fn test_build_stratified_from_toml() {
        let config: EvalConfig = toml::from_str(
            r#"
[metric]
name = "RecFullMetric"
long_word_min_len = 4
"#,
        )
        .unwrap();

        let metric = config.metric.build().unwrap();
        assert_eq!(metric.name(), "RecFullMetric");
        assert_eq!(metric.main_indicator(), "acc_luc_full");
        assert_eq!(config.run.batch_size, 256);
    }

    #[test]
    fn test_unknown_metric() {
        let config = MetricConfig {
            name: "WerMetric".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(Error::UnknownMetric(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("eval.toml");

        let config = EvalConfig {
            metric: MetricConfig {
                name: "RecFullMetric".to_string(),
                main_indicator: Some("norm_edit_dis_mc_full".to_string()),
                long_word_min_len: 12,
            },
            run: RunConfig { batch_size: 8 },
        };
        config.save(&path).unwrap();

        assert_eq!(EvalConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[run]\nbatch_size = \"many\"\n").unwrap();
        assert!(matches!(EvalConfig::load(&path), Err(Error::Config(_))));
    }
}

//! @ai:module:intent JSON-lines loader for evaluation records
//! @ai:module:layer infrastructure
//! @ai:module:public_api PairLoader, PairLoaderTrait
//! @ai:module:stateless true

use crate::corpus::record::EvalRecord;
use crate::error::Result;
use std::path::Path;

/// @ai:intent Trait for loading evaluation records
pub trait PairLoaderTrait: Send + Sync {
    /// @ai:intent Load all records from a file
    fn load(&self, path: &Path) -> Result<Vec<EvalRecord>>;
}

/// @ai:intent Loads one JSON record per line, skipping blank and malformed lines
pub struct PairLoader;

impl PairLoader {
    /// @ai:intent Create a new pair loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Parse records from JSON-lines text
    /// @ai:effects pure
    pub fn parse(content: &str) -> Vec<EvalRecord> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(n, line)| match serde_json::from_str::<EvalRecord>(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping invalid record on line {}: {}", n + 1, e);
                    None
                }
            })
            .collect()
    }
}

impl Default for PairLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PairLoaderTrait for PairLoader {
    /// @ai:intent Load records from a JSON-lines file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    fn load(&self, path: &Path) -> Result<Vec<EvalRecord>> {
        let content = std::fs::read_to_string(path)?;
        let records = Self::parse(&content);
        tracing::info!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }
}

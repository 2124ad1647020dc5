//! @ai:module:intent Define error types for recognition metrics
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Unified error type for all metric operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("division by zero: batch contains no sample pairs")]
    EmptyBatch,

    #[error("division by zero: no samples accumulated since last reset")]
    NoSamples,

    #[error("division by zero: label at index {index} is empty after space stripping")]
    EmptyLabel { index: usize },

    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Errors raised while filtering attributes or loading configuration.
use thiserror::Error;

/// Failure to filter the content of a blob attribute.
///
/// Blob failures never abort processing: the attribute keeps the value it had
/// before filtering and the failure is reported as an internal log.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BlobError {
    /// The attribute value is not a string, so it cannot hold a JSON object.
    #[error("attribute {key} is not a string")]
    NotAString {
        /// The offending attribute key.
        key: String,
    },
    /// The attribute value is not a JSON object.
    #[error("failed to decode attribute {key}: {source}")]
    Decode {
        /// The offending attribute key.
        key: String,
        source: serde_json::Error,
    },
    /// The filtered object could not be encoded back into a string.
    #[error("failed to encode attribute {key}: {source}")]
    Encode {
        /// The offending attribute key.
        key: String,
        source: serde_json::Error,
    },
}

impl BlobError {
    /// The attribute key the failure is about.
    pub fn key(&self) -> &str {
        match self {
            BlobError::NotAString { key }
            | BlobError::Decode { key, .. }
            | BlobError::Encode { key, .. } => key,
        }
    }
}

/// Errors returned while loading or validating the processor configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration document is not valid.
    #[error("Config error {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the library layer.

use std::path::PathBuf;

/// Errors produced by the library layer: document loading, configuration,
/// and input validation. The ranking engine itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum GastometroError {
    /// An error from the HTTP feed client.
    #[error("Feed error: {0}")]
    Feed(#[from] gastometro_data::Error),
    /// A local document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A document is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration file is unreadable or malformed.
    #[error("Config error: {0}")]
    Config(String),
    /// User-provided input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

//! Error types for AiMED report tooling
//!
//! Validation findings are never errors; they are reported as issues in a
//! `ValidationResult`. This type only covers configuration and I/O around
//! the validator.

use thiserror::Error;

/// Result type alias using the AiMED Error
pub type Result<T> = std::result::Result<T, Error>;

/// AiMED error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config render error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

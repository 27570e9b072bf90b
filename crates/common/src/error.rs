//! Error types for SenseCheck

use thiserror::Error;

/// Result type alias using SenseCheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// SenseCheck error types shared across the suite
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Prompt bank error: {0}")]
    PromptBank(#[from] csv::Error),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

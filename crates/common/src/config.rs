//! Environment-sourced configuration
//!
//! Endpoints and credentials are supplied externally and read once at
//! process start; required variables fail fast when absent. Nothing is
//! embedded as a literal in the code paths that use them.

use crate::error::{Error, Result};

/// Default judge service URL (local Ollama-compatible endpoint)
pub const DEFAULT_JUDGE_URL: &str = "http://127.0.0.1:11434";

/// Default judge model
pub const DEFAULT_JUDGE_MODEL: &str = "mistral";

/// Configuration for the evaluation pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Streaming prompt endpoint of the bot backend
    pub bot_url: String,

    /// Bearer token for the bot API
    pub bot_token: String,

    /// Base URL of the judge service
    pub judge_url: String,

    /// Model name the judge service should use
    pub judge_model: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `SENSECHECK_BOT_URL` and `SENSECHECK_BOT_TOKEN` are required;
    /// `SENSECHECK_JUDGE_URL` and `SENSECHECK_JUDGE_MODEL` fall back to
    /// a local Ollama instance running `mistral`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_url: require("SENSECHECK_BOT_URL")?,
            bot_token: require("SENSECHECK_BOT_TOKEN")?,
            judge_url: std::env::var("SENSECHECK_JUDGE_URL")
                .unwrap_or_else(|_| DEFAULT_JUDGE_URL.to_string()),
            judge_model: std::env::var("SENSECHECK_JUDGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_JUDGE_MODEL.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_var_fails_fast() {
        std::env::remove_var("SENSECHECK_BOT_URL");
        std::env::remove_var("SENSECHECK_BOT_TOKEN");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, Error::MissingEnv(_)));
    }

    #[test]
    fn test_require_rejects_empty_value() {
        std::env::set_var("SENSECHECK_TEST_EMPTY", "");
        assert!(require("SENSECHECK_TEST_EMPTY").is_err());
        std::env::remove_var("SENSECHECK_TEST_EMPTY");
    }
}

//! Error types for the evaluation pipeline
//!
//! There is no retry policy anywhere in the pipeline: transport errors,
//! judge failures, and extraction misses all surface as hard failures
//! for the calling test case.

use thiserror::Error;

pub type EvalResult<T> = std::result::Result<T, EvalError>;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error(transparent)]
    Common(#[from] sensecheck_common::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bot endpoint returned status {status}: {body}")]
    BotStatus { status: u16, body: String },

    #[error("Judge error: {0}")]
    Judge(String),

    #[error("No score found in judgment: {judgment}")]
    ScoreNotFound { judgment: String },

    #[error("{category} response scored {score}/10, below threshold {min}/10")]
    BelowThreshold {
        category: String,
        score: u8,
        min: u8,
    },
}

//! End-to-end evaluation of a single prompt

use serde::Serialize;
use tracing::info;

use crate::error::{EvalError, EvalResult};
use crate::judge::JudgeClient;
use crate::markdown::strip_markdown;
use crate::score::extract_score;
use crate::stream::BotClient;

/// Everything produced while evaluating one prompt, kept for artifact
/// attachment and failure diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub prompt: String,
    pub raw_response: String,
    pub cleaned_response: String,
    pub judgment: String,
    pub score: u8,
}

impl EvalReport {
    /// Fail with the numeric score embedded when it is below the
    /// category minimum. No partial credit, no retry.
    pub fn check_threshold(&self, category: &str, min: u8) -> EvalResult<()> {
        if self.score < min {
            return Err(EvalError::BelowThreshold {
                category: category.to_string(),
                score: self.score,
                min,
            });
        }
        Ok(())
    }
}

/// Sequential composition of collection, cleanup, judging, and score
/// extraction.
pub struct Evaluator {
    bot: BotClient,
    judge: JudgeClient,
}

impl Evaluator {
    pub fn new(bot: BotClient, judge: JudgeClient) -> Self {
        Self { bot, judge }
    }

    /// Evaluate one prompt against the live bot and judge.
    ///
    /// A judgment with no recognizable score yields
    /// [`EvalError::ScoreNotFound`] rather than a silent zero.
    pub async fn evaluate(&self, prompt: &str) -> EvalResult<EvalReport> {
        let raw_response = self.bot.stream_response(prompt).await?;
        let cleaned_response = strip_markdown(&raw_response);
        let judgment = self.judge.judge(prompt, &cleaned_response).await?;

        let score = extract_score(&judgment).ok_or_else(|| EvalError::ScoreNotFound {
            judgment: judgment.clone(),
        })?;

        info!(score, prompt, "prompt evaluated");

        Ok(EvalReport {
            prompt: prompt.to_string(),
            raw_response,
            cleaned_response,
            judgment,
            score,
        })
    }
}

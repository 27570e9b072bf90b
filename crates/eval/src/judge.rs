//! LLM judge client
//!
//! Delegates response grading to an Ollama-compatible chat endpoint
//! with a fixed rubric. There is exactly one oracle contract: the judge
//! must open its reply with a `TOTAL SCORE: <n>/10` line.
//!
//! A judge that cannot be reached fails the calling test outright; no
//! retry, no skip.

use std::time::Duration;

use sensecheck_common::Config;
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// Timeout for a single judgment call (ms)
const JUDGE_TIMEOUT_MS: u64 = 120_000;

const RUBRIC: &str = "You are a strict finance tutor grading a chatbot reply \
on accuracy, clarity, and helpfulness. Reply with a line of the form \
'TOTAL SCORE: <n>/10' where n is an integer from 0 to 10, followed by a \
brief justification.";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessageBody,
}

#[derive(Debug, Deserialize)]
struct ChatMessageBody {
    content: String,
}

/// Client for the external scoring oracle
#[derive(Debug, Clone)]
pub struct JudgeClient {
    url: String,
    model: String,
    timeout: Duration,
}

impl JudgeClient {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.judge_url.clone(),
            model: config.judge_model.clone(),
            timeout: Duration::from_millis(JUDGE_TIMEOUT_MS),
        }
    }

    /// Ask the judge to grade a prompt/response pair.
    ///
    /// Returns the raw free-text judgment; score extraction is the
    /// caller's concern.
    pub async fn judge(&self, prompt: &str, cleaned_response: &str) -> EvalResult<String> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: RUBRIC.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_turn(prompt, cleaned_response),
                },
            ],
            stream: false,
        };

        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let resp = client.post(&url).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EvalError::Judge(format!("status {}: {}", status, body)));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| EvalError::Judge(format!("malformed reply: {}", e)))?;
        Ok(chat.message.content)
    }
}

fn user_turn(prompt: &str, response: &str) -> String {
    format!(
        "User prompt: \"{}\"\nBot response: \"{}\"\n\nGrade the bot response from 0 to 10.",
        prompt, response
    )
}

//! Streaming response collection from the bot backend
//!
//! The bot answers a prompt with newline-delimited JSON events. Only
//! `chat_streaming` events carry reply text; every other event kind is
//! ignored. A line that fails to decode is logged and skipped - a bad
//! event never aborts the stream.

use futures::StreamExt;
use sensecheck_common::Config;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{EvalError, EvalResult};

/// Event kind that carries reply text
const CHAT_STREAMING: &str = "chat_streaming";

/// One decoded line of the bot's reply stream
#[derive(Debug, Deserialize)]
pub struct StreamEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub chunk: String,
}

/// Accumulates reply chunks in arrival order.
///
/// Push-based and transport-agnostic so the accumulation rules can be
/// tested without a live socket. Chunks are never reordered or
/// deduplicated.
#[derive(Debug, Default)]
pub struct ChunkAccumulator {
    buf: String,
}

impl ChunkAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line of the stream. Decoding failures are non-fatal.
    pub fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match serde_json::from_str::<StreamEvent>(line) {
            Ok(event) if event.event == CHAT_STREAMING => {
                self.buf.push_str(&event.data.chunk);
            }
            Ok(event) => {
                debug!(kind = %event.event, "ignoring non-streaming event");
            }
            Err(e) => {
                warn!("streaming parse error: {}", e);
            }
        }
    }

    /// Finalize: the trimmed concatenation of all matching chunks.
    pub fn finish(self) -> String {
        self.buf.trim().to_string()
    }
}

/// HTTP client for the bot's streaming prompt endpoint
#[derive(Debug, Clone)]
pub struct BotClient {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl BotClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.bot_url.clone(),
            token: config.bot_token.clone(),
        }
    }

    /// Send a prompt and reduce the streamed reply to a single string.
    ///
    /// Runs until the server closes the stream; no collector-level
    /// timeout is enforced, so a hung upstream is bounded only by the
    /// transport defaults.
    pub async fn stream_response(&self, prompt: &str) -> EvalResult<String> {
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EvalError::BotStatus {
                status: status.as_u16(),
                body,
            });
        }

        let mut acc = ChunkAccumulator::new();
        let mut carry = String::new();
        let mut stream = resp.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            carry.push_str(&String::from_utf8_lossy(&bytes));

            // Lines may span transport chunks; hold the tail back until
            // its newline arrives.
            while let Some(pos) = carry.find('\n') {
                let line: String = carry.drain(..=pos).collect();
                acc.push_line(line.trim_end_matches(['\n', '\r']));
            }
        }
        if !carry.is_empty() {
            acc.push_line(&carry);
        }

        Ok(acc.finish())
    }
}

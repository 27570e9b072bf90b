//! SenseCheck Prompt-Evaluation Pipeline
//!
//! Streams a reply out of the bot backend, strips markdown, hands the
//! cleaned text to an LLM judge, and extracts a 0-10 score:
//!
//! ```text
//! prompt ─> BotClient::stream_response ─> strip_markdown
//!        ─> JudgeClient::judge ─> extract_score ─> threshold check
//! ```
//!
//! Every evaluation is fully independent: no state is shared between
//! prompts and each call opens its own HTTP session.

pub mod error;
pub mod judge;
pub mod markdown;
pub mod pipeline;
pub mod score;
pub mod stream;

pub use error::{EvalError, EvalResult};
pub use judge::JudgeClient;
pub use markdown::strip_markdown;
pub use pipeline::{EvalReport, Evaluator};
pub use score::extract_score;
pub use stream::{BotClient, ChunkAccumulator};

//! Score extraction from free-text judgments

use once_cell::sync::Lazy;
use regex::Regex;

static TOTAL_SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)TOTAL SCORE:\s*(\d{1,2})\s*/\s*10").unwrap());
static BARE_SCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([1-9]|10)\b").unwrap());

/// Pull a 0-10 score out of a judgment.
///
/// Prefers the labeled `TOTAL SCORE: n/10` marker the rubric demands,
/// falling back to the first standalone 1-10 token. Returns `None` when
/// no recognizable pattern is present: an extraction miss is distinct
/// from a judge-assigned zero, which only the labeled marker can
/// express.
pub fn extract_score(text: &str) -> Option<u8> {
    if let Some(caps) = TOTAL_SCORE.captures(text) {
        if let Ok(n) = caps[1].parse::<u8>() {
            if n <= 10 {
                return Some(n);
            }
        }
    }
    BARE_SCORE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

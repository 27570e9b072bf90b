//! Best-effort markdown removal
//!
//! This is a lossy character-class strip, not a markdown parser: every
//! occurrence of ``* _ ` # ~ > -`` is removed wherever it appears, which
//! can eat legitimate hyphens or list markers inside normal prose.
//! `[label](url)` link syntax collapses to the label. The whole thing
//! stays behind one pure function so a real parser can replace it
//! without touching callers.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*_`#~>-]").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());

/// Strip markdown punctuation, collapse links to their labels, trim.
///
/// Idempotent for this character set: a second pass finds nothing left
/// to remove.
pub fn strip_markdown(text: &str) -> String {
    let text = MARKUP.replace_all(text, "");
    let text = LINK.replace_all(&text, "$1");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_strips_punctuation_and_collapses_links() {
        assert_eq!(
            strip_markdown("**Buy** [AAPL](http://x) now - *today*"),
            "Buy AAPL now  today"
        );
    }

    #[test_case("**bold** and _italic_"; "emphasis")]
    #[test_case("# Heading\n> quote\n- item"; "block markers")]
    #[test_case("plain prose with no markup at all"; "already clean")]
    #[test_case("[label](https://example.com/page)"; "link")]
    fn test_idempotent(input: &str) {
        let once = strip_markdown(input);
        assert_eq!(strip_markdown(&once), once);
    }

    #[test]
    fn test_inline_code_and_strikethrough() {
        assert_eq!(strip_markdown("`code` and ~~gone~~"), "code and gone");
    }

    #[test]
    fn test_lossy_on_legitimate_hyphens() {
        // Known fidelity loss: hyphens in prose are eaten too.
        assert_eq!(strip_markdown("risk-free rate"), "riskfree rate");
    }

    #[test]
    fn test_trims_result() {
        assert_eq!(strip_markdown("  ## spaced  "), "spaced");
    }
}

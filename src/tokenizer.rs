//! Text normalization into comparable word units.
//!
//! Rules:
//! - lower-cased (Unicode aware)
//! - typographic apostrophes folded to `'`
//! - anything that is not alphanumeric, `'` or whitespace becomes a space
//! - tokens are split on whitespace, with leading/trailing `'` trimmed

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{Alphabetic}\p{Nd}'\s]+").expect("static tokenizer pattern")
});

/// Splits `text` into normalized tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    let cleaned = NON_WORD.replace_all(&lowered, " ");

    cleaned
        .split_whitespace()
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

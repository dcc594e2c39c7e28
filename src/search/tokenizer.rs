use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not a letter, a number, `_` or whitespace
///
/// Numbers include superscripts and fractions (`m²`, `½`); combining marks
/// are treated as punctuation.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\s]").expect("punctuation pattern is valid")
});

/// Normalize text into search terms
///
/// Lowercases, turns punctuation into spaces, splits on whitespace and drops
/// single-character tokens. The same rules apply to documents and queries.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = PUNCTUATION.replace_all(&lowered, " ");

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .map(String::from)
        .collect()
}

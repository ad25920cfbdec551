use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[[:alnum:]]+").expect("static pattern compiles"))
}

/// Case folding shared by the index and by query normalization.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Distinct alphanumeric runs of already-folded text.
///
/// Hyphens, quotes and other punctuation split tokens, so "Nobel-winning"
/// yields "nobel" and "winning".
pub fn tokenize_text(folded: &str) -> HashSet<String> {
    word_pattern()
        .find_iter(folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokens of a keyword, longest first. Used to pick the most selective shortlist probe.
pub fn tokenize_keyword(folded: &str) -> Vec<String> {
    let mut tokens: Vec<String> = word_pattern()
        .find_iter(folded)
        .map(|m| m.as_str().to_string())
        .collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    tokens.dedup();
    tokens
}

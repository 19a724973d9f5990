//! Search tokens from CLDR keyword phrases.
//!
//! Phrases such as `grinning face` or `flag: Japan` are lower-cased, stripped
//! of curly quotes and parentheses, NFC-normalized and split into words. Stop
//! words are dropped and repeats collapse onto their first occurrence.

use indexmap::IndexSet;
use unicode_normalization::UnicodeNormalization;

/// Words too common to be useful for search.
pub const STOP_WORDS: [&str; 10] = [
    "on", "the", "of", "in", "a", "over", "with", "from", "for", "and",
];

/// Characters dropped from keyword phrases before splitting.
const STRIPPED_CHARS: [char; 4] = ['\u{201C}', '\u{201D}', '(', ')'];

fn clean_phrase(phrase: &str) -> String {
    phrase
        .to_lowercase()
        .replace(STRIPPED_CHARS, "")
        .replace(": ", "")
        .nfc()
        .collect()
}

/// Turn annotation keyword phrases into a search token list.
///
/// Tokens are lower-cased, NFC-normalized, stop-word free and unique; order is
/// first appearance across all phrases.
pub fn process_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    let mut tokens: IndexSet<String> = IndexSet::new();
    for phrase in keywords {
        let clean = clean_phrase(phrase.as_ref());
        for word in clean.split(' ') {
            let word = word.trim();
            if word.is_empty() || STOP_WORDS.contains(&word) {
                continue;
            }
            if !tokens.contains(word) {
                tokens.insert(word.to_string());
            }
        }
    }
    tokens.into_iter().collect()
}

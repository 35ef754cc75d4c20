// src/generator/segment.rs

use std::sync::LazyLock;

use regex::Regex;

use super::normalize::normalize;

/// Segments shorter than this (in characters, after trimming) are dropped.
pub const MIN_SEGMENT_CHARS: usize = 25;

static CLAUSE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;:]\s+").expect("clause break pattern is valid"));

/// Splits notes text into candidate sentences, in source order.
///
/// * Normalizes the text first.
/// * Splits after `.`, `!` or `?` when followed by whitespace.
/// * Splits each piece again on `;` or `:` followed by whitespace.
/// * Keeps only pieces of at least `MIN_SEGMENT_CHARS` characters.
pub fn segment(text: &str) -> Vec<String> {
    let text = normalize(text);

    split_sentences(&text)
        .into_iter()
        .flat_map(|sentence| CLAUSE_BREAK.split(sentence))
        .map(str::trim)
        .filter(|clause| clause.chars().count() >= MIN_SEGMENT_CHARS)
        .map(str::to_string)
        .collect()
}

/// Splits after sentence-terminal punctuation that is followed by whitespace.
/// The punctuation stays with the sentence it ends; the whitespace is dropped.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(end, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }

        sentences.push(&text[start..end]);
        while chars.next_if(|(_, w)| w.is_whitespace()).is_some() {}
        start = chars.peek().map_or(text.len(), |&(i, _)| i);
    }

    sentences.push(&text[start..]);
    sentences
}

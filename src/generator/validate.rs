// src/generator/validate.rs

pub const MIN_SENTENCE_CHARS: usize = 20;
pub const MIN_SENTENCE_WORDS: usize = 5;
pub const MIN_ALPHA_RATIO: f64 = 0.5;

/// Verb and auxiliary forms; a sentence needs at least one as a whole word.
pub const VERB_LEXICON: [&str; 12] = [
    "is", "are", "was", "were", "has", "have", "used", "focuses", "allows", "helps", "learn",
    "improve",
];

/// Returns `true` if the sentence is worth turning into a question.
///
/// All of the following must hold for the trimmed sentence:
/// * at least `MIN_SENTENCE_CHARS` characters,
/// * at least `MIN_SENTENCE_WORDS` whitespace-separated words,
/// * alphabetic characters make up at least `MIN_ALPHA_RATIO` of it,
/// * some word, lower-cased, is in `VERB_LEXICON`.
pub fn is_valid(sentence: &str) -> bool {
    let text = sentence.trim();
    let char_count = text.chars().count();

    if char_count < MIN_SENTENCE_CHARS {
        return false;
    }

    if text.split_whitespace().count() < MIN_SENTENCE_WORDS {
        return false;
    }

    let alphabetic = text.chars().filter(|c| c.is_alphabetic()).count();
    if (alphabetic as f64) / (char_count.max(1) as f64) < MIN_ALPHA_RATIO {
        return false;
    }

    // Whole whitespace tokens only: "is," does not count as "is".
    text.to_lowercase()
        .split_whitespace()
        .any(|word| VERB_LEXICON.contains(&word))
}

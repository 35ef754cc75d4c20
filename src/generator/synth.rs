// src/generator/synth.rs

use std::sync::LazyLock;

use rand::{Rng, seq::SliceRandom};
use regex::{NoExpand, Regex};

use crate::models::question::Question;

pub const BLANK_MARKER: &str = "_____";
pub const FILL_BLANK_PROMPT: &str = "Fill in the blank:";
pub const SHORT_ANSWER_PROMPT: &str = "Write a short explanation:";

/// A blanked sentence needs at least this many words to stay answerable.
pub const MIN_BLANKED_WORDS: usize = 6;

/// Long words too generic to be worth blanking out.
pub const BLANK_STOPWORDS: [&str; 10] = [
    "these", "those", "their", "about", "which", "there", "where", "would", "could", "should",
];

static LONG_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{5,}").expect("long word pattern is valid"));

/// How a keyword rule recognizes a sentence (matched against the lower-cased text).
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Substring match anywhere in the sentence.
    Phrase(&'static str),
    /// Space-delimited word match; the sentence edges count as spaces.
    Token(&'static str),
}

impl Trigger {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Trigger::Phrase(phrase) => lowered.contains(phrase),
            Trigger::Token(token) => format!(" {lowered} ").contains(&format!(" {token} ")),
        }
    }
}

/// One entry of the topic keyword table: any trigger selects the fixed question.
#[derive(Debug)]
pub struct KeywordRule {
    pub triggers: &'static [Trigger],
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub answer: &'static str,
}

impl KeywordRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|trigger| trigger.matches(lowered))
    }

    pub fn to_question(&self) -> Question {
        Question::MultipleChoice {
            question_text: self.question.to_string(),
            options: self.options.iter().map(|option| option.to_string()).collect(),
            correct_answer: self.answer.to_string(),
        }
    }
}

/// Evaluated in order; the first matching rule wins.
pub static KEYWORD_RULES: [KeywordRule; 6] = [
    KeywordRule {
        triggers: &[Trigger::Phrase("convolutional neural"), Trigger::Phrase("cnn")],
        question: "What are Convolutional Neural Networks (CNNs) mainly used for?",
        options: [
            "Image recognition",
            "Speech synthesis",
            "Text translation",
            "Database indexing",
        ],
        answer: "Image recognition",
    },
    KeywordRule {
        triggers: &[Trigger::Phrase("machine learning")],
        question: "What is the goal of Machine Learning?",
        options: [
            "Learning patterns from data",
            "Designing websites",
            "Cooking food",
            "Deleting files",
        ],
        answer: "Learning patterns from data",
    },
    KeywordRule {
        triggers: &[Trigger::Phrase("deep learning")],
        question: "Deep Learning is mainly based on:",
        options: [
            "Neural networks",
            "Sorting algorithms",
            "Relational databases",
            "Operating systems",
        ],
        answer: "Neural networks",
    },
    KeywordRule {
        triggers: &[Trigger::Phrase("artificial intelligence"), Trigger::Token("ai")],
        question: "Artificial Intelligence (AI) mainly focuses on:",
        options: [
            "Making machines perform intelligent tasks",
            "Only storing data",
            "Only printing documents",
            "Only playing games",
        ],
        answer: "Making machines perform intelligent tasks",
    },
    KeywordRule {
        triggers: &[
            Trigger::Phrase("privacy"),
            Trigger::Phrase("bias"),
            Trigger::Phrase("ethical"),
        ],
        question: "Which of these is a major ethical issue in AI?",
        options: [
            "Data privacy and bias",
            "High screen brightness",
            "Keyboard layout",
            "Battery percentage",
        ],
        answer: "Data privacy and bias",
    },
    KeywordRule {
        triggers: &[Trigger::Phrase("data")],
        question: "Why is data important in AI systems?",
        options: [
            "It helps models learn effectively",
            "It deletes programs automatically",
            "It increases computer weight",
            "It slows down the CPU",
        ],
        answer: "It helps models learn effectively",
    },
];

/// Picks the topic question for the first keyword rule the sentence hits.
/// Deterministic; returns `None` when no rule matches.
pub fn multiple_choice(sentence: &str) -> Option<Question> {
    let lowered = sentence.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(KeywordRule::to_question)
}

/// Blanks out one randomly chosen long word of the sentence.
///
/// Candidates are ASCII-alphabetic runs of 5+ letters that are not in
/// `BLANK_STOPWORDS`. The first whole-word occurrence of the chosen word is
/// replaced by `BLANK_MARKER`. Returns `None` when there is no candidate, the
/// chosen word never occurs as a whole word, or the blanked sentence has
/// fewer than `MIN_BLANKED_WORDS` words.
pub fn fill_blank<R: Rng + ?Sized>(sentence: &str, rng: &mut R) -> Option<Question> {
    let candidates: Vec<&str> = LONG_WORD
        .find_iter(sentence)
        .map(|m| m.as_str())
        .filter(|word| !BLANK_STOPWORDS.contains(&word.to_lowercase().as_str()))
        .collect();

    let answer = *candidates.choose(rng)?;

    let whole_word = Regex::new(&format!(r"\b{}\b", regex::escape(answer))).ok()?;

    // The chosen run may sit inside a longer token ("Python" in "Python3").
    if !whole_word.is_match(sentence) {
        return None;
    }
    let blanked = whole_word.replacen(sentence, 1, NoExpand(BLANK_MARKER));

    if blanked.split_whitespace().count() < MIN_BLANKED_WORDS {
        return None;
    }

    Some(Question::FillBlank {
        question_text: format!("{FILL_BLANK_PROMPT}\n{blanked}"),
        answer: answer.to_string(),
    })
}

/// Asks for an explanation of the sentence; the sentence itself is the answer.
pub fn short_answer(sentence: &str) -> Question {
    Question::ShortAnswer {
        question_text: format!("{SHORT_ANSWER_PROMPT}\n{sentence}"),
        answer: sentence.to_string(),
    }
}

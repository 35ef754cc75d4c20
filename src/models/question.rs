// src/models/question.rs

use serde::{Deserialize, Serialize};

/// The three kinds of question the generator emits.
/// Serialized as the short tags the quiz frontend switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "blank")]
    FillBlank,
    #[serde(rename = "short")]
    ShortAnswer,
}

/// Uniqueness key over question text: `(kind, lower-cased trimmed text)`.
pub type DedupKey = (QuestionKind, String);

/// Uniqueness key over the expected answer: `(kind, lower-cased trimmed answer)`.
pub type AnswerKey = (QuestionKind, String);

/// A generated quiz question.
///
/// Wire shape:
/// `{"type": "mcq" | "blank" | "short", "question": ..., "options"?: [...], "answer": ...}`.
/// The stored history rows use the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    /// Four fixed options, one of which is `correct_answer`.
    #[serde(rename = "mcq")]
    MultipleChoice {
        #[serde(rename = "question")]
        question_text: String,
        options: Vec<String>,
        #[serde(rename = "answer")]
        correct_answer: String,
    },

    /// A sentence with one word replaced by a blank marker; `answer` is the masked word.
    #[serde(rename = "blank")]
    FillBlank {
        #[serde(rename = "question")]
        question_text: String,
        answer: String,
    },

    /// Free-text answer. `answer` is empty for padding questions.
    #[serde(rename = "short")]
    ShortAnswer {
        #[serde(rename = "question")]
        question_text: String,
        answer: String,
    },
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Question::FillBlank { .. } => QuestionKind::FillBlank,
            Question::ShortAnswer { .. } => QuestionKind::ShortAnswer,
        }
    }

    pub fn question_text(&self) -> &str {
        match self {
            Question::MultipleChoice { question_text, .. }
            | Question::FillBlank { question_text, .. }
            | Question::ShortAnswer { question_text, .. } => question_text,
        }
    }

    pub fn answer(&self) -> &str {
        match self {
            Question::MultipleChoice { correct_answer, .. } => correct_answer,
            Question::FillBlank { answer, .. } | Question::ShortAnswer { answer, .. } => answer,
        }
    }

    pub fn dedup_key(&self) -> DedupKey {
        (self.kind(), self.question_text().trim().to_lowercase())
    }

    /// Answer uniqueness only applies to kinds with a fixed expected answer.
    /// A short answer mirrors its own question text, so its `DedupKey` already covers it.
    pub fn answer_key(&self) -> Option<AnswerKey> {
        match self {
            Question::ShortAnswer { .. } => None,
            _ => Some((self.kind(), self.answer().trim().to_lowercase())),
        }
    }
}

/// The outcome of one generation call: the ordered questions and the resolved topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub topic: String,
    pub questions: Vec<Question>,
}

impl QuizResult {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

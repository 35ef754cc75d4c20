// src/generator/assembler.rs

use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{segment::segment, synth, validate::is_valid};
use crate::models::question::{AnswerKey, DedupKey, Question, QuestionKind, QuizResult};

pub const DEFAULT_TOPIC: &str = "General";

/// Inputs shorter than this (trimmed, in characters) produce an empty quiz.
pub const MIN_INPUT_CHARS: usize = 5;

/// First cut applied to the segmented sentences, before `max_candidate_sentences`.
pub const SEGMENT_WINDOW: usize = 30;

/// Fill-in-the-blank questions shorter than this (prompt included) are discarded.
pub const MIN_BLANK_QUESTION_CHARS: usize = 35;

/// Generic prompts used to pad a quiz up to its total size.
pub const FALLBACK_POOL: [&str; 5] = [
    "Explain one important concept from the notes.",
    "Write one real-world application of the topic.",
    "What is one advantage of this concept?",
    "What is one limitation or challenge of this concept?",
    "Give one example based on the notes.",
];

/// Size limits for one generated quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Exact number of questions in a non-empty quiz.
    pub total_cap: usize,
    pub mcq_cap: usize,
    pub blank_cap: usize,
    pub short_cap: usize,
    /// Input beyond this many characters is ignored.
    pub max_input_chars: usize,
    pub max_candidate_sentences: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            total_cap: 10,
            mcq_cap: 4,
            blank_cap: 3,
            short_cap: 3,
            max_input_chars: 4000,
            max_candidate_sentences: 25,
        }
    }
}

impl QuizConfig {
    fn cap_for(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::MultipleChoice => self.mcq_cap,
            QuestionKind::FillBlank => self.blank_cap,
            QuestionKind::ShortAnswer => self.short_cap,
        }
    }
}

/// Turns notes text into a fixed-size quiz.
///
/// Holds configuration only; every call builds its own bookkeeping, so one
/// assembler can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct QuizAssembler {
    config: QuizConfig,
}

impl QuizAssembler {
    pub fn new(config: QuizConfig) -> Self {
        Self { config }
    }

    /// Assembles a quiz, drawing fill-in-the-blank choices from fresh entropy.
    pub fn assemble(&self, text: &str, topic: &str) -> QuizResult {
        self.assemble_with_rng(text, topic, &mut StdRng::from_entropy())
    }

    /// Assembles a quiz with an explicit random source.
    ///
    /// * Text under `MIN_INPUT_CHARS` yields zero questions and no padding.
    /// * Each valid candidate sentence tries multiple choice, then fill in the
    ///   blank, then short answer; the first accepted question wins.
    /// * A question is accepted only while its kind is under quota and its
    ///   question and answer keys are unseen.
    /// * The result is padded from `FALLBACK_POOL` to exactly `total_cap`.
    pub fn assemble_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        topic: &str,
        rng: &mut R,
    ) -> QuizResult {
        let topic = resolve_topic(topic);
        let text = text.trim();

        if text.chars().count() < MIN_INPUT_CHARS {
            return QuizResult {
                topic,
                questions: Vec::new(),
            };
        }

        let text = truncate_chars(text, self.config.max_input_chars);

        let mut candidates = segment(text);
        candidates.truncate(SEGMENT_WINDOW);
        candidates.truncate(self.config.max_candidate_sentences);

        let mut run = AssemblyRun::default();

        for sentence in &candidates {
            if run.questions.len() >= self.config.total_cap {
                break;
            }

            let sentence = sentence.trim();
            if !is_valid(sentence) {
                continue;
            }

            let accepted = self.try_kind(&mut run, QuestionKind::MultipleChoice, || {
                synth::multiple_choice(sentence)
            }) || self.try_kind(&mut run, QuestionKind::FillBlank, || {
                synth::fill_blank(sentence, &mut *rng)
                    .filter(|q| q.question_text().chars().count() >= MIN_BLANK_QUESTION_CHARS)
            }) || self.try_kind(&mut run, QuestionKind::ShortAnswer, || {
                Some(synth::short_answer(sentence))
            });

            if !accepted {
                tracing::trace!(sentence, "no question accepted for sentence");
            }
        }

        let generated = run.questions.len();
        run.pad_with_fallbacks(self.config.total_cap);

        tracing::debug!(
            candidates = candidates.len(),
            generated,
            padded = run.questions.len() - generated,
            "quiz assembled"
        );

        QuizResult {
            topic,
            questions: run.questions,
        }
    }

    /// Runs one strategy if its kind still has quota, and offers the result.
    fn try_kind(
        &self,
        run: &mut AssemblyRun,
        kind: QuestionKind,
        synthesize: impl FnOnce() -> Option<Question>,
    ) -> bool {
        if run.count(kind) >= self.config.cap_for(kind) {
            return false;
        }
        synthesize().is_some_and(|question| run.accept(question))
    }
}

/// Per-call bookkeeping: accepted questions, per-kind counts and seen keys.
#[derive(Debug, Default)]
struct AssemblyRun {
    questions: Vec<Question>,
    counts: HashMap<QuestionKind, usize>,
    seen_questions: HashSet<DedupKey>,
    seen_answers: HashSet<AnswerKey>,
}

impl AssemblyRun {
    fn count(&self, kind: QuestionKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    fn accept(&mut self, question: Question) -> bool {
        let key = question.dedup_key();
        if self.seen_questions.contains(&key) {
            return false;
        }

        let answer_key = question.answer_key();
        if answer_key
            .as_ref()
            .is_some_and(|answer| self.seen_answers.contains(answer))
        {
            return false;
        }

        self.seen_questions.insert(key);
        if let Some(answer) = answer_key {
            self.seen_answers.insert(answer);
        }
        *self.counts.entry(question.kind()).or_insert(0) += 1;
        self.questions.push(question);
        true
    }

    /// Cycles through `FALLBACK_POOL` until `total_cap` questions exist.
    /// Passes after the first number their prompts, e.g. `"... (2)"`.
    fn pad_with_fallbacks(&mut self, total_cap: usize) {
        let mut pass = 0;

        while self.questions.len() < total_cap {
            for template in FALLBACK_POOL {
                if self.questions.len() >= total_cap {
                    break;
                }

                let question_text = match pass {
                    0 => template.to_string(),
                    n => format!("{template} ({})", n + 1),
                };
                let question = Question::ShortAnswer {
                    question_text,
                    answer: String::new(),
                };

                if self.seen_questions.insert(question.dedup_key()) {
                    self.questions.push(question);
                }
            }
            pass += 1;
        }
    }
}

fn resolve_topic(topic: &str) -> String {
    match topic.trim() {
        "" => DEFAULT_TOPIC.to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH_SCIENCE: &str = "\
        Photosynthesis is the process green plants use to convert sunlight. \
        Mitochondria are organelles that produce chemical fuel inside cells. \
        Volcanoes have vents where molten rock escapes from underground. \
        Glaciers were massive rivers of frozen water moving across continents. \
        Earthquakes are sudden shakings caused by shifting tectonic plates. \
        Hurricanes have strong rotating winds that form over warm oceans. \
        Tornadoes are violent columns of spinning air touching ground. \
        Comets are icy bodies that release gas when near the sun.";

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn kinds(result: &QuizResult) -> Vec<QuestionKind> {
        result.questions.iter().map(Question::kind).collect()
    }

    fn assert_unique_keys(result: &QuizResult) {
        let questions: HashSet<_> = result.questions.iter().map(Question::dedup_key).collect();
        assert_eq!(questions.len(), result.questions.len());

        let answers: Vec<_> = result.questions.iter().filter_map(Question::answer_key).collect();
        let unique_answers: HashSet<_> = answers.iter().collect();
        assert_eq!(unique_answers.len(), answers.len());
    }

    #[test]
    fn tiny_input_gives_empty_quiz() {
        let assembler = QuizAssembler::default();

        for text in ["", "    ", "abc", " ab \n "] {
            let result = assembler.assemble_with_rng(text, "Biology", &mut seeded());
            assert!(result.is_empty(), "{text:?}");
        }
    }

    #[test]
    fn blank_topic_defaults_to_general() {
        let assembler = QuizAssembler::default();

        let result = assembler.assemble_with_rng(EARTH_SCIENCE, "   ", &mut seeded());
        assert_eq!(result.topic, "General");

        let result = assembler.assemble_with_rng(EARTH_SCIENCE, " Geology ", &mut seeded());
        assert_eq!(result.topic, "Geology");
    }

    #[test]
    fn mixed_notes_example() {
        let text = "Machine learning is a field. Deep learning uses neural networks for tasks. \
                    AI focuses on intelligent automation systems today.";

        let result = QuizAssembler::default().assemble_with_rng(text, "", &mut seeded());

        assert_eq!(result.questions.len(), 10);
        assert_eq!(result.questions[0].answer(), "Learning patterns from data");
        assert_eq!(
            result.questions[1].answer(),
            "Making machines perform intelligent tasks"
        );
        assert!(
            result.questions[2..]
                .iter()
                .all(|q| q.kind() == QuestionKind::ShortAnswer && q.answer().is_empty())
        );
        assert_unique_keys(&result);
    }

    #[test]
    fn plain_notes_fill_blank_then_short_quotas() {
        let result =
            QuizAssembler::default().assemble_with_rng(EARTH_SCIENCE, "Earth", &mut seeded());

        use QuestionKind::*;
        assert_eq!(
            kinds(&result),
            vec![
                FillBlank, FillBlank, FillBlank, ShortAnswer, ShortAnswer, ShortAnswer, ShortAnswer,
                ShortAnswer, ShortAnswer, ShortAnswer,
            ]
        );
        assert_eq!(
            result.questions[3].answer(),
            "Glaciers were massive rivers of frozen water moving across continents."
        );
        assert_eq!(result.questions[6].question_text(), FALLBACK_POOL[0]);
        assert_unique_keys(&result);
    }

    #[test]
    fn multiple_choice_quota_spills_into_fill_blank() {
        let text = "Convolutional neural networks are used for image tasks. \
                    Machine learning is a field of computer science. \
                    Deep learning is based on layered neural networks. \
                    Artificial intelligence is changing many industries today. \
                    Privacy is a serious concern for modern software. \
                    Good data is essential for accurate predictions.";

        let result = QuizAssembler::default().assemble_with_rng(text, "AI", &mut seeded());

        use QuestionKind::*;
        assert_eq!(
            kinds(&result)[..6],
            [MultipleChoice, MultipleChoice, MultipleChoice, MultipleChoice, FillBlank, FillBlank]
        );
        assert_eq!(result.questions.len(), 10);
        assert_unique_keys(&result);
    }

    #[test]
    fn repeated_topic_falls_through_to_fill_blank() {
        let text = "Machine learning is a field of computer science. \
                    Machine learning models are trained on labelled examples.";

        let result = QuizAssembler::default().assemble_with_rng(text, "", &mut seeded());

        assert_eq!(result.questions[0].kind(), QuestionKind::MultipleChoice);
        assert_eq!(result.questions[1].kind(), QuestionKind::FillBlank);
        assert_unique_keys(&result);
    }

    #[test]
    fn repeated_blank_answer_is_rejected() {
        let config = QuizConfig {
            short_cap: 0,
            ..QuizConfig::default()
        };
        // "Photosynthesis" is the only word either sentence can blank.
        let text = "Photosynthesis is not at all what it is to me. \
                    Photosynthesis was not at all what it was to me.";

        let result = QuizAssembler::new(config).assemble_with_rng(text, "", &mut seeded());

        let blanks: Vec<_> = result
            .questions
            .iter()
            .filter(|q| q.kind() == QuestionKind::FillBlank)
            .collect();
        assert_eq!(blanks.len(), 1);
        assert_eq!(blanks[0].answer(), "Photosynthesis");
        assert!(blanks[0].question_text().contains("what it is to me"));
        assert_eq!(result.questions.len(), 10);
        assert_unique_keys(&result);
    }

    #[test]
    fn fallback_pool_cycles_with_numbered_prompts() {
        let result = QuizAssembler::default().assemble_with_rng("hello world", "", &mut seeded());

        let texts: Vec<_> = result.questions.iter().map(Question::question_text).collect();
        assert_eq!(texts.len(), 10);
        assert_eq!(texts[..5], FALLBACK_POOL);
        assert_eq!(texts[5], "Explain one important concept from the notes. (2)");
        assert_eq!(texts[9], "Give one example based on the notes. (2)");
        assert_unique_keys(&result);
    }

    #[test]
    fn candidate_limit_bounds_generated_questions() {
        let config = QuizConfig {
            max_candidate_sentences: 2,
            ..QuizConfig::default()
        };

        let result =
            QuizAssembler::new(config).assemble_with_rng(EARTH_SCIENCE, "", &mut seeded());

        let generated = result.questions.iter().filter(|q| !q.answer().is_empty()).count();
        assert_eq!(generated, 2);
        assert_eq!(result.questions.len(), 10);
    }

    #[test]
    fn input_is_cut_at_max_chars() {
        let config = QuizConfig {
            max_input_chars: 70,
            ..QuizConfig::default()
        };

        let result =
            QuizAssembler::new(config).assemble_with_rng(EARTH_SCIENCE, "", &mut seeded());

        let generated = result.questions.iter().filter(|q| !q.answer().is_empty()).count();
        assert_eq!(generated, 1);
    }

    #[test]
    fn total_cap_is_exact_for_any_config() {
        for total_cap in [0, 1, 4, 12, 23] {
            let config = QuizConfig {
                total_cap,
                ..QuizConfig::default()
            };
            let result =
            QuizAssembler::new(config).assemble_with_rng(EARTH_SCIENCE, "", &mut seeded());

            assert_eq!(result.questions.len(), total_cap);
            assert_unique_keys(&result);
        }
    }

    #[test]
    fn same_seed_same_quiz() {
        let assembler = QuizAssembler::default();

        let first = assembler.assemble_with_rng(EARTH_SCIENCE, "", &mut StdRng::seed_from_u64(9));
        let second = assembler.assemble_with_rng(EARTH_SCIENCE, "", &mut StdRng::seed_from_u64(9));

        assert_eq!(first, second);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("naïve café", 4), "naïv");
        assert_eq!(truncate_chars("short", 40), "short");
    }
}

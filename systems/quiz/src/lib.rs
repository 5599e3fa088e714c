#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Quiz questions guarding every artifact pickup.
//!
//! A [`QuestionSet`] is loaded once, either from the built-in bank or from a
//! TOML document. Each session draws from its own [`QuizBank`], a shuffled
//! copy of the set that hands out every question at most once. Questions are
//! shown through [`present`], which reorders the answers and remembers the
//! correct one by text.

use std::{fs, io, path::Path, path::PathBuf};

use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use thiserror::Error;

/// Number of answers offered by every question.
pub const ANSWERS_PER_QUESTION: usize = 4;

const BUILTIN_QUESTIONS: &str = include_str!("questions.toml");

/// Errors raised while loading a question set.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question file could not be read.
    #[error("failed to read question set from {path}")]
    Io {
        /// Location that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The document is not a valid question set.
    #[error("failed to parse question set")]
    Parse(#[from] toml::de::Error),
    /// A question does not offer exactly four answers.
    #[error("question {prompt:?} has {found} answers, expected 4")]
    AnswerCount {
        /// Prompt of the offending question.
        prompt: String,
        /// Number of answers found.
        found: usize,
    },
}

/// Quiz question whose first answer is the correct one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    answers: [String; ANSWERS_PER_QUESTION],
}

impl Question {
    /// Creates a question; `answers[0]` is treated as correct.
    #[must_use]
    pub fn new(prompt: impl Into<String>, answers: [String; ANSWERS_PER_QUESTION]) -> Self {
        Self {
            prompt: prompt.into(),
            answers,
        }
    }

    /// Text of the question.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Answers in canonical order.
    #[must_use]
    pub fn answers(&self) -> &[String; ANSWERS_PER_QUESTION] {
        &self.answers
    }

    /// Text of the correct answer.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.answers[0]
    }
}

#[derive(Debug, Deserialize)]
struct QuestionDocument {
    #[serde(default, rename = "question")]
    questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
struct QuestionEntry {
    prompt: String,
    answers: Vec<String>,
}

impl TryFrom<QuestionEntry> for Question {
    type Error = QuizError;

    fn try_from(entry: QuestionEntry) -> Result<Self, Self::Error> {
        let found = entry.answers.len();
        let answers: [String; ANSWERS_PER_QUESTION] =
            entry
                .answers
                .try_into()
                .map_err(|_| QuizError::AnswerCount {
                    prompt: entry.prompt.clone(),
                    found,
                })?;
        Ok(Self::new(entry.prompt, answers))
    }
}

/// Ordered collection of questions available to every session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Wraps already validated questions.
    #[must_use]
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Parses a TOML document made of `[[question]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, QuizError> {
        let document: QuestionDocument = toml::from_str(source)?;
        let questions = document
            .questions
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { questions })
    }

    /// Reads and parses a question file.
    pub fn from_path(path: &Path) -> Result<Self, QuizError> {
        let source = fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), questions = set.len(), "question set loaded");
        Ok(set)
    }

    /// Question bank shipped with the game.
    pub fn builtin() -> Result<Self, QuizError> {
        Self::from_toml_str(BUILTIN_QUESTIONS)
    }

    /// Questions in file order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Reports whether the set holds no questions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Per-session supply of unseen questions.
#[derive(Clone, Debug)]
pub struct QuizBank {
    pending: Vec<Question>,
}

impl QuizBank {
    /// Copies the set into a bank shuffled once for the whole session.
    pub fn shuffled<R>(set: &QuestionSet, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut pending = set.questions.clone();
        pending.shuffle(rng);
        Self { pending }
    }

    /// Removes and returns the next unseen question.
    pub fn take_next(&mut self) -> Option<Question> {
        self.pending.pop()
    }

    /// Number of questions not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// Question as shown to the player, with answers in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentedQuestion {
    prompt: String,
    answers: [String; ANSWERS_PER_QUESTION],
    correct: String,
}

impl PresentedQuestion {
    /// Text of the question.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Answers in the order they are displayed.
    #[must_use]
    pub fn answers(&self) -> &[String; ANSWERS_PER_QUESTION] {
        &self.answers
    }

    /// Answer displayed at `index`, if any.
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }

    /// Text that will be accepted as correct.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct
    }

    /// Compares a chosen answer against the remembered correct text.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct == answer
    }
}

/// Prepares a question for display with a fresh answer order.
pub fn present<R>(question: &Question, rng: &mut R) -> PresentedQuestion
where
    R: Rng + ?Sized,
{
    let mut answers = question.answers.clone();
    answers.shuffle(rng);
    PresentedQuestion {
        prompt: question.prompt.clone(),
        answers,
        correct: question.correct_answer().to_owned(),
    }
}

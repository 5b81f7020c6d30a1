//! Content model for a curriculum
//!
//! A curriculum is an ordered list of epochs, each holding an ordered list of
//! lessons, each holding zero or more multiple-choice questions. Values are built
//! once when the catalog loads and never change afterwards.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::QuizError;

/// Allowed shape for epoch and lesson identifiers (compiled once)
static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid id regex"));

/// Separator between the epoch and lesson halves of a qualified lesson key
pub const KEY_SEPARATOR: char = ':';

/// Identifier of an epoch, stable across content revisions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochId(String);

impl EpochId {
    /// Creates a new `EpochId`
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has a usable shape
    pub fn is_valid(&self) -> bool {
        ID_PATTERN.is_match(&self.0)
    }
}

/// Identifier of a lesson, unique only within its owning epoch
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    /// Creates a new `LessonId`
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has a usable shape
    pub fn is_valid(&self) -> bool {
        ID_PATTERN.is_match(&self.0)
    }
}

impl fmt::Display for EpochId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EpochId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LessonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Globally unique reference to a lesson, written as `epoch:lesson`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LessonKey {
    pub epoch: EpochId,
    pub lesson: LessonId,
}

impl LessonKey {
    /// Create a key from its two halves
    pub fn new(epoch: impl Into<EpochId>, lesson: impl Into<LessonId>) -> Self {
        Self { epoch: epoch.into(), lesson: lesson.into() }
    }
}

impl fmt::Display for LessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.epoch, KEY_SEPARATOR, self.lesson)
    }
}

/// Error returned when a string is not an `epoch:lesson` pair
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a qualified lesson key (expected epoch:lesson)")]
pub struct ParseLessonKeyError(String);

impl FromStr for LessonKey {
    type Err = ParseLessonKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(KEY_SEPARATOR) {
            Some((epoch, lesson)) if !epoch.is_empty() && !lesson.is_empty() => {
                Ok(Self::new(epoch, lesson))
            }
            _ => Err(ParseLessonKeyError(s.to_string())),
        }
    }
}

impl Serialize for LessonKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LessonKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A labeled answer choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Short label such as "A"
    pub label: String,
    /// Choice text
    pub text: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self { label: label.into(), text: text.into() }
    }
}

/// A multiple-choice question
///
/// Construction validates that labels are unique and that the correct label is one
/// of them, so an existing `QuizQuestion` is always answerable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    prompt: String,
    choices: Vec<Choice>,
    correct: String,
    explanation: String,
}

impl QuizQuestion {
    /// Create a validated question
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<Choice>,
        correct: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        let correct = correct.into();

        if choices.is_empty() {
            return Err(QuizError::NoChoices { prompt });
        }
        for (i, choice) in choices.iter().enumerate() {
            if choices[..i].iter().any(|c| c.label.eq_ignore_ascii_case(&choice.label)) {
                return Err(QuizError::DuplicateLabel { label: choice.label.clone(), prompt });
            }
        }
        let Some(correct) =
            choices.iter().find(|c| c.label.eq_ignore_ascii_case(&correct)).map(|c| c.label.clone())
        else {
            return Err(QuizError::UnknownCorrectLabel { label: correct, prompt });
        };

        Ok(Self { prompt, choices, correct, explanation: explanation.into() })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Choices in authored order
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn correct_label(&self) -> &str {
        &self.correct
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Check an answer; labels compare case-insensitively
    pub fn answer(&self, label: &str) -> Result<AnswerOutcome, QuizError> {
        let label = label.trim();
        let chosen = self
            .choices
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
            .ok_or_else(|| QuizError::UnknownChoice { label: label.to_string() })?;

        Ok(AnswerOutcome {
            correct: chosen.label == self.correct,
            correct_label: self.correct.clone(),
            explanation: self.explanation.clone(),
        })
    }
}

/// Raw question as authored, before validation
#[derive(Deserialize)]
struct RawQuizQuestion {
    prompt: String,
    choices: Vec<Choice>,
    correct: String,
    #[serde(default)]
    explanation: String,
}

impl<'de> Deserialize<'de> for QuizQuestion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawQuizQuestion::deserialize(deserializer)?;
        QuizQuestion::new(raw.prompt, raw.choices, raw.correct, raw.explanation)
            .map_err(serde::de::Error::custom)
    }
}

/// Result of answering a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_label: String,
    pub explanation: String,
}

/// A single lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    /// Identifier, unique within the owning epoch
    pub id: LessonId,
    /// Display title
    pub title: String,
    /// Markdown body, passed through to the presentation layer untouched
    pub body: String,
    /// Estimated completion time in minutes
    pub duration_minutes: u32,
    /// Questions in order
    pub quiz: Vec<QuizQuestion>,
}

impl Lesson {
    /// Create a lesson without a body or quiz
    pub fn new(id: impl Into<LessonId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            duration_minutes: 1,
            quiz: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_question(mut self, question: QuizQuestion) -> Self {
        self.quiz.push(question);
        self
    }

    /// Question by its number as shown to the learner, starting at 1
    pub fn question(&self, number: usize) -> Result<&QuizQuestion, QuizError> {
        number
            .checked_sub(1)
            .and_then(|i| self.quiz.get(i))
            .ok_or(QuizError::NoSuchQuestion { number })
    }
}

/// A curriculum stage grouping lessons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epoch {
    pub id: EpochId,
    pub title: String,
    /// Lessons in canonical order
    pub lessons: Vec<Lesson>,
}

impl Epoch {
    pub fn new(id: impl Into<EpochId>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), lessons: Vec::new() }
    }

    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Find a lesson by id
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| &l.id == id)
    }

    /// Sum of lesson durations
    pub fn total_minutes(&self) -> u32 {
        self.lessons.iter().map(|l| l.duration_minutes).sum()
    }
}

//! Curriculum content and lookup

pub mod catalog;
pub mod error;
pub mod markdown;
pub mod model;
pub mod provider;

pub use catalog::Catalog;
pub use error::{CatalogError, QuizError};
pub use markdown::MarkdownDirectoryProvider;
pub use model::{
    AnswerOutcome, Choice, Epoch, EpochId, Lesson, LessonId, LessonKey, QuizQuestion,
};
pub use provider::{ContentProvider, EpochInfo, StaticProvider};

//! Error types for curriculum loading and lookup

use std::path::PathBuf;

use thiserror::Error;

use super::model::{EpochId, LessonId};

/// Errors raised while building or querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The curriculum could not be assembled; there is nothing to teach
    #[error("Failed to load curriculum: {0}")]
    ContentLoad(String),

    /// Content files could not be read
    #[error("Failed to read content at {path:?}: {source}")]
    ContentRead {
        /// Offending file or directory
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Quiz definitions could not be parsed
    #[error("Invalid quiz file {path:?}: {source}")]
    QuizParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An epoch id that is not in the catalog
    #[error("Epoch '{0}' not found")]
    EpochNotFound(EpochId),

    /// An epoch that exists but holds no lessons
    #[error("Epoch '{0}' has no lessons")]
    EpochEmpty(EpochId),

    /// A lesson id that is not in the given epoch
    #[error("Lesson '{lesson}' not found in epoch '{epoch}'")]
    LessonNotFound { epoch: EpochId, lesson: LessonId },
}

impl CatalogError {
    /// Whether this is a lookup miss rather than a load failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::EpochNotFound(_)
                | CatalogError::EpochEmpty(_)
                | CatalogError::LessonNotFound { .. }
        )
    }

    /// Whether the catalog could not be built at all
    pub fn is_content_load(&self) -> bool {
        matches!(
            self,
            CatalogError::ContentLoad(_)
                | CatalogError::ContentRead { .. }
                | CatalogError::QuizParse { .. }
        )
    }
}

/// Errors raised by quiz construction and answering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Question '{prompt}' has no choices")]
    NoChoices { prompt: String },

    #[error("Question '{prompt}' repeats choice label '{label}'")]
    DuplicateLabel { label: String, prompt: String },

    #[error("Question '{prompt}' marks '{label}' correct but has no such choice")]
    UnknownCorrectLabel { label: String, prompt: String },

    /// The learner picked a label the question does not offer
    #[error("No choice labeled '{label}'")]
    UnknownChoice { label: String },

    /// Question numbers start at 1
    #[error("Lesson has no question {number}")]
    NoSuchQuestion { number: usize },
}

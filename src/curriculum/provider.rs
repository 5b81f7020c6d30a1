//! Content provider interface
//!
//! The catalog never reads content itself. It asks a provider for epochs and
//! lessons in canonical order; where that content lives is up to the provider.

use super::error::CatalogError;
use super::model::{Epoch, EpochId, Lesson};

/// Heading information for an epoch, without its lessons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochInfo {
    pub id: EpochId,
    pub title: String,
}

/// Read-only source of curriculum content
pub trait ContentProvider {
    /// All epochs in canonical order
    fn epochs(&self) -> Result<Vec<EpochInfo>, CatalogError>;

    /// Lessons of one epoch in canonical order
    fn lessons(&self, epoch: &EpochId) -> Result<Vec<Lesson>, CatalogError>;
}

/// Provider backed by curriculum values already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    epochs: Vec<Epoch>,
}

impl StaticProvider {
    pub fn new(epochs: Vec<Epoch>) -> Self {
        Self { epochs }
    }
}

impl ContentProvider for StaticProvider {
    fn epochs(&self) -> Result<Vec<EpochInfo>, CatalogError> {
        Ok(self
            .epochs
            .iter()
            .map(|e| EpochInfo { id: e.id.clone(), title: e.title.clone() })
            .collect())
    }

    fn lessons(&self, epoch: &EpochId) -> Result<Vec<Lesson>, CatalogError> {
        self.epochs
            .iter()
            .find(|e| &e.id == epoch)
            .map(|e| e.lessons.clone())
            .ok_or_else(|| CatalogError::EpochNotFound(epoch.clone()))
    }
}

//! The in-memory curriculum catalog
//!
//! Built once from a [`ContentProvider`] and read-only afterwards. Loading
//! enforces that there is something to teach: at least one epoch, and at least
//! one lesson in every epoch.

use std::collections::HashSet;

use super::error::CatalogError;
use super::model::{Epoch, EpochId, Lesson, LessonId, LessonKey};
use super::provider::ContentProvider;

/// The full, ordered curriculum
#[derive(Debug, Clone)]
pub struct Catalog {
    epochs: Vec<Epoch>,
}

impl Catalog {
    /// Build the catalog from a content provider
    pub fn load(provider: &impl ContentProvider) -> Result<Self, CatalogError> {
        let infos = provider.epochs()?;
        if infos.is_empty() {
            return Err(CatalogError::ContentLoad("content provider returned no epochs".into()));
        }

        let mut seen_epochs = HashSet::new();
        let mut epochs = Vec::with_capacity(infos.len());

        for info in infos {
            if !info.id.is_valid() {
                return Err(CatalogError::ContentLoad(format!("invalid epoch id '{}'", info.id)));
            }
            if !seen_epochs.insert(info.id.clone()) {
                return Err(CatalogError::ContentLoad(format!("duplicate epoch id '{}'", info.id)));
            }

            let lessons = provider.lessons(&info.id)?;
            if lessons.is_empty() {
                return Err(CatalogError::ContentLoad(format!("epoch '{}' has no lessons", info.id)));
            }

            let mut seen_lessons = HashSet::new();
            for lesson in &lessons {
                if !lesson.id.is_valid() {
                    return Err(CatalogError::ContentLoad(format!(
                        "invalid lesson id '{}' in epoch '{}'",
                        lesson.id, info.id
                    )));
                }
                if !seen_lessons.insert(&lesson.id) {
                    return Err(CatalogError::ContentLoad(format!(
                        "duplicate lesson id '{}' in epoch '{}'",
                        lesson.id, info.id
                    )));
                }
            }

            tracing::debug!(epoch = %info.id, lessons = lessons.len(), "Loaded epoch");
            epochs.push(Epoch { id: info.id, title: info.title, lessons });
        }

        Ok(Self { epochs })
    }

    /// Catalog that skips the load-time checks
    #[cfg(test)]
    pub(crate) fn unchecked(epochs: Vec<Epoch>) -> Self {
        Self { epochs }
    }

    /// All epochs in canonical order
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Get an epoch by id
    pub fn epoch(&self, id: &EpochId) -> Result<&Epoch, CatalogError> {
        self.epochs.iter().find(|e| &e.id == id).ok_or_else(|| CatalogError::EpochNotFound(id.clone()))
    }

    /// Get a lesson by epoch and lesson id
    pub fn lesson(&self, epoch: &EpochId, lesson: &LessonId) -> Result<&Lesson, CatalogError> {
        self.epoch(epoch)?.lesson(lesson).ok_or_else(|| CatalogError::LessonNotFound {
            epoch: epoch.clone(),
            lesson: lesson.clone(),
        })
    }

    /// Get a lesson by its qualified key
    pub fn lesson_by_key(&self, key: &LessonKey) -> Result<&Lesson, CatalogError> {
        self.lesson(&key.epoch, &key.lesson)
    }

    /// First lesson of an epoch
    pub fn first_lesson(&self, epoch: &EpochId) -> Result<&Lesson, CatalogError> {
        let found = self.epoch(epoch)?;
        found.lessons.first().ok_or_else(|| CatalogError::EpochEmpty(found.id.clone()))
    }

    /// The lesson after the given one: next in the same epoch, else the first
    /// lesson of the following epoch. `None` at the end of the curriculum or
    /// when the reference is unknown.
    pub fn next_lesson(&self, epoch: &EpochId, lesson: &LessonId) -> Option<(&Epoch, &Lesson)> {
        let epoch_idx = self.epochs.iter().position(|e| &e.id == epoch)?;
        let current = &self.epochs[epoch_idx];
        let lesson_idx = current.lessons.iter().position(|l| &l.id == lesson)?;

        if let Some(next) = current.lessons.get(lesson_idx + 1) {
            return Some((current, next));
        }

        self.epochs[epoch_idx + 1..]
            .iter()
            .find_map(|e| e.lessons.first().map(|first| (e, first)))
    }

    /// Total number of lessons
    pub fn lesson_count(&self) -> usize {
        self.epochs.iter().map(|e| e.lessons.len()).sum()
    }

    /// Total estimated minutes across the curriculum
    pub fn total_minutes(&self) -> u32 {
        self.epochs.iter().map(Epoch::total_minutes).sum()
    }

    /// Iterate over every lesson with its qualified key, in canonical order
    pub fn keyed_lessons(&self) -> impl Iterator<Item = (LessonKey, &Lesson)> {
        self.epochs.iter().flat_map(|e| {
            e.lessons.iter().map(move |l| (LessonKey::new(e.id.clone(), l.id.clone()), l))
        })
    }
}

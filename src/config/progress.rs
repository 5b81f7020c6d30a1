//! Progress tracking for a curriculum
//!
//! The record holds the learner's current position and the set of completed
//! lessons. It is read once at startup and rewritten after every change that
//! matters for resuming. A broken or missing save file never stops the
//! application: the learner simply starts fresh.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curriculum::{Catalog, EpochId, LessonId, LessonKey};

/// Errors from reading or writing the progress store
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Saved state exists but could not be read or parsed
    #[error("Failed to load progress from {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// State could not be written
    #[error("Failed to save progress to {path:?}: {reason}")]
    Save { path: PathBuf, reason: String },
}

/// The learner's resumable state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProgressFile", into = "ProgressFile")]
pub struct Progress {
    /// Where the learner is; a lesson is always scoped to its epoch
    current: Option<LessonKey>,
    /// Completed lessons, qualified by epoch
    completed: BTreeSet<LessonKey>,
    /// Unix timestamp of the last change
    last_updated: Option<i64>,
}

impl Progress {
    /// Current position, if any
    pub fn current(&self) -> Option<&LessonKey> {
        self.current.as_ref()
    }

    pub fn current_epoch_id(&self) -> Option<&EpochId> {
        self.current.as_ref().map(|k| &k.epoch)
    }

    pub fn current_lesson_id(&self) -> Option<&LessonId> {
        self.current.as_ref().map(|k| &k.lesson)
    }

    /// Completed lesson keys
    pub fn completed(&self) -> &BTreeSet<LessonKey> {
        &self.completed
    }

    pub fn is_completed(&self, key: &LessonKey) -> bool {
        self.completed.contains(key)
    }

    pub fn last_updated(&self) -> Option<i64> {
        self.last_updated
    }

    /// Completion summary against the live catalog
    ///
    /// Completed keys that no longer exist in the catalog are left in the record
    /// but do not count here.
    pub fn summary(&self, catalog: &Catalog) -> ProgressSummary {
        let mut summary = ProgressSummary { total: catalog.lesson_count(), ..Default::default() };
        for (key, lesson) in catalog.keyed_lessons() {
            if self.completed.contains(&key) {
                summary.completed += 1;
            } else {
                summary.minutes_remaining += lesson.duration_minutes;
            }
        }
        summary
    }

    fn touch(&mut self) {
        self.last_updated = Some(
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map_or(0, |d| d.as_secs() as i64),
        );
    }
}

/// Completion numbers for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub minutes_remaining: u32,
}

impl ProgressSummary {
    /// Completed share as a whole percentage
    pub fn percent(&self) -> u8 {
        if self.total == 0 { 0 } else { (self.completed * 100 / self.total) as u8 }
    }
}

/// On-disk shape of the progress record
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressFile {
    #[serde(default)]
    current_epoch_id: Option<EpochId>,
    #[serde(default)]
    current_lesson_id: Option<LessonId>,
    #[serde(default)]
    completed_lesson_ids: BTreeSet<LessonKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<i64>,
}

impl From<ProgressFile> for Progress {
    fn from(file: ProgressFile) -> Self {
        // A lesson without its epoch cannot be resolved, so it is dropped
        let current = match (file.current_epoch_id, file.current_lesson_id) {
            (Some(epoch), Some(lesson)) => Some(LessonKey { epoch, lesson }),
            _ => None,
        };
        Self { current, completed: file.completed_lesson_ids, last_updated: file.last_updated }
    }
}

impl From<Progress> for ProgressFile {
    fn from(progress: Progress) -> Self {
        let (current_epoch_id, current_lesson_id) = match progress.current {
            Some(LessonKey { epoch, lesson }) => (Some(epoch), Some(lesson)),
            None => (None, None),
        };
        Self {
            current_epoch_id,
            current_lesson_id,
            completed_lesson_ids: progress.completed,
            last_updated: progress.last_updated,
        }
    }
}

/// Owns the lifecycle of the progress record: load, mutate, persist
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    path: PathBuf,
}

impl ProgressTracker {
    /// Tracker backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the progress file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load progress, falling back to a fresh record when the store is missing
    /// or unreadable
    pub fn load_progress(&self) -> Progress {
        match self.try_load() {
            Ok(Some(progress)) => {
                tracing::debug!(path = ?self.path, completed = progress.completed.len(), "Loaded progress");
                progress
            }
            Ok(None) => {
                tracing::debug!(path = ?self.path, "No saved progress, starting fresh");
                Progress::default()
            }
            Err(e) => {
                tracing::warn!("{e}; starting with fresh progress");
                Progress::default()
            }
        }
    }

    /// Read the store, distinguishing "nothing saved" from "unreadable"
    pub fn try_load(&self) -> Result<Option<Progress>, ProgressError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ProgressError::Load { path: self.path.clone(), reason: e.to_string() })?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| ProgressError::Load { path: self.path.clone(), reason: e.to_string() })
    }

    /// Write progress to disk, replacing any earlier save
    pub fn save_progress(&self, progress: &Progress) -> Result<(), ProgressError> {
        let save_err = |reason: String| ProgressError::Save { path: self.path.clone(), reason };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_err(e.to_string()))?;
        }

        let contents =
            serde_json::to_string_pretty(progress).map_err(|e| save_err(e.to_string()))?;

        std::fs::write(&self.path, contents).map_err(|e| save_err(e.to_string()))?;

        tracing::debug!(path = ?self.path, "Saved progress");
        Ok(())
    }

    /// Record a lesson as completed; repeated calls are no-ops
    pub fn mark_lesson_completed(&self, progress: &mut Progress, epoch: &EpochId, lesson: &LessonId) {
        if progress.completed.insert(LessonKey { epoch: epoch.clone(), lesson: lesson.clone() }) {
            progress.touch();
        }
    }

    /// Move the current position; the completed set is untouched
    pub fn set_current_position(&self, progress: &mut Progress, epoch: &EpochId, lesson: &LessonId) {
        progress.current = Some(LessonKey { epoch: epoch.clone(), lesson: lesson.clone() });
        progress.touch();
    }
}

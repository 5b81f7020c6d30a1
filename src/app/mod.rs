//! The mentor session: catalog, tracker and progress wired together
//!
//! This is the surface a presentation layer talks to. It answers "which lesson
//! now", and accepts "lesson completed" and "navigated to lesson X". Every change
//! is persisted right away; a failed save is logged and the session carries on
//! with its in-memory state.

use crate::config::progress::{Progress, ProgressError, ProgressSummary, ProgressTracker};
use crate::curriculum::{Catalog, CatalogError, EpochId, LessonId, LessonKey};
use crate::navigation::{Resolved, resolve_starting_lesson};

/// A learner's session over a loaded catalog
#[derive(Debug)]
pub struct MentorSession<'a> {
    catalog: &'a Catalog,
    tracker: ProgressTracker,
    progress: Progress,
}

impl<'a> MentorSession<'a> {
    /// Load saved progress and settle on the lesson to show
    pub fn open(catalog: &'a Catalog, tracker: ProgressTracker) -> Result<Self, CatalogError> {
        let progress = tracker.load_progress();
        let mut session = Self { catalog, tracker, progress };

        let resolved = resolve_starting_lesson(&session.progress, catalog)?;
        if !resolved.resumed {
            session.move_to(&resolved.epoch.id, &resolved.lesson.id);
        }

        Ok(session)
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn summary(&self) -> ProgressSummary {
        self.progress.summary(self.catalog)
    }

    /// The lesson to show now
    pub fn current(&self) -> Result<Resolved<'a>, CatalogError> {
        resolve_starting_lesson(&self.progress, self.catalog)
    }

    /// Mark the current lesson completed
    pub fn complete_current(&mut self) -> Result<Resolved<'a>, CatalogError> {
        let current = self.current()?;
        self.tracker.mark_lesson_completed(&mut self.progress, &current.epoch.id, &current.lesson.id);
        self.persist();
        Ok(current)
    }

    /// Jump to a specific lesson
    pub fn navigate_to(
        &mut self,
        epoch: &EpochId,
        lesson: &LessonId,
    ) -> Result<Resolved<'a>, CatalogError> {
        let target_epoch = self.catalog.epoch(epoch)?;
        let target_lesson = self.catalog.lesson(epoch, lesson)?;
        self.move_to(epoch, lesson);
        Ok(Resolved { epoch: target_epoch, lesson: target_lesson, resumed: true })
    }

    /// Complete the current lesson and move to the following one
    ///
    /// Returns `None` once the last lesson of the last epoch is done; the position
    /// then stays on that lesson.
    pub fn advance(&mut self) -> Result<Option<Resolved<'a>>, CatalogError> {
        let current = self.complete_current()?;

        let Some((epoch, lesson)) = self.catalog.next_lesson(&current.epoch.id, &current.lesson.id)
        else {
            tracing::info!("Curriculum complete");
            return Ok(None);
        };

        self.move_to(&epoch.id, &lesson.id);
        Ok(Some(Resolved { epoch, lesson, resumed: true }))
    }

    /// Forget all progress and start over
    pub fn reset(&mut self) -> Result<Resolved<'a>, CatalogError> {
        self.progress = Progress::default();
        let resolved = resolve_starting_lesson(&self.progress, self.catalog)?;
        self.move_to(&resolved.epoch.id, &resolved.lesson.id);
        Ok(resolved)
    }

    /// Whether a lesson has been completed
    pub fn is_completed(&self, epoch: &EpochId, lesson: &LessonId) -> bool {
        self.progress.is_completed(&LessonKey { epoch: epoch.clone(), lesson: lesson.clone() })
    }

    /// Final save at orderly shutdown
    pub fn shutdown(self) -> Result<(), ProgressError> {
        self.tracker.save_progress(&self.progress)
    }

    /// Run `work` against the session, then shut down whether or not it failed
    ///
    /// Returns the outcome of `work` and of the final save separately.
    pub fn run_then_shutdown<T, E>(
        mut self,
        work: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> (Result<T, E>, Result<(), ProgressError>) {
        let outcome = work(&mut self);
        (outcome, self.shutdown())
    }

    fn move_to(&mut self, epoch: &EpochId, lesson: &LessonId) {
        self.tracker.set_current_position(&mut self.progress, epoch, lesson);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.tracker.save_progress(&self.progress) {
            tracing::warn!("{e}; continuing with unsaved progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::{Epoch, Lesson, StaticProvider};
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        Catalog::load(&StaticProvider::new(vec![
            Epoch::new("epoch-1", "Foundations")
                .with_lesson(Lesson::new("lesson-1", "API docs"))
                .with_lesson(Lesson::new("lesson-2", "Migrations")),
            Epoch::new("epoch-2", "Scaling").with_lesson(Lesson::new("lesson-1", "Caching")),
        ]))
        .unwrap()
    }

    fn ids(epoch: &str, lesson: &str) -> (EpochId, LessonId) {
        (EpochId::new(epoch), LessonId::new(lesson))
    }

    #[test]
    fn open_fresh_records_first_lesson() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let tracker = ProgressTracker::new(dir.path().join("progress.json"));

        let session = MentorSession::open(&catalog, tracker.clone()).unwrap();
        assert_eq!(session.current().unwrap().lesson.title, "API docs");

        let saved = tracker.try_load().unwrap().unwrap();
        assert_eq!(saved.current(), Some(&LessonKey::new("epoch-1", "lesson-1")));
    }

    #[test]
    fn advance_walks_whole_curriculum() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let tracker = ProgressTracker::new(dir.path().join("progress.json"));
        let mut session = MentorSession::open(&catalog, tracker).unwrap();

        let next = session.advance().unwrap().unwrap();
        assert_eq!(next.lesson.title, "Migrations");
        let next = session.advance().unwrap().unwrap();
        assert_eq!((next.epoch.id.as_str(), next.lesson.title.as_str()), ("epoch-2", "Caching"));
        assert!(session.advance().unwrap().is_none());

        assert_eq!(session.summary().completed, 3);
        assert_eq!(session.current().unwrap().lesson.title, "Caching");
    }

    #[test]
    fn navigation_survives_restart() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let tracker = ProgressTracker::new(dir.path().join("progress.json"));

        let mut session = MentorSession::open(&catalog, tracker.clone()).unwrap();
        let (epoch, lesson) = ids("epoch-2", "lesson-1");
        session.navigate_to(&epoch, &lesson).unwrap();
        session.complete_current().unwrap();
        session.shutdown().unwrap();

        let session = MentorSession::open(&catalog, tracker).unwrap();
        let current = session.current().unwrap();
        assert_eq!(current.lesson.title, "Caching");
        assert!(session.is_completed(&epoch, &lesson));
    }

    #[test]
    fn navigate_to_unknown_lesson_is_rejected() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let mut session =
            MentorSession::open(&catalog, ProgressTracker::new(dir.path().join("p.json"))).unwrap();

        let (epoch, lesson) = ids("epoch-1", "lesson-7");
        let err = session.navigate_to(&epoch, &lesson).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(session.current().unwrap().lesson.title, "API docs");
    }

    #[test]
    fn reset_clears_completions() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let mut session =
            MentorSession::open(&catalog, ProgressTracker::new(dir.path().join("p.json"))).unwrap();

        session.advance().unwrap();
        let start = session.reset().unwrap();
        assert_eq!(start.lesson.title, "API docs");
        assert!(session.progress().completed().is_empty());
    }

    #[test]
    fn failed_command_still_saves_on_shutdown() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        let catalog = catalog();
        let session = MentorSession::open(&catalog, ProgressTracker::new(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        let (outcome, saved) = session.run_then_shutdown(|s| {
            let (epoch, lesson) = ids("epoch-1", "lesson-7");
            s.navigate_to(&epoch, &lesson)
        });
        assert!(outcome.unwrap_err().is_not_found());
        assert!(saved.is_ok());

        let progress = ProgressTracker::new(path.clone()).try_load().unwrap().unwrap();
        assert_eq!(progress.current(), Some(&LessonKey::new("epoch-1", "lesson-1")));
    }

    #[test]
    fn save_failures_do_not_stop_the_session() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        // A directory cannot be written as a file
        let mut session = MentorSession::open(&catalog, ProgressTracker::new(dir.path())).unwrap();

        let next = session.advance().unwrap().unwrap();
        assert_eq!(next.lesson.title, "Migrations");
        assert_eq!(session.summary().completed, 1);
        assert!(session.shutdown().is_err());
    }
}

//! Resolving which lesson to show on startup or resume
//!
//! Resolution is all-or-nothing: the saved position is either found exactly in
//! the catalog or the learner restarts at the first lesson of the first epoch.
//! There is no attempt to find a nearby lesson.

use crate::config::progress::Progress;
use crate::curriculum::{Catalog, CatalogError, Epoch, Lesson};

/// A lesson together with the epoch that owns it
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub epoch: &'a Epoch,
    pub lesson: &'a Lesson,
    /// Whether the saved position was used as-is
    pub resumed: bool,
}

/// Pick the lesson to present for the given progress
///
/// Only fails if the catalog has no lessons at all, which `Catalog::load` already
/// rules out.
pub fn resolve_starting_lesson<'a>(
    progress: &Progress,
    catalog: &'a Catalog,
) -> Result<Resolved<'a>, CatalogError> {
    if let Some(key) = progress.current() {
        match catalog.lesson_by_key(key) {
            Ok(lesson) => {
                let epoch = catalog.epoch(&key.epoch)?;
                return Ok(Resolved { epoch, lesson, resumed: true });
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("Saved position {key} is stale ({e}); restarting from the beginning");
            }
            Err(e) => return Err(e),
        }
    }

    let epoch = catalog
        .epochs()
        .first()
        .ok_or_else(|| CatalogError::ContentLoad("catalog has no epochs".into()))?;
    let lesson = catalog.first_lesson(&epoch.id).map_err(|e| {
        if e.is_not_found() { CatalogError::ContentLoad(e.to_string()) } else { e }
    })?;
    Ok(Resolved { epoch, lesson, resumed: false })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::progress::ProgressTracker;
    use crate::curriculum::{EpochId, LessonId, StaticProvider};

    fn catalog() -> Catalog {
        Catalog::load(&StaticProvider::new(vec![
            Epoch::new("epoch-1", "Foundations")
                .with_lesson(Lesson::new("lesson-1", "Start"))
                .with_lesson(Lesson::new("lesson-2", "Next")),
            Epoch::new("epoch-10", "Deployment")
                .with_lesson(Lesson::new("lesson-1", "Docker"))
                .with_lesson(Lesson::new("lesson-2", "Kubernetes"))
                .with_lesson(Lesson::new("lesson-3", "Rollouts")),
        ]))
        .unwrap()
    }

    fn at(epoch: &str, lesson: &str) -> Progress {
        let mut progress = Progress::default();
        ProgressTracker::new("unused.json").set_current_position(
            &mut progress,
            &EpochId::new(epoch),
            &LessonId::new(lesson),
        );
        progress
    }

    #[test]
    fn empty_progress_starts_at_beginning() {
        let catalog = catalog();
        let resolved = resolve_starting_lesson(&Progress::default(), &catalog).unwrap();
        assert_eq!(resolved.epoch.id.as_str(), "epoch-1");
        assert_eq!(resolved.lesson.id.as_str(), "lesson-1");
        assert!(!resolved.resumed);
    }

    #[test]
    fn every_valid_position_resumes_exactly() {
        let catalog = catalog();
        for (key, lesson) in catalog.keyed_lessons() {
            let progress = at(key.epoch.as_str(), key.lesson.as_str());
            let resolved = resolve_starting_lesson(&progress, &catalog).unwrap();
            assert_eq!(resolved.epoch.id, key.epoch);
            assert_eq!(resolved.lesson, lesson);
            assert!(resolved.resumed);
        }
    }

    #[test]
    fn empty_first_epoch_is_a_content_error() {
        let catalog = Catalog::unchecked(vec![Epoch::new("epoch-1", "Empty")]);
        let err = resolve_starting_lesson(&Progress::default(), &catalog).unwrap_err();
        assert!(matches!(err, CatalogError::ContentLoad(msg) if msg.contains("no lessons")));

        let err = resolve_starting_lesson(&Progress::default(), &Catalog::unchecked(Vec::new()))
            .unwrap_err();
        assert!(err.is_content_load());
    }

    #[test]
    fn stale_positions_fall_back_to_first_lesson() {
        let catalog = catalog();
        for (epoch, lesson) in
            [("epoch-10", "lesson-9"), ("epoch-99", "lesson-1"), ("epoch-1", "lesson-3")]
        {
            let resolved = resolve_starting_lesson(&at(epoch, lesson), &catalog).unwrap();
            assert_eq!(resolved.epoch.id.as_str(), "epoch-1");
            assert_eq!(resolved.lesson.id.as_str(), "lesson-1");
            assert!(!resolved.resumed);
        }
    }
}

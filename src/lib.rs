//! Mentor - a lesson-and-quiz curriculum that remembers where you left off
//!
//! The core is small: an immutable [`curriculum::Catalog`] of epochs, lessons and
//! quiz questions, a persisted [`config::progress::Progress`] record, and the
//! resolver that reconciles the two on startup.

pub mod app;
pub mod config;
pub mod curriculum;
pub mod navigation;
pub mod ui;

pub use app::MentorSession;
pub use config::Config;
pub use config::progress::{Progress, ProgressError, ProgressTracker};
pub use curriculum::{Catalog, CatalogError};
pub use navigation::{Resolved, resolve_starting_lesson};

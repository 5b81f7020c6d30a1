//! Markdown directory content provider
//!
//! Layout of a content root:
//!
//! ```text
//! content/
//!   01-foundations/          epoch (id = directory name)
//!     README.md              optional, first `# heading` is the epoch title
//!     01-api-docs.md         lesson (id = file stem)
//!     01-api-docs.quiz.json  optional questions for that lesson
//!     02-migrations.md
//!   02-scaling/
//!     ...
//! ```
//!
//! Epochs and lessons are ordered by file name. Hidden entries (leading `.`)
//! are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use super::error::CatalogError;
use super::model::{EpochId, Lesson, QuizQuestion};
use super::provider::{ContentProvider, EpochInfo};

/// Average reading speed for technical content, in words per minute
const WORDS_PER_MINUTE: usize = 200;

/// Suffix of the quiz file that sits beside a lesson
const QUIZ_SUFFIX: &str = ".quiz.json";

/// Reads a curriculum from a directory tree of markdown files
#[derive(Debug, Clone)]
pub struct MarkdownDirectoryProvider {
    root: PathBuf,
}

impl MarkdownDirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn epoch_dir(&self, epoch: &EpochId) -> PathBuf {
        self.root.join(epoch.as_str())
    }
}

impl ContentProvider for MarkdownDirectoryProvider {
    fn epochs(&self) -> Result<Vec<EpochInfo>, CatalogError> {
        let mut subdirs: Vec<_> = fs::read_dir(&self.root)
            .map_err(|source| CatalogError::ContentRead { path: self.root.clone(), source })?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir() && !e.file_name().to_string_lossy().starts_with('.'))
            .collect();

        // Sort by directory name for consistent ordering
        subdirs.sort_by_key(|e| e.file_name());

        Ok(subdirs
            .iter()
            .map(|entry| {
                let id = entry.file_name().to_string_lossy().to_string();
                let title = extract_title_from_file(&entry.path().join("README.md"))
                    .unwrap_or_else(|| id.clone());
                EpochInfo { id: EpochId::new(id), title }
            })
            .collect())
    }

    fn lessons(&self, epoch: &EpochId) -> Result<Vec<Lesson>, CatalogError> {
        let dir = self.epoch_dir(epoch);
        if !dir.is_dir() {
            return Err(CatalogError::EpochNotFound(epoch.clone()));
        }

        let mut md_files: Vec<_> = fs::read_dir(&dir)
            .map_err(|source| CatalogError::ContentRead { path: dir.clone(), source })?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .filter(|p| {
                p.file_name().is_some_and(|name| {
                    name != "README.md" && !name.to_string_lossy().starts_with('.')
                })
            })
            .collect();

        md_files.sort();

        md_files.iter().map(|path| parse_lesson_file(path)).collect()
    }
}

/// Parse a single markdown file, plus its quiz file if present, into a lesson
pub fn parse_lesson_file(path: &Path) -> Result<Lesson, CatalogError> {
    let body = fs::read_to_string(path)
        .map_err(|source| CatalogError::ContentRead { path: path.to_path_buf(), source })?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy().to_string();
    let summary = summarize_markdown(&body);
    let title = summary.title.unwrap_or_else(|| stem.clone());
    let quiz = load_quiz(&path.with_file_name(format!("{stem}{QUIZ_SUFFIX}")))?;

    let mut lesson = Lesson::new(stem.as_str(), title)
        .with_duration(reading_minutes(summary.word_count))
        .with_body(body);
    lesson.quiz = quiz;
    Ok(lesson)
}

/// Load questions from a quiz file; a missing file means no questions
fn load_quiz(path: &Path) -> Result<Vec<QuizQuestion>, CatalogError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .map_err(|source| CatalogError::ContentRead { path: path.to_path_buf(), source })?;
    serde_json::from_str(&contents)
        .map_err(|source| CatalogError::QuizParse { path: path.to_path_buf(), source })
}

/// Title and word count of a markdown document
#[derive(Debug, Default, PartialEq, Eq)]
struct MarkdownSummary {
    title: Option<String>,
    word_count: usize,
}

fn summarize_markdown(markdown: &str) -> MarkdownSummary {
    let mut summary = MarkdownSummary::default();
    let mut in_h1 = false;
    let mut heading = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level: HeadingLevel::H1, .. }) => {
                in_h1 = summary.title.is_none();
                heading.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_h1 => {
                in_h1 = false;
                summary.title = Some(heading.trim().to_string());
            }
            Event::Text(text) => {
                summary.word_count += text.split_whitespace().count();
                if in_h1 {
                    heading.push_str(&text);
                }
            }
            Event::Code(code) => {
                summary.word_count += code.split_whitespace().count();
                if in_h1 {
                    heading.push_str(&code);
                }
            }
            _ => {}
        }
    }

    summary
}

fn reading_minutes(word_count: usize) -> u32 {
    (word_count / WORDS_PER_MINUTE).max(1) as u32
}

fn extract_title_from_file(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    summarize_markdown(&content).title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::catalog::Catalog;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn summary_takes_first_h1() {
        let md = "Intro text\n\n# First `Title`\n\n## Sub\n\n# Second\n\nbody words here";
        let summary = summarize_markdown(md);
        assert_eq!(summary.title.as_deref(), Some("First Title"));
        assert_eq!(summary.word_count, 9);
    }

    #[test]
    fn reading_time_has_floor() {
        assert_eq!(reading_minutes(0), 1);
        assert_eq!(reading_minutes(199), 1);
        assert_eq!(reading_minutes(1000), 5);
    }

    #[test]
    fn provider_reads_sorted_tree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(&root.join("02-scaling/01-caching.md"), "# Caching\n\nCache all the things.");
        write(&root.join("01-basics/README.md"), "# Basics");
        write(&root.join("01-basics/02-migrations.md"), "# Migrations\n\nFlyway.");
        write(&root.join("01-basics/01-api-docs.md"), "No heading here.");
        write(&root.join(".git/ignored.md"), "# Hidden");
        write(
            &root.join("01-basics/02-migrations.quiz.json"),
            r#"[{"prompt": "Tool?", "choices": [{"label": "A", "text": "Flyway"}, {"label": "B", "text": "Maven"}], "correct": "A", "explanation": "Flyway runs migrations."}]"#,
        );

        let catalog = Catalog::load(&MarkdownDirectoryProvider::new(root)).unwrap();
        let epochs = catalog.epochs();
        assert_eq!(epochs.len(), 2);
        assert_eq!(epochs[0].title, "Basics");
        assert_eq!(epochs[1].title, "02-scaling");

        let lessons = &epochs[0].lessons;
        assert_eq!(lessons[0].id.as_str(), "01-api-docs");
        assert_eq!(lessons[0].title, "01-api-docs");
        assert!(lessons[0].quiz.is_empty());
        assert_eq!(lessons[1].title, "Migrations");
        assert_eq!(lessons[1].quiz.len(), 1);
        assert!(lessons[1].body.contains("Flyway."));
    }

    #[test]
    fn provider_skips_hidden_lessons() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("e1/01-intro.md"), "# Intro");
        write(&temp.path().join("e1/.#01-intro.md"), "# Editor lock");
        let apple_double = temp.path().join("e1/._01-intro.md");
        fs::write(&apple_double, [0x00u8, 0x05, 0x16, 0x07, 0xff, 0xfe]).unwrap();

        let catalog = Catalog::load(&MarkdownDirectoryProvider::new(temp.path())).unwrap();
        let lessons = &catalog.epochs()[0].lessons;
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].title, "Intro");
    }

    #[test]
    fn provider_rejects_bad_quiz_file() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("e1/l1.md"), "# L1");
        write(&temp.path().join("e1/l1.quiz.json"), "{ not json");

        let err = Catalog::load(&MarkdownDirectoryProvider::new(temp.path())).unwrap_err();
        assert!(matches!(err, CatalogError::QuizParse { .. }));
    }

    #[test]
    fn provider_on_missing_root_is_content_error() {
        let temp = TempDir::new().unwrap();
        let err =
            Catalog::load(&MarkdownDirectoryProvider::new(temp.path().join("absent"))).unwrap_err();
        assert!(err.is_content_load());
    }

    #[test]
    fn empty_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let err = Catalog::load(&MarkdownDirectoryProvider::new(temp.path())).unwrap_err();
        assert!(matches!(err, CatalogError::ContentLoad(_)));
    }
}

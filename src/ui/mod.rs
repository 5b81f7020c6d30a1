//! Plain-text rendering for the terminal front end
//!
//! Each function returns the full text to print so output can be checked in tests.

use std::fmt::Write;

use crate::app::MentorSession;
use crate::config::progress::ProgressSummary;
use crate::curriculum::{AnswerOutcome, Catalog, QuizQuestion};
use crate::navigation::Resolved;

/// Render a lesson with its heading, body and quiz hint
pub fn render_lesson(resolved: &Resolved<'_>, width: usize) -> String {
    let lesson = resolved.lesson;
    let mut out = String::new();

    let heading = format!("{} / {}", resolved.epoch.title, lesson.title);
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}", "=".repeat(heading.chars().count().min(width)));
    let _ = writeln!(out, "~{} min  [{}:{}]", lesson.duration_minutes, resolved.epoch.id, lesson.id);
    out.push('\n');

    for line in lesson.body.lines() {
        if line.trim().is_empty() || line.starts_with("```") || line.starts_with("    ") {
            let _ = writeln!(out, "{line}");
        } else {
            for wrapped in textwrap::wrap(line, width) {
                let _ = writeln!(out, "{wrapped}");
            }
        }
    }

    if !lesson.quiz.is_empty() {
        out.push('\n');
        let _ = writeln!(
            out,
            "This lesson has {} quiz question(s). Answer with: mentor quiz <number> <choice>",
            lesson.quiz.len()
        );
        for (i, question) in lesson.quiz.iter().enumerate() {
            out.push('\n');
            out.push_str(&render_question(i + 1, question, width));
        }
    }

    out
}

/// Render one question with its choices
pub fn render_question(number: usize, question: &QuizQuestion, width: usize) -> String {
    let mut out = String::new();
    for line in textwrap::wrap(&format!("{number}. {}", question.prompt()), width) {
        let _ = writeln!(out, "{line}");
    }
    for choice in question.choices() {
        let _ = writeln!(out, "   {}) {}", choice.label, choice.text);
    }
    out
}

/// Render the result of answering a question
pub fn render_answer(outcome: &AnswerOutcome, width: usize) -> String {
    let mut out = String::new();
    if outcome.correct {
        out.push_str("Correct!\n");
    } else {
        let _ = writeln!(out, "Not quite. The answer is {}.", outcome.correct_label);
    }
    if !outcome.explanation.is_empty() {
        for line in textwrap::wrap(&outcome.explanation, width) {
            let _ = writeln!(out, "{line}");
        }
    }
    out
}

/// One-line completion summary
pub fn render_summary(summary: &ProgressSummary) -> String {
    format!(
        "{}/{} lessons complete ({}%), about {} min remaining",
        summary.completed,
        summary.total,
        summary.percent(),
        summary.minutes_remaining
    )
}

/// Size of the whole curriculum
pub fn render_overview(catalog: &Catalog) -> String {
    format!(
        "{} epochs, {} lessons, about {} min in total",
        catalog.epochs().len(),
        catalog.lesson_count(),
        catalog.total_minutes()
    )
}

/// Epochs and lessons with completion and position markers
pub fn render_listing(session: &MentorSession<'_>) -> String {
    let current = session.progress().current().cloned();
    let mut out = String::new();

    for epoch in session.catalog().epochs() {
        let done = epoch.lessons.iter().filter(|l| session.is_completed(&epoch.id, &l.id)).count();
        let _ = writeln!(out, "{} ({}) [{}/{}]", epoch.title, epoch.id, done, epoch.lessons.len());

        for lesson in &epoch.lessons {
            let here = current.as_ref().is_some_and(|k| k.epoch == epoch.id && k.lesson == lesson.id);
            let mark = if session.is_completed(&epoch.id, &lesson.id) { "x" } else { " " };
            let pointer = if here { ">" } else { " " };
            let _ = writeln!(
                out,
                " {pointer} [{mark}] {:<24} {} ({} min)",
                lesson.id.as_str(),
                lesson.title,
                lesson.duration_minutes
            );
        }
    }

    out
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mentor::app::MentorSession;
use mentor::config::progress::ProgressTracker;
use mentor::curriculum::{Catalog, EpochId, LessonId, MarkdownDirectoryProvider};
use mentor::{Config, ui};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mentor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Curriculum content directory
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Progress file to read and write
    #[arg(long, global = true)]
    progress: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where you are and how far along
    Status,
    /// List every epoch and lesson
    List,
    /// Mark the current lesson completed
    Complete,
    /// Complete the current lesson and move to the next one
    Next,
    /// Jump to a lesson
    Goto {
        /// Epoch id
        epoch: String,
        /// Lesson id within the epoch
        lesson: String,
    },
    /// Answer a quiz question of the current lesson
    Quiz {
        /// Question number, starting at 1
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        number: u16,
        /// Choice label
        choice: String,
    },
    /// Forget all progress
    Reset,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(content) = cli.content {
        config.content_dir = Some(content);
    }
    if let Some(progress) = cli.progress {
        config.progress_file = Some(progress);
    }

    let provider = MarkdownDirectoryProvider::new(config.content_path()?);
    let catalog = Catalog::load(&provider)
        .with_context(|| format!("No usable curriculum in {:?}", provider.root()))?;

    let tracker = ProgressTracker::new(config.progress_path()?);
    let session = MentorSession::open(&catalog, tracker)?;
    let width = config.wrap_width;

    let (outcome, saved) = session.run_then_shutdown(|s| run_command(s, cli.command, width));
    if let Err(e) = saved {
        tracing::warn!("{e}");
        eprintln!("Warning: your progress could not be saved.");
    }

    outcome
}

fn run_command(session: &mut MentorSession<'_>, command: Option<Commands>, width: usize) -> Result<()> {
    match command {
        None => {
            print!("{}", ui::render_lesson(&session.current()?, width));
        }
        Some(Commands::Status) => {
            let current = session.current()?;
            println!("Current: {} / {}", current.epoch.title, current.lesson.title);
            println!("{}", ui::render_summary(&session.summary()));
            println!("{}", ui::render_overview(session.catalog()));
        }
        Some(Commands::List) => {
            print!("{}", ui::render_listing(session));
            println!("{}", ui::render_summary(&session.summary()));
        }
        Some(Commands::Complete) => {
            let done = session.complete_current()?;
            println!("Completed {}", done.lesson.title);
        }
        Some(Commands::Next) => match session.advance()? {
            Some(next) => print!("{}", ui::render_lesson(&next, width)),
            None => println!("You have completed the whole curriculum."),
        },
        Some(Commands::Goto { epoch, lesson }) => {
            let target = session.navigate_to(&EpochId::new(epoch), &LessonId::new(lesson))?;
            print!("{}", ui::render_lesson(&target, width));
        }
        Some(Commands::Quiz { number, choice }) => {
            let current = session.current()?;
            let question = current.lesson.question(usize::from(number))?;
            print!("{}", ui::render_answer(&question.answer(&choice)?, width));
        }
        Some(Commands::Reset) => {
            let start = session.reset()?;
            println!("Progress cleared. Starting again at {}.", start.lesson.title);
        }
    }

    Ok(())
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that launches Artifact Maze.

mod driver;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use artifact_maze_core::Level;
use artifact_maze_rendering::{RenderingBackend, RenderingConfig};
use artifact_maze_rendering_macroquad::MacroquadBackend;
use artifact_maze_system_game_flow::{GameConfig, GameFlow, Intent};
use artifact_maze_system_quiz::QuestionSet;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::driver::FrameDriver;

const DEFAULT_LOG_FILTER: &str = "info";

/// Collect three artifacts, answer their questions, and stay clear of the
/// wandering enemies.
#[derive(Debug, Parser)]
#[command(name = "artifact-maze", version)]
struct CliArgs {
    /// Seed for mazes, enemy movement, and question order; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Skip level selection and start at this level (1-5).
    #[arg(long, value_parser = parse_level)]
    level: Option<Level>,
    /// TOML file replacing the built-in question set.
    #[arg(long, value_name = "PATH")]
    questions: Option<PathBuf>,
    /// Render as fast as possible instead of waiting for vertical sync.
    #[arg(long)]
    no_vsync: bool,
    /// Tracing filter such as `debug` or `artifact_maze_world=trace`.
    /// Takes precedence over `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,
}

/// Entry point for the Artifact Maze command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_filter.as_deref())?;

    let questions = load_questions(args.questions.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    tracing::info!(seed, questions = questions.len(), "starting artifact maze");

    let mut flow = GameFlow::new(GameConfig { seed, questions });
    if let Some(level) = args.level {
        if !flow.handle(Intent::SelectLevel(level)) {
            bail!("failed to start a session at level {level}");
        }
    }

    let config = RenderingConfig::default();
    let mut driver = FrameDriver::new(flow, config.clone());
    MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .run(config, move |frame| driver.frame(frame))
}

fn parse_level(value: &str) -> Result<Level, String> {
    let raw: u8 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a level number"))?;
    Level::try_from(raw).map_err(|error| error.to_string())
}

fn log_filter(directives: Option<&str>) -> Result<EnvFilter> {
    match directives {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

fn init_logging(directives: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to install the log subscriber: {error}"))
}

fn load_questions(path: Option<&Path>) -> Result<QuestionSet> {
    let questions = match path {
        Some(path) => QuestionSet::from_path(path)
            .with_context(|| format!("failed to load questions from {}", path.display()))?,
        None => QuestionSet::builtin().context("built-in question set is malformed")?,
    };
    if questions.is_empty() {
        tracing::warn!("question set is empty; every artifact is credited without a quiz");
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    struct TempQuestions {
        path: PathBuf,
    }

    impl TempQuestions {
        fn write(contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "artifact-maze-cli-questions-{}.toml",
                std::process::id()
            ));
            std::fs::write(&path, contents).expect("write temp questions");
            Self { path }
        }
    }

    impl Drop for TempQuestions {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    #[test]
    fn argument_definitions_are_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn defaults_leave_everything_unset() {
        let args = CliArgs::try_parse_from(["artifact-maze"]).expect("no arguments parse");
        assert_eq!(args.seed, None);
        assert_eq!(args.level, None);
        assert_eq!(args.questions, None);
        assert!(!args.no_vsync);
        assert_eq!(args.log_filter, None);
    }

    #[test]
    fn every_flag_is_parsed() {
        let args = CliArgs::try_parse_from([
            "artifact-maze",
            "--seed",
            "42",
            "--level",
            "3",
            "--questions",
            "extra.toml",
            "--no-vsync",
            "--log-filter",
            "debug",
        ])
        .expect("all flags parse");
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.level, Level::new(3));
        assert_eq!(args.questions, Some(PathBuf::from("extra.toml")));
        assert!(args.no_vsync);
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn levels_outside_the_menu_are_rejected() {
        for value in ["0", "6", "three", "-1"] {
            assert!(
                CliArgs::try_parse_from(["artifact-maze", "--level", value]).is_err(),
                "level {value} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_log_filters_are_reported() {
        assert!(log_filter(Some("artifact_maze=notalevel")).is_err());
        assert!(log_filter(Some("warn,artifact_maze_world=debug")).is_ok());
    }

    #[test]
    fn builtin_questions_load_without_a_path() {
        let questions = load_questions(None).expect("built-in set");
        assert_eq!(questions.len(), 14);
    }

    #[test]
    fn question_files_override_the_builtin_set() {
        let file = TempQuestions::write(
            "[[question]]\nprompt = \"2 + 2?\"\nanswers = [\"4\", \"3\", \"5\", \"22\"]\n",
        );

        let questions = load_questions(Some(&file.path)).expect("custom set");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions.questions()[0].correct_answer(), "4");
    }

    #[test]
    fn missing_question_files_name_the_path() {
        let error = load_questions(Some(Path::new("/nonexistent/questions.toml")))
            .expect_err("missing file");
        assert!(format!("{error:#}").contains("/nonexistent/questions.toml"));
    }
}

//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions. The command bodies live in
//! `commands`.

pub mod commands;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{StyleError, StyleTable, STYLES_ENV};
use commands::completions::{completions, CompletionsCommandError};
use commands::demo::{demo, DemoCommandError, DemoOptions, DemoOutcome};
use commands::list::list_styles;

/// Style used by `twirl demo` when none is given.
pub const DEFAULT_STYLE: &str = "dots2";
/// Initial message used by `twirl demo`.
pub const DEFAULT_MESSAGE: &str = "Processing…";
/// Number of demo steps.
pub const DEFAULT_STEPS: u32 = 5;
/// Milliseconds between demo steps.
pub const DEFAULT_STEP_MS: u64 = 600;

/// Exit code after Ctrl+C, following the shell's 128 + SIGINT convention.
pub const INTERRUPTED_EXIT: u8 = 130;

/// Animated console spinners driven by a JSON style table.
///
/// Without a subcommand, runs the demo with the default style.
#[derive(Parser, Debug)]
#[command(name = "twirl")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON file of spinner styles. Defaults to the built-in table.
    #[arg(long, global = true, env = STYLES_ENV, value_name = "PATH")]
    pub styles: Option<PathBuf>,

    /// Show debug logs on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run; the demo when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for twirl.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Animate a spinner through a few fake steps.
    ///
    /// Examples:
    ///   twirl demo                     # dots2, 5 steps
    ///   twirl demo -s line --steps 3   # another style
    ///   twirl demo --fail              # finish with a failure line
    Demo(DemoCommand),

    /// List the available spinner styles.
    List(ListCommand),

    /// Generate shell completions.
    Completions(CompletionsCommand),
}

/// Arguments for `twirl demo`.
#[derive(Args, Debug, Clone)]
pub struct DemoCommand {
    /// Style to animate.
    #[arg(short, long, default_value = DEFAULT_STYLE)]
    pub style: String,

    /// Message shown before the first step.
    #[arg(short, long, default_value = DEFAULT_MESSAGE)]
    pub message: String,

    /// Number of steps to run.
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    pub steps: u32,

    /// Milliseconds each step takes.
    #[arg(long, default_value_t = DEFAULT_STEP_MS)]
    pub step_ms: u64,

    /// Finish with a failure line instead of success.
    #[arg(long)]
    pub fail: bool,
}

impl Default for DemoCommand {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            steps: DEFAULT_STEPS,
            step_ms: DEFAULT_STEP_MS,
            fail: false,
        }
    }
}

impl DemoCommand {
    /// Execute the demo command.
    pub fn execute(&self, styles: Option<&Path>) -> CliResult {
        let table = StyleTable::load(styles)?;
        let options = DemoOptions {
            style: &self.style,
            message: &self.message,
            steps: self.steps,
            step: Duration::from_millis(self.step_ms),
            fail: self.fail,
        };
        let code = match demo(&table, &options)? {
            DemoOutcome::Succeeded => ExitCode::SUCCESS,
            DemoOutcome::Failed => ExitCode::FAILURE,
            DemoOutcome::Interrupted => ExitCode::from(INTERRUPTED_EXIT),
        };
        Ok(code)
    }
}

/// Arguments for `twirl list`.
#[derive(Args, Debug, Clone)]
pub struct ListCommand {
    /// Print only the style names.
    #[arg(short, long)]
    pub names: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(&self, styles: Option<&Path>) -> CliResult {
        let table = StyleTable::load(styles)?;
        let stdout = io::stdout();
        list_styles(&table, self.names, &mut stdout.lock())?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Arguments for `twirl completions`.
#[derive(Args, Debug, Clone)]
pub struct CompletionsCommand {
    /// Shell to generate completions for (bash, zsh, fish).
    pub shell: String,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self) -> CliResult {
        completions(&self.shell)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Error type for CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The style table could not be loaded or the style was not found.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// The demo failed to run.
    #[error(transparent)]
    Demo(#[from] DemoCommandError),
    /// Completions could not be generated.
    #[error(transparent)]
    Completions(#[from] CompletionsCommandError),
    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Result of running a CLI command.
pub type CliResult = Result<ExitCode, CliError>;

/// Print an error, if any, and turn the result into a process exit code.
pub fn handle_result(result: CliResult) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            ExitCode::FAILURE
        }
    }
}

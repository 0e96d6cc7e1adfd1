//! Demo command implementation.
//!
//! This module implements `twirl demo`: start a spinner, walk it through a
//! few timed steps, then finish with a success or failure line. Ctrl+C fails
//! the spinner so the terminal is left clean.

use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use tracing::{debug, info};

use crate::config::{StyleError, StyleTable};
use crate::feedback::{Spinner, SpinnerError};

/// Final message after all steps complete.
pub const DONE_MESSAGE: &str = "Done!";
/// Final message with `--fail`.
pub const FAILED_MESSAGE: &str = "Failed!";
/// Final message after Ctrl+C.
pub const INTERRUPTED_MESSAGE: &str = "Interrupted";

/// Result type for demo command operations.
pub type DemoCommandResult = Result<DemoOutcome, DemoCommandError>;

/// How the demo finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOutcome {
    /// All steps ran and the spinner succeeded.
    Succeeded,
    /// All steps ran and the spinner was failed on request.
    Failed,
    /// The user pressed Ctrl+C.
    Interrupted,
}

/// Error type for demo command operations.
#[derive(Debug, thiserror::Error)]
pub enum DemoCommandError {
    /// The requested style is missing from the table.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// The spinner could not be started.
    #[error(transparent)]
    Spinner(#[from] SpinnerError),
}

/// Options for one demo run.
#[derive(Debug, Clone)]
pub struct DemoOptions<'a> {
    /// Style name to look up.
    pub style: &'a str,
    /// Message shown before the first step.
    pub message: &'a str,
    /// Number of steps.
    pub steps: u32,
    /// Duration of each step.
    pub step: Duration,
    /// Finish with a failure line.
    pub fail: bool,
}

/// Message shown while step `index` of `total` runs.
pub fn step_message(index: u32, total: u32) -> String {
    format!("Step {index}/{total}…")
}

/// Execute the demo command on stdout.
pub fn demo(table: &StyleTable, options: &DemoOptions<'_>) -> DemoCommandResult {
    let (tx, interrupts) = mpsc::channel();
    let handler_tx = tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = handler_tx.send(());
    }) {
        debug!(error = %e, "Ctrl+C handler not installed");
    }

    let outcome = run_demo(table, options, &interrupts, io::stdout());
    drop(tx);
    outcome
}

/// Run the demo against any writer, stopping early on a message from `interrupts`.
pub fn run_demo<W>(
    table: &StyleTable,
    options: &DemoOptions<'_>,
    interrupts: &Receiver<()>,
    writer: W,
) -> DemoCommandResult
where
    W: Write + Send + 'static,
{
    let style = table.get(options.style)?;
    info!(style = style.name(), steps = options.steps, "starting demo");

    let spinner = Spinner::start_with_writer(style, options.message, writer)?;
    for index in 1..=options.steps {
        match interrupts.recv_timeout(options.step) {
            Ok(()) => {
                spinner.fail(INTERRUPTED_MESSAGE);
                return Ok(DemoOutcome::Interrupted);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => std::thread::sleep(options.step),
        }
        spinner.update(step_message(index, options.steps));
    }

    if options.fail {
        spinner.fail(FAILED_MESSAGE);
        Ok(DemoOutcome::Failed)
    } else {
        spinner.succeed(DONE_MESSAGE);
        Ok(DemoOutcome::Succeeded)
    }
}

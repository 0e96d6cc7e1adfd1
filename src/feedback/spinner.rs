//! Inline spinner for showing progress during long-running operations.
//!
//! The spinner runs a background thread that repaints one terminal line at
//! the style's interval. Callers change the message with `update()` from any
//! thread and end the spinner with `succeed()`, `fail()` or `stop()`.
//! Dropping a spinner stops it.
//!
//! Only the timer thread writes status lines. Final lines are written after
//! the timer has been halted, so the two never interleave.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::line;
use crate::config::Style;

/// How long `stop()` waits for the timer thread before giving up on it.
pub const STOP_GRACE: Duration = Duration::from_millis(200);

/// Error type for spinner operations.
#[derive(Debug, thiserror::Error)]
pub enum SpinnerError {
    /// The timer thread could not be created.
    #[error("Failed to spawn spinner thread: {0}")]
    Spawn(#[from] io::Error),
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State touched by both the caller and the timer thread.
struct Shared {
    style: Arc<Style>,
    message: Mutex<String>,
    frame: AtomicUsize,
    running: AtomicBool,
    last_was_status: AtomicBool,
    timer_exited: AtomicBool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl Shared {
    fn new(style: Arc<Style>, message: String, out: Box<dyn Write + Send>) -> Self {
        Self {
            style,
            message: Mutex::new(message),
            frame: AtomicUsize::new(0),
            running: AtomicBool::new(true),
            last_was_status: AtomicBool::new(false),
            timer_exited: AtomicBool::new(false),
            out: Mutex::new(out),
        }
    }

    /// Repaint the status line with the next frame.
    fn tick(&self) {
        if !self.running.load(Ordering::Acquire) {
            return;
        }
        let mut out = lock(&self.out);
        // Re-checked under the output lock: once stop() has flipped the flag
        // no status line may follow its final write.
        if !self.running.load(Ordering::Acquire) {
            return;
        }

        let index = self.frame.fetch_add(1, Ordering::Relaxed);
        let status = {
            let message = lock(&self.message);
            line::status_line(self.style.frame(index), &message)
        };

        match out.write_all(status.as_bytes()).and_then(|()| out.flush()) {
            Ok(()) => self.last_was_status.store(true, Ordering::Release),
            Err(e) => warn!(error = %e, style = self.style.name(), "spinner repaint failed"),
        }
    }

    /// Write a line outside the timer.
    ///
    /// If the timer thread was abandoned it may still hold the output, so
    /// the write is skipped rather than waiting on it.
    fn write(&self, text: &str) {
        let mut out = if self.timer_exited.load(Ordering::Acquire) {
            lock(&self.out)
        } else {
            match self.out.try_lock() {
                Ok(out) => out,
                Err(std::sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(std::sync::TryLockError::WouldBlock) => {
                    warn!("spinner output busy, dropping line");
                    return;
                }
            }
        };
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!(error = %e, "spinner write failed");
        }
    }

    /// Erase a status line the timer left behind after being stopped.
    fn clear_status(&self) {
        let mut out = lock(&self.out);
        if self.running.load(Ordering::Acquire)
            || !self.last_was_status.swap(false, Ordering::AcqRel)
        {
            return;
        }
        if let Err(e) = out
            .write_all(line::ERASE_LINE.as_bytes())
            .and_then(|()| out.flush())
        {
            warn!(error = %e, "spinner erase failed");
        }
    }
}

/// Marks the timer as gone when `run_timer` returns or unwinds.
struct ExitGuard<'a>(&'a Shared);

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.running.store(false, Ordering::Release);
            warn!(style = self.0.style.name(), "spinner thread panicked, animation stopped");
        }
        self.0.timer_exited.store(true, Ordering::Release);
    }
}

/// Handle to the timer thread.
struct Timer {
    stop_tx: Sender<()>,
    done_rx: Receiver<()>,
    handle: JoinHandle<()>,
}

impl Timer {
    fn spawn(shared: Arc<Shared>) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("spinner".to_string())
            .spawn(move || run_timer(&shared, &stop_rx, &done_tx))?;
        Ok(Self {
            stop_tx,
            done_rx,
            handle,
        })
    }

    /// Signal the thread and wait up to `STOP_GRACE` for it to finish.
    fn halt(self) {
        let _ = self.stop_tx.send(());
        match self.done_rx.recv_timeout(STOP_GRACE) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if self.handle.join().is_err() {
                    warn!("spinner thread panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    grace_ms = STOP_GRACE.as_millis() as u64,
                    "spinner thread did not stop in time, detaching"
                );
            }
        }
    }
}

/// Timer loop: tick immediately, then at a fixed rate until signalled.
fn run_timer(shared: &Shared, stop_rx: &Receiver<()>, done_tx: &Sender<()>) {
    let exit = ExitGuard(shared);
    let interval = Duration::from_millis(shared.style.interval_ms());
    let mut next = Instant::now();
    loop {
        shared.tick();

        next += interval;
        let now = Instant::now();
        // Missed ticks are skipped, not replayed in a burst.
        if next < now {
            next = now;
        }
        match stop_rx.recv_timeout(next - now) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    // A repaint that outlived stop()'s grace period must not stay on screen.
    shared.clear_status();
    drop(exit);
    let _ = done_tx.send(());
}

/// An animated single-line progress indicator.
///
/// `Spinner` is `Send + Sync`: share it by reference or in an `Arc` to call
/// `update()` from worker threads.
///
/// # Example
///
/// ```no_run
/// use twirl::config::StyleTable;
/// use twirl::feedback::Spinner;
///
/// let styles = StyleTable::embedded()?;
/// let spinner = Spinner::start(styles.get("dots")?, "Loading...")?;
/// // ... do work ...
/// spinner.update("Almost there...");
/// spinner.succeed("Loaded");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Spinner {
    shared: Arc<Shared>,
    timer: Mutex<Option<Timer>>,
    finished: AtomicBool,
}

impl Spinner {
    /// Start a spinner on stdout.
    pub fn start(style: Arc<Style>, message: impl Into<String>) -> Result<Self, SpinnerError> {
        Self::start_with_writer(style, message, io::stdout())
    }

    /// Start a spinner that writes to `writer`.
    pub fn start_with_writer<W>(
        style: Arc<Style>,
        message: impl Into<String>,
        writer: W,
    ) -> Result<Self, SpinnerError>
    where
        W: Write + Send + 'static,
    {
        let shared = Arc::new(Shared::new(style, message.into(), Box::new(writer)));
        let timer = Timer::spawn(Arc::clone(&shared))?;
        debug!(
            style = shared.style.name(),
            interval_ms = shared.style.interval_ms(),
            "spinner started"
        );
        Ok(Self {
            shared,
            timer: Mutex::new(Some(timer)),
            finished: AtomicBool::new(false),
        })
    }

    /// Replace the message shown next to the spinner.
    ///
    /// Takes effect on the next repaint. Only the latest message is kept;
    /// after the spinner has stopped this has no visible effect.
    pub fn update(&self, message: impl Into<String>) {
        *lock(&self.shared.message) = message.into();
    }

    /// The current message.
    pub fn message(&self) -> String {
        lock(&self.shared.message).clone()
    }

    /// The style being animated.
    pub fn style(&self) -> &Style {
        &self.shared.style
    }

    /// Whether the spinner is still animating.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Stop the spinner and replace it with a success line.
    pub fn succeed(&self, message: &str) {
        self.finish(line::SUCCESS_SYMBOL, message);
    }

    /// Stop the spinner and replace it with a failure line.
    pub fn fail(&self, message: &str) {
        self.finish(line::FAILURE_SYMBOL, message);
    }

    fn finish(&self, symbol: &str, message: &str) {
        // Held while writing so a stop() racing on another thread has
        // finished halting the timer first.
        let _timer = self.halt();
        if self.finished.swap(true, Ordering::AcqRel) {
            return;
        }
        self.shared.write(&line::final_line(symbol, message));
        self.shared.last_was_status.store(false, Ordering::Release);
    }

    /// Stop the spinner and clear its line.
    ///
    /// Safe to call more than once and from several threads. Waits at most
    /// [`STOP_GRACE`] for the timer thread. Does not print a newline.
    pub fn stop(&self) {
        drop(self.halt());
    }

    /// Halt the timer and erase its line, returning the timer slot still locked.
    ///
    /// Concurrent callers queue on the slot until the first halt completes.
    fn halt(&self) -> MutexGuard<'_, Option<Timer>> {
        let mut timer = lock(&self.timer);
        let was_running = self.shared.running.swap(false, Ordering::AcqRel);
        if let Some(timer) = timer.take() {
            timer.halt();
        }
        if self.shared.last_was_status.swap(false, Ordering::AcqRel) {
            self.shared.write(line::ERASE_LINE);
        }
        if was_running {
            debug!(
                style = self.shared.style.name(),
                frames = self.shared.frame.load(Ordering::Relaxed),
                "spinner stopped"
            );
        }
        timer
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run `f` with a spinner on stdout, stopping it however `f` exits.
///
/// Returning, erroring and panicking all clear the spinner line. Call
/// `succeed()` or `fail()` inside `f` to leave a final line instead.
pub fn with_spinner<T>(
    style: Arc<Style>,
    message: impl Into<String>,
    f: impl FnOnce(&Spinner) -> T,
) -> Result<T, SpinnerError> {
    let spinner = Spinner::start(style, message)?;
    Ok(f(&spinner))
}

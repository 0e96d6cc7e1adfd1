//! Terminal feedback: the animated spinner and the line protocol it speaks.

pub mod line;
mod spinner;

pub use spinner::{with_spinner, Spinner, SpinnerError, STOP_GRACE};

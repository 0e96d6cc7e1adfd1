//! twirl - animated console spinners driven by a JSON style table.
//!
//! Load a [`config::StyleTable`], pick a style, and start a
//! [`feedback::Spinner`]. The spinner repaints its line from a background
//! thread until it is stopped, succeeded, failed or dropped.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod feedback;
pub mod logging;

pub use config::{Style, StyleError, StyleTable};
pub use feedback::{with_spinner, Spinner, SpinnerError};

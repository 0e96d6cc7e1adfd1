//! List command implementation.
//!
//! This module implements the `twirl list` command, which prints the styles
//! in the active table in source order.

use std::io::{self, Write};

use crate::config::StyleTable;

/// Write the style table to `out`.
///
/// With `names_only`, prints one name per line. Otherwise prints an aligned
/// table of name, interval and frames.
pub fn list_styles(table: &StyleTable, names_only: bool, out: &mut impl Write) -> io::Result<()> {
    if names_only {
        for name in table.names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let width = table.names().map(|n| n.chars().count()).max().unwrap_or(0);
    for style in table.iter() {
        writeln!(
            out,
            "{:<width$}  {:>5}ms  {}",
            style.name(),
            style.interval_ms(),
            style.frames().join(" "),
        )?;
    }
    Ok(())
}

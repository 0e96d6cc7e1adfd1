//! Terminal line protocol for the spinner.
//!
//! Every write starts with a carriage return so it overdraws the current
//! line, and ends with an ANSI "clear to end of line" so a shorter line
//! leaves no tail of the previous one behind. Status lines have no trailing
//! newline; final lines do.

/// ANSI "erase from cursor to end of line".
pub const CLEAR_TO_EOL: &str = "\x1b[K";

/// Wipes the current line and returns the cursor to column zero.
pub const ERASE_LINE: &str = "\r\x1b[K";

/// Glyph shown by a successful final line.
pub const SUCCESS_SYMBOL: &str = "✔";

/// Glyph shown by a failed final line.
pub const FAILURE_SYMBOL: &str = "✖";

/// An in-progress line: `\r<frame> <message>\x1b[K`.
pub fn status_line(frame: &str, message: &str) -> String {
    format!("\r{frame} {message}{CLEAR_TO_EOL}")
}

/// A finished line: `\r<symbol> <message>\x1b[K\n`.
pub fn final_line(symbol: &str, message: &str) -> String {
    format!("\r{symbol} {message}{CLEAR_TO_EOL}\n")
}

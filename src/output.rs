//! User-facing output for the extractor CLI.
//!
//! Status lines go to one sink (stdout in the binary) and per-item failures
//! to another (stderr). Both are plain `dyn Write` handles so that tests can
//! capture them in memory. Writes are best-effort: a broken pipe never
//! aborts a run.

use std::fmt;
use std::io::Write;

/// Paired output sinks for status lines and failure lines.
///
/// # Examples
///
/// ```
/// use mcasset_extractor::output::Console;
///
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let mut console = Console::new(&mut out, &mut err);
/// console.status("Extracting assets from client archive");
/// console.failure("Failed to download sounds/click.ogg");
/// drop(console);
/// assert!(String::from_utf8_lossy(&out).contains("Extracting"));
/// assert!(String::from_utf8_lossy(&err).contains("click.ogg"));
/// ```
pub struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    /// Create a console writing status to `out` and failures to `err`.
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }

    /// Write a progress or status line.
    pub fn status(&mut self, message: impl fmt::Display) {
        write_line(self.out, message);
    }

    /// Write a failure line for an item that did not complete.
    pub fn failure(&mut self, message: impl fmt::Display) {
        write_line(self.err, message);
    }
}

/// Write a single line to `sink`, ignoring write failures.
pub fn write_line(sink: &mut dyn Write, message: impl fmt::Display) {
    if writeln!(sink, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

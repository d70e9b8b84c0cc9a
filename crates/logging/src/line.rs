//! crates/logging/src/line.rs
//! Rendering of a single log line.
//!
//! Lines have the shape
//! `<YYYY/MM/DD HH:MM:SS> <file>:<line>: [<SEVERITY>] <SCOPE> <message>\n`.
//! The severity tag is omitted for levels that map onto no severity, leaving
//! the bare scope label.

use std::fmt::{self, Write as _};
use std::panic::Location;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::levels::Level;

/// Timestamp layout written at the start of every line.
pub(crate) const STAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]/[month padding:zero]/[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

/// Appended to a message whose formatting failed part way through.
pub const FORMAT_ERROR_MARKER: &str = "%!(FORMAT ERROR)";

/// Source location a record is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Callsite {
    file: &'static str,
    line: u32,
}

impl Callsite {
    /// Captures the location of the outermost `#[track_caller]` frame.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    /// Builds a callsite from an explicit file and line.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Returns the file path as recorded by the compiler.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// Returns the line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the final path component of [`file`](Self::file).
    #[must_use]
    pub fn short_file(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

/// Renders the `[SEVERITY] SCOPE ` prefix for `level`.
///
/// # Examples
///
/// ```
/// use logging::{Level, prefix};
///
/// assert_eq!(prefix(Level::WARN, "HTTP"), "[WARN ] HTTP ");
/// assert_eq!(prefix(Level::debug(4), "HTTP"), "[DEBUG] HTTP ");
/// assert_eq!(prefix(Level::from_bits(0), "HTTP"), "HTTP ");
/// ```
#[must_use]
pub fn prefix(level: Level, scope: &str) -> String {
    match level.severity() {
        Some(severity) => format!("{} {scope} ", severity.tag()),
        None => format!("{scope} "),
    }
}

/// Formats `args`, degrading to a visibly malformed message instead of
/// panicking when a `Display` or `Debug` implementation reports an error.
pub(crate) fn format_message(args: fmt::Arguments<'_>) -> String {
    if let Some(literal) = args.as_str() {
        return literal.to_owned();
    }

    let mut message = String::new();
    if fmt::write(&mut message, args).is_err() {
        message.push_str(FORMAT_ERROR_MARKER);
    }
    message
}

/// Current wall-clock time, in the local offset when it can be determined.
///
/// Falls back to UTC where the local offset is unavailable, for example in
/// multi-threaded processes on platforms where reading it is unsound.
#[must_use]
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub(crate) fn render_line(
    stamp: OffsetDateTime,
    callsite: Callsite,
    level: Level,
    scope: &str,
    message: &str,
) -> Vec<u8> {
    let mut line = String::with_capacity(48 + scope.len() + message.len());

    match stamp.format(STAMP_FORMAT) {
        Ok(text) => line.push_str(&text),
        Err(_) => line.push_str("0000/00/00 00:00:00"),
    }
    let _ = write!(line, " {}:{}: ", callsite.short_file(), callsite.line());
    line.push_str(&prefix(level, scope));
    line.push_str(message);
    if !message.ends_with('\n') {
        line.push('\n');
    }

    line.into_bytes()
}

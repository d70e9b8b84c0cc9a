//! crates/logging/src/scoped/mod.rs
//! Per-scope leveled logger with per-severity destinations.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::diagnostics::Diagnostics;
use crate::levels::{Level, LevelMask, Severity};
use crate::writer::{self, Writer};

mod builder;
mod dispatch;

pub use builder::{BuildError, ScopedLoggerBuilder};

/// A named, level-gated logger.
///
/// Each of the five severities writes to its own [`Writer`] handle. Records
/// that pass the level gate are rendered as
/// `<stamp> <file>:<line>: [<SEVERITY>] <SCOPE> <message>` and written to
/// the handle of their severity. When `TRACE` is part of the mask the same
/// line is also mirrored to the trace handle, unless the record's handle is
/// the trace handle already.
///
/// Loggers are shared across threads. Formatting happens before the
/// logger's lock is taken; the primary write and the mirror write happen
/// together under it so lines from different severities never interleave.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logging::{Diagnostics, LevelMask, ScopedLogger, Writer};
///
/// let out: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
/// let sink: Arc<dyn Writer> = out.clone();
/// let logger = ScopedLogger::builder("HTTP")
///     .level("INFO|WARN|ERROR".parse()?)
///     .trace(sink.clone())
///     .debug(sink.clone())
///     .info(sink.clone())
///     .warn(sink.clone())
///     .error(sink)
///     .diagnostics(Diagnostics::Disabled)
///     .build()?;
///
/// logger.info("listening");
/// logger.debug(3, "suppressed");
///
/// let text = String::from_utf8(out.lock().unwrap().clone())?;
/// assert_eq!(text.lines().count(), 1);
/// assert!(text.ends_with("[INFO ] HTTP listening\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ScopedLogger {
    scope: String,
    level: AtomicU64,
    handles: Handles,
    diagnostics: Diagnostics,
    lock: Mutex<()>,
}

struct Handles {
    trace: Arc<dyn Writer>,
    debug: Arc<dyn Writer>,
    info: Arc<dyn Writer>,
    warn: Arc<dyn Writer>,
    error: Arc<dyn Writer>,
}

impl Handles {
    fn get(&self, severity: Severity) -> &Arc<dyn Writer> {
        match severity {
            Severity::Trace => &self.trace,
            Severity::Debug => &self.debug,
            Severity::Info => &self.info,
            Severity::Warn => &self.warn,
            Severity::Error => &self.error,
        }
    }
}

impl ScopedLogger {
    /// Starts configuring a logger for `scope`.
    #[must_use]
    pub fn builder(scope: impl Into<String>) -> ScopedLoggerBuilder {
        ScopedLoggerBuilder::new(scope)
    }

    /// Builds a logger that writes debug, info, warn, and error records to
    /// `destination` and mirrors everything to standard output.
    ///
    /// `TRACE` is added to `mask`, so the console mirror is active until
    /// [`set_level`](Self::set_level) removes it.
    #[must_use]
    pub fn console_mirrored(
        destination: Arc<dyn Writer>,
        mask: LevelMask,
        scope: impl Into<String>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self::from_parts(
            scope.into(),
            mask.with(Level::TRACE),
            Handles {
                trace: writer::stdout(),
                debug: Arc::clone(&destination),
                info: Arc::clone(&destination),
                warn: Arc::clone(&destination),
                error: destination,
            },
            diagnostics,
        )
    }

    /// [`console_mirrored`](Self::console_mirrored) reporting its own
    /// failures through the process-wide diagnostic logger.
    #[must_use]
    pub fn default_logger(
        destination: Arc<dyn Writer>,
        mask: LevelMask,
        scope: impl Into<String>,
    ) -> Self {
        Self::console_mirrored(destination, mask, scope, Diagnostics::Shared)
    }

    fn from_parts(
        scope: String,
        mask: LevelMask,
        handles: Handles,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            scope,
            level: AtomicU64::new(mask.bits()),
            handles,
            diagnostics,
            lock: Mutex::new(()),
        }
    }

    /// Returns the scope label written on every line.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the current level mask.
    #[must_use]
    pub fn level(&self) -> LevelMask {
        LevelMask::from_bits(self.level.load(Ordering::Relaxed))
    }

    /// Replaces the level mask. Calls already past the gate are unaffected.
    pub fn set_level(&self, mask: LevelMask) {
        self.level.store(mask.bits(), Ordering::Relaxed);
    }

    /// Reports whether a record at `level` would be written.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.level().test(level)
    }

    /// Returns the channel this logger reports its own write failures to.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Writes a trace record.
    #[track_caller]
    pub fn trace(&self, message: &str) {
        self.trace_fmt(format_args!("{message}"));
    }

    /// Writes a formatted trace record.
    #[track_caller]
    pub fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(Level::TRACE, crate::Callsite::caller(), args);
    }

    /// Writes a debug record at sub-level `n` (0 is the least verbose).
    #[track_caller]
    pub fn debug(&self, n: u8, message: &str) {
        self.debug_fmt(n, format_args!("{message}"));
    }

    /// Writes a formatted debug record at sub-level `n`.
    #[track_caller]
    pub fn debug_fmt(&self, n: u8, args: fmt::Arguments<'_>) {
        self.log(Level::debug(n), crate::Callsite::caller(), args);
    }

    /// Writes an info record.
    #[track_caller]
    pub fn info(&self, message: &str) {
        self.info_fmt(format_args!("{message}"));
    }

    /// Writes a formatted info record.
    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(Level::INFO, crate::Callsite::caller(), args);
    }

    /// Writes a warning record.
    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.warn_fmt(format_args!("{message}"));
    }

    /// Writes a formatted warning record.
    #[track_caller]
    pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(Level::WARN, crate::Callsite::caller(), args);
    }

    /// Writes an error record.
    #[track_caller]
    pub fn error(&self, message: &str) {
        self.error_fmt(format_args!("{message}"));
    }

    /// Writes a formatted error record.
    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(Level::ERROR, crate::Callsite::caller(), args);
    }
}

impl fmt::Debug for ScopedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLogger")
            .field("scope", &self.scope)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

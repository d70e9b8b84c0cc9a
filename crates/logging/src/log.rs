//! crates/logging/src/log.rs
//! Object-safe logging interface shared by loggers, macros, and the tracing
//! bridge.

use std::fmt;
use std::sync::Arc;

use crate::levels::Level;
use crate::line::Callsite;
use crate::scoped::ScopedLogger;

/// Something that accepts leveled records.
///
/// [`ScopedLogger`] is the main implementor. The `*_log!` macros and the
/// tracing bridge are written against this trait so tests and applications
/// can substitute their own recorder.
pub trait Log: Send + Sync {
    /// Reports whether a record at `level` would be kept.
    fn enabled(&self, level: Level) -> bool;

    /// Writes a record. Implementations re-check the level themselves.
    fn log(&self, level: Level, callsite: Callsite, args: fmt::Arguments<'_>);
}

impl Log for ScopedLogger {
    fn enabled(&self, level: Level) -> bool {
        Self::enabled(self, level)
    }

    fn log(&self, level: Level, callsite: Callsite, args: fmt::Arguments<'_>) {
        Self::log(self, level, callsite, args);
    }
}

impl<L: Log + ?Sized> Log for &L {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, callsite: Callsite, args: fmt::Arguments<'_>) {
        (**self).log(level, callsite, args);
    }
}

impl<L: Log + ?Sized> Log for Arc<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, callsite: Callsite, args: fmt::Arguments<'_>) {
        (**self).log(level, callsite, args);
    }
}

impl<L: Log + ?Sized> Log for Box<L> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn log(&self, level: Level, callsite: Callsite, args: fmt::Arguments<'_>) {
        (**self).log(level, callsite, args);
    }
}

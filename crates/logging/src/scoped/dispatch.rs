use std::fmt;
use std::io;
use std::sync::{Arc, PoisonError};

use super::ScopedLogger;
use crate::levels::Level;
use crate::line::{self, Callsite};
use crate::writer::same_writer;

impl ScopedLogger {
    /// Writes a record at an arbitrary `level`, attributed to `callsite`.
    ///
    /// This is the entry point every severity method funnels into. Closed
    /// levels return before `args` is formatted. A failed primary write is
    /// reported once through the logger's [`Diagnostics`](crate::Diagnostics)
    /// channel and the mirror write is skipped; a failed mirror write is
    /// ignored.
    pub fn log(&self, level: Level, callsite: Callsite, args: fmt::Arguments<'_>) {
        let mask = self.level();
        if !mask.test(level) {
            return;
        }
        let Some(severity) = level.severity() else {
            return;
        };

        let message = line::format_message(args);
        let rendered = line::render_line(line::now(), callsite, level, &self.scope, &message);
        let primary = self.handles.get(severity);

        let failure = {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            match primary.write(&rendered) {
                Ok(_) => {
                    if mask.contains(Level::TRACE) && !same_writer(primary, &self.handles.trace) {
                        let _ = self.handles.trace.write(&rendered);
                    }
                    None
                }
                Err(error) => Some(error),
            }
        };

        if let Some(error) = failure {
            self.report_failure(callsite, &error);
        }
    }

    fn report_failure(&self, callsite: Callsite, error: &io::Error) {
        let Some(reporter) = self.diagnostics.logger() else {
            return;
        };
        if std::ptr::eq(Arc::as_ptr(&reporter), self) {
            return;
        }
        reporter.log(
            Level::WARN,
            callsite,
            format_args!("Failed to log: {error}"),
        );
    }
}

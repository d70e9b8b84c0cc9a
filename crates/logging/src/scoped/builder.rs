use std::sync::Arc;

use super::{Handles, ScopedLogger};
use crate::diagnostics::Diagnostics;
use crate::levels::{Level, LevelMask, Severity};
use crate::writer::Writer;

/// Error returned by [`ScopedLoggerBuilder::build`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// No writer was bound for the named severity.
    #[error("no writer bound for {0} records")]
    MissingHandle(Severity),
}

/// Accumulates a [`ScopedLogger`]'s configuration.
///
/// All five severity handles must be bound before [`build`](Self::build)
/// succeeds. Binding the trace handle also enables `TRACE` in the level
/// mask, which turns on mirroring of every accepted record to that handle.
#[derive(Default)]
#[must_use]
pub struct ScopedLoggerBuilder {
    scope: String,
    level: LevelMask,
    trace: Option<Arc<dyn Writer>>,
    debug: Option<Arc<dyn Writer>>,
    info: Option<Arc<dyn Writer>>,
    warn: Option<Arc<dyn Writer>>,
    error: Option<Arc<dyn Writer>>,
    diagnostics: Diagnostics,
}

impl ScopedLoggerBuilder {
    pub(super) fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ..Self::default()
        }
    }

    /// Sets the level mask. `TRACE` is added back at build time when a trace
    /// handle is bound.
    pub fn level(mut self, mask: LevelMask) -> Self {
        self.level = mask;
        self
    }

    /// Binds the trace handle.
    pub fn trace(mut self, writer: Arc<dyn Writer>) -> Self {
        self.trace = Some(writer);
        self
    }

    /// Binds the debug handle.
    pub fn debug(mut self, writer: Arc<dyn Writer>) -> Self {
        self.debug = Some(writer);
        self
    }

    /// Binds the info handle.
    pub fn info(mut self, writer: Arc<dyn Writer>) -> Self {
        self.info = Some(writer);
        self
    }

    /// Binds the warn handle.
    pub fn warn(mut self, writer: Arc<dyn Writer>) -> Self {
        self.warn = Some(writer);
        self
    }

    /// Binds the error handle.
    pub fn error(mut self, writer: Arc<dyn Writer>) -> Self {
        self.error = Some(writer);
        self
    }

    /// Selects where write failures are reported. Defaults to
    /// [`Diagnostics::Shared`].
    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Validates the configuration and builds the logger.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingHandle`] naming the first severity,
    /// least significant first, that has no writer.
    pub fn build(self) -> Result<ScopedLogger, BuildError> {
        use BuildError::MissingHandle;

        let trace = self.trace.ok_or(MissingHandle(Severity::Trace))?;
        let debug = self.debug.ok_or(MissingHandle(Severity::Debug))?;
        let info = self.info.ok_or(MissingHandle(Severity::Info))?;
        let warn = self.warn.ok_or(MissingHandle(Severity::Warn))?;
        let error = self.error.ok_or(MissingHandle(Severity::Error))?;

        Ok(ScopedLogger::from_parts(
            self.scope,
            self.level.with(Level::TRACE),
            Handles {
                trace,
                debug,
                info,
                warn,
                error,
            },
            self.diagnostics,
        ))
    }
}

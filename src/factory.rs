//! src/factory.rs
//!
//! Builds one [`RotatingSink`] from configuration and hands out
//! [`ScopedLogger`]s that share it.

use std::sync::Arc;

use logging::{Diagnostics, LevelMask, LevelParseError, ScopedLogger, Writer};
use logging_sink::{RotatingSink, SinkConstraints, SinkError};
use thiserror::Error;

/// Level spec applied when the configuration does not name one.
pub const DEFAULT_LEVEL: &str = "INFO|WARN|ERROR";

/// Everything a [`LoggerFactory`] needs: the level spec shared by every
/// logger it creates and the constraints of the file they write to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FactoryConfig {
    /// `|`-delimited level names, e.g. `"DEBUG2|INFO|WARN|ERROR"`.
    pub level: String,
    /// Where and how the shared file rotates.
    pub sink: SinkConstraints,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_owned(),
            sink: SinkConstraints::default(),
        }
    }
}

impl FactoryConfig {
    /// Creates a configuration from a level spec and sink constraints.
    #[must_use]
    pub fn new(level: impl Into<String>, sink: SinkConstraints) -> Self {
        Self {
            level: level.into(),
            sink,
        }
    }
}

/// Failures while building a [`LoggerFactory`].
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The level spec named an unknown or malformed level.
    #[error("invalid log level: {0}")]
    Level(#[from] LevelParseError),

    /// The shared sink could not be created.
    #[error("failed to open log sink: {0}")]
    Sink(#[from] SinkError),
}

/// Hands out scoped loggers over one shared rotating file.
///
/// Every logger created by the factory writes non-trace records to the
/// shared sink, binds trace to standard output (so each record is also
/// mirrored there), and starts from the factory's level mask. Logging entry
/// points are `#[track_caller]`, so lines are attributed to the code that
/// called the logger, not to the factory.
///
/// # Examples
///
/// ```
/// use scoped_log::{FactoryConfig, LoggerFactory};
/// use scoped_log::sink::SinkConstraints;
///
/// let dir = tempfile::tempdir()?;
/// let config = FactoryConfig::new("INFO|ERROR", SinkConstraints::new(dir.path(), "app.log"));
/// let factory = LoggerFactory::new(&config)?;
///
/// let db = factory.new_logger("db");
/// assert_eq!(db.scope(), "DB");
/// db.info("connected");
/// assert!(factory.sink().size() > 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct LoggerFactory {
    sink: RotatingSink,
    destination: Arc<dyn Writer>,
    level: LevelMask,
    diagnostics: Diagnostics,
}

impl LoggerFactory {
    /// Parses the level spec and opens the shared sink, reporting through
    /// the process-wide diagnostic logger.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Level`] for a bad level spec and
    /// [`FactoryError::Sink`] when the sink cannot be created. The level is
    /// parsed first, so a bad spec never touches the filesystem.
    pub fn new(config: &FactoryConfig) -> Result<Self, FactoryError> {
        Self::with_diagnostics(config, Diagnostics::Shared)
    }

    /// Like [`new`](Self::new), with an explicit diagnostics channel for the
    /// sink and every logger.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_diagnostics(
        config: &FactoryConfig,
        diagnostics: Diagnostics,
    ) -> Result<Self, FactoryError> {
        let level: LevelMask = config.level.parse()?;
        let sink = RotatingSink::with_diagnostics(config.sink.clone(), diagnostics.clone())?;
        let destination: Arc<dyn Writer> = Arc::new(sink.clone());
        Ok(Self {
            sink,
            destination,
            level,
            diagnostics,
        })
    }

    /// Returns a logger labelled with the upper-cased `scope`.
    #[must_use]
    pub fn new_logger(&self, scope: &str) -> ScopedLogger {
        ScopedLogger::console_mirrored(
            Arc::clone(&self.destination),
            self.level,
            scope.to_uppercase(),
            self.diagnostics.clone(),
        )
    }

    /// The sink shared by every logger.
    #[must_use]
    pub const fn sink(&self) -> &RotatingSink {
        &self.sink
    }

    /// The level mask new loggers start from, before trace is added.
    #[must_use]
    pub const fn level(&self) -> LevelMask {
        self.level
    }
}

impl std::fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("sink", &self.sink)
            .field("level", &self.level)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

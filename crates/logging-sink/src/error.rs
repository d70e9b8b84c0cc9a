//! crates/logging-sink/src/error.rs
//! Errors raised while building or rotating a [`RotatingSink`](crate::RotatingSink).

use std::io;
use std::path::PathBuf;

/// Failure of a rotating sink operation.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The log directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    CreateDirectory {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The log directory could not be listed.
    #[error("failed to read log directory {path}: {source}")]
    ReadDirectory {
        /// Directory that was being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A new log file could not be created.
    #[error("failed to create log file {path}: {source}")]
    CreateFile {
        /// File that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file-name pattern is not a valid time format description.
    #[error("invalid log file name pattern '{pattern}': {source}")]
    InvalidFileNamePattern {
        /// Pattern as configured.
        pattern: String,
        /// Parser diagnostic.
        #[source]
        source: time::error::InvalidFormatDescription,
    },

    /// The file-name pattern could not be applied to the current time.
    #[error("failed to format log file name from '{pattern}': {source}")]
    FormatFileName {
        /// Pattern as configured.
        pattern: String,
        /// Formatter diagnostic.
        #[source]
        source: time::error::Format,
    },

    /// A daily schedule's time of day is not `HH:MM:SS`.
    #[error("invalid time of day '{value}': {source}")]
    InvalidTimeOfDay {
        /// Parameter as configured.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: time::error::Parse,
    },

    /// A duration schedule's interval could not be parsed.
    #[error("invalid rotation interval '{value}': {source}")]
    InvalidDuration {
        /// Parameter as configured.
        value: String,
        /// Parser diagnostic.
        #[source]
        source: humantime::DurationError,
    },

    /// The previous rotation failed, so there is no file to append to.
    #[error("no log file is open")]
    NoActiveFile,

    /// A thread panicked while holding the sink's lock.
    #[error("rotating sink lock poisoned")]
    Poisoned,
}

impl From<SinkError> for io::Error {
    fn from(error: SinkError) -> Self {
        Self::other(error)
    }
}

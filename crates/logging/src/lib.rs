#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides scoped, leveled loggers whose severities can be routed
//! to separate destinations. Every logger carries a scope label that is
//! written on each line, a [`LevelMask`] deciding which records are kept,
//! and one [`Writer`] per severity.
//!
//! # Design
//!
//! - [`LevelMask`] is a bit-set over `TRACE`, thirty-two debug sub-levels,
//!   `INFO`, `WARN`, and `ERROR`. Plain severities are tested by
//!   intersection; debug sub-levels are tested against a ceiling so that a
//!   mask opening `DEBUG3` also admits `DEBUG4` and above.
//! - [`ScopedLogger`] formats outside its lock and writes under it. When
//!   `TRACE` is enabled every accepted record is also mirrored to the trace
//!   handle, carrying the record's own severity tag.
//! - Failures of a logger's own writes are reported through an injected
//!   [`Diagnostics`] channel, by default the console logger returned by
//!   [`diagnostics::shared`].
//! - The [`Log`] trait and the `*_log!` macros let call sites skip argument
//!   formatting entirely when a level is closed.
//!
//! # Invariants
//!
//! - A closed level performs no formatting and no write.
//! - A record whose primary handle is also the trace handle is written once.
//! - Records are attributed to the caller's file and line through
//!   `#[track_caller]`, independent of how many logging frames sit between.
//!
//! # Errors
//!
//! Logging calls never return errors. Level specs report
//! [`LevelParseError`]; builders report [`BuildError`] when a severity has no
//! handle.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use logging::{Diagnostics, LevelMask, ScopedLogger, Writer, info_log};
//!
//! let buffer: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
//! let destination: Arc<dyn Writer> = buffer.clone();
//! let logger = ScopedLogger::console_mirrored(
//!     destination,
//!     "INFO|WARN|ERROR".parse::<LevelMask>()?,
//!     "API",
//!     Diagnostics::Disabled,
//! );
//! logger.set_level("INFO|WARN|ERROR".parse()?);
//!
//! info_log!(logger, "served {} requests", 3);
//!
//! let text = String::from_utf8(buffer.lock().unwrap().clone())?;
//! assert!(text.ends_with("[INFO ] API served 3 requests\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # See also
//!
//! - `logging-sink` for a size- and schedule-rotating file [`Writer`].

pub mod diagnostics;
mod levels;
mod line;
mod log;
mod macros;
mod scoped;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod writer;

pub use diagnostics::Diagnostics;
pub use levels::{
    DEBUG_SUB_LEVELS, LEVEL_SEPARATOR, Level, LevelMask, LevelParseError, Severity,
};
pub use line::{Callsite, FORMAT_ERROR_MARKER, now, prefix};
pub use log::Log;
pub use scoped::{BuildError, ScopedLogger, ScopedLoggerBuilder};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ScopedLayer, install_tracing, install_tracing_with_filter};
pub use writer::{Stderr, Stdout, Writer, same_writer, stderr, stdout};

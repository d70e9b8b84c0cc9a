#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scoped-log` ties the workspace together: a [`LoggerFactory`] opens one
//! size- and schedule-rotated log file and hands out scoped, leveled
//! loggers that share it. The building blocks are re-exported as
//! [`logging`](crate::logging) (level masks, loggers, writers, macros) and
//! [`sink`] (the rotating file).
//!
//! # Design
//!
//! - The factory parses the level spec once and builds one
//!   [`RotatingSink`](sink::RotatingSink); every logger it creates shares
//!   both.
//! - Loggers bind trace to standard output, so each record written to the
//!   file is also mirrored to the console.
//! - Internal failures (rotation errors, failed writes) are reported through
//!   the process-wide diagnostic logger, [`logging::diagnostics::shared`],
//!   unless another [`Diagnostics`](logging::Diagnostics) channel is given.
//!
//! # Examples
//!
//! ```
//! use scoped_log::{FactoryConfig, LoggerFactory, info_log, warn_log};
//! use scoped_log::sink::{Schedule, SinkConstraints};
//!
//! let dir = tempfile::tempdir()?;
//! let sink = SinkConstraints::new(dir.path(), "[year][month][day].log")
//!     .with_max_size(64 * 1024 * 1024)
//!     .with_history(14)
//!     .with_schedule(Schedule::daily("00:00:00"));
//! let factory = LoggerFactory::new(&FactoryConfig::new("DEBUG3|INFO|WARN|ERROR", sink))?;
//!
//! let http = factory.new_logger("http");
//! info_log!(http, "listening on {}", "127.0.0.1:8080");
//! warn_log!(http, "slow handler: {}ms", 250);
//! http.debug(4, "kept");
//! http.debug(1, "below the debug threshold, dropped");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod factory;

pub use factory::{DEFAULT_LEVEL, FactoryConfig, FactoryError, LoggerFactory};

pub use logging;
pub use logging::{Level, LevelMask, Log, ScopedLogger, Severity};
pub use logging::{debug_log, error_log, info_log, trace_log, warn_log};

/// The rotating file sink.
pub use logging_sink as sink;

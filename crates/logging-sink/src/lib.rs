#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides [`RotatingSink`], a log file destination that
//! implements the [`logging::Writer`] contract and replaces its file when it
//! grows past a size limit or when a daily or fixed-interval schedule fires.
//! Only a bounded number of files is kept in the log directory.
//!
//! # Design
//!
//! - [`SinkConstraints`] names the directory, the file-name pattern (a
//!   `time` format description evaluated at each rotation), and the
//!   [`RotationPolicy`].
//! - All mutable state (the open file, its size, the file history, and the
//!   pending timer) lives behind one mutex shared by writers and the timer
//!   thread.
//! - Scheduled rotations run on a background thread that holds only a weak
//!   reference to the sink, so dropping every handle stops the timer.
//! - The sink reports its own activity and failures through an injected
//!   [`logging::Diagnostics`] channel rather than through itself.
//!
//! # Invariants
//!
//! - [`RotatingSink::size`] counts only bytes written to the current file.
//! - With a positive `history`, at most `history` files remain after a
//!   rotation: the oldest are deleted before the new file is created.
//! - At most one timer is armed at a time.
//!
//! # Errors
//!
//! Construction returns [`SinkError`] when the pattern is invalid or the
//! directory, its listing, or the first file cannot be produced. Writes
//! return [`std::io::Error`]; sink-level failures are wrapped
//! [`SinkError`] values.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use logging::{LevelMask, ScopedLogger, Writer};
//! use logging_sink::{RotatingSink, Schedule, SinkConstraints};
//!
//! let dir = tempfile::tempdir()?;
//! let constraints = SinkConstraints::new(dir.path(), "[year][month][day].log")
//!     .with_max_size(10 * 1024 * 1024)
//!     .with_history(7)
//!     .with_schedule(Schedule::daily("00:00:00"));
//! let sink: Arc<dyn Writer> = Arc::new(RotatingSink::new(constraints)?);
//!
//! let logger = ScopedLogger::default_logger(sink, LevelMask::ALL, "APP");
//! logger.set_level("INFO|WARN|ERROR".parse()?);
//! logger.info("started");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod constraints;
mod error;
mod history;
mod rotating;
mod schedule;

pub use constraints::{
    DEFAULT_FILE_NAME, RotationPolicy, SCHEDULE_DAILY, SCHEDULE_DURATION, Schedule, ScheduleKind,
    SinkConstraints,
};
pub use error::SinkError;
pub use rotating::RotatingSink;
pub use schedule::next_delay;

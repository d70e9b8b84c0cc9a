//! crates/logging-sink/src/rotating/mod.rs
//! A file [`Writer`] that rotates by size and on a schedule.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use logging::{Diagnostics, Writer};
use time::format_description::OwnedFormatItem;

use crate::constraints::SinkConstraints;
use crate::error::SinkError;
use crate::history::History;
use crate::schedule::next_delay;

mod timer;

use timer::Ticker;

/// An append-only log file that is replaced by a fresh one when it grows
/// too large or when its schedule fires.
///
/// # Rotation
///
/// A rotation closes the current file, deletes the oldest files until fewer
/// than `history` remain, creates a new file named by formatting the
/// file-name pattern against the local time, and re-arms the schedule
/// timer. Rotations are triggered by
///
/// - a write that would bring the current file to `max_size` bytes or more
///   (the write then lands in the new file, so a single oversized record can
///   still exceed the limit),
/// - the schedule timer, which contends for the same lock as writers and
///   may therefore fire late,
/// - [`rotate_now`](Self::rotate_now).
///
/// If a rotation cannot create its file the sink has no open file and every
/// write fails with [`SinkError::NoActiveFile`] until a later
/// [`rotate_now`](Self::rotate_now) or scheduled rotation succeeds.
///
/// Clones share the same file and state, and report the same
/// [`Writer::destination`], so a logger that binds two clones to different
/// severities still writes each record to the file once.
///
/// # Diagnostics
///
/// New files, armed timers, and failures are reported through the sink's
/// [`Diagnostics`] channel while the sink's lock is held. That channel must
/// not write into this sink, or the report deadlocks.
///
/// # Examples
///
/// ```
/// use logging::Writer;
/// use logging_sink::{RotatingSink, SinkConstraints};
///
/// let dir = tempfile::tempdir()?;
/// let constraints = SinkConstraints::new(dir.path(), "app.log").with_max_size(1 << 20);
/// let sink = RotatingSink::with_diagnostics(constraints, logging::Diagnostics::Disabled)?;
///
/// sink.write(b"hello\n")?;
/// assert_eq!(sink.size(), 6);
/// assert_eq!(sink.history(), vec!["app.log".to_owned()]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct RotatingSink {
    shared: Arc<Shared>,
}

struct Shared {
    constraints: SinkConstraints,
    file_name: OwnedFormatItem,
    diagnostics: Diagnostics,
    state: Mutex<SinkState>,
}

struct SinkState {
    file: Option<File>,
    current: Option<PathBuf>,
    size: u64,
    history: History,
    ticker: Option<Ticker>,
}

impl RotatingSink {
    /// Creates the sink and opens its first file, reporting through the
    /// process-wide diagnostic logger.
    ///
    /// # Errors
    ///
    /// Fails when the file-name pattern is invalid, the directory cannot be
    /// created or listed, or the first file cannot be created.
    pub fn new(constraints: SinkConstraints) -> Result<Self, SinkError> {
        Self::with_diagnostics(constraints, Diagnostics::Shared)
    }

    /// Creates the sink with an explicit diagnostics channel.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_diagnostics(
        constraints: SinkConstraints,
        diagnostics: Diagnostics,
    ) -> Result<Self, SinkError> {
        let file_name = time::format_description::parse_owned::<2>(&constraints.file_name)
            .map_err(|source| SinkError::InvalidFileNamePattern {
                pattern: constraints.file_name.clone(),
                source,
            })?;

        fs::create_dir_all(&constraints.directory).map_err(|source| {
            SinkError::CreateDirectory {
                path: constraints.directory.clone(),
                source,
            }
        })?;

        let (history, skipped) = History::scan(&constraints.directory)?;
        if let Some(logger) = diagnostics.logger() {
            for entry in &skipped {
                logger.warn_fmt(format_args!("Failed to get file info: {entry}"));
            }
        }

        let shared = Arc::new(Shared {
            constraints,
            file_name,
            diagnostics,
            state: Mutex::new(SinkState {
                file: None,
                current: None,
                size: 0,
                history,
                ticker: None,
            }),
        });

        {
            let mut state = shared.lock()?;
            shared.rotate(&mut state)?;
        }

        Ok(Self { shared })
    }

    /// Returns the constraints the sink was built from.
    #[must_use]
    pub fn constraints(&self) -> &SinkConstraints {
        &self.shared.constraints
    }

    /// Forces a rotation.
    ///
    /// # Errors
    ///
    /// Returns the rotation failure, which has also been reported through
    /// the diagnostics channel.
    pub fn rotate_now(&self) -> Result<(), SinkError> {
        let mut state = self.shared.lock()?;
        self.shared.rotate(&mut state).inspect_err(|error| {
            self.shared
                .report_error(format_args!("Failed to rotate log: {error}"));
        })
    }

    /// Path of the file currently written to, if any.
    #[must_use]
    pub fn current_file(&self) -> Option<PathBuf> {
        self.shared
            .lock()
            .ok()
            .and_then(|state| state.current.clone())
    }

    /// Names of the files in the log directory, oldest first, the current
    /// file last.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.shared
            .lock()
            .map(|state| state.history.names())
            .unwrap_or_default()
    }

    /// Bytes written to the current file since it was opened.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.shared.lock().map(|state| state.size).unwrap_or_default()
    }

    /// Reports whether a scheduled rotation is pending.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.shared
            .lock()
            .is_ok_and(|state| state.ticker.is_some())
    }
}

impl Writer for RotatingSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.shared.lock()?;

        if state.file.is_none() {
            return Err(SinkError::NoActiveFile.into());
        }

        let max_size = self.shared.constraints.rotation.max_size;
        if max_size > 0 && state.size + buf.len() as u64 >= max_size {
            if let Err(error) = self.shared.rotate(&mut state) {
                self.shared
                    .report_error(format_args!("Failed to rotate log: {error}"));
                return Err(error.into());
            }
        }

        let Some(file) = state.file.as_mut() else {
            return Err(SinkError::NoActiveFile.into());
        };
        let (written, result) = write_counted(file, buf);
        state.size += written as u64;
        result.map(|()| written)
    }

    fn destination(&self) -> *const () {
        Arc::as_ptr(&self.shared).cast()
    }
}

/// Writes all of `buf`, returning how many bytes reached `out` alongside the
/// outcome. A failure part way through still reports the bytes written
/// before it.
fn write_counted<W: io::Write>(out: &mut W, buf: &[u8]) -> (usize, io::Result<()>) {
    let mut written = 0;
    while written < buf.len() {
        match out.write(&buf[written..]) {
            Ok(0) => return (written, Err(io::ErrorKind::WriteZero.into())),
            Ok(n) => written += n,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return (written, Err(error)),
        }
    }
    (written, Ok(()))
}

impl std::fmt::Debug for RotatingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingSink")
            .field("directory", &self.shared.constraints.directory)
            .field("file_name", &self.shared.constraints.file_name)
            .field("rotation", &self.shared.constraints.rotation)
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, SinkState>, SinkError> {
        self.state.lock().map_err(|_| SinkError::Poisoned)
    }

    fn directory(&self) -> &Path {
        &self.constraints.directory
    }

    /// Replaces the current file. The caller holds the state lock.
    fn rotate(self: &Arc<Self>, state: &mut SinkState) -> Result<(), SinkError> {
        state.file = None;
        state.current = None;
        state.size = 0;

        for name in state.history.evict(self.constraints.rotation.history) {
            let path = self.directory().join(&name);
            if let Err(error) = fs::remove_file(&path) {
                if error.kind() != io::ErrorKind::NotFound {
                    self.report_error(format_args!(
                        "Failed to remove log: {}: {error}",
                        path.display()
                    ));
                }
            }
        }

        let now = logging::now();
        let name = now
            .format(&self.file_name)
            .map_err(|source| SinkError::FormatFileName {
                pattern: self.constraints.file_name.clone(),
                source,
            })?;
        let path = self.directory().join(&name);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| SinkError::CreateFile {
                path: path.clone(),
                source,
            });
        let file = match file {
            Ok(file) => file,
            Err(error) => {
                self.report_error(format_args!("Failed to create log: {error}"));
                return Err(error);
            }
        };

        state.history.record(name);
        state.file = Some(file);
        self.report_debug(format_args!("New log: file={}", path.display()));
        state.current = Some(path);

        state.ticker = None;
        let delay = next_delay(&self.constraints.rotation.schedule, now).inspect_err(|error| {
            self.report_error(format_args!("Failed to parse schedule: {error}"));
        })?;
        if let Some(delay) = delay {
            self.arm(state, delay);
        }
        Ok(())
    }

    fn arm(self: &Arc<Self>, state: &mut SinkState, delay: Duration) {
        self.report_debug(format_args!(
            "About to rotate logger: delay={}",
            humantime::format_duration(delay)
        ));

        let weak = Arc::downgrade(self);
        match Ticker::arm(delay, move |id| fire(&weak, id)) {
            Ok(ticker) => state.ticker = Some(ticker),
            Err(error) => {
                self.report_error(format_args!("Failed to start rotation timer: {error}"));
            }
        }
    }

    fn report_error(&self, args: std::fmt::Arguments<'_>) {
        if let Some(logger) = self.diagnostics.logger() {
            logger.error_fmt(args);
        }
    }

    fn report_debug(&self, args: std::fmt::Arguments<'_>) {
        if let Some(logger) = self.diagnostics.logger() {
            logger.debug_fmt(0, args);
        }
    }
}

/// Runs a scheduled rotation if the sink still exists and `id` is still the
/// armed ticker.
fn fire(shared: &Weak<Shared>, id: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let Ok(mut state) = shared.lock() else {
        return;
    };
    if state.ticker.as_ref().map(Ticker::id) != Some(id) {
        return;
    }
    if let Err(error) = shared.rotate(&mut state) {
        shared.report_error(format_args!("Failed to rotate log: {error}"));
    }
}

#[cfg(test)]
mod tests;

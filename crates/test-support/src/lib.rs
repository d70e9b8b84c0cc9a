#![deny(unsafe_code)]

//! crates/test-support/src/lib.rs
//! Writers and scratch directories shared by the workspace's integration
//! tests.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use logging::Writer;
use tempfile::TempDir;

/// Records every byte written to it.
#[derive(Debug, Default)]
pub struct CaptureWriter {
    buffer: Mutex<Vec<u8>>,
}

impl CaptureWriter {
    /// Creates an empty capture behind an [`Arc`].
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns everything written so far as UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        let buffer = self
            .buffer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Returns the captured lines without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }
}

impl Writer for CaptureWriter {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("capture poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// Fails every write and counts the attempts.
#[derive(Debug, Default)]
pub struct FailingWriter {
    attempts: AtomicUsize,
}

impl FailingWriter {
    /// Creates a failing writer behind an [`Arc`].
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of writes attempted so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Writer for FailingWriter {
    fn write(&self, _buf: &[u8]) -> io::Result<usize> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("write rejected by FailingWriter"))
    }
}

/// Creates a fresh temporary directory.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("create temporary directory")
}

/// Lists the regular files in `dir`, sorted by name.
///
/// # Panics
///
/// Panics if the directory cannot be read.
#[must_use]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read directory")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Returns the size of `path` in bytes.
///
/// # Panics
///
/// Panics if the file cannot be inspected.
#[must_use]
pub fn file_len(path: &Path) -> u64 {
    fs::metadata(path).expect("stat file").len()
}

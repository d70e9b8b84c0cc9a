//! crates/logging-sink/src/history.rs
//! Bookkeeping of the log files a sink has produced or inherited.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::error::SinkError;

/// Names of the files in the log directory, oldest first.
///
/// Names are ordered lexically, which for time-encoding file-name patterns
/// is also chronological.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct History {
    names: VecDeque<String>,
}

impl History {
    /// Lists the regular files already in `directory`.
    ///
    /// Entries whose type cannot be determined are skipped and returned
    /// separately so the caller can report them.
    pub(crate) fn scan(directory: &Path) -> Result<(Self, Vec<String>), SinkError> {
        let read_error = |source| SinkError::ReadDirectory {
            path: directory.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        let mut skipped = Vec::new();
        for entry in fs::read_dir(directory).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            match entry.file_type() {
                Ok(kind) if kind.is_dir() => {}
                Ok(_) => names.push(name),
                Err(error) => skipped.push(format!("{name}: {error}")),
            }
        }
        names.sort();

        Ok((
            Self {
                names: names.into(),
            },
            skipped,
        ))
    }

    /// Removes and returns the oldest names until fewer than `limit` remain.
    ///
    /// A `limit` of zero keeps everything.
    pub(crate) fn evict(&mut self, limit: usize) -> Vec<String> {
        let mut evicted = Vec::new();
        if limit == 0 {
            return evicted;
        }
        while self.names.len() >= limit {
            match self.names.pop_front() {
                Some(name) => evicted.push(name),
                None => break,
            }
        }
        evicted
    }

    /// Appends `name` as the newest entry, moving it to the end if it is
    /// already listed.
    pub(crate) fn record(&mut self, name: String) {
        self.names.retain(|existing| *existing != name);
        self.names.push_back(name);
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

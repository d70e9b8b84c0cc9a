//! crates/logging/src/writer.rs
//! The append-only byte sink contract consumed by [`ScopedLogger`](crate::ScopedLogger).

use std::io::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

/// An append-only destination for rendered log lines.
///
/// Unlike [`std::io::Write`], writes go through a shared reference: every
/// implementor is internally synchronised so one handle can be shared by many
/// loggers and threads. A call returns the number of bytes accepted or the
/// underlying error unmodified; callers decide whether to retry.
pub trait Writer: Send + Sync {
    /// Appends `buf` and returns how many bytes were written.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    /// Identifies the destination behind this handle.
    ///
    /// Two handles with the same identity write to the same place, and a
    /// logger never mirrors a record onto the destination it was just written
    /// to. The default is the handle's own address. Handles that share their
    /// destination with other values (clones of one file, the process's
    /// standard streams) return the address of that shared state instead.
    fn destination(&self) -> *const () {
        std::ptr::from_ref(self).cast()
    }
}

impl<W> Writer for Mutex<W>
where
    W: io::Write + Send,
{
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut writer = self
            .lock()
            .map_err(|_| io::Error::other("writer mutex poisoned"))?;
        io::Write::write(&mut *writer, buf)
    }
}

static STDOUT_STREAM: u8 = 1;
static STDERR_STREAM: u8 = 2;

/// Writes to the process's standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stdout;

impl Writer for Stdout {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut out = io::stdout().lock();
        out.write_all(buf)?;
        out.flush()?;
        Ok(buf.len())
    }

    fn destination(&self) -> *const () {
        std::ptr::from_ref(&STDOUT_STREAM).cast()
    }
}

/// Writes to the process's standard error.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stderr;

impl Writer for Stderr {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write_all(buf)?;
        Ok(buf.len())
    }

    fn destination(&self) -> *const () {
        std::ptr::from_ref(&STDERR_STREAM).cast()
    }
}

/// Returns the shared standard-output handle.
///
/// Every call hands out the same allocation, so loggers that bind standard
/// output to more than one severity recognise it as a single destination and
/// do not mirror records onto it twice.
pub fn stdout() -> Arc<dyn Writer> {
    static STDOUT: OnceLock<Arc<dyn Writer>> = OnceLock::new();
    Arc::clone(STDOUT.get_or_init(|| Arc::new(Stdout)))
}

/// Returns the shared standard-error handle.
pub fn stderr() -> Arc<dyn Writer> {
    static STDERR: OnceLock<Arc<dyn Writer>> = OnceLock::new();
    Arc::clone(STDERR.get_or_init(|| Arc::new(Stderr)))
}

/// Reports whether two handles refer to the same destination.
///
/// Compares [`Writer::destination`], so separate allocations that wrap one
/// shared destination are recognised as the same writer.
#[must_use]
pub fn same_writer(a: &Arc<dyn Writer>, b: &Arc<dyn Writer>) -> bool {
    std::ptr::eq(a.destination(), b.destination())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutex_writer_appends() {
        let writer = Mutex::new(Vec::new());
        assert_eq!(Writer::write(&writer, b"abc").unwrap(), 3);
        assert_eq!(Writer::write(&writer, b"de").unwrap(), 2);
        assert_eq!(writer.into_inner().unwrap(), b"abcde".to_vec());
    }

    #[test]
    fn stdout_handle_is_shared() {
        assert!(same_writer(&stdout(), &stdout()));
        assert!(!same_writer(&stdout(), &stderr()));
    }

    #[test]
    fn distinct_allocations_are_distinct_writers() {
        let a: Arc<dyn Writer> = Arc::new(Mutex::new(Vec::<u8>::new()));
        let b: Arc<dyn Writer> = Arc::new(Mutex::new(Vec::<u8>::new()));
        assert!(same_writer(&a, &a.clone()));
        assert!(!same_writer(&a, &b));
    }

    #[test]
    fn separate_console_handles_share_their_stream() {
        let a: Arc<dyn Writer> = Arc::new(Stdout);
        let b: Arc<dyn Writer> = Arc::new(Stdout);
        let c: Arc<dyn Writer> = Arc::new(Stderr);
        assert!(same_writer(&a, &b));
        assert!(same_writer(&a, &stdout()));
        assert!(!same_writer(&a, &c));
    }
}

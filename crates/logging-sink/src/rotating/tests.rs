use super::*;
use crate::constraints::Schedule;

const UNIQUE: &str = "[year][month][day]-[hour][minute][second]-[subsecond digits:9].log";

fn quiet(constraints: SinkConstraints) -> RotatingSink {
    RotatingSink::with_diagnostics(constraints, Diagnostics::Disabled).expect("sink builds")
}

fn armed_id(sink: &RotatingSink) -> Option<u64> {
    sink.shared
        .lock()
        .unwrap()
        .ticker
        .as_ref()
        .map(Ticker::id)
}

#[test]
fn first_rotation_happens_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let sink = quiet(SinkConstraints::new(dir.path().join("logs"), UNIQUE));

    let current = sink.current_file().expect("file open");
    assert!(current.exists());
    assert_eq!(sink.history().len(), 1);
    assert_eq!(sink.size(), 0);
    assert!(!sink.is_scheduled());
}

#[test]
fn stale_ticker_does_not_rotate() {
    let dir = tempfile::tempdir().unwrap();
    let sink = quiet(
        SinkConstraints::new(dir.path(), UNIQUE).with_schedule(Schedule::every("1h")),
    );
    let armed = armed_id(&sink).expect("timer armed");

    fire(&Arc::downgrade(&sink.shared), armed.wrapping_add(1000));

    assert_eq!(sink.history().len(), 1);
    assert_eq!(armed_id(&sink), Some(armed));
}

#[test]
fn current_ticker_rotates_and_rearms() {
    let dir = tempfile::tempdir().unwrap();
    let sink = quiet(
        SinkConstraints::new(dir.path(), UNIQUE).with_schedule(Schedule::every("1h")),
    );
    let armed = armed_id(&sink).expect("timer armed");

    fire(&Arc::downgrade(&sink.shared), armed);

    assert_eq!(sink.history().len(), 2);
    let rearmed = armed_id(&sink).expect("timer re-armed");
    assert_ne!(rearmed, armed);
}

#[test]
fn fire_after_drop_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let sink = quiet(SinkConstraints::new(dir.path(), UNIQUE));
    let weak = Arc::downgrade(&sink.shared);
    drop(sink);

    fire(&weak, 1);
    assert!(weak.upgrade().is_none());
}

#[test]
fn size_rotation_rearms_the_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let sink = quiet(
        SinkConstraints::new(dir.path(), UNIQUE)
            .with_max_size(10)
            .with_schedule(Schedule::every("1h")),
    );
    let before = armed_id(&sink).expect("timer armed");

    sink.write(b"0123456789").unwrap();

    let after = armed_id(&sink).expect("timer re-armed");
    assert_ne!(before, after);
}

#[test]
fn clones_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let sink = quiet(SinkConstraints::new(dir.path(), UNIQUE));
    let clone = sink.clone();

    sink.write(b"abc").unwrap();
    clone.write(b"def").unwrap();

    assert_eq!(sink.size(), 6);
    assert_eq!(sink.current_file(), clone.current_file());
    let contents = fs::read(sink.current_file().unwrap()).unwrap();
    assert_eq!(contents, b"abcdef");
}

/// Accepts `capacity` bytes, optionally in short chunks, then fails.
struct Capped {
    data: Vec<u8>,
    capacity: usize,
    chunk: usize,
    interrupt_once: bool,
}

impl Capped {
    fn new(capacity: usize, chunk: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
            chunk,
            interrupt_once: false,
        }
    }
}

impl io::Write for Capped {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.interrupt_once {
            self.interrupt_once = false;
            return Err(io::ErrorKind::Interrupted.into());
        }
        let room = self.capacity - self.data.len();
        if room == 0 {
            return Err(io::Error::other("file too large"));
        }
        let n = buf.len().min(room).min(self.chunk);
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn partial_write_reports_bytes_before_failure() {
    let mut out = Capped::new(1024, 300);

    let (written, result) = write_counted(&mut out, &[b'x'; 1500]);

    assert_eq!(written, 1024);
    assert_eq!(written, out.data.len());
    assert_eq!(result.unwrap_err().to_string(), "file too large");
}

#[test]
fn short_writes_and_interrupts_are_retried() {
    let mut out = Capped::new(usize::MAX, 7);
    out.interrupt_once = true;

    let (written, result) = write_counted(&mut out, b"a fairly long record\n");

    result.unwrap();
    assert_eq!(written, 21);
    assert_eq!(out.data, b"a fairly long record\n");
}

#[test]
fn zero_length_write_is_an_error() {
    let mut out = Capped::new(usize::MAX, 0);

    let (written, result) = write_counted(&mut out, b"abc");

    assert_eq!(written, 0);
    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::WriteZero);
}

#[test]
fn clones_share_one_destination() {
    let dir = tempfile::tempdir().unwrap();
    let sink = quiet(SinkConstraints::new(dir.path(), UNIQUE));
    let first: Arc<dyn Writer> = Arc::new(sink.clone());
    let second: Arc<dyn Writer> = Arc::new(sink.clone());
    let other: Arc<dyn Writer> = Arc::new(quiet(SinkConstraints::new(
        dir.path().join("other"),
        UNIQUE,
    )));

    assert!(logging::same_writer(&first, &second));
    assert!(!logging::same_writer(&first, &other));
}

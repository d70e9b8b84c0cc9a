//! One-shot, cancellable rotation alarm.
//!
//! Each armed [`Ticker`] owns a background thread that sleeps on a
//! crossbeam channel with a timeout. Dropping the ticker drops the channel's
//! sender, which wakes the thread with a disconnect and ends it without
//! firing.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub(super) struct Ticker {
    id: u64,
    _cancel: Sender<()>,
}

impl Ticker {
    /// Starts a thread that calls `on_fire` with the ticker's id once
    /// `delay` has elapsed, unless the ticker is dropped first.
    pub(super) fn arm<F>(delay: Duration, on_fire: F) -> io::Result<Self>
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let (cancel, cancelled) = crossbeam_channel::bounded::<()>(0);

        thread::Builder::new()
            .name("log-rotation".to_owned())
            .spawn(move || {
                if matches!(cancelled.recv_timeout(delay), Err(RecvTimeoutError::Timeout)) {
                    on_fire(id);
                }
            })?;

        Ok(Self {
            id,
            _cancel: cancel,
        })
    }

    pub(super) const fn id(&self) -> u64 {
        self.id
    }
}

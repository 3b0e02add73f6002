//! Coalescing wake-up primitive between producers and the render context.
//!
//! Producers call [`Notifier::notify`] after enqueueing. Any number of
//! notifications issued before the render context wakes collapse into one
//! pending flag. The render context always drains the queue until empty after
//! waking, so coalescing loses wake-ups, never events.

use parking_lot::{Condvar, Mutex};
use std::time::Duration;

/// Why a wait returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// At least one notification was pending.
    Notified,
    /// The notifier was closed and nothing was pending.
    Closed,
    /// A bounded wait elapsed with nothing pending.
    TimedOut,
}

#[derive(Debug, Default)]
struct State {
    pending: bool,
    closed: bool,
}

/// Single-consumer wake-up flag.
#[derive(Debug, Default)]
pub struct Notifier {
    state: Mutex<State>,
    signal: Condvar,
}

impl Notifier {
    /// Creates a notifier with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces that new work is queued. Never blocks for longer than the
    /// internal lock is held.
    pub fn notify(&self) {
        let mut state = self.state.lock();
        state.pending = true;
        drop(state);
        self.signal.notify_one();
    }

    /// Stops the render loop once the pending work is drained.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        drop(state);
        self.signal.notify_all();
    }

    /// Whether [`Notifier::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Blocks until a notification is pending or the notifier is closed.
    ///
    /// Consumes the pending flag.
    pub fn wait(&self) -> Wake {
        let mut state = self.state.lock();
        while !state.pending && !state.closed {
            self.signal.wait(&mut state);
        }
        Self::consume(&mut state)
    }

    /// Like [`Notifier::wait`] but gives up after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Wake {
        let mut state = self.state.lock();
        if !state.pending && !state.closed {
            let _ = self.signal.wait_while_for(&mut state, |s| !s.pending && !s.closed, timeout);
        }
        if !state.pending && !state.closed {
            return Wake::TimedOut;
        }
        Self::consume(&mut state)
    }

    fn consume(state: &mut State) -> Wake {
        if state.pending {
            state.pending = false;
            Wake::Notified
        } else {
            Wake::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn notifications_coalesce() {
        let notifier = Notifier::new();
        notifier.notify();
        notifier.notify();
        notifier.notify();

        assert_eq!(notifier.wait(), Wake::Notified);
        assert_eq!(notifier.wait_timeout(Duration::from_millis(10)), Wake::TimedOut);
    }

    #[test]
    fn wakes_a_waiting_consumer_from_another_thread() {
        let notifier = Arc::new(Notifier::new());
        let producer = {
            let notifier = Arc::clone(&notifier);
            std::thread::spawn(move || notifier.notify())
        };
        assert_eq!(notifier.wait_timeout(Duration::from_secs(5)), Wake::Notified);
        producer.join().unwrap();
    }

    #[test]
    fn pending_work_is_reported_before_close() {
        let notifier = Notifier::new();
        notifier.notify();
        notifier.close();

        assert_eq!(notifier.wait(), Wake::Notified);
        assert_eq!(notifier.wait(), Wake::Closed);
        assert!(notifier.is_closed());
    }
}

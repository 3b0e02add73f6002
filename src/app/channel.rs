//! Producer and consumer handles over the queue + notifier pair.
//!
//! [`channel`] builds both halves. [`EventSender`] is cheap to clone and is
//! handed to every producer (RPC reader, probe threads, finder). The single
//! [`EventReceiver`] belongs to the render engine.

use super::notifier::{Notifier, Wake};
use super::queue::{EventQueue, OverflowPolicy};
use crate::domain::{Result, UpdateEvent};
use crate::worker::Envelope;
use std::sync::Arc;
use std::time::Duration;

/// Creates a connected sender/receiver pair.
#[must_use]
pub fn channel(capacity: usize, policy: OverflowPolicy) -> (EventSender, EventReceiver) {
    let queue = Arc::new(EventQueue::new(capacity, policy));
    let notifier = Arc::new(Notifier::new());
    (
        EventSender {
            queue: Arc::clone(&queue),
            notifier: Arc::clone(&notifier),
        },
        EventReceiver { queue, notifier },
    )
}

/// Producer half. `Send + Sync + Clone`.
#[derive(Debug, Clone)]
pub struct EventSender {
    queue: Arc<EventQueue>,
    notifier: Arc<Notifier>,
}

impl EventSender {
    /// Hands an event to the render context and wakes it.
    ///
    /// Ownership of the payload moves into the queue.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::VeneerError::QueueFull`] from the queue's reject policy.
    pub fn send(&self, event: UpdateEvent) -> Result<()> {
        self.queue.enqueue(Envelope::new(event))?;
        self.notifier.notify();
        Ok(())
    }

    /// Lets the render loop return once it has drained what is pending.
    pub fn close(&self) {
        self.notifier.close();
    }
}

/// Consumer half, owned by the render context.
#[derive(Debug)]
pub struct EventReceiver {
    queue: Arc<EventQueue>,
    notifier: Arc<Notifier>,
}

impl EventReceiver {
    /// Blocks until woken.
    pub fn wait(&self) -> Wake {
        self.notifier.wait()
    }

    /// Blocks until woken or until `timeout` elapses.
    pub fn wait_timeout(&self, timeout: Duration) -> Wake {
        self.notifier.wait_timeout(timeout)
    }

    /// Removes the oldest pending event.
    pub fn drain_one(&self) -> Option<Envelope> {
        self.queue.drain_one()
    }

    /// Number of pending events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Events lost to the overflow policy so far.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.queue.dropped()
    }
}

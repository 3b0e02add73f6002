//! Bounded FIFO event queue shared by producers and the render context.
//!
//! Built on `crossbeam`'s lock-free [`ArrayQueue`]. Producers on any thread
//! call [`EventQueue::enqueue`]; only the render context calls
//! [`EventQueue::drain_one`]. Events pushed by one producer come out in the
//! order that producer pushed them.
//!
//! # Overflow
//!
//! A full queue means the render context has stalled. What happens to the
//! next event is decided by [`OverflowPolicy`]:
//!
//! - [`OverflowPolicy::Reject`] refuses the new event with
//!   [`VeneerError::QueueFull`]. Retained events are untouched.
//! - [`OverflowPolicy::DropOldest`] evicts the oldest pending event. The
//!   relative order of the survivors is unchanged.

use crate::domain::{Result, VeneerError};
use crate::worker::Envelope;
use crossbeam::queue::ArrayQueue;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of pending events the queue holds.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Behavior of [`EventQueue::enqueue`] when the queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Refuse the incoming event.
    #[default]
    Reject,
    /// Evict the oldest pending event to make room.
    DropOldest,
}

/// Bounded multi-producer, single-consumer event queue.
#[derive(Debug)]
pub struct EventQueue {
    inner: ArrayQueue<Envelope>,
    policy: OverflowPolicy,
    dropped: AtomicU64,
}

impl EventQueue {
    /// Creates a queue holding at most `capacity` events (minimum 1).
    #[must_use]
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            inner: ArrayQueue::new(capacity.max(1)),
            policy,
            dropped: AtomicU64::new(0),
        }
    }

    /// Appends an event.
    ///
    /// Never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::QueueFull`] when the queue is full and the policy
    /// is [`OverflowPolicy::Reject`].
    pub fn enqueue(&self, envelope: Envelope) -> Result<()> {
        match self.policy {
            OverflowPolicy::Reject => self.inner.push(envelope).map_err(|rejected| {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    capacity = self.inner.capacity(),
                    kind = rejected.event.kind(),
                    "event queue full, rejecting event"
                );
                VeneerError::QueueFull {
                    capacity: self.inner.capacity(),
                }
            }),
            OverflowPolicy::DropOldest => {
                if let Some(evicted) = self.inner.force_push(envelope) {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        capacity = self.inner.capacity(),
                        kind = evicted.event.kind(),
                        "event queue full, dropped oldest event"
                    );
                }
                Ok(())
            }
        }
    }

    /// Removes and returns the oldest pending event, or `None` when empty.
    ///
    /// Must only be called from the render context.
    pub fn drain_one(&self) -> Option<Envelope> {
        self.inner.pop()
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Maximum number of pending events.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Total events rejected or evicted since creation.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpdateEvent;

    fn cursor(line: usize) -> Envelope {
        Envelope::new(UpdateEvent::CursorMoved { line, col: 1 })
    }

    fn drained_lines(queue: &EventQueue) -> Vec<usize> {
        std::iter::from_fn(|| queue.drain_one())
            .map(|envelope| match envelope.event {
                UpdateEvent::CursorMoved { line, .. } => line,
                other => panic!("unexpected event {other:?}"),
            })
            .collect()
    }

    #[test]
    fn drains_in_fifo_order() {
        let queue = EventQueue::new(8, OverflowPolicy::Reject);
        for line in 1..=5 {
            queue.enqueue(cursor(line)).unwrap();
        }
        assert_eq!(drained_lines(&queue), vec![1, 2, 3, 4, 5]);
        assert!(queue.drain_one().is_none());
    }

    #[test]
    fn reject_policy_keeps_retained_events() {
        let queue = EventQueue::new(2, OverflowPolicy::Reject);
        queue.enqueue(cursor(1)).unwrap();
        queue.enqueue(cursor(2)).unwrap();

        let err = queue.enqueue(cursor(3)).unwrap_err();
        assert!(matches!(err, VeneerError::QueueFull { capacity: 2 }));
        assert_eq!(queue.dropped(), 1);
        assert_eq!(drained_lines(&queue), vec![1, 2]);
    }

    #[test]
    fn drop_oldest_policy_preserves_survivor_order() {
        let queue = EventQueue::new(3, OverflowPolicy::DropOldest);
        for line in 1..=5 {
            queue.enqueue(cursor(line)).unwrap();
        }
        assert_eq!(queue.dropped(), 2);
        assert_eq!(drained_lines(&queue), vec![3, 4, 5]);
    }

    #[test]
    fn zero_capacity_is_bounded_to_one() {
        let queue = EventQueue::new(0, OverflowPolicy::Reject);
        assert_eq!(queue.capacity(), 1);
    }
}

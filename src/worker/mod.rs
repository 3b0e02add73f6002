//! Producer-side work that must stay off the render context.
//!
//! The render context never blocks on I/O. Anything slow (today: VCS
//! probing) runs on a worker thread and reports back by enqueueing an
//! [`crate::domain::UpdateEvent`], wrapped in an [`Envelope`] that carries the
//! producer's trace context.
//!
//! # Architecture
//!
//! - `messages`: The queued envelope with trace context propagation
//! - `probe`: The [`VcsProbe`] trait and its `git` CLI implementation
//! - `handler`: [`ProbeWorker`], which runs probes on dedicated threads

pub mod handler;
pub mod messages;
pub mod probe;

pub use handler::ProbeWorker;
pub use messages::{Envelope, TraceContext};
pub use probe::{GitCli, VcsProbe};

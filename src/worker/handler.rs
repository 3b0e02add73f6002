//! Probe worker: runs VCS probes off the render context.
//!
//! Each probe gets its own short-lived thread. The thread runs the blocking
//! probe, then sends [`UpdateEvent::GitResult`] through the shared
//! [`EventSender`]. The probe span is a child of whatever span was current at
//! [`ProbeWorker::spawn`], and the envelope carries it back, so the resulting
//! dispatch on the render context links to the probe in traces.

use crate::app::channel::EventSender;
use crate::domain::{Result, UpdateEvent};
use crate::worker::probe::VcsProbe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Spawns one probe thread per request.
#[derive(Clone)]
pub struct ProbeWorker {
    probe: Arc<dyn VcsProbe>,
    sender: EventSender,
}

impl std::fmt::Debug for ProbeWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeWorker").finish_non_exhaustive()
    }
}

impl ProbeWorker {
    /// Creates a worker that reports through `sender`.
    #[must_use]
    pub fn new(probe: Arc<dyn VcsProbe>, sender: EventSender) -> Self {
        Self { probe, sender }
    }

    /// Probes `dir` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VeneerError::Io`] if the thread cannot be spawned.
    pub fn spawn(&self, dir: PathBuf, file: PathBuf) -> Result<JoinHandle<()>> {
        let probe = Arc::clone(&self.probe);
        let sender = self.sender.clone();
        let span = tracing::debug_span!("git_probe", dir = %dir.display());

        let handle = thread::Builder::new().name("veneer-git-probe".to_string()).spawn(move || {
            let _guard = span.entered();
            let event = Self::run(probe.as_ref(), dir, &file);
            if let Err(e) = sender.send(event) {
                tracing::warn!(error = %e, "git result not delivered");
            }
        })?;

        Ok(handle)
    }

    /// Runs a probe on the calling thread and packages the outcome.
    ///
    /// Probe failures are logged and reported as an absent status.
    pub fn run(probe: &dyn VcsProbe, dir: PathBuf, file: &Path) -> UpdateEvent {
        let status = match probe.probe(&dir, file) {
            Ok(status) => {
                tracing::debug!(branch = %status.branch, dirty = status.dirty, "git probe succeeded");
                Some(status)
            }
            Err(e) => {
                tracing::debug!(error = %e, "not a git working tree");
                None
            }
        };
        UpdateEvent::GitResult { dir, status }
    }
}

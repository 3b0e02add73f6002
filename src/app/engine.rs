//! The render context: drain loop and event dispatch.
//!
//! [`RenderEngine`] owns every piece of render-side state (the statusline
//! fields, the palette with its row pool, the toolkit handle) by value. It is
//! driven from a single thread. Producers reach it only through the
//! [`EventSender`] handed out by [`RenderEngine::sender`].
//!
//! # Architecture
//!
//! ```text
//! producers ──send──▶ EventQueue ──notify──▶ Notifier
//!                                               │
//!                         await_and_drain_all ◀─┘
//!                                │
//!               ┌────────────────┴───────────────┐
//!               ▼                                ▼
//!          Statusline ──GitFollowUp──▶ ProbeWorker / GitRefresh
//!               │                                │
//!          Palette ──EditorCommand──▶ CommandSink
//!               │
//!               ▼
//!            Toolkit
//! ```

use crate::app::actions::{subscription_commands, CommandSink, EditorCommand};
use crate::app::channel::{channel, EventReceiver, EventSender};
use crate::app::notifier::Wake;
use crate::domain::UpdateEvent;
use crate::ui::palette::Palette;
use crate::ui::statusline::{GitFollowUp, Statusline};
use crate::ui::theme::Theme;
use crate::ui::toolkit::Toolkit;
use crate::worker::{Envelope, GitCli, ProbeWorker, TraceContext, VcsProbe};
use crate::Config;
use std::sync::Arc;

/// Single-threaded owner of all render state.
pub struct RenderEngine<T: Toolkit, S: CommandSink> {
    receiver: EventReceiver,
    sender: EventSender,
    probes: ProbeWorker,
    toolkit: T,
    sink: S,
    statusline: Statusline,
    palette: Palette,
    dropped_seen: u64,
}

impl<T: Toolkit, S: CommandSink> RenderEngine<T, S> {
    /// Builds the engine and its event channel from `config`.
    #[must_use]
    pub fn new(config: &Config, theme: &Theme, toolkit: T, sink: S) -> Self {
        let (sender, receiver) = channel(config.queue_capacity, config.overflow);
        let probe: Arc<dyn VcsProbe> = Arc::new(GitCli::new(&config.git_binary));

        Self {
            probes: ProbeWorker::new(probe, sender.clone()),
            receiver,
            sender,
            toolkit,
            sink,
            statusline: Statusline::new(theme.colors.clone(), config.draw_statusline),
            palette: Palette::new(config.pool_size, theme.colors.clone()),
            dropped_seen: 0,
        }
    }

    /// Replaces the VCS probe.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn VcsProbe>) -> Self {
        self.probes = ProbeWorker::new(probe, self.sender.clone());
        self
    }

    /// A producer handle. Clone it freely.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Draws the initial widget state.
    pub fn init(&mut self) {
        self.statusline.init(&mut self.toolkit);
        self.palette.init(&mut self.toolkit);
    }

    /// Asks the editor for statusline notifications. Does nothing when the
    /// statusline is disabled.
    pub fn subscribe(&mut self) {
        if !self.statusline.enabled() {
            return;
        }
        for command in subscription_commands() {
            self.send_command(command);
        }
    }

    /// Blocks until woken, then dispatches every pending event.
    ///
    /// Returns `false` once the channel is closed and nothing is left to
    /// drain, at which point the caller should stop looping.
    pub fn await_and_drain_all(&mut self) -> bool {
        let wake = self.receiver.wait();
        self.drain_all();
        wake != Wake::Closed
    }

    /// Dispatches every pending event without waiting. Returns how many
    /// were handled.
    pub fn drain_all(&mut self) -> usize {
        let mut handled = 0;
        while let Some(envelope) = self.receiver.drain_one() {
            self.dispatch(envelope);
            handled += 1;
        }

        let dropped = self.receiver.dropped();
        if dropped > self.dropped_seen {
            tracing::warn!(lost = dropped - self.dropped_seen, total = dropped, "events lost to queue overflow");
            self.dropped_seen = dropped;
        }
        handled
    }

    /// Runs the render loop until the channel is closed.
    pub fn run(&mut self) {
        tracing::info!("render loop started");
        while self.await_and_drain_all() {}
        tracing::info!("render loop stopped");
    }

    fn dispatch(&mut self, envelope: Envelope) {
        let _context_guard = envelope.trace_context.as_ref().and_then(TraceContext::attach);
        let span = tracing::debug_span!("dispatch", kind = envelope.event.kind());
        let _guard = span.entered();

        let event = envelope.event;
        if event.is_palette() {
            if let Some(command) = self.palette.dispatch(event, &mut self.toolkit) {
                self.send_command(command);
            }
            return;
        }

        match self.statusline.dispatch(&event, &mut self.toolkit) {
            Some(GitFollowUp::Refresh) => {
                if let Err(e) = self.sender.send(UpdateEvent::GitRefresh) {
                    tracing::warn!(error = %e, "git refresh not queued");
                    self.statusline.git_refresh_lost();
                }
            }
            Some(GitFollowUp::Probe { dir, file }) => {
                if let Err(e) = self.probes.spawn(dir, file) {
                    tracing::warn!(error = %e, "git probe not started");
                }
            }
            None => {}
        }
    }

    fn send_command(&mut self, command: EditorCommand) {
        tracing::debug!(command = ?command, "sending editor command");
        if let Err(e) = self.sink.send(command) {
            tracing::warn!(error = %e, "editor command not delivered");
        }
    }

    /// The toolkit.
    #[must_use]
    pub const fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// The toolkit, mutably.
    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    /// The command sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The statusline fields.
    #[must_use]
    pub const fn statusline(&self) -> &Statusline {
        &self.statusline
    }

    /// The palette.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl<T: Toolkit + std::fmt::Debug, S: CommandSink + std::fmt::Debug> std::fmt::Debug for RenderEngine<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderEngine")
            .field("toolkit", &self.toolkit)
            .field("sink", &self.sink)
            .field("pending", &self.receiver.pending())
            .finish_non_exhaustive()
    }
}

//! Application layer: the event pipeline and the render loop.
//!
//! This module sits between the producers (RPC reader, probe threads, finder)
//! and the UI layer. Producers push [`crate::domain::UpdateEvent`]s into a
//! bounded queue and ring the notifier; the render engine wakes, drains the
//! queue and dispatches each event to the statusline fields or the palette.
//!
//! # Architecture
//!
//! ```text
//! EventSender::send → EventQueue → Notifier → RenderEngine::await_and_drain_all
//!                                                   │
//!                                      Statusline / Palette → Toolkit
//!                                                   │
//!                                      EditorCommand → CommandSink
//! ```
//!
//! # Modules
//!
//! - [`queue`]: Bounded lock-free FIFO with a configurable overflow policy
//! - [`notifier`]: Coalescing wake-up flag
//! - [`channel`]: Producer and consumer handles over queue + notifier
//! - [`engine`]: The render context's drain loop and dispatcher
//! - [`actions`]: Commands sent back to the editor
//! - [`modes`]: Editor mode classification
//!
//! # Example
//!
//! ```
//! use veneer::app::{CommandSink, EditorCommand, RenderEngine};
//! use veneer::domain::UpdateEvent;
//! use veneer::ui::theme::Theme;
//! use veneer::ui::toolkit::{RecordingToolkit, Widget};
//! use veneer::Config;
//!
//! let mut engine = RenderEngine::new(&Config::default(), &Theme::default(), RecordingToolkit::default(), Vec::<EditorCommand>::new());
//! engine.init();
//!
//! let sender = engine.sender();
//! sender.send(UpdateEvent::ModeChanged { mode: "insert".into() })?;
//! sender.close();
//! engine.run();
//!
//! assert_eq!(engine.toolkit().text(Widget::ModeLabel), Some("insert"));
//! # Ok::<(), veneer::VeneerError>(())
//! ```

pub mod actions;
pub mod channel;
pub mod engine;
pub mod modes;
pub mod notifier;
pub mod queue;

pub use actions::{subscription_commands, CommandSink, EditorCommand};
pub use channel::{channel, EventReceiver, EventSender};
pub use engine::RenderEngine;
pub use modes::EditorMode;
pub use notifier::{Notifier, Wake};
pub use queue::{EventQueue, OverflowPolicy, DEFAULT_QUEUE_CAPACITY};

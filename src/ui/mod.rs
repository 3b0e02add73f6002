//! User interface layer: value-diffed renderers over an abstract toolkit.
//!
//! Nothing in this layer touches a real widget library. Renderers hold the
//! last value they drew in a [`cache::ValueCache`] and issue [`Toolkit`] calls
//! only for values that changed.
//!
//! # Architecture
//!
//! ```text
//! UpdateEvent → Statusline fields ─┐
//!                                  ├─ ValueCache diff → Toolkit calls
//! UpdateEvent → Palette rows ──────┘
//! ```
//!
//! # Modules
//!
//! - [`toolkit`]: The toolkit trait, widget identities and a recording double
//! - [`cache`]: Last-drawn value store
//! - [`statusline`]: Mode, git, file, filetype, encoding, position and lint fields
//! - [`palette`]: Virtualized result list over a fixed row pool
//! - [`format`]: Rich-text label formatting with match highlights
//! - [`icons`]: File-type icon categories
//! - [`theme`]: Color scheme definitions

pub mod cache;
pub mod format;
pub mod icons;
pub mod palette;
pub mod statusline;
pub mod theme;
pub mod toolkit;

pub use palette::Palette;
pub use statusline::Statusline;
pub use theme::Theme;
pub use toolkit::{RecordingToolkit, Toolkit, Widget};

//! Domain layer: the data that flows through the render engine.
//!
//! These types are independent of the toolkit and of the transport that
//! delivers editor notifications.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`event`]: The closed [`UpdateEvent`] enum and the RPC decode boundary
//! - [`entry`]: Fuzzy-finder result entries
//! - [`git`]: Version-control status

pub mod entry;
pub mod error;
pub mod event;
pub mod git;

pub use entry::{EntryType, ResultEntry, ResultMode};
pub use error::{Result, VeneerError};
pub use event::UpdateEvent;
pub use git::GitStatus;

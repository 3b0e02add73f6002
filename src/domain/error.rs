//! Error types for the veneer front-end.
//!
//! This module defines the centralized error type [`VeneerError`] and a type alias
//! [`Result`] used throughout the crate. Errors are built with `thiserror`.
//!
//! Most failures in the render path are not propagated at all: undecodable
//! events are logged and dropped, and a failed VCS probe simply hides the git
//! field. The variants here cover the places where a caller can act on the
//! failure (configuration loading, queue admission, theme loading).

use thiserror::Error;

/// The main error type for veneer operations.
///
/// # Examples
///
/// ```
/// use veneer::VeneerError;
///
/// let err = VeneerError::QueueFull { capacity: 1000 };
/// assert_eq!(err.to_string(), "Event queue full (capacity 1000)");
/// ```
#[derive(Debug, Error)]
pub enum VeneerError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    ///
    /// Occurs when a theme file cannot be parsed or a color value is not a
    /// valid hex or `rgba()` literal.
    #[error("Theme error: {0}")]
    Theme(String),

    /// An inbound editor event could not be decoded.
    ///
    /// Raised at the RPC decode boundary for unknown event kinds and payloads
    /// whose shape does not match the kind.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The event queue refused an event because it is at capacity.
    ///
    /// A full queue means the render context has stalled; retained events are
    /// left untouched.
    #[error("Event queue full (capacity {capacity})")]
    QueueFull {
        /// Configured queue capacity.
        capacity: usize,
    },

    /// The VCS probe could not be run.
    #[error("Probe error: {0}")]
    Probe(String),
}

/// A specialized `Result` type for veneer operations.
pub type Result<T> = std::result::Result<T, VeneerError>;

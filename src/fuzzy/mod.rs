//! Fuzzy matching for the finder palette.
//!
//! The palette only displays ranked results; producing them is the job of a
//! [`FuzzyEngine`]. [`SkimEngine`] is the bundled implementation and
//! [`FinderSession`] ties it to a corpus and to the result cap the palette
//! advertises.
//!
//! # Example
//!
//! ```
//! use veneer::domain::{EntryType, ResultEntry};
//! use veneer::fuzzy::{FuzzyEngine, SkimEngine};
//!
//! let corpus = vec![
//!     ResultEntry::new("src/main.rs", EntryType::File),
//!     ResultEntry::new("Cargo.toml", EntryType::File),
//! ];
//! let hits = SkimEngine::default().search("cargo", &corpus, 10);
//! assert_eq!(hits[0].text, "Cargo.toml");
//! ```

pub mod engine;
pub mod session;

pub use engine::{FuzzyEngine, SkimEngine};
pub use session::FinderSession;

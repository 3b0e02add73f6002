//! Infrastructure layer for filesystem and environment interactions.
//!
//! Currently this is only where configuration and trace files live on disk.

pub mod paths;

pub use paths::{config_file, data_dir};

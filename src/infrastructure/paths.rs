//! Platform directory resolution.
//!
//! Locations follow the platform conventions exposed by `dirs`: XDG on Linux,
//! `~/Library` on macOS and the known folders on Windows.

use std::path::PathBuf;

/// Directory name used under the platform config and data roots.
pub const APP_DIR: &str = "veneer";

/// File name of the configuration file inside [`config_dir`].
pub const CONFIG_FILE: &str = "config.toml";

/// Returns the data directory for trace output, e.g.
/// `~/.local/share/veneer` on Linux.
///
/// Falls back to the state directory when the platform has no data root.
/// `None` means neither could be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().or_else(dirs::state_dir).map(|dir| dir.join(APP_DIR))
}

/// Returns `$XDG_CONFIG_HOME/veneer` or the platform equivalent.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Returns the default configuration file path.
///
/// # Examples
///
/// ```
/// use veneer::infrastructure::paths::config_file;
///
/// if let Some(path) = config_file() {
///     assert!(path.ends_with("veneer/config.toml"));
/// }
/// ```
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_are_namespaced() {
        if let Some(dir) = data_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
        if let (Some(dir), Some(file)) = (config_dir(), config_file()) {
            assert_eq!(file.parent(), Some(dir.as_path()));
        }
    }
}

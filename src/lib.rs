//! Veneer: front-end state synchronization for an embedded editor.
//!
//! Veneer sits between an editor process and a GUI toolkit. It provides:
//! - A bounded event queue fed by any number of producer threads
//! - A coalescing notifier that wakes a single render context
//! - Statusline fields that redraw only when their value changes
//! - A virtualized fuzzy-finder palette over a fixed pool of row widgets
//! - Background version-control probing for the current buffer

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Headless driver (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event queue + notifier                           │
//! │  - Render loop and dispatch                         │
//! │  - Commands back to the editor                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fuzzy Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (fuzzy/)      │   │ (worker/)     │
//! │ - Statusline  │   │ - Matching    │   │ - Git probe   │
//! │ - Palette     │   │ - Result cap  │   │ - Envelopes   │
//! │ - Theming     │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Events and result entries (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Queue, notifier, render engine and editor commands
//! - [`domain`]: Events, result entries, git status, errors
//! - [`fuzzy`]: Fuzzy matching over a finder corpus
//! - [`infrastructure`]: Platform-specific paths
//! - [`ui`]: Statusline, palette, toolkit abstraction and themes
//! - [`worker`]: Background VCS probing
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Read from `$XDG_CONFIG_HOME/veneer/config.toml` (or an explicit path).
//! Every field is optional:
//!
//! ```toml
//! queue_capacity = 1000
//! overflow = "drop-oldest"
//! pool_size = 30
//! theme = "veneer-light"
//! trace_level = "debug"
//! git_binary = "/usr/bin/git"
//! draw_statusline = true
//! ```
//!
//! # Example
//!
//! ```rust
//! use veneer::app::EditorCommand;
//! use veneer::domain::UpdateEvent;
//! use veneer::ui::toolkit::{RecordingToolkit, Widget};
//! use veneer::{initialize, Config};
//!
//! let mut engine = initialize(&Config::default(), RecordingToolkit::default(), Vec::<EditorCommand>::new())?;
//! let sender = engine.sender();
//!
//! let producer = std::thread::spawn(move || {
//!     sender.send(UpdateEvent::CursorMoved { line: 3, col: 7 })?;
//!     sender.close();
//!     Ok::<(), veneer::VeneerError>(())
//! });
//!
//! engine.run();
//! producer.join().expect("producer panicked")?;
//! assert_eq!(engine.toolkit().text(Widget::PositionLabel), Some("Ln 3, Col 7"));
//! # Ok::<(), veneer::VeneerError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fuzzy;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{CommandSink, EditorCommand, OverflowPolicy, RenderEngine};
pub use domain::{Result, UpdateEvent, VeneerError};
pub use ui::Theme;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of pending events. Default: 1000
    pub queue_capacity: usize,

    /// What happens to a new event when the queue is full.
    ///
    /// `reject` (default) or `drop-oldest`.
    pub overflow: OverflowPolicy,

    /// Number of row widgets in the palette pool. Default: 30
    pub pool_size: usize,

    /// Built-in theme name: `veneer-dark` or `veneer-light`.
    /// Ignored if `theme_file` is set.
    pub theme: String,

    /// Path to a custom TOML theme file. Takes precedence over `theme`.
    pub theme_file: Option<PathBuf>,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. `RUST_LOG`
    /// overrides it. Default: `"info"`
    pub trace_level: Option<String>,

    /// The git executable used by the VCS probe. Default: `git` from `PATH`
    pub git_binary: PathBuf,

    /// Whether the statusline is drawn at all. Default: true
    pub draw_statusline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_capacity: app::DEFAULT_QUEUE_CAPACITY,
            overflow: OverflowPolicy::default(),
            pool_size: ui::palette::DEFAULT_POOL_SIZE,
            theme: ui::theme::DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: None,
            git_binary: PathBuf::from("git"),
            draw_statusline: true,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Config`] if the text is not valid TOML or a
    /// field has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use veneer::{Config, OverflowPolicy};
    ///
    /// let config = Config::from_toml_str("overflow = \"drop-oldest\"\npool_size = 12")?;
    /// assert_eq!(config.overflow, OverflowPolicy::DropOldest);
    /// assert_eq!(config.pool_size, 12);
    /// assert_eq!(config.queue_capacity, 1000);
    /// # Ok::<(), veneer::VeneerError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| VeneerError::Config(e.to_string()))
    }

    /// Reads configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Io`] if the file cannot be read, or
    /// [`VeneerError::Config`] if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads configuration from `path`, or from the default location when
    /// `path` is `None`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Config`] if the file exists but cannot be
    /// parsed, or [`VeneerError::Io`] if it exists but cannot be read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(infrastructure::config_file) else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves the configured theme.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Theme`] if `theme_file` cannot be loaded or
    /// `theme` names no built-in theme.
    pub fn theme(&self) -> Result<Theme> {
        if let Some(file) = &self.theme_file {
            return Theme::from_file(file);
        }
        Theme::from_name(&self.theme)
            .ok_or_else(|| VeneerError::Theme(format!("unknown theme '{}'", self.theme)))
    }
}

/// Builds a ready-to-run render engine.
///
/// Initializes tracing, resolves the theme, draws the initial widget state
/// and subscribes to statusline notifications.
///
/// # Errors
///
/// Returns [`VeneerError::Theme`] if the configured theme cannot be loaded.
pub fn initialize<T, S>(config: &Config, toolkit: T, sink: S) -> Result<RenderEngine<T, S>>
where
    T: ui::Toolkit,
    S: CommandSink,
{
    observability::init_tracing(config);
    tracing::debug!(?config, "initializing veneer");

    let theme = config.theme()?;
    let mut engine = RenderEngine::new(config, &theme, toolkit, sink);
    engine.init();
    engine.subscribe();
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_all_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let err = Config::from_toml_str("queue_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, VeneerError::Config(_)));

        let err = Config::from_toml_str("colour = 1").unwrap_err();
        assert!(matches!(err, VeneerError::Config(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_an_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "queue_capacity = 16\ndraw_statusline = false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.queue_capacity, 16);
        assert!(!config.draw_statusline);
    }

    #[test]
    fn theme_resolution() {
        assert_eq!(Config::default().theme().unwrap().name, "veneer-dark");

        let unknown = Config {
            theme: "solarized".to_string(),
            ..Config::default()
        };
        assert!(matches!(unknown.theme(), Err(VeneerError::Theme(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        std::fs::write(&path, "name = \"mine\"\n[colors]\nmatch_fg = \"#ff0000\"\n").unwrap();
        let from_file = Config {
            theme: "solarized".to_string(),
            theme_file: Some(path),
            ..Config::default()
        };
        assert_eq!(from_file.theme().unwrap().name, "mine");
    }
}

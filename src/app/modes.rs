//! Editor mode classification for the statusline mode badge.
//!
//! The editor reports its mode as a free-form string. Only a handful of modes
//! get their own badge color; everything else is shown verbatim on the normal
//! color.
//!
//! # Example
//!
//! ```
//! use veneer::app::modes::EditorMode;
//!
//! assert_eq!(EditorMode::from_name("cmdline_normal"), EditorMode::Normal);
//! assert_eq!(EditorMode::from_name("replace").label(), "replace");
//! ```

use crate::ui::theme::{Rgba, ThemeColors};

/// Mode as far as the badge is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// `normal` and `cmdline_normal`.
    Normal,
    /// `insert`.
    Insert,
    /// `visual`.
    Visual,
    /// Any other mode, shown by name.
    Other(String),
}

impl EditorMode {
    /// Classifies the editor's mode string.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "normal" | "cmdline_normal" => Self::Normal,
            "insert" => Self::Insert,
            "visual" => Self::Visual,
            other => Self::Other(other.to_string()),
        }
    }

    /// Badge text.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Insert => "insert",
            Self::Visual => "visual",
            Self::Other(name) => name,
        }
    }

    /// Badge background.
    #[must_use]
    pub fn background(&self, colors: &ThemeColors) -> Rgba {
        match self {
            Self::Insert => colors.mode_insert_bg,
            Self::Visual => colors.mode_visual_bg,
            Self::Normal | Self::Other(_) => colors.mode_normal_bg,
        }
    }
}

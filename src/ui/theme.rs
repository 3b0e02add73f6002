//! Theme management and color parsing.
//!
//! Colors used by the statusline and the palette: mode badge backgrounds,
//! icon tints, the dimmed directory text, the fuzzy-match highlight and the
//! selected-row background. Themes are built in (`veneer-dark`,
//! `veneer-light`) or loaded from a TOML file. Every color key is optional in
//! a file; missing keys fall back to the dark palette.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! mode_normal_bg = "#6699cc"
//! mode_insert_bg = "#99c794"
//! mode_visual_bg = "#fac863"
//! git_icon = "rgba(212, 215, 214, 1)"
//! lint_ok_icon = "#8dc149"
//! lint_error_icon = "#cc3e44"
//! dim_fg = "#838383"
//! match_fg = "#5fb3b3"
//! selection_bg = "#4e5a65"
//! scroll_bar = "#3c3c3c"
//! ```

use crate::domain::{Result, VeneerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "veneer-dark";

/// An RGBA color. Alpha is stored as 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rrggbb`, `#rrggbbaa` or `rgba(r, g, b, alpha)` with a
    /// fractional alpha.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Theme`] for any other form.
    ///
    /// ```
    /// use veneer::ui::theme::Rgba;
    ///
    /// assert_eq!(Rgba::parse("#6699cc")?, Rgba::rgb(102, 153, 204));
    /// assert_eq!(Rgba::parse("rgba(102, 153, 204, 1)")?, Rgba::rgb(102, 153, 204));
    /// # Ok::<(), veneer::VeneerError>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if let Some(hex) = raw.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| VeneerError::Theme(format!("invalid hex color '{raw}'")));
        }
        if let Some(body) = raw.strip_prefix("rgba(").and_then(|s| s.strip_suffix(')')) {
            return Self::parse_functional(body).ok_or_else(|| VeneerError::Theme(format!("invalid rgba color '{raw}'")));
        }
        Err(VeneerError::Theme(format!("unrecognized color '{raw}'")))
    }

    /// Hex form, `#rrggbb` for opaque colors.
    #[must_use]
    pub fn hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }

    fn parse_functional(body: &str) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let [r, g, b, a] = parts.as_slice() else {
            return None;
        };
        let alpha: f32 = a.parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        Some(Self {
            r: r.parse().ok()?,
            g: g.parse().ok()?,
            b: b.parse().ok()?,
            a: (alpha * 255.0).round() as u8,
        })
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl TryFrom<String> for Rgba {
    type Error = VeneerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.hex()
    }
}

/// Color scheme for the statusline and palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette.
    #[serde(default)]
    pub colors: ThemeColors,
}

/// Color definitions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    /// Mode badge background in normal mode (and unknown modes).
    pub mode_normal_bg: Rgba,
    /// Mode badge background in insert mode.
    pub mode_insert_bg: Rgba,
    /// Mode badge background in visual mode.
    pub mode_visual_bg: Rgba,
    /// Git icon tint.
    pub git_icon: Rgba,
    /// "All clear" lint icon tint.
    pub lint_ok_icon: Rgba,
    /// Error icon tint.
    pub lint_error_icon: Rgba,
    /// Warning icon tint; `None` keeps the asset's colors.
    pub lint_warn_icon: Option<Rgba>,
    /// Secondary text such as the containing directory.
    pub dim_fg: Rgba,
    /// Fuzzy-match highlight.
    pub match_fg: Rgba,
    /// Selected palette row background.
    pub selection_bg: Rgba,
    /// Palette scroll bar thumb.
    pub scroll_bar: Rgba,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            mode_normal_bg: Rgba::rgb(102, 153, 204),
            mode_insert_bg: Rgba::rgb(153, 199, 148),
            mode_visual_bg: Rgba::rgb(250, 200, 99),
            git_icon: Rgba::rgb(212, 215, 214),
            lint_ok_icon: Rgba::rgb(141, 193, 73),
            lint_error_icon: Rgba::rgb(204, 62, 68),
            lint_warn_icon: None,
            dim_fg: Rgba::rgb(0x83, 0x83, 0x83),
            match_fg: Rgba::rgb(0x5f, 0xb3, 0xb3),
            selection_bg: Rgba::rgb(0x4e, 0x5a, 0x65),
            scroll_bar: Rgba::rgb(0x3c, 0x3c, 0x3c),
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `veneer-dark`, `veneer-light`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "veneer-dark" => include_str!("../../themes/veneer-dark.toml"),
            "veneer-light" => include_str!("../../themes/veneer-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| VeneerError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| VeneerError::Theme(format!("failed to parse theme TOML: {e}")))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

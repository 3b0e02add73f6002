//! The boundary to the widget toolkit.
//!
//! The engine never draws pixels itself. It issues fire-and-forget commands
//! (show, hide, set text, set icon, set background, move, resize) against
//! named [`Widget`]s through the [`Toolkit`] trait, and reads size hints back.
//! Every call happens on the render context.
//!
//! [`RecordingToolkit`] is an in-memory implementation that records each call
//! and tracks the resulting widget state. The driver binary and the tests use
//! it in place of a real GUI toolkit.

use crate::ui::theme::Rgba;
use std::collections::HashMap;

/// Advance of every character in [`RecordingToolkit`]'s fixed-pitch font.
pub const RECORDING_CHAR_WIDTH: u32 = 8;

/// Addressable widgets in the statusline and the finder palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    /// The statusline bar as a whole.
    Statusline,
    /// Mode badge.
    ModeLabel,
    /// Container for the git icon and label.
    GitGroup,
    /// Git icon.
    GitIcon,
    /// Branch label.
    GitLabel,
    /// File-type icon next to the file name.
    FileIcon,
    /// File base name.
    FileLabel,
    /// Containing directory.
    FolderLabel,
    /// Filetype label.
    FiletypeLabel,
    /// Encoding label.
    EncodingLabel,
    /// `Ln x, Col y` label.
    PositionLabel,
    /// "All clear" lint icon.
    LintOkIcon,
    /// "All clear" lint label.
    LintOkLabel,
    /// Error icon.
    LintErrorIcon,
    /// Error count.
    LintErrorLabel,
    /// Warning icon.
    LintWarnIcon,
    /// Warning count.
    LintWarnLabel,
    /// The finder palette as a whole.
    Palette,
    /// Query text inside the palette.
    PalettePattern,
    /// Text cursor inside the query box.
    PaletteCursor,
    /// Scroll bar thumb.
    PaletteScrollBar,
    /// Result row container for slot `n`.
    Row(usize),
    /// Icon region of slot `n`.
    RowIcon(usize),
    /// Label region of slot `n`.
    RowLabel(usize),
}

/// An icon identity. Loading the actual asset is the toolkit's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    /// Asset name, e.g. `git`, `folder`, `rust`.
    pub name: String,
    /// Tint, or `None` for the asset's own colors.
    pub color: Option<Rgba>,
}

impl Icon {
    /// Creates an icon identity.
    #[must_use]
    pub fn new(name: impl Into<String>, color: Option<Rgba>) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Preferred widget size reported by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Render-context-only drawing surface.
pub trait Toolkit {
    /// Makes a widget visible.
    fn show(&mut self, widget: Widget);
    /// Hides a widget.
    fn hide(&mut self, widget: Widget);
    /// Replaces a label's text.
    fn set_text(&mut self, widget: Widget, text: &str);
    /// Loads an icon into an icon widget.
    fn set_icon(&mut self, widget: Widget, icon: &Icon);
    /// Sets or clears a widget's background color.
    fn set_background(&mut self, widget: Widget, color: Option<Rgba>);
    /// Moves a widget relative to its parent.
    fn move_to(&mut self, widget: Widget, x: i32, y: i32);
    /// Resizes a widget.
    fn resize(&mut self, widget: Widget, width: u32, height: u32);
    /// Preferred size of a widget.
    fn size_hint(&self, widget: Widget) -> Size;
    /// Rendered width of `text` in the palette font.
    fn text_width(&self, text: &str) -> u32;
}

/// One recorded toolkit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Show(Widget),
    Hide(Widget),
    SetText(Widget, String),
    SetIcon(Widget, Icon),
    SetBackground(Widget, Option<Rgba>),
    Move(Widget, i32, i32),
    Resize(Widget, u32, u32),
}

impl DrawCall {
    /// The widget the call targeted.
    #[must_use]
    pub const fn widget(&self) -> Widget {
        match self {
            Self::Show(w)
            | Self::Hide(w)
            | Self::SetText(w, _)
            | Self::SetIcon(w, _)
            | Self::SetBackground(w, _)
            | Self::Move(w, ..)
            | Self::Resize(w, ..) => *w,
        }
    }
}

/// Toolkit double that records calls and the resulting widget state.
#[derive(Debug, Clone)]
pub struct RecordingToolkit {
    calls: Vec<DrawCall>,
    visible: HashMap<Widget, bool>,
    texts: HashMap<Widget, String>,
    icons: HashMap<Widget, Icon>,
    row_height: u32,
    width: u32,
}

impl Default for RecordingToolkit {
    fn default() -> Self {
        Self::new(20)
    }
}

impl RecordingToolkit {
    /// Creates a recorder whose rows report `row_height` pixels.
    #[must_use]
    pub fn new(row_height: u32) -> Self {
        Self {
            calls: Vec::new(),
            visible: HashMap::new(),
            texts: HashMap::new(),
            icons: HashMap::new(),
            row_height,
            width: 600,
        }
    }

    /// Every call in issue order.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forgets recorded calls but keeps widget state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls targeting `widget`.
    #[must_use]
    pub fn calls_for(&self, widget: Widget) -> usize {
        self.calls.iter().filter(|c| c.widget() == widget).count()
    }

    /// Current text of a label.
    #[must_use]
    pub fn text(&self, widget: Widget) -> Option<&str> {
        self.texts.get(&widget).map(String::as_str)
    }

    /// Current icon of an icon widget.
    #[must_use]
    pub fn icon(&self, widget: Widget) -> Option<&Icon> {
        self.icons.get(&widget)
    }

    /// Whether the widget was last shown. Never-touched widgets count as hidden.
    #[must_use]
    pub fn is_visible(&self, widget: Widget) -> bool {
        self.visible.get(&widget).copied().unwrap_or(false)
    }

    /// Changes the reported row height, as a font change would.
    pub fn set_row_height(&mut self, row_height: u32) {
        self.row_height = row_height;
    }
}

impl Toolkit for RecordingToolkit {
    fn show(&mut self, widget: Widget) {
        self.visible.insert(widget, true);
        self.calls.push(DrawCall::Show(widget));
    }

    fn hide(&mut self, widget: Widget) {
        self.visible.insert(widget, false);
        self.calls.push(DrawCall::Hide(widget));
    }

    fn set_text(&mut self, widget: Widget, text: &str) {
        self.texts.insert(widget, text.to_string());
        self.calls.push(DrawCall::SetText(widget, text.to_string()));
    }

    fn set_icon(&mut self, widget: Widget, icon: &Icon) {
        self.icons.insert(widget, icon.clone());
        self.calls.push(DrawCall::SetIcon(widget, icon.clone()));
    }

    fn set_background(&mut self, widget: Widget, color: Option<Rgba>) {
        self.calls.push(DrawCall::SetBackground(widget, color));
    }

    fn move_to(&mut self, widget: Widget, x: i32, y: i32) {
        self.calls.push(DrawCall::Move(widget, x, y));
    }

    fn resize(&mut self, widget: Widget, width: u32, height: u32) {
        self.calls.push(DrawCall::Resize(widget, width, height));
    }

    fn size_hint(&self, widget: Widget) -> Size {
        match widget {
            Widget::Row(_) => Size {
                width: self.width,
                height: self.row_height,
            },
            Widget::Palette => Size {
                width: self.width,
                height: self.row_height * 2,
            },
            _ => Size {
                width: 0,
                height: self.row_height,
            },
        }
    }

    fn text_width(&self, text: &str) -> u32 {
        u32::try_from(text.chars().count()).map_or(u32::MAX, |n| n.saturating_mul(RECORDING_CHAR_WIDTH))
    }
}

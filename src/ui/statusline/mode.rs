//! Mode badge.

use crate::app::modes::EditorMode;
use crate::ui::cache::ValueCache;
use crate::ui::theme::ThemeColors;
use crate::ui::toolkit::{Toolkit, Widget};

/// Redraws the badge when the editor's mode string changes.
#[derive(Debug, Default)]
pub struct ModeField {
    mode: ValueCache<String>,
}

impl ModeField {
    /// Applies a mode change.
    pub fn redraw<T: Toolkit>(&mut self, mode: &str, colors: &ThemeColors, tk: &mut T) {
        if !self.mode.update(mode.to_string()) {
            return;
        }

        let mode = EditorMode::from_name(mode);
        tk.set_text(Widget::ModeLabel, mode.label());
        tk.set_background(Widget::ModeLabel, Some(mode.background(colors)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toolkit::{DrawCall, RecordingToolkit};

    #[test]
    fn cmdline_normal_shows_as_normal() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = ModeField::default();

        field.redraw("cmdline_normal", &colors, &mut tk);
        assert_eq!(tk.text(Widget::ModeLabel), Some("normal"));
        assert!(tk
            .calls()
            .contains(&DrawCall::SetBackground(Widget::ModeLabel, Some(colors.mode_normal_bg))));

        tk.clear_calls();
        field.redraw("cmdline_normal", &colors, &mut tk);
        assert!(tk.calls().is_empty());

        field.redraw("visual", &colors, &mut tk);
        assert_eq!(tk.text(Widget::ModeLabel), Some("visual"));
    }
}

//! Single-label fields: filetype, encoding and cursor position.

use crate::ui::cache::ValueCache;
use crate::ui::toolkit::{Toolkit, Widget};

/// A label whose text is the event payload verbatim.
#[derive(Debug)]
pub struct TextField {
    widget: Widget,
    value: ValueCache<String>,
}

impl TextField {
    /// A field drawing into `widget`.
    #[must_use]
    pub const fn new(widget: Widget) -> Self {
        Self {
            widget,
            value: ValueCache::new(),
        }
    }

    /// Sets the label if `value` changed.
    pub fn redraw<T: Toolkit>(&mut self, value: &str, tk: &mut T) {
        if self.value.update(value.to_string()) {
            tk.set_text(self.widget, value);
        }
    }
}

/// `Ln {line}, Col {col}`.
#[derive(Debug, Default)]
pub struct PositionField {
    pos: ValueCache<(usize, usize)>,
}

impl PositionField {
    /// Sets the label if the `(line, col)` pair changed.
    pub fn redraw<T: Toolkit>(&mut self, line: usize, col: usize, tk: &mut T) {
        if self.pos.update((line, col)) {
            tk.set_text(Widget::PositionLabel, &format!("Ln {line}, Col {col}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toolkit::RecordingToolkit;

    #[test]
    fn position_redraws_only_on_change() {
        let mut tk = RecordingToolkit::default();
        let mut field = PositionField::default();

        field.redraw(3, 7, &mut tk);
        field.redraw(3, 7, &mut tk);
        assert_eq!(tk.calls_for(Widget::PositionLabel), 1);
        assert_eq!(tk.text(Widget::PositionLabel), Some("Ln 3, Col 7"));

        field.redraw(3, 8, &mut tk);
        assert_eq!(tk.calls_for(Widget::PositionLabel), 2);
    }

    #[test]
    fn empty_encoding_is_still_a_value() {
        let mut tk = RecordingToolkit::default();
        let mut field = TextField::new(Widget::EncodingLabel);

        field.redraw("", &mut tk);
        field.redraw("utf-8", &mut tk);
        field.redraw("utf-8", &mut tk);
        assert_eq!(tk.calls_for(Widget::EncodingLabel), 2);
    }
}

//! Diagnostics counters.
//!
//! Exactly one of two widget sets is visible: the "ok" icon and label when
//! there are no errors and no warnings, otherwise the error and warning icons
//! with their counts. Icons are loaded on the first draw.

use crate::ui::cache::ValueCache;
use crate::ui::theme::ThemeColors;
use crate::ui::toolkit::{Icon, Toolkit, Widget};

const OK_SET: [Widget; 2] = [Widget::LintOkIcon, Widget::LintOkLabel];
const COUNT_SET: [Widget; 4] = [
    Widget::LintErrorIcon,
    Widget::LintErrorLabel,
    Widget::LintWarnIcon,
    Widget::LintWarnLabel,
];

/// Lint part of the statusline.
#[derive(Debug, Default)]
pub struct LintField {
    counts: ValueCache<(usize, usize)>,
    ok_visible: ValueCache<bool>,
    errors_text: ValueCache<String>,
    warnings_text: ValueCache<String>,
    icons_loaded: bool,
}

impl LintField {
    /// Applies new diagnostic counts.
    pub fn redraw<T: Toolkit>(&mut self, errors: usize, warnings: usize, colors: &ThemeColors, tk: &mut T) {
        if !self.counts.update((errors, warnings)) {
            return;
        }

        if !self.icons_loaded {
            self.icons_loaded = true;
            tk.set_icon(Widget::LintOkIcon, &Icon::new("check", Some(colors.lint_ok_icon)));
            tk.set_icon(Widget::LintErrorIcon, &Icon::new("cross", Some(colors.lint_error_icon)));
            tk.set_icon(Widget::LintWarnIcon, &Icon::new("exclamation", colors.lint_warn_icon));
            tk.set_text(Widget::LintOkLabel, "ok");
        }

        let ok = errors == 0 && warnings == 0;
        if !ok {
            let errors = errors.to_string();
            if self.errors_text.update(errors.clone()) {
                tk.set_text(Widget::LintErrorLabel, &errors);
            }
            let warnings = warnings.to_string();
            if self.warnings_text.update(warnings.clone()) {
                tk.set_text(Widget::LintWarnLabel, &warnings);
            }
        }

        if self.ok_visible.update(ok) {
            let (shown, hidden) = if ok { (&OK_SET[..], &COUNT_SET[..]) } else { (&COUNT_SET[..], &OK_SET[..]) };
            for &widget in hidden {
                tk.hide(widget);
            }
            for &widget in shown {
                tk.show(widget);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toolkit::RecordingToolkit;

    fn visible_sets(tk: &RecordingToolkit) -> (bool, bool) {
        (
            OK_SET.iter().all(|&w| tk.is_visible(w)),
            COUNT_SET.iter().all(|&w| tk.is_visible(w)),
        )
    }

    #[test]
    fn sets_are_mutually_exclusive() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = LintField::default();

        field.redraw(0, 0, &colors, &mut tk);
        assert_eq!(visible_sets(&tk), (true, false));

        field.redraw(2, 1, &colors, &mut tk);
        assert_eq!(visible_sets(&tk), (false, true));
        assert_eq!(tk.text(Widget::LintErrorLabel), Some("2"));
        assert_eq!(tk.text(Widget::LintWarnLabel), Some("1"));

        field.redraw(0, 0, &colors, &mut tk);
        assert_eq!(visible_sets(&tk), (true, false));
    }

    #[test]
    fn icons_load_once_and_counts_diff_per_label() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = LintField::default();

        field.redraw(1, 0, &colors, &mut tk);
        field.redraw(1, 0, &colors, &mut tk);
        field.redraw(1, 4, &colors, &mut tk);

        assert_eq!(tk.calls_for(Widget::LintErrorIcon), 2); // one load, one show
        assert_eq!(tk.calls_for(Widget::LintErrorLabel), 2); // one text, one show
        assert_eq!(tk.calls_for(Widget::LintWarnLabel), 3);
    }
}

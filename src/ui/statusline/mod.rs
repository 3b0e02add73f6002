//! Statusline field renderers.
//!
//! Each field owns the caches for what it last drew and turns events into
//! the minimal set of toolkit calls. A field is dirty only between receiving
//! a changed value and issuing its draw call inside the same dispatch.
//!
//! # Fields
//!
//! - [`mode`]: Mode badge
//! - [`git`]: Branch indicator, fed by probe results
//! - [`file`]: File name, directory and file-type icon
//! - [`text`]: Filetype, encoding and cursor position labels
//! - [`lint`]: Error and warning counters

pub mod file;
pub mod git;
pub mod lint;
pub mod mode;
pub mod text;

pub use git::GitFollowUp;

use crate::domain::UpdateEvent;
use crate::ui::theme::ThemeColors;
use crate::ui::toolkit::{Toolkit, Widget};
use file::FileField;
use git::GitField;
use lint::LintField;
use mode::ModeField;
use text::{PositionField, TextField};

/// All statusline fields.
#[derive(Debug)]
pub struct Statusline {
    colors: ThemeColors,
    enabled: bool,
    mode: ModeField,
    git: GitField,
    file: FileField,
    filetype: TextField,
    encoding: TextField,
    position: PositionField,
    lint: LintField,
}

impl Statusline {
    /// Creates the fields. A disabled statusline hides its bar and ignores
    /// every event.
    #[must_use]
    pub fn new(colors: ThemeColors, enabled: bool) -> Self {
        Self {
            colors,
            enabled,
            mode: ModeField::default(),
            git: GitField::default(),
            file: FileField::default(),
            filetype: TextField::new(Widget::FiletypeLabel),
            encoding: TextField::new(Widget::EncodingLabel),
            position: PositionField::default(),
            lint: LintField::default(),
        }
    }

    /// Sets the bar's initial visibility.
    pub fn init<T: Toolkit>(&self, tk: &mut T) {
        if self.enabled {
            tk.show(Widget::Statusline);
        } else {
            tk.hide(Widget::Statusline);
        }
    }

    /// Whether the statusline draws at all.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Routes one event to the fields it concerns.
    ///
    /// Returns the git follow-up work the engine must schedule, if any.
    /// Palette events are not handled here.
    pub fn dispatch<T: Toolkit>(&mut self, event: &UpdateEvent, tk: &mut T) -> Option<GitFollowUp> {
        if !self.enabled {
            return None;
        }

        match event {
            UpdateEvent::BufEnter {
                path,
                filetype,
                encoding,
            } => {
                self.file.redraw(path, tk);
                self.filetype.redraw(filetype, tk);
                self.encoding.redraw(encoding, tk);
                return self.git.buf_enter(path);
            }
            UpdateEvent::CursorMoved { line, col } => self.position.redraw(*line, *col, tk),
            UpdateEvent::ModeChanged { mode } => self.mode.redraw(mode, &self.colors, tk),
            UpdateEvent::LintResult { errors, warnings } => self.lint.redraw(*errors, *warnings, &self.colors, tk),
            UpdateEvent::GitResult { dir, status } => self.git.probe_result(dir, status.clone(), &self.colors, tk),
            UpdateEvent::GitRefresh => self.git.refresh(&self.colors, tk),
            UpdateEvent::PaletteShow
            | UpdateEvent::PaletteHide
            | UpdateEvent::PalettePattern { .. }
            | UpdateEvent::PaletteResults { .. }
            | UpdateEvent::PaletteSelect { .. }
            | UpdateEvent::Resize { .. } => {}
        }
        None
    }

    /// Tells the git field that its requested refresh was never queued.
    pub fn git_refresh_lost(&mut self) {
        self.git.refresh_lost();
    }

    /// The git field, for inspection.
    #[must_use]
    pub const fn git(&self) -> &GitField {
        &self.git
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toolkit::RecordingToolkit;

    fn bufenter(path: &str) -> UpdateEvent {
        UpdateEvent::BufEnter {
            path: path.to_string(),
            filetype: "rust".to_string(),
            encoding: "utf-8".to_string(),
        }
    }

    #[test]
    fn repeated_events_draw_once() {
        let mut tk = RecordingToolkit::default();
        let mut statusline = Statusline::new(ThemeColors::default(), true);

        let events = [
            bufenter("/repo/src/main.rs"),
            UpdateEvent::CursorMoved { line: 4, col: 2 },
            UpdateEvent::ModeChanged {
                mode: "insert".to_string(),
            },
            UpdateEvent::LintResult { errors: 0, warnings: 0 },
        ];

        for event in &events {
            statusline.dispatch(event, &mut tk);
        }
        let first_pass = tk.calls().len();
        assert!(first_pass > 0);

        for event in &events {
            statusline.dispatch(event, &mut tk);
        }
        assert_eq!(tk.calls().len(), first_pass);
    }

    #[test]
    fn bufenter_requests_a_probe() {
        let mut tk = RecordingToolkit::default();
        let mut statusline = Statusline::new(ThemeColors::default(), true);

        let follow_up = statusline.dispatch(&bufenter("/repo/src/main.rs"), &mut tk);
        assert_eq!(
            follow_up,
            Some(GitFollowUp::Probe {
                dir: "/repo/src".into(),
                file: "/repo/src/main.rs".into(),
            })
        );
        assert_eq!(tk.text(Widget::FiletypeLabel), Some("rust"));
        assert_eq!(tk.text(Widget::EncodingLabel), Some("utf-8"));
    }

    #[test]
    fn disabled_statusline_ignores_events() {
        let mut tk = RecordingToolkit::default();
        let statusline_widget_calls = {
            let mut statusline = Statusline::new(ThemeColors::default(), false);
            statusline.init(&mut tk);
            assert_eq!(statusline.dispatch(&bufenter("/a.rs"), &mut tk), None);
            tk.calls().len()
        };
        assert_eq!(statusline_widget_calls, 1);
        assert!(!tk.is_visible(Widget::Statusline));
    }
}

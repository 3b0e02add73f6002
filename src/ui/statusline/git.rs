//! Branch indicator.
//!
//! The field never probes the repository itself. On a buffer change it asks
//! the engine to run a probe on a producer thread (see [`GitFollowUp`]) and
//! draws when the matching [`crate::domain::UpdateEvent::GitResult`] arrives.
//! A `hidden` latch decides whether the group is shown; it is set for
//! unnamed and terminal buffers and for directories outside a working tree.

use crate::domain::GitStatus;
use crate::ui::cache::ValueCache;
use crate::ui::icons;
use crate::ui::theme::ThemeColors;
use crate::ui::toolkit::{Icon, Toolkit, Widget};
use std::path::{Path, PathBuf};

/// Work the git field needs done outside the current dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitFollowUp {
    /// Queue a [`crate::domain::UpdateEvent::GitRefresh`] so the latch change is drawn.
    Refresh,
    /// Probe `dir` on a producer thread.
    Probe {
        /// Directory to probe.
        dir: PathBuf,
        /// The buffer that triggered the probe.
        file: PathBuf,
    },
}

/// Git part of the statusline.
#[derive(Debug)]
pub struct GitField {
    hidden: bool,
    probed_dir: Option<PathBuf>,
    status: Option<GitStatus>,
    visible: ValueCache<bool>,
    label: ValueCache<String>,
    icon_loaded: bool,
}

impl Default for GitField {
    fn default() -> Self {
        Self {
            hidden: true,
            probed_dir: None,
            status: None,
            visible: ValueCache::seeded(false),
            label: ValueCache::new(),
            icon_loaded: false,
        }
    }
}

impl GitField {
    /// Reacts to a buffer change. Never draws.
    pub fn buf_enter(&mut self, path: &str) -> Option<GitFollowUp> {
        if path.is_empty() || icons::is_transient(path) {
            self.probed_dir = None;
            self.status = None;
            if self.hidden {
                return None;
            }
            self.hidden = true;
            return Some(GitFollowUp::Refresh);
        }

        let file = PathBuf::from(path);
        let dir = parent_dir(&file);
        if self.probed_dir.as_deref() == Some(dir.as_path()) {
            return None;
        }

        tracing::debug!(dir = %dir.display(), "git probe requested");
        self.probed_dir = Some(dir.clone());
        Some(GitFollowUp::Probe { dir, file })
    }

    /// Re-arms the latch after a requested refresh could not be queued, so
    /// the next transient buffer asks again. The status stays cleared.
    pub fn refresh_lost(&mut self) {
        self.hidden = false;
    }

    /// Applies a probe outcome. Outcomes for a directory other than the one
    /// most recently requested are stale and dropped.
    pub fn probe_result<T: Toolkit>(
        &mut self,
        dir: &Path,
        status: Option<GitStatus>,
        colors: &ThemeColors,
        tk: &mut T,
    ) {
        if self.probed_dir.as_deref() != Some(dir) {
            tracing::debug!(dir = %dir.display(), "stale git result ignored");
            return;
        }

        match status {
            None => {
                self.status = None;
                self.hidden = true;
            }
            Some(status) => {
                let changed = self.status.as_ref().map_or(true, |current| !current.same_display(&status));
                if !changed && !self.hidden {
                    self.status = Some(status);
                    return;
                }
                self.status = Some(status);
                self.hidden = false;
            }
        }

        self.refresh(colors, tk);
    }

    /// Draws the current latch state.
    pub fn refresh<T: Toolkit>(&mut self, colors: &ThemeColors, tk: &mut T) {
        let status = match (&self.status, self.hidden) {
            (Some(status), false) => status,
            _ => {
                if self.visible.update(false) {
                    tk.hide(Widget::GitGroup);
                }
                return;
            }
        };

        let label = status.label();
        if self.label.update(label.clone()) {
            tk.set_text(Widget::GitLabel, &label);
        }
        if !self.icon_loaded {
            self.icon_loaded = true;
            tk.set_icon(Widget::GitIcon, &Icon::new("git", Some(colors.git_icon)));
        }
        if self.visible.update(true) {
            tk.show(Widget::GitGroup);
        }
    }

    /// The status currently displayed, if any.
    #[must_use]
    pub fn status(&self) -> Option<&GitStatus> {
        self.status.as_ref().filter(|_| !self.hidden)
    }
}

fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toolkit::RecordingToolkit;

    fn status(branch: &str, dirty: bool) -> Option<GitStatus> {
        Some(GitStatus {
            branch: branch.to_string(),
            dirty,
            source_file: PathBuf::from("/repo/a.rs"),
        })
    }

    #[test]
    fn same_directory_is_probed_once() {
        let mut field = GitField::default();
        assert!(matches!(field.buf_enter("/repo/a.rs"), Some(GitFollowUp::Probe { .. })));
        assert_eq!(field.buf_enter("/repo/b.rs"), None);
        assert!(matches!(field.buf_enter("/other/c.rs"), Some(GitFollowUp::Probe { .. })));
    }

    #[test]
    fn result_shows_group_with_dirty_suffix() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = GitField::default();

        field.buf_enter("/repo/a.rs");
        field.probe_result(Path::new("/repo"), status("main", true), &colors, &mut tk);

        assert!(tk.is_visible(Widget::GitGroup));
        assert_eq!(tk.text(Widget::GitLabel), Some("main*"));
        assert_eq!(tk.icon(Widget::GitIcon).map(|i| i.name.as_str()), Some("git"));
    }

    #[test]
    fn stale_result_is_ignored() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = GitField::default();

        field.buf_enter("/repo/a.rs");
        field.buf_enter("/other/b.rs");
        field.probe_result(Path::new("/repo"), status("main", false), &colors, &mut tk);

        assert!(tk.calls().is_empty());
        assert!(field.status().is_none());
    }

    #[test]
    fn terminal_buffer_queues_refresh_once() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = GitField::default();

        field.buf_enter("/repo/a.rs");
        field.probe_result(Path::new("/repo"), status("main", false), &colors, &mut tk);
        tk.clear_calls();

        assert_eq!(field.buf_enter("term://~//1:/bin/sh"), Some(GitFollowUp::Refresh));
        assert!(tk.calls().is_empty());
        assert_eq!(field.buf_enter(""), None);

        field.refresh(&colors, &mut tk);
        assert!(!tk.is_visible(Widget::GitGroup));

        // Coming back re-probes and re-shows with the label cached.
        assert!(matches!(field.buf_enter("/repo/a.rs"), Some(GitFollowUp::Probe { .. })));
        field.probe_result(Path::new("/repo"), status("main", false), &colors, &mut tk);
        assert!(tk.is_visible(Widget::GitGroup));
        assert_eq!(tk.calls_for(Widget::GitLabel), 0);
    }

    #[test]
    fn lost_refresh_is_requested_again() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = GitField::default();

        field.buf_enter("/repo/a.rs");
        field.probe_result(Path::new("/repo"), status("main", false), &colors, &mut tk);
        assert_eq!(field.buf_enter("term://~//1:/bin/sh"), Some(GitFollowUp::Refresh));

        field.refresh_lost();
        assert!(field.status().is_none());
        assert_eq!(field.buf_enter("term://~//2:/bin/sh"), Some(GitFollowUp::Refresh));
        assert_eq!(field.buf_enter(""), None);

        field.refresh(&colors, &mut tk);
        assert!(!tk.is_visible(Widget::GitGroup));
    }

    #[test]
    fn failed_probe_hides_the_group() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = GitField::default();

        field.buf_enter("/repo/a.rs");
        field.probe_result(Path::new("/repo"), status("main", false), &colors, &mut tk);
        field.buf_enter("/tmp/x.txt");
        field.probe_result(Path::new("/tmp"), None, &colors, &mut tk);

        assert!(!tk.is_visible(Widget::GitGroup));
    }

    #[test]
    fn unchanged_status_draws_nothing() {
        let colors = ThemeColors::default();
        let mut tk = RecordingToolkit::default();
        let mut field = GitField::default();

        field.buf_enter("/repo/a.rs");
        field.probe_result(Path::new("/repo"), status("main", false), &colors, &mut tk);
        field.buf_enter("/repo/sub/b.rs");
        tk.clear_calls();
        field.probe_result(Path::new("/repo/sub"), status("main", false), &colors, &mut tk);

        assert!(tk.calls().is_empty());
    }
}

//! Version-control status shown in the statusline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Branch and working-tree state of the directory holding the active file.
///
/// Replaced wholesale on every probe; equality for redraw purposes is the
/// `(branch, dirty)` pair, see [`GitStatus::same_display`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStatus {
    /// Checked-out branch, or the ref a detached HEAD points at.
    pub branch: String,
    /// Whether the working tree has uncommitted changes.
    pub dirty: bool,
    /// File whose directory was probed.
    pub source_file: PathBuf,
}

impl GitStatus {
    /// Text for the statusline label: the branch, suffixed with `*` when dirty.
    ///
    /// ```
    /// use veneer::domain::GitStatus;
    ///
    /// let status = GitStatus { branch: "main".into(), dirty: true, source_file: "a.rs".into() };
    /// assert_eq!(status.label(), "main*");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        if self.dirty {
            format!("{}*", self.branch)
        } else {
            self.branch.clone()
        }
    }

    /// Whether two statuses render identically.
    #[must_use]
    pub fn same_display(&self, other: &Self) -> bool {
        self.branch == other.branch && self.dirty == other.dirty
    }
}

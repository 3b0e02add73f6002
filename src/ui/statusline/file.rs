//! File name, containing directory and file-type icon.
//!
//! The three parts are diffed independently. Switching between two files of
//! the same category keeps the loaded icon; switching between files in one
//! directory leaves the directory label alone.

use crate::ui::cache::ValueCache;
use crate::ui::icons;
use crate::ui::toolkit::{Icon, Toolkit, Widget};
use std::path::Path;

/// Shown for buffers without a path.
pub const NO_NAME: &str = "[No Name]";

/// File part of the statusline.
#[derive(Debug, Default)]
pub struct FileField {
    file: ValueCache<String>,
    icon: ValueCache<&'static str>,
    base: ValueCache<String>,
    dir: ValueCache<String>,
}

impl FileField {
    /// Applies the path of a newly entered buffer.
    pub fn redraw<T: Toolkit>(&mut self, path: &str, tk: &mut T) {
        let path = if path.is_empty() { NO_NAME } else { path };
        if !self.file.update(path.to_string()) {
            return;
        }

        let (base, dir) = split(path);
        let category = icons::file_type(path);

        if self.icon.update(category) {
            tk.set_icon(Widget::FileIcon, &Icon::new(category, None));
        }
        if self.base.update(base.clone()) {
            tk.set_text(Widget::FileLabel, &base);
        }
        if self.dir.update(dir.clone()) {
            tk.set_text(Widget::FolderLabel, &dir);
        }
    }
}

/// Splits into base name and directory. A `.` directory displays as empty and
/// transient buffers keep their full name with no directory.
fn split(path: &str) -> (String, String) {
    if icons::is_transient(path) {
        return (path.to_string(), String::new());
    }

    let p = Path::new(path);
    let base = p
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().into_owned());
    let dir = match p.parent().map(|d| d.to_string_lossy().into_owned()) {
        Some(d) if d.is_empty() || d == "." => String::new(),
        Some(d) => d,
        None => String::new(),
    };
    (base, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toolkit::RecordingToolkit;

    #[test]
    fn unnamed_buffer() {
        let mut tk = RecordingToolkit::default();
        let mut field = FileField::default();

        field.redraw("", &mut tk);
        assert_eq!(tk.text(Widget::FileLabel), Some(NO_NAME));
        assert_eq!(tk.text(Widget::FolderLabel), Some(""));
    }

    #[test]
    fn same_category_keeps_icon() {
        let mut tk = RecordingToolkit::default();
        let mut field = FileField::default();

        field.redraw("/src/app/mod.rs", &mut tk);
        field.redraw("/src/app/queue.rs", &mut tk);
        assert_eq!(tk.calls_for(Widget::FileIcon), 1);
        assert_eq!(tk.calls_for(Widget::FolderLabel), 1);
        assert_eq!(tk.calls_for(Widget::FileLabel), 2);
        assert_eq!(tk.text(Widget::FolderLabel), Some("/src/app"));

        field.redraw("/src/app/README.md", &mut tk);
        assert_eq!(tk.icon(Widget::FileIcon).map(|i| i.name.as_str()), Some("markdown"));
    }

    #[test]
    fn terminal_buffer_is_shown_verbatim() {
        let mut tk = RecordingToolkit::default();
        let mut field = FileField::default();

        field.redraw("term://~/src//4242:/bin/zsh", &mut tk);
        assert_eq!(tk.text(Widget::FileLabel), Some("term://~/src//4242:/bin/zsh"));
        assert_eq!(tk.text(Widget::FolderLabel), Some(""));
        assert_eq!(tk.icon(Widget::FileIcon).map(|i| i.name.as_str()), Some("terminal"));
    }

    #[test]
    fn relative_name_has_empty_directory() {
        assert_eq!(split("notes.txt"), ("notes.txt".to_string(), String::new()));
        assert_eq!(split("/"), ("/".to_string(), String::new()));
    }
}

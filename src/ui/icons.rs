//! File-type icon categories.
//!
//! Icons are keyed by a category name rather than by file. Renderers cache the
//! category, so moving between two Rust files keeps the loaded icon and only
//! the label changes.

/// Category for buffers without a recognised extension.
pub const DEFAULT_ICON: &str = "default";
/// Category for terminal buffers.
pub const TERMINAL_ICON: &str = "terminal";
/// Category for directory entries.
pub const FOLDER_ICON: &str = "folder";
/// Category for `line:text` matches inside a file.
pub const LINE_ICON: &str = "empty";

/// Scheme prefix the editor gives to terminal buffers.
pub const TERMINAL_SCHEME: &str = "term://";

/// Whether `path` names a transient terminal buffer rather than a file.
#[must_use]
pub fn is_transient(path: &str) -> bool {
    path.starts_with(TERMINAL_SCHEME)
}

/// Maps a path to its icon category.
///
/// ```
/// use veneer::ui::icons::file_type;
///
/// assert_eq!(file_type("/src/lib.rs"), "rust");
/// assert_eq!(file_type("Makefile"), "makefile");
/// assert_eq!(file_type("term://~//42:/bin/zsh"), "terminal");
/// assert_eq!(file_type("notes"), "default");
/// ```
#[must_use]
pub fn file_type(path: &str) -> &'static str {
    if is_transient(path) {
        return TERMINAL_ICON;
    }

    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name {
        "Makefile" | "makefile" | "GNUmakefile" => return "makefile",
        "Dockerfile" => return "docker",
        "Cargo.lock" | "go.sum" | "package-lock.json" | "yarn.lock" => return "lock",
        _ => {}
    }

    let Some((stem, ext)) = name.rsplit_once('.') else {
        return DEFAULT_ICON;
    };
    if stem.is_empty() {
        return DEFAULT_ICON;
    }

    match ext.to_ascii_lowercase().as_str() {
        "rs" => "rust",
        "go" => "go",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" | "hh" => "cpp",
        "py" | "pyi" => "python",
        "rb" => "ruby",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "java" => "java",
        "lua" => "lua",
        "vim" => "vim",
        "sh" | "bash" | "zsh" | "fish" => "shell",
        "html" | "htm" => "html",
        "css" | "scss" | "sass" | "less" => "css",
        "json" => "json",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "md" | "markdown" => "markdown",
        "txt" => "text",
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "ico" => "image",
        _ => DEFAULT_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(file_type("README.MD"), "markdown");
        assert_eq!(file_type("a/b/c.Go"), "go");
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(file_type("/home/u/.bashrc"), DEFAULT_ICON);
        assert_eq!(file_type("/home/u/"), DEFAULT_ICON);
    }

    #[test]
    fn terminal_buffers_are_transient() {
        assert!(is_transient("term://~//1234:/bin/bash"));
        assert!(!is_transient("/tmp/term://x"));
    }
}

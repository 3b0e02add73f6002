//! Fuzzy-finder result entries.
//!
//! A [`ResultEntry`] is one ranked match produced by the fuzzy engine. The
//! whole sequence is replaced on every query; the palette diffs at the row
//! level, never at this layer.

use serde::{Deserialize, Serialize};

/// Kind of a result entry, which decides its icon and whether its text is a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// A file path.
    File,
    /// A directory path.
    Dir,
    /// A `line:text` match inside a file, grouped under a preceding `File` header.
    FileLine,
    /// A plain string such as a command name. Carries no icon.
    Plain,
}

impl EntryType {
    /// Parses the editor's wire name for an entry type.
    ///
    /// Unknown names fall back to [`EntryType::Plain`].
    ///
    /// ```
    /// use veneer::domain::EntryType;
    ///
    /// assert_eq!(EntryType::from_wire("file_line"), EntryType::FileLine);
    /// assert_eq!(EntryType::from_wire("command"), EntryType::Plain);
    /// ```
    #[must_use]
    pub fn from_wire(name: &str) -> Self {
        match name {
            "file" => Self::File,
            "dir" => Self::Dir,
            "file_line" => Self::FileLine,
            _ => Self::Plain,
        }
    }

    /// Whether the entry text is a filesystem path.
    #[must_use]
    pub const fn is_path(self) -> bool {
        matches!(self, Self::File | Self::Dir)
    }
}

/// How a result set is navigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultMode {
    /// Every entry is selectable; logical and physical indices coincide.
    #[default]
    Flat,
    /// "Jump to line within file": `FileLine` entries are grouped under `File`
    /// headers and only the headers take part in selection.
    FileLine,
}

impl ResultMode {
    /// Parses the editor's result-type name.
    #[must_use]
    pub fn from_wire(name: &str) -> Self {
        if name == "file_line" {
            Self::FileLine
        } else {
            Self::Flat
        }
    }
}

/// One ranked fuzzy match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Full entry text (a path for `File`/`Dir` entries).
    pub text: String,
    /// Entry kind.
    pub entry_type: EntryType,
    /// Matched character indices into `text`, ascending.
    #[serde(default)]
    pub highlight_positions: Vec<usize>,
}

impl ResultEntry {
    /// Creates an entry with no highlighted characters.
    #[must_use]
    pub fn new(text: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            text: text.into(),
            entry_type,
            highlight_positions: Vec::new(),
        }
    }

    /// Attaches highlight positions, sorting them ascending.
    #[must_use]
    pub fn with_highlights(mut self, mut positions: Vec<usize>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        self.highlight_positions = positions;
        self
    }
}

//! Render-context events and the RPC decode boundary.
//!
//! The editor delivers untyped tuples on the `statusline` channel, e.g.
//! `["bufenter", "/src/main.rs", "rust", "utf-8"]`. [`UpdateEvent::decode`]
//! turns them into a closed enum with one variant per kind so that the rest of
//! the crate never inspects raw payloads. Unknown kinds and malformed payloads
//! are rejected here as [`VeneerError::Decode`].
//!
//! Two variants never come off the wire: [`UpdateEvent::GitResult`] is sent by
//! the probe thread and [`UpdateEvent::GitRefresh`] is queued by the git field
//! itself when its visibility changes.

use crate::domain::entry::{EntryType, ResultEntry, ResultMode};
use crate::domain::error::{Result, VeneerError};
use crate::domain::git::GitStatus;
use serde_json::Value;
use std::path::PathBuf;

/// One state change destined for the render context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    /// A buffer gained focus.
    BufEnter {
        /// Absolute path of the buffer, empty for unnamed buffers.
        path: String,
        /// Editor filetype.
        filetype: String,
        /// File encoding.
        encoding: String,
    },

    /// The cursor moved.
    CursorMoved {
        /// One-based line.
        line: usize,
        /// One-based column including the virtual offset.
        col: usize,
    },

    /// The editor switched modes.
    ModeChanged {
        /// Mode name as reported by the editor (`normal`, `insert`, ...).
        mode: String,
    },

    /// Diagnostics were recomputed for the active buffer.
    LintResult {
        /// Number of errors.
        errors: usize,
        /// Number of warnings.
        warnings: usize,
    },

    /// A VCS probe finished on a producer thread.
    GitResult {
        /// Directory that was probed.
        dir: PathBuf,
        /// Probe outcome, `None` when the directory is not a working tree.
        status: Option<GitStatus>,
    },

    /// The git field's visibility changed and must be redrawn.
    GitRefresh,

    /// The finder palette opened.
    PaletteShow,

    /// The finder palette closed.
    PaletteHide,

    /// The finder query changed.
    PalettePattern {
        /// Query text.
        text: String,
        /// Cursor position within the query, in characters.
        cursor: usize,
    },

    /// A new ranked result set replaced the previous one.
    PaletteResults {
        /// Navigation mode for the set.
        mode: ResultMode,
        /// Ranked entries.
        entries: Vec<ResultEntry>,
        /// Logical selection.
        selected: usize,
    },

    /// The logical selection moved.
    PaletteSelect {
        /// Logical selection.
        selected: usize,
    },

    /// The window was resized.
    Resize {
        /// Available display height in pixels.
        height: u32,
    },
}

impl UpdateEvent {
    /// Short kind name used in logs and spans.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BufEnter { .. } => "bufenter",
            Self::CursorMoved { .. } => "cursormoved",
            Self::ModeChanged { .. } => "mode",
            Self::LintResult { .. } => "lint",
            Self::GitResult { .. } => "git_result",
            Self::GitRefresh => "git_refresh",
            Self::PaletteShow => "palette_show",
            Self::PaletteHide => "palette_hide",
            Self::PalettePattern { .. } => "palette_pattern",
            Self::PaletteResults { .. } => "palette_results",
            Self::PaletteSelect { .. } => "palette_select",
            Self::Resize { .. } => "resize",
        }
    }

    /// Whether the event targets the finder palette rather than the statusline.
    #[must_use]
    pub const fn is_palette(&self) -> bool {
        matches!(
            self,
            Self::PaletteShow
                | Self::PaletteHide
                | Self::PalettePattern { .. }
                | Self::PaletteResults { .. }
                | Self::PaletteSelect { .. }
                | Self::Resize { .. }
        )
    }

    /// Decodes an editor notification tuple.
    ///
    /// The first element names the kind; the remaining elements are the
    /// kind-specific payload.
    ///
    /// # Errors
    ///
    /// Returns [`VeneerError::Decode`] for an empty tuple, an unknown kind, or a
    /// payload whose shape does not match the kind.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use veneer::domain::UpdateEvent;
    ///
    /// let raw = [json!("cursormoved"), json!([0, 12, 4, 1])];
    /// let event = UpdateEvent::decode(&raw)?;
    /// assert_eq!(event, UpdateEvent::CursorMoved { line: 12, col: 5 });
    /// # Ok::<(), veneer::VeneerError>(())
    /// ```
    pub fn decode(tuple: &[Value]) -> Result<Self> {
        let (head, payload) = tuple
            .split_first()
            .ok_or_else(|| VeneerError::Decode("empty event tuple".to_string()))?;
        let kind = head
            .as_str()
            .ok_or_else(|| VeneerError::Decode(format!("event kind is not a string: {head}")))?;

        match kind {
            "bufenter" => Ok(Self::BufEnter {
                path: string_at(payload, 0, kind)?,
                filetype: string_at(payload, 1, kind)?,
                encoding: string_at(payload, 2, kind)?,
            }),
            "cursormoved" => {
                let pos = payload
                    .first()
                    .and_then(Value::as_array)
                    .ok_or_else(|| VeneerError::Decode("cursormoved: missing position list".to_string()))?;
                let line = uint_at(pos, 1, kind)?;
                let col = uint_at(pos, 2, kind)?
                    .checked_add(uint_at(pos, 3, kind)?)
                    .ok_or_else(|| VeneerError::Decode("cursormoved: column out of range".to_string()))?;
                Ok(Self::CursorMoved { line, col })
            }
            "mode" => Ok(Self::ModeChanged {
                mode: string_at(payload, 0, kind)?,
            }),
            "lint" => Ok(Self::LintResult {
                errors: uint_at(payload, 0, kind)?,
                warnings: uint_at(payload, 1, kind)?,
            }),
            "palette_show" => Ok(Self::PaletteShow),
            "palette_hide" => Ok(Self::PaletteHide),
            "palette_pattern" => Ok(Self::PalettePattern {
                text: string_at(payload, 0, kind)?,
                cursor: optional_uint_at(payload, 1, kind)?,
            }),
            "palette_results" => {
                let mode = ResultMode::from_wire(&string_at(payload, 0, kind)?);
                let entries = payload
                    .get(1)
                    .and_then(Value::as_array)
                    .ok_or_else(|| VeneerError::Decode("palette_results: missing entry list".to_string()))?
                    .iter()
                    .map(decode_entry)
                    .collect::<Result<Vec<_>>>()?;
                let selected = optional_uint_at(payload, 2, kind)?;
                Ok(Self::PaletteResults { mode, entries, selected })
            }
            "palette_select" => Ok(Self::PaletteSelect {
                selected: uint_at(payload, 0, kind)?,
            }),
            "resize" => {
                let height = uint_at(payload, 0, kind)?;
                let height = u32::try_from(height)
                    .map_err(|_| VeneerError::Decode(format!("resize: height {height} out of range")))?;
                Ok(Self::Resize { height })
            }
            other => Err(VeneerError::Decode(format!("unrecognized event kind '{other}'"))),
        }
    }
}

fn string_at(payload: &[Value], index: usize, kind: &str) -> Result<String> {
    payload
        .get(index)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| VeneerError::Decode(format!("{kind}: expected string at position {index}")))
}

/// Like [`uint_at`], but a missing or non-integer element reads as 0.
fn optional_uint_at(payload: &[Value], index: usize, kind: &str) -> Result<usize> {
    payload.get(index).and_then(Value::as_u64).map_or(Ok(0), |n| {
        usize::try_from(n).map_err(|_| VeneerError::Decode(format!("{kind}: {n} out of range at position {index}")))
    })
}

fn uint_at(payload: &[Value], index: usize, kind: &str) -> Result<usize> {
    payload
        .get(index)
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| VeneerError::Decode(format!("{kind}: expected unsigned integer at position {index}")))
}

/// Entries arrive either as `[text, type, [positions]]` tuples or as objects.
fn decode_entry(raw: &Value) -> Result<ResultEntry> {
    if let Some(tuple) = raw.as_array() {
        let text = string_at(tuple, 0, "entry")?;
        let entry_type = tuple
            .get(1)
            .and_then(Value::as_str)
            .map_or(EntryType::Plain, EntryType::from_wire);
        let positions = tuple
            .get(2)
            .and_then(Value::as_array)
            .map(|ps| {
                ps.iter()
                    .filter_map(Value::as_u64)
                    .filter_map(|p| usize::try_from(p).ok())
                    .collect()
            })
            .unwrap_or_default();
        return Ok(ResultEntry::new(text, entry_type).with_highlights(positions));
    }

    serde_json::from_value::<ResultEntry>(raw.clone())
        .map(|mut entry| {
            let positions = std::mem::take(&mut entry.highlight_positions);
            entry.with_highlights(positions)
        })
        .map_err(|e| VeneerError::Decode(format!("entry: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_bufenter() {
        let raw = [json!("bufenter"), json!("/tmp/a.rs"), json!("rust"), json!("utf-8")];
        assert_eq!(
            UpdateEvent::decode(&raw).unwrap(),
            UpdateEvent::BufEnter {
                path: "/tmp/a.rs".into(),
                filetype: "rust".into(),
                encoding: "utf-8".into(),
            }
        );
    }

    #[test]
    fn cursor_column_adds_virtual_offset() {
        let raw = [json!("cursormoved"), json!([3, 7, 2, 5])];
        assert_eq!(
            UpdateEvent::decode(&raw).unwrap(),
            UpdateEvent::CursorMoved { line: 7, col: 7 }
        );
    }

    #[test]
    fn overflowing_cursor_column_is_a_decode_error() {
        let raw = [json!("cursormoved"), json!([0, 1, u64::MAX, 1])];
        let err = UpdateEvent::decode(&raw).unwrap_err();
        assert!(matches!(err, VeneerError::Decode(msg) if msg.contains("cursormoved")));
    }

    #[test]
    fn optional_indices_default_to_zero() {
        let raw = [json!("palette_pattern"), json!("abc")];
        assert_eq!(
            UpdateEvent::decode(&raw).unwrap(),
            UpdateEvent::PalettePattern {
                text: "abc".into(),
                cursor: 0,
            }
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = UpdateEvent::decode(&[json!("winenter")]).unwrap_err();
        assert!(matches!(err, VeneerError::Decode(msg) if msg.contains("winenter")));
    }

    #[test]
    fn rejects_wrong_payload_shape() {
        let raw = [json!("lint"), json!("three"), json!(1)];
        assert!(UpdateEvent::decode(&raw).is_err());
        assert!(UpdateEvent::decode(&[]).is_err());
        assert!(UpdateEvent::decode(&[json!(42)]).is_err());
    }

    #[test]
    fn decodes_palette_results_in_both_entry_shapes() {
        let raw = [
            json!("palette_results"),
            json!("file_line"),
            json!([
                ["a.go", "file", [0]],
                {"text": "1:foo", "entry_type": "file_line", "highlight_positions": [3, 2]}
            ]),
            json!(1),
        ];
        let UpdateEvent::PaletteResults { mode, entries, selected } = UpdateEvent::decode(&raw).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(mode, ResultMode::FileLine);
        assert_eq!(selected, 1);
        assert_eq!(entries[0].entry_type, EntryType::File);
        assert_eq!(entries[1].highlight_positions, vec![2, 3]);
    }
}

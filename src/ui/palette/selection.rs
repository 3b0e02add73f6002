//! Logical-to-physical selection translation.
//!
//! The finder reports the selection as a logical index. In
//! [`ResultMode::FileLine`] only the `File` headers are selectable, so logical
//! `k` is the `k`-th entry that is not a `FileLine` match. In every other mode
//! logical and physical indices coincide.
//!
//! The translation is total. An index past the end clamps to the last
//! selectable entry, and a list with nothing selectable yields `None`. It is
//! recomputed from scratch on every call.

use crate::domain::{EntryType, ResultMode};

/// Maps a logical selection to an index into `types`.
///
/// ```
/// use veneer::domain::{EntryType::*, ResultMode};
/// use veneer::ui::palette::selection::translate;
///
/// let types = [File, FileLine, FileLine, File, FileLine];
/// assert_eq!(translate(ResultMode::FileLine, &types, 0), Some(0));
/// assert_eq!(translate(ResultMode::FileLine, &types, 1), Some(3));
/// ```
#[must_use]
pub fn translate(mode: ResultMode, types: &[EntryType], logical: usize) -> Option<usize> {
    match mode {
        ResultMode::Flat => types.len().checked_sub(1).map(|last| logical.min(last)),
        ResultMode::FileLine => {
            let selectable = types
                .iter()
                .enumerate()
                .filter(|(_, t)| **t != EntryType::FileLine)
                .map(|(i, _)| i);
            let mut last = None;
            for (n, physical) in selectable.enumerate() {
                if n == logical {
                    return Some(physical);
                }
                last = Some(physical);
            }
            last
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EntryType::{Dir, File, FileLine, Plain};

    const GROUPED: [EntryType; 5] = [File, FileLine, FileLine, File, FileLine];

    #[test]
    fn file_line_mode_skips_matches() {
        assert_eq!(translate(ResultMode::FileLine, &GROUPED, 0), Some(0));
        assert_eq!(translate(ResultMode::FileLine, &GROUPED, 1), Some(3));
    }

    #[test]
    fn out_of_range_clamps_to_last_selectable() {
        assert_eq!(translate(ResultMode::FileLine, &GROUPED, 7), Some(3));
        assert_eq!(translate(ResultMode::Flat, &[Plain, Dir], 9), Some(1));
    }

    #[test]
    fn nothing_selectable_is_none() {
        assert_eq!(translate(ResultMode::Flat, &[], 0), None);
        assert_eq!(translate(ResultMode::FileLine, &[], 0), None);
        assert_eq!(translate(ResultMode::FileLine, &[FileLine, FileLine], 0), None);
    }

    #[test]
    fn flat_mode_is_identity() {
        let types = [File, FileLine, Dir];
        for k in 0..3 {
            assert_eq!(translate(ResultMode::Flat, &types, k), Some(k));
        }
    }
}

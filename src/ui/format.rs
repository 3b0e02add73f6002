//! Rich-text formatting for palette row labels.
//!
//! Highlight positions are character indices into the entry's full text. Matched
//! characters are wrapped in `<font color='..'>` tags using the theme's match
//! color, with runs of adjacent matches sharing one tag. Path entries are
//! rearranged to show the base name first followed by the containing
//! directory in the dimmed color, so the positions are remapped per segment.
//!
//! Once any markup is emitted the text is escaped: `<`, `>` and `&` become
//! entities, spaces become `&nbsp;` and tabs become four of them.

use crate::ui::theme::{Rgba, ThemeColors};
use std::fmt::Write;
use std::ops::Range;

/// Formats an entry's label.
///
/// # Parameters
///
/// * `text` - Full entry text
/// * `positions` - Matched character indices, ascending
/// * `is_path` - Whether to split `text` into base name and directory
/// * `colors` - Source of the match and dim colors
///
/// # Example
///
/// ```
/// use veneer::ui::format::format_text;
/// use veneer::ui::theme::ThemeColors;
///
/// let colors = ThemeColors::default();
/// assert_eq!(format_text("a b", &[], false, &colors), "a b");
/// assert_eq!(
///     format_text("ab", &[1], false, &colors),
///     "a<font color='#5fb3b3'>b</font>"
/// );
/// ```
#[must_use]
pub fn format_text(text: &str, positions: &[usize], is_path: bool, colors: &ThemeColors) -> String {
    let chars: Vec<char> = text.chars().collect();
    let (base, dir) = if is_path {
        split_path(&chars)
    } else {
        (0..chars.len(), None)
    };
    let markup = !positions.is_empty() || dir.is_some();

    let mut out = String::with_capacity(text.len() * 2);
    write_segment(&mut out, &chars, base, positions, colors.match_fg, markup);

    if let Some(dir) = dir {
        out.push_str("&nbsp;");
        let _ = write!(out, "<font color='{}'>", colors.dim_fg);
        write_segment(&mut out, &chars, dir, positions, colors.match_fg, markup);
        out.push_str("</font>");
    }

    out
}

/// Splits a path into base-name and directory ranges. A single trailing
/// separator belongs to the base name, so `src/ui/` splits as `ui/` + `src`.
fn split_path(chars: &[char]) -> (Range<usize>, Option<Range<usize>>) {
    let search_end = match chars.last() {
        Some('/') => chars.len() - 1,
        _ => chars.len(),
    };

    match chars[..search_end].iter().rposition(|&c| c == '/') {
        Some(0) => (1..chars.len(), Some(0..1)),
        Some(sep) => (sep + 1..chars.len(), Some(0..sep)),
        None => (0..chars.len(), None),
    }
}

fn write_segment(out: &mut String, chars: &[char], range: Range<usize>, positions: &[usize], color: Rgba, escape: bool) {
    let mut open = false;
    for i in range {
        let matched = positions.binary_search(&i).is_ok();
        if matched && !open {
            let _ = write!(out, "<font color='{color}'>");
            open = true;
        } else if !matched && open {
            out.push_str("</font>");
            open = false;
        }
        push_char(out, chars[i], escape);
    }
    if open {
        out.push_str("</font>");
    }
}

fn push_char(out: &mut String, c: char, escape: bool) {
    if !escape {
        out.push(c);
        return;
    }
    match c {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        ' ' => out.push_str("&nbsp;"),
        '\t' => out.push_str("&nbsp;&nbsp;&nbsp;&nbsp;"),
        _ => out.push(c),
    }
}

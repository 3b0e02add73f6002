//! Virtualized fuzzy-finder result list.
//!
//! The palette owns a fixed pool of [`RowSlot`]s and an unbounded result
//! sequence. Only `show_total` slots are ever visible; the rest of the pool is
//! hidden, and a scroll offset picks which window of the sequence the visible
//! slots display.
//!
//! # Sizing
//!
//! `show_total = floor(height / row_height * 0.5) - 1`, saturating at zero and
//! clamped to the pool size. Whenever it changes the editor is told the new
//! cap through [`EditorCommand::SetResultCap`].
//!
//! # Selection
//!
//! The finder reports a logical selection which [`selection::translate`] maps
//! to a physical entry. The offset moves just enough to keep that entry inside
//! the visible window.

pub mod row;
pub mod selection;

pub use row::RowSlot;

use crate::app::actions::EditorCommand;
use crate::domain::{EntryType, ResultEntry, ResultMode, UpdateEvent};
use crate::ui::cache::ValueCache;
use crate::ui::theme::ThemeColors;
use crate::ui::toolkit::{Toolkit, Widget};

/// Number of row slots allocated up front.
pub const DEFAULT_POOL_SIZE: usize = 30;

/// Width of the scroll bar thumb in pixels.
const SCROLL_BAR_WIDTH: u32 = 5;

/// Inset of the query text and cursor inside the pattern box, in pixels.
const PATTERN_PADDING: i32 = 8;

/// Number of rows that fit in `height` pixels, bounded by `pool_size`.
///
/// ```
/// use veneer::ui::palette::show_total;
///
/// assert_eq!(show_total(240, 20, 30), 5);
/// assert_eq!(show_total(30, 20, 30), 0);
/// assert_eq!(show_total(10_000, 20, 30), 30);
/// ```
#[must_use]
pub fn show_total(height: u32, row_height: u32, pool_size: usize) -> usize {
    if row_height == 0 {
        return 0;
    }
    let rows = (u64::from(height) / (2 * u64::from(row_height))).saturating_sub(1);
    usize::try_from(rows).map_or(pool_size, |rows| rows.min(pool_size))
}

/// Horizontal cursor position after a query prefix `width` pixels wide.
fn pattern_cursor_x(width: u32) -> i32 {
    i32::try_from(width).unwrap_or(i32::MAX).saturating_add(PATTERN_PADDING)
}

/// The finder popup.
#[derive(Debug)]
pub struct Palette {
    colors: ThemeColors,
    rows: Vec<RowSlot>,
    show_total: usize,
    cap: ValueCache<usize>,
    visible: ValueCache<bool>,
    pattern: ValueCache<String>,
    cursor_x: ValueCache<i32>,
    scroll_bar: ValueCache<Option<(i32, u32)>>,
    mode: ResultMode,
    entries: Vec<ResultEntry>,
    types: Vec<EntryType>,
    selected: usize,
    physical: Option<usize>,
    offset: usize,
}

impl Palette {
    /// Allocates `pool_size` row slots. The palette starts hidden with no
    /// visible rows until the first resize.
    #[must_use]
    pub fn new(pool_size: usize, colors: ThemeColors) -> Self {
        Self {
            colors,
            rows: (0..pool_size).map(RowSlot::new).collect(),
            show_total: 0,
            cap: ValueCache::new(),
            visible: ValueCache::new(),
            pattern: ValueCache::new(),
            cursor_x: ValueCache::new(),
            scroll_bar: ValueCache::new(),
            mode: ResultMode::default(),
            entries: Vec::new(),
            types: Vec::new(),
            selected: 0,
            physical: None,
            offset: 0,
        }
    }

    /// Puts the toolkit in the palette's initial state.
    pub fn init<T: Toolkit>(&mut self, tk: &mut T) {
        self.hide(tk);
        for row in &mut self.rows {
            row.hide(tk);
        }
        self.refresh_scroll_bar(tk);
    }

    /// Routes palette events. Returns a command for the editor when the
    /// visible row count changed.
    pub fn dispatch<T: Toolkit>(&mut self, event: UpdateEvent, tk: &mut T) -> Option<EditorCommand> {
        match event {
            UpdateEvent::PaletteShow => self.show(tk),
            UpdateEvent::PaletteHide => self.hide(tk),
            UpdateEvent::PalettePattern { text, cursor } => self.set_pattern(&text, cursor, tk),
            UpdateEvent::PaletteResults {
                mode,
                entries,
                selected,
            } => self.set_results(mode, entries, selected, tk),
            UpdateEvent::PaletteSelect { selected } => self.select(selected, tk),
            UpdateEvent::Resize { height } => return self.resize(height, tk),
            _ => {}
        }
        None
    }

    /// Recomputes `show_total` from the available height and the row height
    /// the toolkit reports. Keeps the scroll offset and the selection.
    pub fn resize<T: Toolkit>(&mut self, height: u32, tk: &mut T) -> Option<EditorCommand> {
        let row_height = tk.size_hint(Widget::Row(0)).height;
        self.show_total = show_total(height, row_height, self.rows.len());
        tracing::debug!(height, row_height, show_total = self.show_total, "palette resized");

        self.keep_selection_visible();
        self.refresh_rows(tk);

        self.cap
            .update(self.show_total)
            .then_some(EditorCommand::SetResultCap(self.show_total))
    }

    /// Replaces the result sequence. The window returns to the top before the
    /// selection is applied.
    pub fn set_results<T: Toolkit>(&mut self, mode: ResultMode, entries: Vec<ResultEntry>, selected: usize, tk: &mut T) {
        self.mode = mode;
        self.types = entries.iter().map(|e| e.entry_type).collect();
        self.entries = entries;
        self.offset = 0;
        self.apply_selection(selected);
        self.refresh_rows(tk);
    }

    /// Moves the logical selection.
    pub fn select<T: Toolkit>(&mut self, selected: usize, tk: &mut T) {
        self.apply_selection(selected);
        self.refresh_rows(tk);
    }

    /// Shows the popup.
    pub fn show<T: Toolkit>(&mut self, tk: &mut T) {
        if self.visible.update(true) {
            tk.show(Widget::Palette);
        }
    }

    /// Hides the popup. Results are kept.
    pub fn hide<T: Toolkit>(&mut self, tk: &mut T) {
        if self.visible.update(false) {
            tk.hide(Widget::Palette);
        }
    }

    /// Sets the query text and places the cursor after `cursor` characters.
    pub fn set_pattern<T: Toolkit>(&mut self, text: &str, cursor: usize, tk: &mut T) {
        if self.pattern.update(text.to_string()) {
            tk.set_text(Widget::PalettePattern, text);
        }

        let prefix: String = text.chars().take(cursor).collect();
        let x = pattern_cursor_x(tk.text_width(&prefix));
        if self.cursor_x.update(x) {
            tk.move_to(Widget::PaletteCursor, x, PATTERN_PADDING);
        }
    }

    /// Rows currently visible.
    #[must_use]
    pub const fn show_total(&self) -> usize {
        self.show_total
    }

    /// Index of the first entry in the visible window.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Logical selection as last reported.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Physical entry the selection resolves to.
    #[must_use]
    pub const fn selected_entry(&self) -> Option<usize> {
        self.physical
    }

    /// Number of entries in the current result set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the result set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn apply_selection(&mut self, selected: usize) {
        self.selected = selected;
        self.physical = selection::translate(self.mode, &self.types, selected);
        self.keep_selection_visible();
    }

    fn keep_selection_visible(&mut self) {
        let (Some(physical), true) = (self.physical, self.show_total > 0) else {
            return;
        };
        if physical < self.offset {
            self.offset = physical;
        } else if physical >= self.offset + self.show_total {
            self.offset = physical + 1 - self.show_total;
        }
    }

    fn refresh_rows<T: Toolkit>(&mut self, tk: &mut T) {
        let _span = tracing::trace_span!("refresh_rows", offset = self.offset, total = self.entries.len()).entered();

        for (slot, row) in self.rows.iter_mut().enumerate() {
            let index = self.offset + slot;
            match self.entries.get(index) {
                Some(entry) if slot < self.show_total => {
                    row.set_item(entry, &self.colors, tk);
                    row.set_selected(self.physical == Some(index), &self.colors, tk);
                    row.show(tk);
                }
                _ => row.hide(tk),
            }
        }

        self.refresh_scroll_bar(tk);
    }

    fn refresh_scroll_bar<T: Toolkit>(&mut self, tk: &mut T) {
        let total = self.entries.len();
        let thumb = (self.show_total > 0 && total > self.show_total).then(|| {
            let row_height = u64::from(tk.size_hint(Widget::Row(0)).height);
            let track = self.show_total as u64 * row_height;
            let height = (track * self.show_total as u64 / total as u64).max(1);
            let y = track * self.offset as u64 / total as u64;
            (
                i32::try_from(y).unwrap_or(i32::MAX),
                u32::try_from(height).unwrap_or(u32::MAX),
            )
        });

        if !self.scroll_bar.update(thumb) {
            return;
        }
        match thumb {
            Some((y, height)) => {
                tk.move_to(Widget::PaletteScrollBar, 0, y);
                tk.resize(Widget::PaletteScrollBar, SCROLL_BAR_WIDTH, height);
                tk.set_background(Widget::PaletteScrollBar, Some(self.colors.scroll_bar));
                tk.show(Widget::PaletteScrollBar);
            }
            None => tk.hide(Widget::PaletteScrollBar),
        }
    }
}

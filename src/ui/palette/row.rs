//! One reusable result row.

use crate::domain::{EntryType, ResultEntry};
use crate::ui::cache::ValueCache;
use crate::ui::format::format_text;
use crate::ui::icons;
use crate::ui::theme::ThemeColors;
use crate::ui::toolkit::{Icon, Toolkit, Widget};

/// A row slot in the fixed pool. Slots are reassigned to different entries as
/// the window scrolls and are only ever hidden, never destroyed.
#[derive(Debug)]
pub struct RowSlot {
    index: usize,
    icon: ValueCache<&'static str>,
    icon_visible: ValueCache<bool>,
    text: ValueCache<String>,
    selected: ValueCache<bool>,
    visible: ValueCache<bool>,
}

impl RowSlot {
    /// Slot number `index` in the pool.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            icon: ValueCache::new(),
            icon_visible: ValueCache::new(),
            text: ValueCache::new(),
            selected: ValueCache::seeded(false),
            visible: ValueCache::new(),
        }
    }

    /// Displays `entry` in this slot, touching only what differs from the
    /// previous occupant.
    pub fn set_item<T: Toolkit>(&mut self, entry: &ResultEntry, colors: &ThemeColors, tk: &mut T) {
        match icon_category(entry) {
            Some(category) => {
                if self.icon.update(category) {
                    tk.set_icon(Widget::RowIcon(self.index), &Icon::new(category, None));
                }
                if self.icon_visible.update(true) {
                    tk.show(Widget::RowIcon(self.index));
                }
            }
            None => {
                if self.icon_visible.update(false) {
                    tk.hide(Widget::RowIcon(self.index));
                }
            }
        }

        let text = format_text(
            &entry.text,
            &entry.highlight_positions,
            entry.entry_type.is_path(),
            colors,
        );
        if self.text.differs(&text) {
            tk.set_text(Widget::RowLabel(self.index), &text);
            self.text.update(text);
        }
    }

    /// Applies or clears the selection background.
    pub fn set_selected<T: Toolkit>(&mut self, selected: bool, colors: &ThemeColors, tk: &mut T) {
        if self.selected.update(selected) {
            let background = selected.then_some(colors.selection_bg);
            tk.set_background(Widget::Row(self.index), background);
        }
    }

    /// Shows the row.
    pub fn show<T: Toolkit>(&mut self, tk: &mut T) {
        if self.visible.update(true) {
            tk.show(Widget::Row(self.index));
        }
    }

    /// Hides the row.
    pub fn hide<T: Toolkit>(&mut self, tk: &mut T) {
        if self.visible.update(false) {
            tk.hide(Widget::Row(self.index));
        }
    }
}

fn icon_category(entry: &ResultEntry) -> Option<&'static str> {
    match entry.entry_type {
        EntryType::Dir => Some(icons::FOLDER_ICON),
        EntryType::File => Some(icons::file_type(&entry.text)),
        EntryType::FileLine => Some(icons::LINE_ICON),
        EntryType::Plain => None,
    }
}

//! Last-rendered value store with change detection.
//!
//! Every statusline field and every palette row keeps one [`ValueCache`] per
//! drawn property. A draw call is issued only when [`ValueCache::update`]
//! reports a change, which is what keeps redundant events from reaching the
//! toolkit.

/// The value most recently pushed to the toolkit for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCache<T> {
    last: Option<T>,
}

impl<T> Default for ValueCache<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq> ValueCache<T> {
    /// An empty cache. The first update always reports a change.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// A cache that already holds `value`, for properties whose initial
    /// toolkit state is known.
    #[must_use]
    pub const fn seeded(value: T) -> Self {
        Self { last: Some(value) }
    }

    /// Stores `value` and returns `true` if it differs from the cached one.
    ///
    /// ```
    /// use veneer::ui::cache::ValueCache;
    ///
    /// let mut cache = ValueCache::new();
    /// assert!(cache.update((3, 7)));
    /// assert!(!cache.update((3, 7)));
    /// assert!(cache.update((3, 8)));
    /// ```
    pub fn update(&mut self, value: T) -> bool {
        if self.last.as_ref() == Some(&value) {
            return false;
        }
        self.last = Some(value);
        true
    }

    /// Whether `value` would count as a change.
    #[must_use]
    pub fn differs(&self, value: &T) -> bool {
        self.last.as_ref() != Some(value)
    }
}

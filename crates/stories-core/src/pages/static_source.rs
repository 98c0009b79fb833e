use super::PageCatalog;

/// Catalog over a borrowed slice of cloneable page descriptors.
#[derive(Clone, Copy, Debug)]
pub struct StaticPages<'a, T> {
    items: &'a [T],
    durations: &'a [u32],
}

impl<'a, T> StaticPages<'a, T> {
    pub const fn new(items: &'a [T]) -> Self {
        Self {
            items,
            durations: &[],
        }
    }

    /// Per-page durations, matched by position. Pages past the end of
    /// `durations` use the configured default.
    pub const fn with_durations(mut self, durations: &'a [u32]) -> Self {
        self.durations = durations;
        self
    }
}

impl<T: Clone> PageCatalog for StaticPages<'_, T> {
    type Page = T;

    fn page_count(&self) -> u16 {
        u16::try_from(self.items.len()).unwrap_or(u16::MAX)
    }

    fn make_page(&mut self, index: u16) -> Option<Self::Page> {
        self.items.get(index as usize).cloned()
    }

    fn duration_ms(&self, index: u16) -> Option<u32> {
        self.durations.get(index as usize).copied()
    }
}

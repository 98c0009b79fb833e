//! Page sources for the carousel.

mod static_source;

pub use static_source::StaticPages;

/// Ordered set of page descriptors, index-aligned with progress segments.
pub trait PageCatalog {
    type Page;

    fn page_count(&self) -> u16;

    /// Produce a displayable page, or `None` when `index` is out of range.
    fn make_page(&mut self, index: u16) -> Option<Self::Page>;

    /// Display duration of one page. `None` falls back to the configured
    /// segment duration.
    fn duration_ms(&self, _index: u16) -> Option<u32> {
        None
    }
}

//! Display surface contract used by the page host.

/// Surface dimensions in surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Area the host presents into.
///
/// The surface holds at most one mounted page. The host only mounts a
/// replacement after [`DisplaySurface::unmount`] succeeded, and calls
/// [`DisplaySurface::raise_progress_bar`] after every mount. A failed call
/// may be repeated by a later host call.
pub trait DisplaySurface {
    type Page;
    type Error;

    fn size(&self) -> Size;

    fn mount(&mut self, page: Self::Page) -> Result<(), Self::Error>;

    /// Removes the mounted page and hands it back for release.
    fn unmount(&mut self) -> Result<Option<Self::Page>, Self::Error>;

    /// Keep the segmented bar stacked above the mounted page.
    fn raise_progress_bar(&mut self) -> Result<(), Self::Error>;

    /// Vertical translation of the whole host; `0.0` is the identity transform.
    fn set_offset_y(&mut self, offset_y: f32) -> Result<(), Self::Error>;

    /// Remove the host from its presentation context. Called during teardown until it succeeds
    /// once, even if unmounting the page failed.
    fn detach(&mut self) -> Result<(), Self::Error>;
}

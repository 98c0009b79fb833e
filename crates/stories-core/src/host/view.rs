impl<PC, SF, IN> PageHost<PC, SF, IN>
where
    PC: PageCatalog,
    SF: DisplaySurface<Page = PC::Page>,
    IN: InputProvider,
{
    /// Build the view model for `now_ms` and hand it to `f`. Nothing is drawn
    /// once the host is dismissed.
    pub fn with_screen<F>(&self, now_ms: u64, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        if self.is_dismissed() {
            return;
        }

        let count = self.progress.count();
        let mut fills = [0u8; MAX_SEGMENTS];
        for (segment, fill) in fills.iter_mut().enumerate().take(count as usize) {
            *fill = self.progress.fill_pct(segment as u16, now_ms);
        }

        let size = self.surface.size();
        let animation = match self.phase {
            HostPhase::Settling { animation, .. } => animation.frame(now_ms),
            _ => None,
        };

        f(Screen {
            page_index: self.progress.index(),
            page_count: count,
            playback: self.progress.state(),
            bar: ProgressBarView {
                fills: &fills[..count as usize],
                style: self.config.bar,
                surface_width: size.width,
            },
            size,
            offset_y: self.offset_y,
            alpha: drag_alpha(self.offset_y, size.height),
            animation,
        });
    }
}

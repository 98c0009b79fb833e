impl<PC, SF, IN> PageHost<PC, SF, IN>
where
    PC: PageCatalog,
    SF: DisplaySurface<Page = PC::Page>,
    IN: InputProvider,
{
    /// Mount the first page and start playback, one segment per page.
    pub fn present(
        pages: PC,
        surface: SF,
        input: IN,
        config: CarouselConfig,
        now_ms: u64,
    ) -> Result<Self, HostError<SF::Error, IN::Error>> {
        let config = config.normalized();
        let count = pages.page_count();
        if count == 0 {
            warn!("carousel: refusing to present an empty catalog");
            return Err(HostError::EmptyCatalog);
        }

        let progress = SegmentedProgress::from_fn(count as usize, |index| {
            pages
                .duration_ms(index)
                .unwrap_or(config.segment_duration_ms)
        })?
        .with_rewind_window_ms(config.rewind_restart_window_ms);

        let mut host = Self {
            pages,
            surface,
            input: Some(input),
            config,
            progress,
            mounted: None,
            detached: false,
            phase: HostPhase::Presented,
            offset_y: 0.0,
            pending_redraw: true,
        };

        host.show_page(0)?;
        host.progress.start(now_ms);
        info!("carousel: presented {} pages", count);
        Ok(host)
    }

    /// Replace the mounted page with the page for `index`.
    ///
    /// The previous page is unmounted before the new one is attached, and the
    /// progress bar is raised above it. An out-of-range `index` is rejected
    /// and leaves the current page mounted. `mounted_index` only changes once
    /// the surface accepted the change: a failed unmount keeps the old page
    /// recorded, a failed mount leaves nothing mounted.
    pub fn show_page(&mut self, index: u16) -> Result<(), HostError<SF::Error, IN::Error>> {
        if self.is_dismissed() {
            return Ok(());
        }

        let count = self.progress.count();
        if index >= count {
            warn!("carousel: page {} requested, only {} exist", index, count);
            return Err(HostError::PageOutOfRange { index, count });
        }

        let page = self
            .pages
            .make_page(index)
            .ok_or(HostError::MissingPage { index })?;

        if self.mounted.is_some() {
            // The released page is dropped here.
            self.surface.unmount().map_err(HostError::Surface)?;
            self.mounted = None;
        }
        self.surface.mount(page).map_err(HostError::Surface)?;
        self.mounted = Some(index);
        self.surface
            .raise_progress_bar()
            .map_err(HostError::Surface)?;

        self.pending_redraw = true;
        debug!("carousel: mounted page {}", index);
        Ok(())
    }

    /// Drain pending gestures, then advance the segment timer and any release
    /// animation.
    pub fn tick(&mut self, now_ms: u64) -> Result<TickResult, HostError<SF::Error, IN::Error>> {
        self.process_inputs(now_ms)?;

        if !self.is_dismissed() {
            let mut events = ProgressEvents::default();
            if self.progress.tick(now_ms, &mut events) {
                self.pending_redraw = true;
            }
            self.apply_progress_events(events)?;
        }

        let settling = self.tick_settle(now_ms)?;

        if let HostPhase::Dismissed { reported } = &mut self.phase {
            if *reported {
                return Ok(TickResult::NoRender);
            }
            *reported = true;
            return Ok(TickResult::Dismissed);
        }

        let running = self.progress.state() == PlaybackState::Running;
        if self.pending_redraw || running || settling {
            self.pending_redraw = false;
            Ok(TickResult::RenderRequested)
        } else {
            Ok(TickResult::NoRender)
        }
    }

    pub fn pause(&mut self, now_ms: u64) {
        if !self.is_dismissed() {
            self.progress.pause(now_ms);
            self.pending_redraw = true;
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if !self.is_dismissed() {
            self.progress.resume(now_ms);
            self.pending_redraw = true;
        }
    }

    /// Tear the host down: stop the timer, drop the input provider, unmount
    /// the page and detach the surface.
    ///
    /// Detach is attempted even when the unmount fails, and the first surface
    /// error is returned. Calling again retries whichever step failed; once
    /// both succeeded later calls are no-ops.
    pub fn dismiss(&mut self) -> Result<(), HostError<SF::Error, IN::Error>> {
        if !self.is_dismissed() {
            self.progress.stop();
            self.input = None;
            self.phase = HostPhase::Dismissed { reported: false };
            info!("carousel: dismissed on page {}", self.progress.index());
        }

        let mut failure = None;
        if self.mounted.is_some() {
            match self.surface.unmount() {
                Ok(_) => self.mounted = None,
                Err(err) => {
                    warn!("carousel: unmount failed during teardown");
                    failure = Some(err);
                }
            }
        }
        if !self.detached {
            match self.surface.detach() {
                Ok(()) => self.detached = true,
                Err(err) => {
                    warn!("carousel: detach failed during teardown");
                    if failure.is_none() {
                        failure = Some(err);
                    }
                }
            }
        }

        match failure {
            Some(err) => Err(HostError::Surface(err)),
            None => Ok(()),
        }
    }

    pub fn is_dismissed(&self) -> bool {
        matches!(self.phase, HostPhase::Dismissed { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, HostPhase::Dragging(_))
    }

    pub fn drag(&self) -> Option<DragState> {
        match self.phase {
            HostPhase::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, HostPhase::Settling { .. })
    }

    pub fn progress(&self) -> &SegmentedProgress {
        &self.progress
    }

    pub fn surface(&self) -> &SF {
        &self.surface
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Index of the mounted page, `None` once teardown unmounted it.
    pub fn mounted_index(&self) -> Option<u16> {
        self.mounted
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    /// Release the catalog and surface.
    pub fn into_parts(self) -> (PC, SF) {
        (self.pages, self.surface)
    }

    fn apply_progress_events(
        &mut self,
        events: ProgressEvents,
    ) -> Result<(), HostError<SF::Error, IN::Error>> {
        if let Some(index) = events.index_changed {
            self.show_page(index)?;
        }

        if events.finished {
            // The finished controller has already stopped its timer; the last
            // page stays up until the user dismisses.
            info!("carousel: all {} pages shown", self.progress.count());
            self.pending_redraw = true;
            if self.config.dismiss_on_finish {
                self.dismiss()?;
            }
        }
        Ok(())
    }

    fn tick_settle(&mut self, now_ms: u64) -> Result<bool, HostError<SF::Error, IN::Error>> {
        let HostPhase::Settling {
            from,
            to,
            animation,
            outcome,
        } = self.phase
        else {
            return Ok(false);
        };

        if let Some(frame) = animation.frame(now_ms) {
            self.set_offset(from + (to - from) * frame.eased())?;
            return Ok(true);
        }

        self.set_offset(to)?;
        match outcome {
            ReleaseOutcome::Dismiss => self.dismiss()?,
            ReleaseOutcome::Restore => {
                debug!("carousel: settled back to rest");
                self.phase = HostPhase::Presented;
            }
        }
        Ok(true)
    }

    fn set_offset(&mut self, offset_y: f32) -> Result<(), HostError<SF::Error, IN::Error>> {
        self.offset_y = offset_y;
        self.pending_redraw = true;
        self.surface
            .set_offset_y(offset_y)
            .map_err(HostError::Surface)
    }
}

impl<PC, SF, IN> PageHost<PC, SF, IN>
where
    PC: PageCatalog,
    SF: DisplaySurface<Page = PC::Page>,
    IN: InputProvider,
{
    fn process_inputs(&mut self, now_ms: u64) -> Result<(), HostError<SF::Error, IN::Error>> {
        loop {
            let Some(input) = self.input.as_mut() else {
                return Ok(());
            };

            match input.poll_event() {
                Ok(Some(event)) => self.handle_gesture(event, now_ms)?,
                Ok(None) => return Ok(()),
                Err(err) => return Err(HostError::Input(err)),
            }
        }
    }

    /// Apply one gesture. Gestures are ignored while a release animation runs
    /// and after dismissal.
    pub fn handle_gesture(
        &mut self,
        event: GestureEvent,
        now_ms: u64,
    ) -> Result<(), HostError<SF::Error, IN::Error>> {
        match self.phase {
            HostPhase::Dismissed { .. } => return Ok(()),
            HostPhase::Settling { .. } => {
                debug!("carousel: ignoring {:?} while settling", event);
                return Ok(());
            }
            HostPhase::Presented | HostPhase::Dragging(_) => {}
        }

        match event {
            GestureEvent::Tap { x, .. } => self.apply_tap(x, now_ms),
            GestureEvent::Swipe(SwipeDirection::Down) => {
                debug!("carousel: swipe down");
                self.dismiss()
            }
            GestureEvent::Swipe(_) => Ok(()),
            GestureEvent::PanChanged {
                translation_y,
                velocity_y,
            } => self.apply_pan_changed(translation_y, velocity_y),
            GestureEvent::PanEnded {
                translation_y,
                velocity_y,
            } => self.apply_pan_ended(translation_y, velocity_y, now_ms),
            GestureEvent::PanCancelled => {
                if self.is_dragging() {
                    self.start_settle(ReleaseOutcome::Restore, now_ms);
                }
                Ok(())
            }
        }
    }

    fn apply_tap(&mut self, x: f32, now_ms: u64) -> Result<(), HostError<SF::Error, IN::Error>> {
        let width = self.surface.size().width;
        let mut events = ProgressEvents::default();

        match tap_zone(x, width) {
            TapZone::Back => self.progress.rewind(now_ms, &mut events),
            TapZone::Forward => self.progress.skip(now_ms, &mut events),
        }

        self.pending_redraw = true;
        self.apply_progress_events(events)
    }

    fn apply_pan_changed(
        &mut self,
        translation_y: f32,
        velocity_y: f32,
    ) -> Result<(), HostError<SF::Error, IN::Error>> {
        let translation_y = clamp_drag(translation_y);
        self.phase = HostPhase::Dragging(DragState {
            translation_y,
            velocity_y,
        });
        self.set_offset(translation_y)
    }

    fn apply_pan_ended(
        &mut self,
        translation_y: f32,
        velocity_y: f32,
        now_ms: u64,
    ) -> Result<(), HostError<SF::Error, IN::Error>> {
        let height = self.surface.size().height;
        let outcome = release_outcome(translation_y, velocity_y, height, &self.config);
        debug!(
            "carousel: pan released at {} with velocity {}: {:?}",
            translation_y, velocity_y, outcome
        );

        self.set_offset(clamp_drag(translation_y))?;
        self.start_settle(outcome, now_ms);
        Ok(())
    }

    fn start_settle(&mut self, outcome: ReleaseOutcome, now_ms: u64) {
        let (kind, to) = match outcome {
            ReleaseOutcome::Dismiss => (AnimationKind::SlideOut, self.surface.size().height),
            ReleaseOutcome::Restore => (AnimationKind::SnapBack, 0.0),
        };

        self.phase = HostPhase::Settling {
            from: self.offset_y,
            to,
            animation: AnimationSpec::new(kind, now_ms, self.config.settle_duration_ms),
            outcome,
        };
        self.pending_redraw = true;
    }
}

//! Page host: mounts the page for the current segment and turns gestures into
//! navigation or dismissal.

use log::{debug, info, warn};

use crate::{
    config::CarouselConfig,
    input::{GestureEvent, InputProvider, SwipeDirection},
    pages::PageCatalog,
    progress::{PlaybackState, ProgressError, ProgressObserver, SegmentedProgress},
    render::{AnimationKind, AnimationSpec, ProgressBarView, Screen, drag_alpha},
    surface::DisplaySurface,
};

const MAX_SEGMENTS: usize = crate::progress::MAX_SEGMENTS;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
    /// The host was dismissed. Reported by exactly one tick.
    Dismissed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum HostError<SurfaceErr, InputErr> {
    #[error("no pages to present")]
    EmptyCatalog,
    #[error("page {index} is out of range for {count} pages")]
    PageOutOfRange { index: u16, count: u16 },
    #[error("catalog produced no page for index {index}")]
    MissingPage { index: u16 },
    #[error("progress: {0}")]
    Progress(#[from] ProgressError),
    #[error("display surface failed: {0:?}")]
    Surface(SurfaceErr),
    #[error("input provider failed: {0:?}")]
    Input(InputErr),
}

/// Which half of the host a tap landed in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TapZone {
    Back,
    Forward,
}

pub fn tap_zone(x: f32, width: f32) -> TapZone {
    if x < width / 2.0 {
        TapZone::Back
    } else {
        TapZone::Forward
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReleaseOutcome {
    Dismiss,
    Restore,
}

/// Decide what a released pan does. Either a fast downward fling or a drag
/// past the configured share of the height dismisses.
pub fn release_outcome(
    translation_y: f32,
    velocity_y: f32,
    height: f32,
    config: &CarouselConfig,
) -> ReleaseOutcome {
    let distance = clamp_drag(translation_y);
    if velocity_y > config.dismiss_velocity || distance > height * config.dismiss_distance_ratio {
        ReleaseOutcome::Dismiss
    } else {
        ReleaseOutcome::Restore
    }
}

/// Drags never move the host above its resting position.
pub fn clamp_drag(translation_y: f32) -> f32 {
    if translation_y.is_nan() {
        return 0.0;
    }
    translation_y.max(0.0)
}

/// Live pan, present only while the user drags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    /// Translation clamped to the resting position.
    pub translation_y: f32,
    pub velocity_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum HostPhase {
    Presented,
    Dragging(DragState),
    Settling {
        from: f32,
        to: f32,
        animation: AnimationSpec,
        outcome: ReleaseOutcome,
    },
    Dismissed {
        reported: bool,
    },
}

/// Collects what one progress call reported so the host can react after the
/// controller borrow ends.
#[derive(Clone, Copy, Debug, Default)]
struct ProgressEvents {
    index_changed: Option<u16>,
    finished: bool,
}

impl ProgressObserver for ProgressEvents {
    fn on_index_changed(&mut self, index: u16) {
        self.index_changed = Some(index);
    }

    fn on_finished(&mut self) {
        self.finished = true;
    }
}

pub struct PageHost<PC, SF, IN>
where
    PC: PageCatalog,
    SF: DisplaySurface<Page = PC::Page>,
    IN: InputProvider,
{
    pages: PC,
    surface: SF,
    /// Dropped on dismissal.
    input: Option<IN>,
    config: CarouselConfig,
    progress: SegmentedProgress,
    mounted: Option<u16>,
    /// Set once `DisplaySurface::detach` succeeded.
    detached: bool,
    phase: HostPhase,
    offset_y: f32,
    pending_redraw: bool,
}

include!("gesture.rs");
include!("runtime.rs");
include!("view.rs");

#[cfg(test)]
mod tests;

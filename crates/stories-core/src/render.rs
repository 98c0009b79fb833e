//! View models and animation metadata.

use crate::{config::ProgressBarStyle, progress::PlaybackState, surface::Size};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnimationKind {
    /// Host slides down off-screen, then dismisses.
    SlideOut,
    /// Host returns to the identity transform.
    SnapBack,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnimationFrame {
    pub kind: AnimationKind,
    /// 0..=100
    pub progress_pct: u8,
}

impl AnimationFrame {
    /// Eased completion in `0.0..=1.0`.
    pub fn eased(self) -> f32 {
        ease_out(self.progress_pct as f32 / 100.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnimationSpec {
    pub kind: AnimationKind,
    pub start_ms: u64,
    pub duration_ms: u16,
}

impl AnimationSpec {
    pub const fn new(kind: AnimationKind, start_ms: u64, duration_ms: u16) -> Self {
        Self {
            kind,
            start_ms,
            duration_ms,
        }
    }

    /// Frame at `now_ms`, or `None` once the animation has run its course.
    pub fn frame(self, now_ms: u64) -> Option<AnimationFrame> {
        let duration = self.duration_ms.max(1) as u64;
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= duration {
            return None;
        }

        let progress = ((elapsed * 100) / duration).min(100) as u8;
        Some(AnimationFrame {
            kind: self.kind,
            progress_pct: progress,
        })
    }
}

/// Quadratic ease-out.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Opacity of the host content for a given drag offset: fully opaque at rest,
/// fading linearly to zero at one host height.
pub fn drag_alpha(offset_y: f32, height: f32) -> f32 {
    if height <= 0.0 {
        return 1.0;
    }
    (1.0 - offset_y / height).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Segmented bar as laid out on a surface of a given width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBarView<'a> {
    /// Fill per segment, 0..=100.
    pub fills: &'a [u8],
    pub style: ProgressBarStyle,
    pub surface_width: f32,
}

impl ProgressBarView<'_> {
    /// Whole-bar frame: horizontally centered, inset on both sides.
    pub fn frame(&self) -> Rect {
        let width = (self.surface_width - self.style.inset_x * 2.0).max(0.0);
        Rect {
            x: (self.surface_width - width) / 2.0,
            y: self.style.top,
            width,
            height: self.style.height,
        }
    }

    /// Track rectangle of one segment; `None` past the last segment.
    pub fn segment_rect(&self, index: usize) -> Option<Rect> {
        let count = self.fills.len();
        if index >= count {
            return None;
        }

        let frame = self.frame();
        let gaps = self.style.gap * (count - 1) as f32;
        let width = ((frame.width - gaps) / count as f32).max(0.0);
        Some(Rect {
            x: frame.x + (width + self.style.gap) * index as f32,
            y: frame.y,
            width,
            height: frame.height,
        })
    }

    /// Foreground (elapsed) rectangle of one segment.
    pub fn fill_rect(&self, index: usize) -> Option<Rect> {
        let track = self.segment_rect(index)?;
        let pct = self.fills[index].min(100) as f32 / 100.0;
        Some(Rect {
            width: track.width * pct,
            ..track
        })
    }
}

/// Host view model consumed by a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen<'a> {
    pub page_index: u16,
    pub page_count: u16,
    pub playback: PlaybackState,
    pub bar: ProgressBarView<'a>,
    pub size: Size,
    /// Current vertical translation of the host.
    pub offset_y: f32,
    pub alpha: f32,
    pub animation: Option<AnimationFrame>,
}

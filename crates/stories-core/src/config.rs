//! Carousel tunables.

pub const DEFAULT_SEGMENT_DURATION_MS: u32 = 5_000;

/// Rewind restarts the current segment while less than this much of it has
/// elapsed. Past the window, rewind steps back one segment.
pub const DEFAULT_REWIND_RESTART_WINDOW_MS: u32 = 500;

/// Downward release velocity (units per second) above which a pan dismisses.
pub const DEFAULT_DISMISS_VELOCITY: f32 = 1_000.0;

/// Fraction of the host height a pan must exceed to dismiss on release.
pub const DEFAULT_DISMISS_DISTANCE_RATIO: f32 = 0.5;

pub const DEFAULT_SETTLE_DURATION_MS: u16 = 300;

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(0xFF, 0xFF, 0xFF, 0xFF);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Placement and colors of the segmented bar, in surface units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressBarStyle {
    /// Horizontal inset on each side of the bar.
    pub inset_x: f32,
    pub top: f32,
    pub height: f32,
    /// Spacing between adjacent segments.
    pub gap: f32,
    /// Elapsed portion of a segment.
    pub foreground: Color,
    /// Remaining portion of a segment.
    pub track: Color,
}

impl Default for ProgressBarStyle {
    fn default() -> Self {
        Self {
            inset_x: 10.0,
            top: 50.0,
            height: 4.0,
            gap: 4.0,
            foreground: Color::WHITE,
            track: Color::rgba(0x80, 0x80, 0x80, 0x80),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Duration of a segment whose page carries no duration of its own.
    pub segment_duration_ms: u32,
    pub rewind_restart_window_ms: u32,
    pub dismiss_velocity: f32,
    pub dismiss_distance_ratio: f32,
    /// Duration of the release animation, off-screen or back to rest.
    pub settle_duration_ms: u16,
    /// Dismiss as soon as the last segment completes.
    pub dismiss_on_finish: bool,
    pub bar: ProgressBarStyle,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            segment_duration_ms: DEFAULT_SEGMENT_DURATION_MS,
            rewind_restart_window_ms: DEFAULT_REWIND_RESTART_WINDOW_MS,
            dismiss_velocity: DEFAULT_DISMISS_VELOCITY,
            dismiss_distance_ratio: DEFAULT_DISMISS_DISTANCE_RATIO,
            settle_duration_ms: DEFAULT_SETTLE_DURATION_MS,
            dismiss_on_finish: false,
            bar: ProgressBarStyle::default(),
        }
    }
}

impl CarouselConfig {
    pub const fn with_segment_duration_ms(mut self, segment_duration_ms: u32) -> Self {
        self.segment_duration_ms = segment_duration_ms;
        self
    }

    pub const fn with_rewind_restart_window_ms(mut self, rewind_restart_window_ms: u32) -> Self {
        self.rewind_restart_window_ms = rewind_restart_window_ms;
        self
    }

    pub const fn with_dismiss_velocity(mut self, dismiss_velocity: f32) -> Self {
        self.dismiss_velocity = dismiss_velocity;
        self
    }

    pub const fn with_dismiss_distance_ratio(mut self, dismiss_distance_ratio: f32) -> Self {
        self.dismiss_distance_ratio = dismiss_distance_ratio;
        self
    }

    pub const fn with_settle_duration_ms(mut self, settle_duration_ms: u16) -> Self {
        self.settle_duration_ms = settle_duration_ms;
        self
    }

    pub const fn with_dismiss_on_finish(mut self, dismiss_on_finish: bool) -> Self {
        self.dismiss_on_finish = dismiss_on_finish;
        self
    }

    pub const fn with_bar(mut self, bar: ProgressBarStyle) -> Self {
        self.bar = bar;
        self
    }

    /// Raises zero durations to 1 ms and clamps the distance ratio to `(0, 1]`.
    pub fn normalized(mut self) -> Self {
        self.segment_duration_ms = self.segment_duration_ms.max(1);
        self.settle_duration_ms = self.settle_duration_ms.max(1);
        if self.dismiss_distance_ratio.is_nan() || self.dismiss_distance_ratio <= 0.0 {
            self.dismiss_distance_ratio = DEFAULT_DISMISS_DISTANCE_RATIO;
        }
        self.dismiss_distance_ratio = self.dismiss_distance_ratio.min(1.0);
        if self.dismiss_velocity.is_nan() {
            self.dismiss_velocity = DEFAULT_DISMISS_VELOCITY;
        }
        self
    }
}

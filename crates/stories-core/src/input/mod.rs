//! Input abstraction layer.

pub mod mock;

pub use mock::MockInput;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete gestures consumed by the page host.
///
/// Coordinates and translations are in surface units with the origin at the
/// top-left corner; positive `y` points down. Velocities are units per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Tap { x: f32, y: f32 },
    /// Pan in progress, translation measured from where the pan began.
    PanChanged { translation_y: f32, velocity_y: f32 },
    PanEnded { translation_y: f32, velocity_y: f32 },
    /// Pan aborted by the platform (interrupted, lost focus).
    PanCancelled,
    Swipe(SwipeDirection),
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error>;
}

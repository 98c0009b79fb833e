use super::{GestureEvent, InputProvider};

/// Input source that never reports a gesture, for hosts driven only through
/// `PageHost::handle_gesture`.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockInput;

impl MockInput {
    pub const fn new() -> Self {
        Self
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error> {
        Ok(None)
    }
}

use std::{cell::Cell, convert::Infallible, rc::Rc};

use stories_core::input::{GestureEvent, InputProvider};

/// Gesture feed replaying `(at_ms, event)` pairs against a shared clock.
#[derive(Debug)]
pub(super) struct TimedScript {
    events: &'static [(u64, GestureEvent)],
    cursor: usize,
    clock: Rc<Cell<u64>>,
}

impl TimedScript {
    pub(super) fn new(events: &'static [(u64, GestureEvent)], clock: Rc<Cell<u64>>) -> Self {
        Self {
            events,
            cursor: 0,
            clock,
        }
    }
}

impl InputProvider for TimedScript {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error> {
        let Some(&(at_ms, event)) = self.events.get(self.cursor) else {
            return Ok(None);
        };
        if at_ms > self.clock.get() {
            return Ok(None);
        }
        self.cursor += 1;
        Ok(Some(event))
    }
}

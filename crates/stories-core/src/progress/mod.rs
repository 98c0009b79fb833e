//! Segmented progress timer.
//!
//! One segment per page, each with a fixed duration. The controller is driven
//! by `tick(now_ms)` from the UI loop and by manual `skip`/`rewind`; every
//! index change and the final completion are reported synchronously to the
//! [`ProgressObserver`] passed to the call.

use heapless::Vec;
use log::debug;

use crate::config::DEFAULT_REWIND_RESTART_WINDOW_MS;

pub const MAX_SEGMENTS: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ProgressError {
    #[error("progress bar needs at least one segment")]
    NoSegments,
    #[error("{requested} segments requested, capacity is {capacity}")]
    TooManySegments { requested: usize, capacity: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Receives progress notifications.
pub trait ProgressObserver {
    /// The visible segment changed.
    fn on_index_changed(&mut self, index: u16);

    /// The last segment completed. Reported once per run.
    fn on_finished(&mut self);
}

impl ProgressObserver for () {
    fn on_index_changed(&mut self, _index: u16) {}

    fn on_finished(&mut self) {}
}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &mut T {
    fn on_index_changed(&mut self, index: u16) {
        (**self).on_index_changed(index);
    }

    fn on_finished(&mut self) {
        (**self).on_finished();
    }
}

impl<A: ProgressObserver, B: ProgressObserver> ProgressObserver for (A, B) {
    fn on_index_changed(&mut self, index: u16) {
        self.0.on_index_changed(index);
        self.1.on_index_changed(index);
    }

    fn on_finished(&mut self) {
        self.0.on_finished();
        self.1.on_finished();
    }
}

/// Fan-out in slice order.
impl<'a> ProgressObserver for [&'a mut dyn ProgressObserver] {
    fn on_index_changed(&mut self, index: u16) {
        for observer in self.iter_mut() {
            observer.on_index_changed(index);
        }
    }

    fn on_finished(&mut self) {
        for observer in self.iter_mut() {
            observer.on_finished();
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Clock {
    Idle,
    /// `segment_start_ms` is shifted forward on resume so that
    /// `now - segment_start_ms` is always the elapsed time.
    Running {
        segment_start_ms: u64,
    },
    Paused {
        elapsed_ms: u32,
    },
    Finished,
}

#[derive(Clone, Debug)]
pub struct SegmentedProgress {
    durations: Vec<u32, MAX_SEGMENTS>,
    index: u16,
    clock: Clock,
    rewind_window_ms: u32,
}

impl SegmentedProgress {
    /// One segment per entry. Zero durations are raised to 1 ms.
    pub fn new(durations: &[u32]) -> Result<Self, ProgressError> {
        Self::from_fn(durations.len(), |index| durations[index as usize])
    }

    pub fn uniform(count: usize, duration_ms: u32) -> Result<Self, ProgressError> {
        Self::from_fn(count, |_| duration_ms)
    }

    pub fn from_fn<F>(count: usize, mut duration_at: F) -> Result<Self, ProgressError>
    where
        F: FnMut(u16) -> u32,
    {
        if count == 0 {
            return Err(ProgressError::NoSegments);
        }
        if count > MAX_SEGMENTS {
            return Err(ProgressError::TooManySegments {
                requested: count,
                capacity: MAX_SEGMENTS,
            });
        }

        let mut durations = Vec::new();
        for index in 0..count as u16 {
            durations
                .push(duration_at(index).max(1))
                .map_err(|_| ProgressError::TooManySegments {
                    requested: count,
                    capacity: MAX_SEGMENTS,
                })?;
        }

        Ok(Self {
            durations,
            index: 0,
            clock: Clock::Idle,
            rewind_window_ms: DEFAULT_REWIND_RESTART_WINDOW_MS,
        })
    }

    pub const fn with_rewind_window_ms(mut self, rewind_window_ms: u32) -> Self {
        self.rewind_window_ms = rewind_window_ms;
        self
    }

    pub fn count(&self) -> u16 {
        self.durations.len() as u16
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn state(&self) -> PlaybackState {
        match self.clock {
            Clock::Idle => PlaybackState::Idle,
            Clock::Running { .. } => PlaybackState::Running,
            Clock::Paused { .. } => PlaybackState::Paused,
            Clock::Finished => PlaybackState::Finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.clock, Clock::Finished)
    }

    pub fn duration_ms(&self, index: u16) -> Option<u32> {
        self.durations.get(index as usize).copied()
    }

    fn current_duration_ms(&self) -> u32 {
        self.durations
            .get(self.index as usize)
            .copied()
            .unwrap_or(1)
    }

    /// Time spent in the current segment, capped at its duration.
    pub fn elapsed_ms(&self, now_ms: u64) -> u32 {
        let duration = self.current_duration_ms();
        match self.clock {
            Clock::Idle => 0,
            Clock::Running { segment_start_ms } => {
                now_ms.saturating_sub(segment_start_ms).min(duration as u64) as u32
            }
            Clock::Paused { elapsed_ms } => elapsed_ms.min(duration),
            Clock::Finished => duration,
        }
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u32 {
        self.current_duration_ms()
            .saturating_sub(self.elapsed_ms(now_ms))
    }

    /// Fill of one segment for the bar, 0..=100.
    pub fn fill_pct(&self, segment: u16, now_ms: u64) -> u8 {
        if segment >= self.count() {
            return 0;
        }
        if self.is_finished() || segment < self.index {
            return 100;
        }
        if segment > self.index {
            return 0;
        }

        let duration = self.current_duration_ms() as u64;
        ((self.elapsed_ms(now_ms) as u64 * 100) / duration).min(100) as u8
    }

    /// Start the timer on the current segment. Resumes when paused; no-op when
    /// running or finished.
    pub fn start(&mut self, now_ms: u64) {
        match self.clock {
            Clock::Idle => {
                debug!("progress: start at segment {}", self.index);
                self.clock = Clock::Running {
                    segment_start_ms: now_ms,
                };
            }
            Clock::Paused { .. } => self.resume(now_ms),
            Clock::Running { .. } | Clock::Finished => {}
        }
    }

    pub fn pause(&mut self, now_ms: u64) {
        if let Clock::Running { .. } = self.clock {
            let elapsed_ms = self.elapsed_ms(now_ms);
            debug!(
                "progress: pause at segment {} after {} ms",
                self.index, elapsed_ms
            );
            self.clock = Clock::Paused { elapsed_ms };
        }
    }

    pub fn resume(&mut self, now_ms: u64) {
        if let Clock::Paused { elapsed_ms } = self.clock {
            debug!("progress: resume segment {}", self.index);
            self.clock = Clock::Running {
                segment_start_ms: now_ms.saturating_sub(elapsed_ms as u64),
            };
        }
    }

    /// Complete the current segment now. Ignored once finished.
    pub fn skip<O>(&mut self, now_ms: u64, observer: &mut O)
    where
        O: ProgressObserver + ?Sized,
    {
        if self.is_finished() {
            return;
        }
        self.complete_segment(now_ms, observer);
    }

    /// Restart the current segment near its start (or on the first segment),
    /// otherwise step back one segment.
    ///
    /// "Near its start" is `rewind_window_ms` (default
    /// [`DEFAULT_REWIND_RESTART_WINDOW_MS`]). From the finished state the last
    /// segment restarts and the timer runs again.
    pub fn rewind<O>(&mut self, now_ms: u64, observer: &mut O)
    where
        O: ProgressObserver + ?Sized,
    {
        if self.is_finished() {
            debug!("progress: rewind from finished, restarting segment {}", self.index);
            self.clock = Clock::Running {
                segment_start_ms: now_ms,
            };
            return;
        }

        let elapsed_ms = self.elapsed_ms(now_ms);
        if self.index == 0 || elapsed_ms < self.rewind_window_ms {
            debug!("progress: restart segment {}", self.index);
            self.restart_clock(now_ms);
            return;
        }

        self.index -= 1;
        self.restart_clock(now_ms);
        debug!("progress: rewind to segment {}", self.index);
        observer.on_index_changed(self.index);
    }

    /// Advance on natural expiry. A late tick walks through every segment that
    /// expired in the meantime, each next segment starting where the previous
    /// one ended. Returns `true` when the index or state changed.
    pub fn tick<O>(&mut self, now_ms: u64, observer: &mut O) -> bool
    where
        O: ProgressObserver + ?Sized,
    {
        let mut changed = false;
        while let Clock::Running { segment_start_ms } = self.clock {
            let expires_at = segment_start_ms.saturating_add(self.current_duration_ms() as u64);
            if now_ms < expires_at {
                break;
            }
            self.complete_segment(expires_at, observer);
            changed = true;
        }
        changed
    }

    /// Back to the first segment, idle. Reports an index change when the
    /// visible segment moves.
    pub fn reset<O>(&mut self, observer: &mut O)
    where
        O: ProgressObserver + ?Sized,
    {
        let moved = self.index != 0;
        self.index = 0;
        self.clock = Clock::Idle;
        debug!("progress: reset");
        if moved {
            observer.on_index_changed(0);
        }
    }

    /// Halt the timer without reporting anything. Ticks are ignored until the
    /// next `start`.
    pub fn stop(&mut self) {
        self.clock = Clock::Idle;
    }

    fn restart_clock(&mut self, now_ms: u64) {
        self.clock = match self.clock {
            Clock::Running { .. } => Clock::Running {
                segment_start_ms: now_ms,
            },
            Clock::Paused { .. } => Clock::Paused { elapsed_ms: 0 },
            other => other,
        };
    }

    fn complete_segment<O>(&mut self, next_start_ms: u64, observer: &mut O)
    where
        O: ProgressObserver + ?Sized,
    {
        let next = self.index + 1;
        if next >= self.count() {
            debug!("progress: finished after segment {}", self.index);
            self.clock = Clock::Finished;
            observer.on_finished();
            return;
        }

        self.index = next;
        self.clock = match self.clock {
            Clock::Running { .. } => Clock::Running {
                segment_start_ms: next_start_ms,
            },
            Clock::Paused { .. } => Clock::Paused { elapsed_ms: 0 },
            other => other,
        };
        debug!("progress: advance to segment {}", next);
        observer.on_index_changed(next);
    }
}

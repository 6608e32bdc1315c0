//! Monotonic frame clock.
//!
//! The update loop derives all time-based scene state from one elapsed-seconds
//! reading per frame. The clock retains the previous reading so each tick also
//! yields the delta used to advance the avatar animation.

use instant::Instant;

/// One clock reading: seconds since the clock started and since the last tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameTick {
    pub elapsed: f32,
    pub delta: f32,
}

/// Monotonic elapsed-time source for the frame loop.
///
/// `elapsed` is non-decreasing across consecutive ticks and `delta` is always
/// `>= 0`; the first tick reports the time since construction.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    previous: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            previous: 0.0,
        }
    }

    pub fn tick(&mut self) -> FrameTick {
        let elapsed = self.start.elapsed().as_secs_f32();
        let delta = elapsed - self.previous;
        self.previous = elapsed;
        FrameTick { elapsed, delta }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//! Frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Blocking "wait until the next frame" source.
pub trait FrameClock {
    /// Sleep until one frame at `fps` has elapsed since the previous tick.
    /// Returns the time actually elapsed since the previous tick.
    fn tick(&mut self, fps: u32) -> Duration;
}

impl<C: FrameClock + ?Sized> FrameClock for &mut C {
    fn tick(&mut self, fps: u32) -> Duration {
        (**self).tick(fps)
    }
}

/// Wall-clock pacing with `thread::sleep`.
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    last_tick: Option<Instant>,
}

impl FixedRateClock {
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    /// Frame duration for `fps` (a zero rate is treated as 1)
    pub fn frame_duration(fps: u32) -> Duration {
        Duration::from_secs(1) / fps.max(1)
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for FixedRateClock {
    fn tick(&mut self, fps: u32) -> Duration {
        let now = Instant::now();
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return Duration::ZERO;
        };

        let frame = Self::frame_duration(fps);
        if let Some(remaining) = frame.checked_sub(now.duration_since(last)) {
            thread::sleep(remaining);
        }

        let now = Instant::now();
        self.last_tick = Some(now);
        now.duration_since(last)
    }
}

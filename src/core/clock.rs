use std::time::Instant;

use crate::animation::FrameTime;

/// Wall clock for the frame loop: elapsed time since start plus per-tick delta
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Advance the clock and report the frame's timing
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        FrameTime::new(now.duration_since(self.start).as_secs_f32(), delta)
    }

    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Restart both elapsed time and delta from now
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic clock stepping at a fixed rate, for headless runs
#[derive(Debug, Clone, Copy)]
pub struct VirtualClock {
    hz: f32,
    frame: u64,
}

impl VirtualClock {
    pub fn new(hz: f32) -> Self {
        Self { hz, frame: 0 }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.frame += 1;
        FrameTime::fixed(self.frame, self.hz)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

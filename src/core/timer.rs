/// Self-contained timers driven by frame deltas

/// Throttled timer - minimum interval between fires
#[derive(Debug, Clone, Copy)]
pub struct Throttled {
    min_interval: f32,
    time_since_last: f32,
}

impl Throttled {
    /// Create throttled timer with minimum interval
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            time_since_last: 0.0,
        }
    }

    /// Returns true once at least `min_interval` seconds have accumulated
    pub fn try_tick(&mut self, delta: f32) -> bool {
        self.time_since_last += delta;

        if self.time_since_last >= self.min_interval {
            self.time_since_last = 0.0;
            true
        } else {
            false
        }
    }
}

/// Frames per second averaged over a fixed window
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    window: f32,
    elapsed: f32,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(window: f32) -> Self {
        Self {
            window,
            elapsed: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count a frame; returns the new rate when a window closes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < self.window {
            return None;
        }
        self.fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.fps)
    }

    /// Last completed measurement
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttled_enforces_minimum() {
        let mut timer = Throttled::new(0.1);

        assert!(!timer.try_tick(0.05));
        assert!(timer.try_tick(0.06));
        assert!(!timer.try_tick(0.05));
    }

    #[test]
    fn fps_reports_once_per_window() {
        let mut counter = FpsCounter::new(1.0);

        for _ in 0..63 {
            assert_eq!(counter.tick(1.0 / 64.0), None);
        }
        assert_eq!(counter.tick(1.0 / 64.0), Some(64.0));
        assert_eq!(counter.fps(), 64.0);
        assert_eq!(counter.tick(1.0 / 64.0), None);
    }
}

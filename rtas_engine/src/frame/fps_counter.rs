/// Throttled frames-per-second readout.
///
/// Real time is accumulated across frames; once the accumulator reaches
/// the update interval, the FPS of the *current* frame (not an average)
/// is reported and the accumulator restarts from zero.

/// FPS counter settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsConfig {
    /// Seconds between two displayed values
    pub update_interval: f32,
    /// Delta floor, so a zero-length frame does not divide by zero
    pub min_delta: f32,
}

impl Default for FpsConfig {
    fn default() -> Self {
        Self {
            update_interval: 0.2,
            min_delta: 1e-4,
        }
    }
}

/// Throttled FPS counter
///
/// The accumulator starts full, so the very first frame is displayed.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    config: FpsConfig,
    accumulator: f32,
    last_realtime: f32,
    last_fps: Option<u32>,
}

impl FpsCounter {
    pub fn new(config: FpsConfig) -> Self {
        Self {
            config,
            accumulator: config.update_interval,
            last_realtime: 0.0,
            last_fps: None,
        }
    }

    /// Advance by one frame of `delta` seconds.
    ///
    /// Returns the value to display when the interval has elapsed.
    pub fn tick(&mut self, delta: f32) -> Option<u32> {
        self.accumulator += delta;
        if self.accumulator < self.config.update_interval {
            return None;
        }

        let fps = (1.0 / delta.max(self.config.min_delta)).ceil() as u32;
        self.accumulator = 0.0;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// Advance to `realtime_since_startup` (seconds), deriving the frame
    /// delta from the previous call (or from zero on the first call).
    pub fn update(&mut self, realtime_since_startup: f32) -> Option<u32> {
        let delta = realtime_since_startup - self.last_realtime;
        self.last_realtime = realtime_since_startup;
        self.tick(delta)
    }

    /// Last displayed value
    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }

    /// Display string for a value
    pub fn format(fps: u32) -> String {
        format!("FPS: {}", fps)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(FpsConfig::default())
    }
}

#[cfg(test)]
#[path = "fps_counter_tests.rs"]
mod tests;

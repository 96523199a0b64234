use std::time::{Duration, Instant};

use crate::shared::constants::FPS_WINDOW_MS;

/// Windowed frames-per-second estimator.
///
/// Counts frames until at least one full window (1000 ms) has elapsed,
/// then publishes `frames * 1000 / elapsed_ms` and starts a new window.
/// Between window closes the last published value is reported unchanged,
/// so the readout steps once per second rather than smoothing.
///
/// The current time is an argument so callers on a capture thread pass
/// `Instant::now()` while tests drive synthetic clocks.
#[derive(Debug)]
pub struct FpsEstimator {
    frames: u32,
    window_start: Instant,
    fps: u32,
}

impl FpsEstimator {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
            fps: 0,
        }
    }

    /// Count one frame; close the window if it has fully elapsed.
    pub fn update(&mut self, now: Instant) {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_millis(FPS_WINDOW_MS) {
            let elapsed_ms = elapsed.as_millis().max(1) as u64;
            self.fps = (u64::from(self.frames) * 1000 / elapsed_ms) as u32;
            self.frames = 0;
            self.window_start = now;
        }
    }

    /// Last published value; 0 until the first window closes.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

//! Frame timing utilities

use std::time::{Duration, Instant};

/// Tracks per-frame delta, total elapsed time and FPS.
///
/// `tick` follows the wall clock; `tick_fixed` advances by a fixed step so a
/// headless run produces the same elapsed times on every machine.
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
    fps_timer: Duration,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fps_timer: Duration::ZERO,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame to update timing from the wall clock
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Advance by a fixed step instead of reading the wall clock
    pub fn tick_fixed(&mut self, delta: Duration) {
        self.last_frame = Instant::now();
        self.advance(delta);
    }

    fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        self.fps_timer += delta;
        if self.fps_timer >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / self.fps_timer.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = Duration::ZERO;
        }
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total time since the timer was created, in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ticks_accumulate() {
        let mut timer = FrameTimer::new();
        for _ in 0..120 {
            timer.tick_fixed(Duration::from_millis(16));
        }
        assert_eq!(timer.frame_count(), 120);
        assert!((timer.elapsed_secs() - 1.92).abs() < 1e-4);
        assert!((timer.delta_secs() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_fps_updates_after_one_second() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.fps(), 0.0);
        for _ in 0..50 {
            timer.tick_fixed(Duration::from_millis(20));
        }
        assert!((timer.fps() - 50.0).abs() < 0.01);
    }
}

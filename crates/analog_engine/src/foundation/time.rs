//! Time management utilities

use std::time::{Duration, Instant};

/// Frame counter that reports an average rate once per interval
pub struct FrameTimer {
    interval: Option<Duration>,
    window_start: Instant,
    frames_in_window: u32,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a timer reporting every `interval_secs`
    ///
    /// `0.0`, and any value that is not a representable duration, disables reporting.
    pub fn new(interval_secs: f32) -> Self {
        Self::starting_at(interval_secs, Instant::now())
    }

    fn starting_at(interval_secs: f32, now: Instant) -> Self {
        let interval = Duration::try_from_secs_f32(interval_secs)
            .ok()
            .filter(|interval| !interval.is_zero());
        Self {
            interval,
            window_start: now,
            frames_in_window: 0,
            frame_count: 0,
        }
    }

    /// Count a frame; returns the average frames per second when an interval has elapsed
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.frame_count += 1;
        self.frames_in_window += 1;

        let interval = self.interval?;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < interval {
            return None;
        }

        let fps = f64::from(self.frames_in_window) / elapsed.as_secs_f64();
        self.window_start = now;
        self.frames_in_window = 0;
        Some(fps)
    }

    /// Total frames counted since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reports_once_per_interval() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(1.0, start);

        for i in 1..60 {
            assert!(timer.tick_at(start + Duration::from_millis(i * 10)).is_none());
        }
        let fps = timer.tick_at(start + Duration::from_secs(1)).unwrap();
        assert_relative_eq!(fps, 60.0, epsilon = 1e-3);

        // Window restarts after a report
        assert!(timer.tick_at(start + Duration::from_millis(1500)).is_none());
        assert_eq!(timer.frame_count(), 61);
    }

    #[test]
    fn test_disabled_timer_still_counts() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(0.0, start);
        assert!(timer.tick_at(start + Duration::from_secs(10)).is_none());
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_unrepresentable_interval_disables_reporting() {
        let start = Instant::now();
        for interval in [1e30, f32::INFINITY, f32::NAN, -1.0] {
            let mut timer = FrameTimer::starting_at(interval, start);
            assert!(timer.tick_at(start + Duration::from_secs(3600)).is_none());
        }
    }
}

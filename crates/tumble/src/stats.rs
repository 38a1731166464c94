//! Frame timing statistics

use std::collections::VecDeque;
use web_time::Instant;

/// Frames averaged for the fps estimate
const WINDOW: usize = 60;
/// Frames between periodic log lines (2 seconds at 60 fps)
const LOG_INTERVAL: u64 = 120;

/// Rolling frame time tracker
pub struct FrameStats {
    frame_times: VecDeque<f32>,
    last_frame_instant: Instant,
    frame_count: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(WINDOW),
            last_frame_instant: Instant::now(),
            frame_count: 0,
        }
    }

    /// Begin a new frame
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_instant).as_secs_f32() * 1000.0;
        self.last_frame_instant = now;
        self.record(frame_time);

        if self.frame_count % LOG_INTERVAL == 0 {
            log::info!(
                "Frame {}: {:.2} ms/frame, {:.1} fps",
                self.frame_count,
                self.average_frame_time_ms(),
                self.fps()
            );
        }
    }

    fn record(&mut self, frame_time_ms: f32) {
        self.frame_count += 1;
        self.frame_times.push_back(frame_time_ms);
        if self.frame_times.len() > WINDOW {
            self.frame_times.pop_front();
        }
    }

    /// Average over the last `WINDOW` frames
    pub fn average_frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn fps(&self) -> f32 {
        let avg = self.average_frame_time_ms();
        if avg > 0.0 { 1000.0 / avg } else { 0.0 }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = FrameStats::new();
        assert_eq!(stats.frame_count, 0);
        assert_eq!(stats.average_frame_time_ms(), 0.0);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = FrameStats::new();
        for _ in 0..WINDOW {
            stats.record(10.0);
        }
        for _ in 0..WINDOW {
            stats.record(20.0);
        }
        assert_eq!(stats.frame_count, 2 * WINDOW as u64);
        assert!((stats.average_frame_time_ms() - 20.0).abs() < 1e-4);
        assert!((stats.fps() - 50.0).abs() < 1e-3);
    }
}

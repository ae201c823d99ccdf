//! Frame timing for the hosts
//!
//! `now_seconds` is a monotonic-ish clock: only differences between two calls
//! mean anything. `FpsCounter` turns frame timestamps into a rolling rate.

use std::collections::VecDeque;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_seconds() -> f64 {
    match web_sys::window().and_then(|w| w.performance()) {
        Some(perf) => perf.now() / 1000.0,
        // No high resolution timer, fall back to the wall clock
        None => js_sys::Date::now() / 1000.0,
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64()
}

const DEFAULT_WINDOW: usize = 60;

/// Frame rate over a sliding window of recent frames
pub struct FpsCounter {
    stamps_ms: VecDeque<f64>,
    window: usize,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    /// Average over the last `window` frames (at least two)
    pub fn with_window(window: usize) -> Self {
        let window = window.max(2);
        Self {
            stamps_ms: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(now_seconds() * 1000.0);
    }

    /// Record a frame at an explicit timestamp in milliseconds
    pub fn tick_at(&mut self, now_ms: f64) {
        self.stamps_ms.push_back(now_ms);
        while self.stamps_ms.len() > self.window {
            self.stamps_ms.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.stamps_ms.front(), self.stamps_ms.back()) else {
            return 0.0;
        };
        let span_ms = last - first;
        if span_ms <= 0.0 {
            return 0.0;
        }
        (self.stamps_ms.len() - 1) as f64 * 1000.0 / span_ms
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_needs_two_frames() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.fps(), 0.0);
        counter.tick_at(0.0);
        assert_eq!(counter.fps(), 0.0);
    }

    #[test]
    fn test_fps_steady_rate() {
        let mut counter = FpsCounter::new();
        for i in 0..100 {
            counter.tick_at(i as f64 * 20.0);
        }
        assert!((counter.fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_drops_old_frames() {
        let mut counter = FpsCounter::with_window(3);
        // A slow start that falls out of the window
        counter.tick_at(0.0);
        counter.tick_at(1000.0);
        for t in [1010.0, 1020.0, 1030.0] {
            counter.tick_at(t);
        }
        assert!((counter.fps() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_clock_moves_forward() {
        let a = now_seconds();
        let b = now_seconds();
        assert!(b >= a);
    }
}

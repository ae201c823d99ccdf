//! Frame loop around a [`Field`]
//!
//! The host decides when frames happen (rAF in the browser, egui's update in
//! the preview, a plain loop in the CLI). The animator owns the field and its
//! RNG and only needs to be told "render a frame now" or "stop".

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use super::config::FieldConfig;
use super::field::Field;
use super::surface::Surface;

/// Source of frame ticks; each tick carries a host timestamp in milliseconds.
/// `None` means the host is gone and the loop should end.
pub trait TickSource {
    fn next_tick(&mut self) -> Option<f64>;
}

impl<I: Iterator<Item = f64>> TickSource for I {
    fn next_tick(&mut self) -> Option<f64> {
        self.next()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

pub struct Animator {
    field: Field,
    rng: StdRng,
    state: LoopState,
    frames: u64,
    last_tick: Option<f64>,
}

impl Animator {
    /// Create a running animator with an entropy-seeded RNG
    pub fn new(config: FieldConfig, width: f64, height: f64) -> Self {
        Self::with_rng(config, width, height, StdRng::from_entropy())
    }

    /// Create a running animator with a fixed seed (reproducible layouts)
    pub fn with_seed(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
        Self::with_rng(config, width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, width: f64, height: f64, mut rng: StdRng) -> Self {
        let field = Field::new(config, width, height, &mut rng);
        info!(
            width = field.width(),
            height = field.height(),
            points = field.points().len(),
            "Particle field started"
        );
        Self {
            field,
            rng,
            state: LoopState::Running,
            frames: 0,
            last_tick: None,
        }
    }

    /// Update and draw one frame. Returns whether another frame should be
    /// scheduled; a stopped animator draws nothing.
    pub fn frame(&mut self, surface: &mut impl Surface) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }

        self.field.step();
        self.field.draw(surface);
        self.frames += 1;
        true
    }

    /// Timestamped variant of [`Animator::frame`] used by tick-driven hosts
    pub fn frame_at(&mut self, timestamp: f64, surface: &mut impl Surface) -> bool {
        if let Some(last) = self.last_tick {
            trace!(frame = self.frames, dt_ms = timestamp - last, "Frame");
        }
        self.last_tick = Some(timestamp);
        self.frame(surface)
    }

    /// Render one frame per tick until the source ends or the animator is
    /// stopped. Returns the number of frames rendered by this call.
    pub fn run(&mut self, ticks: &mut impl TickSource, surface: &mut impl Surface) -> u64 {
        let start = self.frames;
        while self.is_running() {
            let Some(timestamp) = ticks.next_tick() else {
                debug!(frames = self.frames, "Tick source ended");
                break;
            };
            self.frame_at(timestamp, surface);
        }
        self.frames - start
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            info!(frames = self.frames, "Particle field stopped");
        }
        self.state = LoopState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height, &mut self.rng);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.field.pointer_moved(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.field.pointer_left();
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Total frames rendered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::RecordingSurface;

    fn animator() -> Animator {
        Animator::with_seed(FieldConfig::default(), 400.0, 300.0, 42)
    }

    #[test]
    fn test_run_until_ticks_end() {
        let mut a = animator();
        let mut surface = RecordingSurface::new();
        let mut ticks = (0..10).map(|i| i as f64 * 16.0);

        assert_eq!(a.run(&mut ticks, &mut surface), 10);
        assert_eq!(a.frames(), 10);
        assert_eq!(surface.clear_count(), 10);
        assert_eq!(surface.circle_count(), 550);
        assert!(a.is_running());
    }

    #[test]
    fn test_stopped_animator_draws_nothing() {
        let mut a = animator();
        let mut surface = RecordingSurface::new();
        assert!(a.frame(&mut surface));

        a.stop();
        surface.reset();
        assert!(!a.frame(&mut surface));
        assert!(surface.commands.is_empty());
        assert_eq!(a.state(), LoopState::Stopped);

        let mut ticks = std::iter::repeat(0.0);
        assert_eq!(a.run(&mut ticks, &mut surface), 0);
        assert_eq!(a.frames(), 1);
    }

    struct StopAfter {
        left: u32,
    }

    impl TickSource for StopAfter {
        fn next_tick(&mut self) -> Option<f64> {
            if self.left == 0 {
                return None;
            }
            self.left -= 1;
            Some(0.0)
        }
    }

    #[test]
    fn test_custom_tick_source() {
        let mut a = animator();
        let mut surface = RecordingSurface::new();
        assert_eq!(a.run(&mut StopAfter { left: 3 }, &mut surface), 3);
        assert_eq!(a.run(&mut StopAfter { left: 2 }, &mut surface), 2);
        assert_eq!(a.frames(), 5);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = animator();
        let b = animator();
        assert_eq!(a.field().points(), b.field().points());
    }

    #[test]
    fn test_resize_and_pointer_pass_through() {
        let mut a = animator();
        a.pointer_moved(5.0, 6.0);
        a.resize(800.0, 600.0);
        assert_eq!(a.field().width(), 800.0);
        assert_eq!(a.field().points().len(), 55);
        assert!(a.field().pointer().active);

        a.pointer_left();
        assert!(!a.field().pointer().active);
    }
}

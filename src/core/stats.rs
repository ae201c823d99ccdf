//! Per-frame summary of what was drawn, for logging and tuning

use super::field::Field;
use super::surface::DrawCommand;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub lines: usize,
    pub dots: usize,
    /// Dots drawn larger than the base radius (pointer glow)
    pub glowing: usize,
    pub max_line_alpha: f64,
    /// Points currently past an edge, waiting for their bounce
    pub outside: usize,
}

impl FrameStats {
    /// Summarize one frame's draw commands against the field that drew them
    pub fn collect(frame: &[DrawCommand], field: &Field) -> Self {
        let base_radius = field.config().dot_radius;
        let mut stats = Self::default();

        for cmd in frame {
            match cmd {
                DrawCommand::Line { color, .. } => {
                    stats.lines += 1;
                    stats.max_line_alpha = stats.max_line_alpha.max(color.a);
                }
                DrawCommand::Circle { radius, .. } => {
                    stats.dots += 1;
                    if *radius > base_radius {
                        stats.glowing += 1;
                    }
                }
                DrawCommand::Clear { .. } => {}
            }
        }

        stats.outside = field
            .points()
            .iter()
            .filter(|p| p.x < 0.0 || p.x > field.width() || p.y < 0.0 || p.y > field.height())
            .count();

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Animator, FieldConfig, RecordingSurface};

    #[test]
    fn test_stats_without_pointer() {
        let mut a = Animator::with_seed(FieldConfig::default(), 400.0, 300.0, 3);
        let mut surface = RecordingSurface::new();
        a.frame(&mut surface);

        let stats = FrameStats::collect(surface.last_frame(), a.field());
        assert_eq!(stats.dots, 55);
        assert_eq!(stats.glowing, 0);
        assert_eq!(stats.lines, surface.line_count());
        assert!(stats.max_line_alpha <= 0.35);
    }

    #[test]
    fn test_stats_with_pointer_over_field() {
        let mut a = Animator::with_seed(FieldConfig::default(), 200.0, 200.0, 3);
        // Every point of a 200x200 field is within 220 of its centre
        a.pointer_moved(100.0, 100.0);
        let mut surface = RecordingSurface::new();
        a.frame(&mut surface);

        let stats = FrameStats::collect(surface.last_frame(), a.field());
        assert_eq!(stats.glowing, 55);
    }
}

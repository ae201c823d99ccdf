//! Drawing abstraction for the particle field
//!
//! The field only ever clears, strokes straight lines and fills circles, so
//! that is all a surface has to provide. The browser backs this with a
//! `CanvasRenderingContext2d`, the preview with an egui painter, and tests
//! and the CLI with [`RecordingSurface`].

/// Straight RGB colour with a fractional alpha in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(rgb: [u8; 3], a: f64) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }

    /// CSS `rgba(...)` string as accepted by canvas stroke/fill styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A 2D drawing target in surface-local (CSS pixel) coordinates
pub trait Surface {
    /// Clear the rectangle (0, 0, width, height)
    fn clear(&mut self, width: f64, height: f64);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: Rgba);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Rgba);
}

/// One recorded drawing call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        width: f64,
        color: Rgba,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        color: Rgba,
    },
}

/// Surface that records every call instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded since the last clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        let c = Rgba::new([160, 200, 255], 0.35);
        assert_eq!(c.to_css(), "rgba(160, 200, 255, 0.35)");
    }

    #[test]
    fn test_last_frame_starts_at_clear() {
        let mut s = RecordingSurface::new();
        let c = Rgba::new([0, 0, 0], 1.0);
        s.clear(10.0, 10.0);
        s.fill_circle([1.0, 1.0], 2.0, c);
        s.clear(10.0, 10.0);
        s.stroke_line([0.0, 0.0], [1.0, 1.0], 1.0, c);

        let frame = s.last_frame();
        assert_eq!(frame.len(), 2);
        assert!(matches!(frame[0], DrawCommand::Clear { .. }));
        assert_eq!(s.clear_count(), 2);
        assert_eq!(s.line_count(), 1);
        assert_eq!(s.circle_count(), 1);
    }
}

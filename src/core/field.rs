//! Particle field state and the per-frame update rule
//!
//! A fixed number of points drift at constant speed, reversing an axis when
//! they leave the surface. Points closer than `link_distance` are joined by a
//! line that fades with distance; points near the pointer are drawn larger
//! and brighter.

use rand::Rng;
use tracing::{debug, trace};

use super::config::FieldConfig;
use super::surface::{Rgba, Surface};

/// A single drifting point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Velocity in units/frame, only its sign ever changes
    pub vx: f64,
    pub vy: f64,
}

impl Point {
    fn random(width: f64, height: f64, max_speed: f64, rng: &mut impl Rng) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: (rng.gen::<f64>() - 0.5) * 2.0 * max_speed,
            vy: (rng.gen::<f64>() - 0.5) * 2.0 * max_speed,
        }
    }

    /// Advance one frame; flips velocity on any axis that ended up out of
    /// bounds. Position is left where it is, so a point may sit just outside
    /// the surface for a frame.
    fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
    }

    fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Last known pointer position in surface-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

/// Radius and alpha a dot is drawn with this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotStyle {
    pub radius: f64,
    pub alpha: f64,
}

pub struct Field {
    config: FieldConfig,
    width: f64,
    height: f64,
    points: Vec<Point>,
    pointer: PointerState,
}

impl Field {
    pub fn new(config: FieldConfig, width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        let mut field = Self {
            points: Vec::with_capacity(config.point_count),
            config,
            width,
            height,
            pointer: PointerState {
                x: width / 2.0,
                y: height / 2.0,
                active: false,
            },
        };
        field.reinit(rng);
        field
    }

    /// Take new surface dimensions and regenerate every point.
    /// Nothing carries over from the previous layout except the pointer.
    pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl Rng) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        debug!(width = self.width, height = self.height, "Field resized");
        self.reinit(rng);
    }

    fn reinit(&mut self, rng: &mut impl Rng) {
        let (width, height, max_speed) = (self.width, self.height, self.config.max_speed);
        self.points.clear();
        self.points.extend(
            (0..self.config.point_count).map(|_| Point::random(width, height, max_speed, rng)),
        );
        trace!(count = self.points.len(), "Points regenerated");
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.x = x;
        self.pointer.y = y;
        self.pointer.active = true;
    }

    pub fn pointer_left(&mut self) {
        self.pointer.active = false;
    }

    /// Move every point by its velocity, bouncing off the edges
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.points {
            p.advance(width, height);
        }
    }

    /// Line alpha between two points, `None` if they are too far apart
    pub fn link_alpha(&self, a: &Point, b: &Point) -> Option<f64> {
        let max = self.config.link_distance;
        let dist_sq = a.distance_sq(b.x, b.y);
        if dist_sq < max * max {
            Some((1.0 - dist_sq.sqrt() / max) * self.config.link_alpha)
        } else {
            None
        }
    }

    /// Dot radius and alpha including the pointer glow
    pub fn dot_style(&self, p: &Point) -> DotStyle {
        let mut style = DotStyle {
            radius: self.config.dot_radius,
            alpha: self.config.dot_alpha,
        };

        if self.pointer.active {
            let max = self.config.hover_distance;
            let dist_sq = p.distance_sq(self.pointer.x, self.pointer.y);
            if dist_sq < max * max {
                let boost = 1.0 - dist_sq.sqrt() / max;
                style.radius += boost * self.config.hover_radius_boost;
                style.alpha += boost * self.config.hover_alpha_boost;
            }
        }

        style
    }

    /// Clear the surface and draw links and dots for the current positions
    pub fn draw(&self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);

        for (i, p) in self.points.iter().enumerate() {
            for q in &self.points[i + 1..] {
                if let Some(alpha) = self.link_alpha(p, q) {
                    surface.stroke_line(
                        [p.x, p.y],
                        [q.x, q.y],
                        self.config.link_width,
                        Rgba::new(self.config.link_color, alpha),
                    );
                }
            }

            let style = self.dot_style(p);
            surface.fill_circle(
                [p.x, p.y],
                style.radius,
                Rgba::new(self.config.dot_color, style.alpha),
            );
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Negative, NaN and infinite extents collapse to an empty axis
fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

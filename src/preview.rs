//! Native preview window for tuning the field without a browser
//!
//! Paints the field into an egui panel; hovering the panel drives the
//! pointer glow and resizing the window regenerates the points, the same
//! way the page does.

use eframe::egui;
use tracing::info;

use crate::core::{Animator, FieldConfig, Rgba, Surface};
use crate::theme::{colors, preview_visuals, to_color32};
use crate::time::FpsCounter;

/// Surface over an egui painter, offset to the panel's top-left corner
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl PainterSurface<'_> {
    fn pos(&self, p: [f64; 2]) -> egui::Pos2 {
        self.origin + egui::vec2(p[0] as f32, p[1] as f32)
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        let rect = egui::Rect::from_min_size(self.origin, egui::vec2(width as f32, height as f32));
        self.painter.rect_filled(rect, 0.0, colors::BG_PRIMARY);
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: Rgba) {
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            egui::Stroke::new(width as f32, to_color32(color)),
        );
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Rgba) {
        self.painter
            .circle_filled(self.pos(center), radius as f32, to_color32(color));
    }
}

pub struct PreviewApp {
    config: FieldConfig,
    seed: Option<u64>,
    /// Created on the first frame, once the panel size is known
    animator: Option<Animator>,
    size: egui::Vec2,
    fps_counter: FpsCounter,
}

impl PreviewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: FieldConfig, seed: Option<u64>) -> Self {
        cc.egui_ctx.set_visuals(preview_visuals());
        Self {
            config,
            seed,
            animator: None,
            size: egui::Vec2::ZERO,
            fps_counter: FpsCounter::new(),
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        let points = self
            .animator
            .as_ref()
            .map_or(0, |a| a.field().points().len());

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                    .color(colors::TEXT_MUTED)
                    .monospace()
                    .size(11.0),
            );
            ui.label(
                egui::RichText::new(format!("{} points", points))
                    .color(colors::TEXT_MUTED)
                    .monospace()
                    .size(11.0),
            );
            ui.label(
                egui::RichText::new(format!("{:.0}x{:.0}", self.size.x, self.size.y))
                    .color(colors::TEXT_MUTED)
                    .monospace()
                    .size(11.0),
            );
        });
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Continuous animation
        ctx.request_repaint();
        self.fps_counter.tick();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                self.render_header(ui);

                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                let size = rect.size();
                let (width, height) = (size.x as f64, size.y as f64);

                match self.animator.as_mut() {
                    Some(animator) if size != self.size => {
                        info!(width, height, "Preview resized");
                        animator.resize(width, height);
                    }
                    Some(_) => {}
                    None => {
                        self.animator = Some(match self.seed {
                            Some(seed) => {
                                Animator::with_seed(self.config.clone(), width, height, seed)
                            }
                            None => Animator::new(self.config.clone(), width, height),
                        });
                    }
                }
                self.size = size;

                let Some(animator) = self.animator.as_mut() else {
                    return;
                };

                match response.hover_pos() {
                    Some(pos) => {
                        let local = pos - rect.min;
                        animator.pointer_moved(local.x as f64, local.y as f64);
                    }
                    None => animator.pointer_left(),
                }

                let painter = ui.painter_at(rect);
                let mut surface = PainterSurface {
                    painter: &painter,
                    origin: rect.min,
                };
                animator.frame(&mut surface);
            });
    }
}

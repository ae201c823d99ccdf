//! `CanvasRenderingContext2d` backed drawing surface

use std::f64::consts::TAU;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas, `None` if it has no 2D context
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let Some(ctx) = canvas.get_context("2d")? else {
            return Ok(None);
        };
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Some(Self { canvas, ctx }))
    }

    /// Size the backing store to `width x height` CSS pixels at `dpr` and
    /// scale the context so drawing stays in CSS pixel units.
    pub fn fit(&self, width: f64, height: f64, dpr: f64) -> Result<(), JsValue> {
        self.canvas.set_width((width * dpr).max(0.0) as u32);
        self.canvas.set_height((height * dpr).max(0.0) as u32);
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], width: f64, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from[0], from[1]);
        self.ctx.line_to(to[0], to[1]);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center[0], center[1], radius, 0.0, TAU) {
            warn!(?e, radius, "Failed to trace dot");
            return;
        }
        self.ctx.fill();
    }
}

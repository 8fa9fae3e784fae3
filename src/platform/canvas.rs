use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{js_error, window};
use crate::error::{EngineError, Result};
use crate::render::{DrawSurface, TextAlign};
use crate::sim::Rect;

/// A canvas element appended to a host container
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    /// Create a `width`×`height` canvas inside the element `container_id`.
    /// Nothing is appended if the 2D context cannot be acquired.
    pub fn mount(container_id: &str, width: u32, height: u32) -> Result<Self> {
        let document = window()?
            .document()
            .ok_or_else(|| EngineError::Platform("no document".into()))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| EngineError::ContainerNotFound(container_id.to_string()))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| EngineError::Platform("created element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| EngineError::ContextUnavailable)?;

        container.append_child(&canvas).map_err(js_error)?;
        log::info!("Canvas {width}x{height} mounted in #{container_id}");

        Ok(Self {
            canvas,
            ctx,
            width: width as f32,
            height: height as f32,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: &str, line_width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign, color: &str) {
        self.ctx.set_font(&format!("{size}px monospace"));
        self.ctx.set_text_align(align.as_str());
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }

    /// Remove the canvas from the page
    fn release(&mut self) {
        self.canvas.remove();
        log::debug!("Canvas removed");
    }
}

//! Headless surface that records draw calls

use glam::Vec2;

use super::{DrawSurface, TextAlign};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { color: String },
    FillRect { rect: Rect, color: String },
    StrokeRect { rect: Rect, color: String },
    FillCircle { center: Vec2, radius: f32, color: String },
    StrokeCircle { center: Vec2, radius: f32, color: String },
    StrokePolygon { points: Vec<Vec2>, color: String },
    Text { text: String, pos: Vec2, align: TextAlign },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    released: bool,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            released: false,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands since the last `Clear` (one frame's worth)
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn push(&mut self, command: DrawCommand) {
        if !self.released {
            self.commands.push(command);
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, color: &str) {
        self.push(DrawCommand::Clear {
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, _line_width: f32) {
        self.push(DrawCommand::StrokeRect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, _line_width: f32) {
        self.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: &str, _line_width: f32) {
        self.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, _size: f32, align: TextAlign, _color: &str) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            align,
        });
    }

    fn release(&mut self) {
        self.released = true;
    }
}

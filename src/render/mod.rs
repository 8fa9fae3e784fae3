//! Drawing surface contract
//!
//! Games draw through `DrawSurface` only. The browser implementation wraps a
//! `CanvasRenderingContext2d`; `RecordingSurface` captures commands headlessly.

pub mod recording;

pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::sim::{GameState, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Immediate-mode 2D drawing in pixel coordinates
pub trait DrawSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn clear(&mut self, color: &str);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32);
    /// Closed outline through `points`
    fn stroke_polygon(&mut self, points: &[Vec2], color: &str, line_width: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign, color: &str);

    /// Detach from the host. Further draws are ignored.
    fn release(&mut self) {}
}

/// Shared colors
pub mod palette {
    pub const BACKGROUND: &str = "#000000";
    pub const FOREGROUND: &str = "#ffffff";
    pub const ACCENT: &str = "#0095dd";
    pub const HAZARD: &str = "#ff4136";
    pub const PICKUP: &str = "#ffdc00";
    pub const DIM: &str = "#888888";
    pub const OVERLAY: &str = "rgba(0, 0, 0, 0.6)";
    pub const WALL: &str = "#1f3fbf";
    pub const FRIGHTENED: &str = "#3355ff";
    pub const GHOSTS: [&str; 4] = ["#ff0000", "#ffb8ff", "#00ffff", "#ffb852"];
    pub const BRICK_ROWS: [&str; 6] = [
        "#ff4136", "#ff851b", "#ffdc00", "#2ecc40", "#0074d9", "#b10dc9",
    ];
}

/// Score, lives and level along the top edge
pub fn draw_hud(surface: &mut dyn DrawSurface, score: u64, lives: u8, level: u32) {
    let width = surface.width();
    surface.fill_text(
        &format!("Score: {score}"),
        Vec2::new(8.0, 18.0),
        16.0,
        TextAlign::Left,
        palette::FOREGROUND,
    );
    surface.fill_text(
        &format!("Level {level}"),
        Vec2::new(width / 2.0, 18.0),
        16.0,
        TextAlign::Center,
        palette::DIM,
    );
    surface.fill_text(
        &format!("Lives: {lives}"),
        Vec2::new(width - 8.0, 18.0),
        16.0,
        TextAlign::Right,
        palette::FOREGROUND,
    );
}

/// Banner for every phase except `Playing`
pub fn draw_phase_overlay(surface: &mut dyn DrawSurface, state: GameState, waiting_hint: &str) {
    let (title, hint) = match state {
        GameState::Playing => return,
        GameState::Waiting => ("Ready", waiting_hint),
        GameState::Paused => ("Paused", "Press P to resume"),
        GameState::GameOver => ("Game Over", "Press ENTER to restart"),
        GameState::Won => ("You Win!", "Press ENTER to play again"),
        GameState::LevelComplete => ("Level Complete", "Press ENTER to continue"),
    };

    let (w, h) = (surface.width(), surface.height());
    surface.fill_rect(Rect::new(0.0, h / 2.0 - 40.0, w, 80.0), palette::OVERLAY);
    surface.fill_text(
        title,
        Vec2::new(w / 2.0, h / 2.0 - 6.0),
        28.0,
        TextAlign::Center,
        palette::FOREGROUND,
    );
    surface.fill_text(
        hint,
        Vec2::new(w / 2.0, h / 2.0 + 22.0),
        14.0,
        TextAlign::Center,
        palette::DIM,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_skipped_while_playing() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        draw_phase_overlay(&mut surface, GameState::Playing, "");
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_overlay_titles() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        draw_phase_overlay(&mut surface, GameState::GameOver, "");
        assert!(surface.texts().any(|t| t == "Game Over"));
    }

    #[test]
    fn test_hud_shows_score_and_lives() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        draw_hud(&mut surface, 120, 2, 3);
        let texts: Vec<_> = surface.texts().collect();
        assert!(texts.contains(&"Score: 120"));
        assert!(texts.contains(&"Lives: 2"));
        assert!(texts.contains(&"Level 3"));
    }
}

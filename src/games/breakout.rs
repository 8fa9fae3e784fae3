//! Breakout: paddle, ball and a wall of bricks
//!
//! The ball rests on the paddle until launched. Clearing every brick finishes
//! the level; the last level wins the game.

use glam::Vec2;

use crate::config::Action;
use crate::consts::DEFAULT_LIVES;
use crate::input::{InputRouter, TouchInput, TouchPhase};
use crate::render::{DrawSurface, draw_hud, draw_phase_overlay, palette};
use crate::sim::{
    Entity, Frame, GameState, LifeLoss, Live, Rect, Scoreboard, Simulation, aabb_overlap,
    clamp_to_bounds, compact, rect_contact, reflect_velocity,
};

pub const PADDLE_WIDTH: f32 = 75.0;
pub const PADDLE_HEIGHT: f32 = 10.0;
/// Gap between the paddle and the bottom edge
pub const PADDLE_MARGIN: f32 = 10.0;
/// Pixels per frame while a direction is held
pub const PADDLE_SPEED: f32 = 7.0;

pub const BALL_RADIUS: f32 = 6.0;
pub const LAUNCH_VELOCITY: Vec2 = Vec2::new(3.0, -4.0);
/// Steepest deflection off the paddle edge
pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

pub const BRICK_COLUMNS: usize = 8;
pub const BRICK_HEIGHT: f32 = 16.0;
pub const BRICK_PADDING: f32 = 6.0;
pub const BRICK_TOP: f32 = 40.0;
pub const BRICK_SIDE: f32 = 16.0;
pub const BRICK_POINTS: u64 = 10;

pub const MAX_LEVEL: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub body: Entity,
    pub hits: u8,
    pub row: usize,
}

impl Live for Brick {
    fn is_active(&self) -> bool {
        self.body.active
    }
}

#[derive(Debug, Clone)]
pub struct Breakout {
    width: f32,
    height: f32,
    paddle: Entity,
    ball: Entity,
    bricks: Vec<Brick>,
    board: Scoreboard,
    state: GameState,
    /// Finger x while a touch is down; overrides held keys
    touch_x: Option<f32>,
}

impl Breakout {
    pub fn new(width: f32, height: f32) -> Self {
        let mut game = Self {
            width,
            height,
            paddle: Entity::rect(0.0, 0.0, PADDLE_WIDTH, PADDLE_HEIGHT),
            ball: Entity::circle(Vec2::ZERO, BALL_RADIUS),
            bricks: Vec::new(),
            board: Scoreboard::new(DEFAULT_LIVES),
            state: GameState::Waiting,
            touch_x: None,
        };
        game.restart();
        game
    }

    pub fn level(&self) -> u32 {
        self.board.level
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn ball(&self) -> &Entity {
        &self.ball
    }

    pub fn paddle(&self) -> &Entity {
        &self.paddle
    }

    /// Rows grow with the level; rows above `level - 1` need two hits
    fn build_bricks(&mut self) {
        let rows = (3 + self.board.level as usize).min(palette::BRICK_ROWS.len());
        let cols = BRICK_COLUMNS as f32;
        let brick_w = (self.width - 2.0 * BRICK_SIDE - (cols - 1.0) * BRICK_PADDING) / cols;

        self.bricks.clear();
        for row in 0..rows {
            for col in 0..BRICK_COLUMNS {
                let x = BRICK_SIDE + col as f32 * (brick_w + BRICK_PADDING);
                let y = BRICK_TOP + row as f32 * (BRICK_HEIGHT + BRICK_PADDING);
                let hits = if row + 1 < self.board.level as usize { 2 } else { 1 };
                self.bricks.push(Brick {
                    body: Entity::rect(x, y, brick_w, BRICK_HEIGHT),
                    hits,
                    row,
                });
            }
        }
    }

    /// Paddle centered at the bottom, ball resting on it
    fn reset_positions(&mut self) {
        let rest = paddle_rest(self.width, self.height);
        self.paddle.pos = Vec2::new(rest.x, rest.y);
        self.ball.pos = Vec2::new(self.width / 2.0, self.paddle.pos.y - BALL_RADIUS);
        self.ball.vel = Vec2::ZERO;
        self.touch_x = None;
    }

    fn launch(&mut self) {
        self.ball.vel = LAUNCH_VELOCITY;
        self.state = GameState::Playing;
        log::debug!("breakout: launch");
    }

    fn next_level(&mut self) {
        self.board.level += 1;
        self.build_bricks();
        self.reset_positions();
        self.state = GameState::Waiting;
        log::info!("breakout: level {}", self.board.level);
    }

    /// Launch, advance or restart depending on phase
    fn advance(&mut self) {
        match self.state {
            GameState::Waiting => self.launch(),
            GameState::LevelComplete => self.next_level(),
            GameState::GameOver | GameState::Won => self.restart(),
            GameState::Playing | GameState::Paused => {}
        }
    }

    fn move_paddle(&mut self, input: &InputRouter) {
        let target = match self.touch_x {
            Some(x) => x - PADDLE_WIDTH / 2.0,
            None => {
                let mut x = self.paddle.pos.x;
                if input.is_held(Action::Left) {
                    x -= PADDLE_SPEED;
                }
                if input.is_held(Action::Right) {
                    x += PADDLE_SPEED;
                }
                x
            }
        };
        self.paddle.pos = clamp_to_bounds(
            Vec2::new(target, self.paddle.pos.y),
            self.paddle.size(),
            self.width,
            self.height,
        );
    }

    fn bounce_off_walls(&mut self) {
        let ball = &mut self.ball;
        if ball.pos.x - BALL_RADIUS < 0.0 {
            ball.pos.x = BALL_RADIUS;
            ball.vel.x = ball.vel.x.abs();
        } else if ball.pos.x + BALL_RADIUS > self.width {
            ball.pos.x = self.width - BALL_RADIUS;
            ball.vel.x = -ball.vel.x.abs();
        }
        if ball.pos.y - BALL_RADIUS < 0.0 {
            ball.pos.y = BALL_RADIUS;
            ball.vel.y = ball.vel.y.abs();
        }
    }

    /// Only a descending ball bounces. The exit angle follows where it hit:
    /// center goes straight up, edges deflect up to `MAX_BOUNCE_ANGLE`.
    fn bounce_off_paddle(&mut self) -> bool {
        let paddle = self.paddle.aabb();
        if self.ball.vel.y <= 0.0 || !aabb_overlap(&self.ball.aabb(), &paddle) {
            return false;
        }

        let offset = ((self.ball.pos.x - paddle.center().x) / (paddle.w / 2.0)).clamp(-1.0, 1.0);
        let angle = offset * MAX_BOUNCE_ANGLE;
        let speed = self.ball.vel.length();
        self.ball.vel = Vec2::new(speed * angle.sin(), -speed * angle.cos());
        self.ball.pos.y = paddle.y - BALL_RADIUS;
        true
    }

    /// At most one brick per frame
    fn hit_bricks(&mut self) {
        let ball_box = self.ball.aabb();
        let hit = self
            .bricks
            .iter_mut()
            .filter(|brick| brick.body.active)
            .find_map(|brick| rect_contact(&ball_box, &brick.body.aabb()).map(|c| (brick, c)));

        let Some((brick, contact)) = hit else {
            return;
        };

        if self.ball.vel.dot(contact.normal) < 0.0 {
            self.ball.vel = reflect_velocity(self.ball.vel, contact.normal);
        }
        self.ball.pos += contact.normal * contact.penetration;

        brick.hits = brick.hits.saturating_sub(1);
        self.board.add(BRICK_POINTS);
        if brick.hits == 0 {
            brick.body.active = false;
        }
    }

    fn lose_ball(&mut self) {
        match self.board.lose_life() {
            LifeLoss::Respawn => {
                log::debug!("breakout: ball lost, {} lives left", self.board.lives);
                self.reset_positions();
                self.state = GameState::Waiting;
            }
            LifeLoss::GameOver => {
                log::info!("breakout: game over with {} points", self.board.score);
                self.state = GameState::GameOver;
            }
        }
    }
}

impl Simulation for Breakout {
    fn name(&self) -> &'static str {
        "breakout"
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn score(&self) -> u64 {
        self.board.score
    }

    fn lives(&self) -> u8 {
        self.board.lives
    }

    fn update(&mut self, frame: &Frame<'_>) {
        if self.state != GameState::Playing {
            return;
        }

        self.move_paddle(frame.input);
        self.ball.integrate();
        self.bounce_off_walls();
        if !self.bounce_off_paddle() {
            self.hit_bricks();
        }

        if self.ball.pos.y - BALL_RADIUS > self.height {
            self.lose_ball();
        }

        compact(&mut self.bricks);
        if self.state == GameState::Playing && self.bricks.is_empty() {
            self.state = if self.board.level >= MAX_LEVEL {
                GameState::Won
            } else {
                GameState::LevelComplete
            };
            log::info!("breakout: level {} cleared", self.board.level);
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear(palette::BACKGROUND);

        for brick in self.bricks.iter().filter(|b| b.body.active) {
            let color = palette::BRICK_ROWS[brick.row % palette::BRICK_ROWS.len()];
            surface.fill_rect(brick.body.aabb(), color);
            if brick.hits > 1 {
                surface.stroke_rect(brick.body.aabb(), palette::FOREGROUND, 2.0);
            }
        }

        surface.fill_rect(self.paddle.aabb(), palette::ACCENT);
        surface.fill_circle(self.ball.pos, BALL_RADIUS, palette::FOREGROUND);

        draw_hud(surface, self.board.score, self.board.lives, self.board.level);
        draw_phase_overlay(surface, self.state, "Press SPACE or tap to launch");
    }

    fn on_action(&mut self, action: Action) {
        match action {
            Action::Pause => self.state = self.state.toggle_pause(),
            Action::Fire | Action::Start => self.advance(),
            _ => {}
        }
    }

    fn on_touch(&mut self, touch: &TouchInput) {
        match touch.phase {
            TouchPhase::Start if self.state != GameState::Playing => self.advance(),
            TouchPhase::Start | TouchPhase::Move => self.touch_x = Some(touch.pos.x),
            TouchPhase::End => self.touch_x = None,
        }
    }

    fn restart(&mut self) {
        self.board = Scoreboard::new(DEFAULT_LIVES);
        self.build_bricks();
        self.reset_positions();
        self.state = GameState::Waiting;
    }
}

/// Paddle rectangle for a given canvas, as placed at the start of a life
pub fn paddle_rest(width: f32, height: f32) -> Rect {
    Rect::new(
        (width - PADDLE_WIDTH) / 2.0,
        height - PADDLE_HEIGHT - PADDLE_MARGIN,
        PADDLE_WIDTH,
        PADDLE_HEIGHT,
    )
}

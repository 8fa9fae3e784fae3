//! Snake on a fixed grid
//!
//! Movement is a coarse step measured against the frame timestamp rather than
//! the frame count, so the pace holds on fast and slow displays alike.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{action_direction, held_direction};
use crate::config::Action;
use crate::input::{TouchInput, TouchPhase};
use crate::render::{DrawSurface, draw_hud, draw_phase_overlay, palette};
use crate::sim::{
    Direction, Frame, GameState, GridPos, LifeLoss, Rect, Scoreboard, Simulation, StepTimer,
    seeded_rng,
};

pub const CELL: f32 = 20.0;
pub const INITIAL_LENGTH: usize = 3;
pub const STEP_MS: f64 = 120.0;
pub const MIN_STEP_MS: f64 = 60.0;
/// Interval shaved off per speed tier
pub const SPEED_UP_MS: f64 = 10.0;
/// Food eaten per speed tier
pub const FOODS_PER_TIER: u32 = 5;
pub const FOOD_POINTS: u64 = 10;

const HUD_HEIGHT: f32 = 24.0;

#[derive(Debug, Clone)]
pub struct Snake {
    cols: i32,
    rows: i32,
    origin: Vec2,
    /// Head first
    body: VecDeque<GridPos>,
    heading: Direction,
    queued: Option<Direction>,
    food: Option<GridPos>,
    eaten: u32,
    step: StepTimer,
    board: Scoreboard,
    state: GameState,
    rng: Pcg32,
}

impl Snake {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let cols = ((width / CELL).floor() as i32).max(1);
        let rows = (((height - HUD_HEIGHT) / CELL).floor() as i32).max(1);
        let origin = Vec2::new(((width - cols as f32 * CELL) / 2.0).max(0.0), HUD_HEIGHT);

        let mut game = Self {
            cols,
            rows,
            origin,
            body: VecDeque::new(),
            heading: Direction::Right,
            queued: None,
            food: None,
            eaten: 0,
            step: StepTimer::new(STEP_MS),
            board: Scoreboard::new(1),
            state: GameState::Waiting,
            rng: seeded_rng(seed),
        };
        game.reset();
        game
    }

    pub fn body(&self) -> &VecDeque<GridPos> {
        &self.body
    }

    pub fn head(&self) -> Option<GridPos> {
        self.body.front().copied()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Option<GridPos> {
        self.food
    }

    pub fn step_interval_ms(&self) -> f64 {
        self.step.interval_ms()
    }

    pub fn grid_size(&self) -> (i32, i32) {
        (self.cols, self.rows)
    }

    /// Three cells in the middle, heading right
    fn reset(&mut self) {
        let len = INITIAL_LENGTH.min(self.cols as usize) as i32;
        let head = GridPos::new((self.cols / 2).max(len - 1), self.rows / 2);
        self.body = (0..len).map(|i| GridPos::new(head.x - i, head.y)).collect();
        self.heading = Direction::Right;
        self.queued = None;
        self.eaten = 0;
        self.board = Scoreboard::new(1);
        self.step = StepTimer::new(STEP_MS);
        self.food = self.place_food();
    }

    fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.cols && pos.y < self.rows
    }

    /// Uniform pick among cells the snake does not cover
    fn place_food(&mut self) -> Option<GridPos> {
        let free: Vec<GridPos> = (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| GridPos::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }

    /// Queue a turn; reversing onto the neck is ignored
    fn turn(&mut self, dir: Direction) {
        if dir != self.heading.opposite() {
            self.queued = Some(dir);
        }
    }

    fn advance(&mut self) {
        if let Some(dir) = self.queued.take() {
            self.heading = dir;
        }
        let Some(head) = self.head() else {
            return;
        };
        let next = head.step(self.heading);
        let grows = self.food == Some(next);

        // The tail moves out of the way unless the snake is growing
        let body_len = self.body.len() - usize::from(!grows);
        let bites_itself = self.body.iter().take(body_len).any(|cell| *cell == next);
        if !self.in_bounds(next) || bites_itself {
            self.crash();
            return;
        }

        self.body.push_front(next);
        if !grows {
            self.body.pop_back();
            return;
        }

        self.eaten += 1;
        self.board.add(FOOD_POINTS);
        if self.eaten % FOODS_PER_TIER == 0 {
            self.board.level += 1;
            let interval = (self.step.interval_ms() - SPEED_UP_MS).max(MIN_STEP_MS);
            self.step.set_interval_ms(interval);
            log::debug!("snake: step interval {interval}ms");
        }

        self.food = self.place_food();
        if self.food.is_none() {
            log::info!("snake: board filled with {} points", self.board.score);
            self.state = GameState::Won;
        }
    }

    fn crash(&mut self) {
        match self.board.lose_life() {
            LifeLoss::GameOver => {
                log::info!("snake: game over with {} points", self.board.score);
                self.state = GameState::GameOver;
            }
            LifeLoss::Respawn => {
                let board = self.board;
                self.reset();
                self.board = board;
            }
        }
    }

    fn begin(&mut self) {
        match self.state {
            GameState::Waiting => {
                self.step.reset();
                self.state = GameState::Playing;
            }
            GameState::GameOver | GameState::Won => self.restart(),
            _ => {}
        }
    }

    fn cell_rect(&self, pos: GridPos) -> Rect {
        Rect::new(
            self.origin.x + pos.x as f32 * CELL,
            self.origin.y + pos.y as f32 * CELL,
            CELL,
            CELL,
        )
    }
}

impl Simulation for Snake {
    fn name(&self) -> &'static str {
        "snake"
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
        if let Some(dir) = held_direction(frame.input) {
            self.turn(dir);
        }
        if self.step.due(frame.now_ms) {
            self.advance();
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear(palette::BACKGROUND);
        surface.stroke_rect(
            Rect::new(
                self.origin.x,
                self.origin.y,
                self.cols as f32 * CELL,
                self.rows as f32 * CELL,
            ),
            palette::DIM,
            1.0,
        );

        if let Some(food) = self.food {
            surface.fill_circle(self.cell_rect(food).center(), CELL * 0.4, palette::HAZARD);
        }
        for (i, cell) in self.body.iter().enumerate() {
            let color = if i == 0 { palette::ACCENT } else { palette::FOREGROUND };
            let r = self.cell_rect(*cell);
            surface.fill_rect(Rect::new(r.x + 1.0, r.y + 1.0, r.w - 2.0, r.h - 2.0), color);
        }

        draw_hud(surface, self.board.score, self.board.lives, self.board.level);
        draw_phase_overlay(surface, self.state, "Press ENTER or tap to start");
    }

    fn on_action(&mut self, action: Action) {
        match action {
            Action::Pause => {
                self.state = self.state.toggle_pause();
                // Re-anchor so time spent paused does not count
                self.step.reset();
            }
            Action::Start | Action::Fire => self.begin(),
            other => {
                if let Some(dir) = action_direction(other) {
                    self.turn(dir);
                }
            }
        }
    }

    fn on_touch(&mut self, touch: &TouchInput) {
        if self.state != GameState::Playing {
            if touch.phase == TouchPhase::Start {
                self.begin();
            }
            return;
        }
        if touch.phase == TouchPhase::End {
            return;
        }
        let Some(head) = self.head() else {
            return;
        };
        let offset = touch.pos - self.cell_rect(head).center();
        if let Some(dir) = Direction::from_offset(offset.x, offset.y) {
            self.turn(dir);
        }
    }

    fn restart(&mut self) {
        self.reset();
        self.state = GameState::Playing;
        log::info!("snake: restart");
    }
}

//! Helpers shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use canvas_arcade::render::TextAlign;
use canvas_arcade::sim::{Frame, Rect};
use canvas_arcade::{
    Action, Config, DrawSurface, GameSession, GameState, ManualScheduler, RecordingSurface,
    Simulation, TouchInput, create_game,
};
use glam::Vec2;

/// Recording surface the test keeps a handle to after boxing it into a session
#[derive(Clone)]
pub struct SharedSurface(pub Rc<RefCell<RecordingSurface>>);

impl SharedSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self(Rc::new(RefCell::new(RecordingSurface::new(width, height))))
    }

    pub fn texts(&self) -> Vec<String> {
        self.0.borrow().texts().map(str::to_string).collect()
    }

    pub fn is_released(&self) -> bool {
        self.0.borrow().is_released()
    }
}

impl DrawSurface for SharedSurface {
    fn width(&self) -> f32 {
        self.0.borrow().width()
    }

    fn height(&self) -> f32 {
        self.0.borrow().height()
    }

    fn clear(&mut self, color: &str) {
        self.0.borrow_mut().clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.0.borrow_mut().fill_rect(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f32) {
        self.0.borrow_mut().stroke_rect(rect, color, line_width);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.0.borrow_mut().fill_circle(center, radius, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32) {
        self.0
            .borrow_mut()
            .stroke_circle(center, radius, color, line_width);
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: &str, line_width: f32) {
        self.0.borrow_mut().stroke_polygon(points, color, line_width);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign, color: &str) {
        self.0.borrow_mut().fill_text(text, pos, size, align, color);
    }

    fn release(&mut self) {
        self.0.borrow_mut().release();
    }
}

/// What the session did to a `ProbeGame`
#[derive(Debug, Default)]
pub struct Probe {
    pub updates: u32,
    pub renders: u32,
    pub actions: Vec<Action>,
    pub touches: Vec<TouchInput>,
    pub timestamps: Vec<f64>,
}

/// Always-playing game that only records calls
pub struct ProbeGame(pub Rc<RefCell<Probe>>);

impl Simulation for ProbeGame {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn state(&self) -> GameState {
        GameState::Playing
    }

    fn score(&self) -> u64 {
        self.0.borrow().updates as u64
    }

    fn lives(&self) -> u8 {
        1
    }

    fn update(&mut self, frame: &Frame<'_>) {
        let mut probe = self.0.borrow_mut();
        probe.updates += 1;
        probe.timestamps.push(frame.now_ms);
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear("#000");
        self.0.borrow_mut().renders += 1;
    }

    fn on_action(&mut self, action: Action) {
        self.0.borrow_mut().actions.push(action);
    }

    fn on_touch(&mut self, touch: &TouchInput) {
        self.0.borrow_mut().touches.push(*touch);
    }

    fn restart(&mut self) {}
}

pub fn probe_session(
    config: Config,
) -> (GameSession<ManualScheduler>, Rc<RefCell<Probe>>, SharedSurface) {
    let probe = Rc::new(RefCell::new(Probe::default()));
    let surface = SharedSurface::new(config.width as f32, config.height as f32);
    let session = GameSession::new(
        config,
        Box::new(ProbeGame(probe.clone())),
        Box::new(surface.clone()),
        ManualScheduler::default(),
    )
    .unwrap();
    (session, probe, surface)
}

pub fn game_session(name: &str, seed: u64) -> (GameSession<ManualScheduler>, SharedSurface) {
    let config = Config::default();
    let game = create_game(name, &config, seed).unwrap();
    let surface = SharedSurface::new(config.width as f32, config.height as f32);
    let session =
        GameSession::new(config, game, Box::new(surface.clone()), ManualScheduler::default())
            .unwrap();
    (session, surface)
}

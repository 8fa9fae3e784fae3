//! Simulation module
//!
//! Gameplay primitives and the contract every game implements:
//! - No rendering or platform dependencies besides the `DrawSurface` trait
//! - Frame-count timing (one `update` per animation frame)
//! - Entities are compacted after the update pass, never during it

pub mod ai;
pub mod collision;
pub mod entity;
pub mod state;
pub mod timer;

pub use ai::{BehaviorMode, Direction, GridPos, ModeTimer, Steering, choose_direction};
pub use collision::{
    Contact, Rect, aabb_overlap, circle_overlap, clamp_to_bounds, point_in_rect, rect_contact,
    reflect_velocity, wrap_toroidal,
};
pub use entity::{Bounds, Entity, Live, compact};
pub use state::{GameState, LifeLoss, Scoreboard, seeded_rng};
pub use timer::{Cooldown, StepTimer};

use crate::config::Action;
use crate::input::{InputRouter, TouchInput};
use crate::render::DrawSurface;

/// Everything a game may read during one update
pub struct Frame<'a> {
    /// Held-key state for continuous movement
    pub input: &'a InputRouter,
    /// Frame timestamp in milliseconds (host clock)
    pub now_ms: f64,
}

/// A concrete game driven by a `GameSession`
pub trait Simulation {
    /// Factory id of the game
    fn name(&self) -> &'static str;

    fn state(&self) -> GameState;

    fn score(&self) -> u64;

    fn lives(&self) -> u8;

    /// Advance one frame. Must not change anything unless `state()` is `Playing`.
    fn update(&mut self, frame: &Frame<'_>);

    /// Draw the current state; never mutates the game
    fn render(&self, surface: &mut dyn DrawSurface);

    /// Edge-triggered action (key went down)
    fn on_action(&mut self, action: Action);

    /// Single-touch event in canvas pixel coordinates
    fn on_touch(&mut self, _touch: &TouchInput) {}

    /// Reinitialize all entities. Returns to `Playing`, or to `Waiting` for
    /// games that need an explicit launch.
    fn restart(&mut self);
}

//! Canvas Arcade - small arcade games on one shared frame-loop engine
//!
//! Core modules:
//! - `session`: lifecycle (start/stop/pause/resume/destroy) around one game
//! - `clock`: frame clock and the host scheduler contract
//! - `input`: keyboard/touch normalization into `Action`s
//! - `sim`: collision, timers, NPC behavior and the `Simulation` trait
//! - `games`: the concrete games and the factory
//! - `render`: drawing surface contract
//! - `platform`: browser bindings (wasm32 only)

pub mod clock;
pub mod config;
pub mod error;
pub mod games;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod render;
pub mod session;
pub mod sim;

pub use clock::{FrameClock, FrameScheduler, FrameTarget, FrameTicket, LifecycleState, ManualScheduler};
pub use config::{Action, Config, ConfigOverrides};
pub use error::{EngineError, Result};
pub use games::{GameKind, create_game};
pub use input::{InputRouter, TouchInput, TouchPhase};
pub use render::{DrawSurface, RecordingSurface};
pub use session::GameSession;
pub use sim::{GameState, Simulation};

/// Engine-wide constants
pub mod consts {
    /// Nominal frame duration (60 Hz host refresh)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default canvas size
    pub const DEFAULT_WIDTH: u32 = 480;
    pub const DEFAULT_HEIGHT: u32 = 320;

    /// Lives at the start of a run
    pub const DEFAULT_LIVES: u8 = 3;
}

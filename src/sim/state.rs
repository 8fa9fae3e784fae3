//! High-level game phase and shared scorekeeping

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current phase of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Entities placed, waiting for a start/launch action
    Waiting,
    /// Active gameplay; the only phase in which `update` advances anything
    Playing,
    /// Paused from inside the game (PAUSE action)
    Paused,
    /// Out of lives
    GameOver,
    /// Game-specific win condition reached
    Won,
    /// Level cleared, waiting for the advance action
    LevelComplete,
}

impl GameState {
    /// GameOver, Won and LevelComplete only accept restart/advance
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameState::GameOver | GameState::Won | GameState::LevelComplete
        )
    }

    /// PAUSE toggles Playing and Paused; other phases ignore it
    pub fn toggle_pause(self) -> Self {
        match self {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Waiting => "waiting",
            GameState::Playing => "playing",
            GameState::Paused => "paused",
            GameState::GameOver => "gameOver",
            GameState::Won => "won",
            GameState::LevelComplete => "levelComplete",
        }
    }
}

/// Result of losing a life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    /// Lives remain; reposition and keep playing
    Respawn,
    /// No lives left
    GameOver,
}

/// Score and lives shared by every game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
}

impl Scoreboard {
    pub fn new(lives: u8) -> Self {
        Self {
            score: 0,
            lives,
            level: 1,
        }
    }

    pub fn add(&mut self, points: u64) {
        self.score += points;
    }

    pub fn lose_life(&mut self) -> LifeLoss {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            LifeLoss::GameOver
        } else {
            LifeLoss::Respawn
        }
    }
}

/// Seeded RNG for a game instance
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

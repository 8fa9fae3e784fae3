//! Concrete games and the factory that builds them by id

pub mod asteroids;
pub mod breakout;
pub mod maze;
pub mod snake;

pub use asteroids::Asteroids;
pub use breakout::Breakout;
pub use maze::MazeChase;
pub use snake::Snake;

use std::str::FromStr;

use crate::config::{Action, Config};
use crate::error::{EngineError, Result};
use crate::input::InputRouter;
use crate::sim::{Direction, Simulation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Breakout,
    Maze,
    Asteroids,
    Snake,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Breakout,
        GameKind::Maze,
        GameKind::Asteroids,
        GameKind::Snake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Breakout => "breakout",
            GameKind::Maze => "maze",
            GameKind::Asteroids => "asteroids",
            GameKind::Snake => "snake",
        }
    }
}

impl FromStr for GameKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "breakout" => Ok(GameKind::Breakout),
            "maze" | "pacman" | "pac-man" => Ok(GameKind::Maze),
            "asteroids" => Ok(GameKind::Asteroids),
            "snake" => Ok(GameKind::Snake),
            _ => Err(EngineError::UnknownGame(s.to_string())),
        }
    }
}

/// Build a game by id. Unknown ids are a setup error.
pub fn create_game(name: &str, config: &Config, seed: u64) -> Result<Box<dyn Simulation>> {
    let kind: GameKind = name.parse()?;
    let (width, height) = (config.width as f32, config.height as f32);
    log::info!("Creating {} with seed {}", kind.as_str(), seed);

    Ok(match kind {
        GameKind::Breakout => Box::new(Breakout::new(width, height)),
        GameKind::Maze => Box::new(MazeChase::new(width, height, seed)?),
        GameKind::Asteroids => Box::new(Asteroids::new(width, height, seed)),
        GameKind::Snake => Box::new(Snake::new(width, height, seed)),
    })
}

/// Grid direction for a movement action
pub(crate) fn action_direction(action: Action) -> Option<Direction> {
    match action {
        Action::Up => Some(Direction::Up),
        Action::Down => Some(Direction::Down),
        Action::Left => Some(Direction::Left),
        Action::Right => Some(Direction::Right),
        _ => None,
    }
}

/// First held movement key, in `Direction::ALL` order
pub(crate) fn held_direction(input: &InputRouter) -> Option<Direction> {
    [Action::Up, Action::Down, Action::Left, Action::Right]
        .into_iter()
        .find(|action| input.is_held(*action))
        .and_then(action_direction)
}

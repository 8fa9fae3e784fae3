//! Setup errors
//!
//! Everything here is fatal and raised at construction or factory time.
//! Simulation edge cases are never errors; they are resolved inside `update`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("container element `{0}` not found")]
    ContainerNotFound(String),

    #[error("2D drawing context unavailable")]
    ContextUnavailable,

    #[error("unknown game `{0}`")]
    UnknownGame(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid maze layout: {0}")]
    InvalidLayout(String),

    #[error("failed to parse config overrides")]
    ConfigParse(#[from] serde_json::Error),

    #[error("platform call failed: {0}")]
    Platform(String),
}

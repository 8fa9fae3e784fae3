//! Engine configuration and the action vocabulary
//!
//! A `Config` is built once per session from defaults plus caller overrides
//! and never changes afterwards.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{EngineError, Result};

/// Abstract input actions understood by every game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
    Start,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Fire,
        Action::Pause,
        Action::Start,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::Fire => "FIRE",
            Action::Pause => "PAUSE",
            Action::Start => "START",
        }
    }

    /// Default key (as reported by `KeyboardEvent.key`)
    pub fn default_key(&self) -> &'static str {
        match self {
            Action::Up => "ArrowUp",
            Action::Down => "ArrowDown",
            Action::Left => "ArrowLeft",
            Action::Right => "ArrowRight",
            Action::Fire => " ",
            Action::Pause => "p",
            Action::Start => "Enter",
        }
    }
}

impl FromStr for Action {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "UP" => Ok(Action::Up),
            "DOWN" => Ok(Action::Down),
            "LEFT" => Ok(Action::Left),
            "RIGHT" => Ok(Action::Right),
            "FIRE" => Ok(Action::Fire),
            "PAUSE" => Ok(Action::Pause),
            "START" => Ok(Action::Start),
            _ => Err(EngineError::InvalidConfig(format!("unknown action {s:?}"))),
        }
    }
}

pub fn default_key_bindings() -> BTreeMap<Action, String> {
    Action::ALL
        .iter()
        .map(|action| (*action, action.default_key().to_string()))
        .collect()
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Listen to keydown/keyup
    pub use_keyboard: bool,
    /// Listen to touchstart/touchmove/touchend
    pub use_mobile: bool,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// One key per action
    pub key_bindings: BTreeMap<Action, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_keyboard: true,
            use_mobile: true,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            key_bindings: default_key_bindings(),
        }
    }
}

/// Caller-supplied overrides; absent fields keep their defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub use_keyboard: Option<bool>,
    pub use_mobile: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub key_bindings: BTreeMap<Action, String>,
}

impl ConfigOverrides {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Config {
    /// Merge overrides over the defaults and validate the result
    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = overrides.use_keyboard {
            config.use_keyboard = v;
        }
        if let Some(v) = overrides.use_mobile {
            config.use_mobile = v;
        }
        if let Some(v) = overrides.width {
            config.width = v;
        }
        if let Some(v) = overrides.height {
            config.height = v;
        }
        // Only the named actions are rebound
        config.key_bindings.extend(overrides.key_bindings);
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON override document, e.g. `{"width": 640, "keyBindings": {"FIRE": "x"}}`
    pub fn from_json(json: &str) -> Result<Self> {
        Self::with_overrides(ConfigOverrides::from_json(json)?)
    }

    /// Convenience for tests and the native demo
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        Self::with_overrides(ConfigOverrides {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        let mut seen: BTreeMap<String, Action> = BTreeMap::new();
        for (action, key) in &self.key_bindings {
            if key.is_empty() {
                return Err(EngineError::InvalidConfig(format!(
                    "empty key bound to {}",
                    action.as_str()
                )));
            }
            if let Some(other) = seen.insert(key.to_lowercase(), *action) {
                return Err(EngineError::InvalidConfig(format!(
                    "key {:?} bound to both {} and {}",
                    key,
                    other.as_str(),
                    action.as_str()
                )));
            }
        }

        Ok(())
    }

    pub fn key_for(&self, action: Action) -> Option<&str> {
        self.key_bindings.get(&action).map(String::as_str)
    }
}

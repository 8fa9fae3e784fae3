//! Keyboard and touch normalization
//!
//! Raw key strings are resolved to `Action`s through a table built once from
//! the config. Held keys are tracked separately so games can choose between
//! edge-triggered (menus, firing) and continuous (movement) semantics.

use std::collections::HashMap;

use glam::Vec2;

use crate::config::{Action, Config};

/// Phase of a single-touch event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// One touch point in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInput {
    pub phase: TouchPhase,
    pub pos: Vec2,
}

impl TouchInput {
    pub fn new(phase: TouchPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            pos: Vec2::new(x, y),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputRouter {
    use_keyboard: bool,
    use_mobile: bool,
    /// Lowercased key -> action, resolved at construction
    lookup: HashMap<String, Action>,
    /// Action -> lowercased key
    bound: HashMap<Action, String>,
    /// Live per-key state, keyed by lowercased key
    pressed_keys: HashMap<String, bool>,
    /// Last known position of the single tracked touch
    touch: Option<Vec2>,
    attached: bool,
}

impl InputRouter {
    pub fn new(config: &Config) -> Self {
        let mut lookup = HashMap::new();
        let mut bound = HashMap::new();
        for (action, key) in &config.key_bindings {
            let key = key.to_lowercase();
            lookup.insert(key.clone(), *action);
            bound.insert(*action, key);
        }

        Self {
            use_keyboard: config.use_keyboard,
            use_mobile: config.use_mobile,
            lookup,
            bound,
            pressed_keys: HashMap::new(),
            touch: None,
            attached: true,
        }
    }

    pub fn listens_to_keyboard(&self) -> bool {
        self.attached && self.use_keyboard
    }

    pub fn listens_to_touch(&self) -> bool {
        self.attached && self.use_mobile
    }

    /// Does `key` match the key bound to `action` (case-insensitive)?
    pub fn is_action_pressed(&self, action: Action, key: &str) -> bool {
        self.bound
            .get(&action)
            .is_some_and(|bound| *bound == key.to_lowercase())
    }

    /// Action bound to `key`, if any
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.lookup.get(&key.to_lowercase()).copied()
    }

    /// Record a keydown. Returns the bound action, if any.
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        if !self.listens_to_keyboard() {
            return None;
        }
        self.pressed_keys.insert(key.to_lowercase(), true);
        self.action_for(key)
    }

    /// Record a keyup. Returns the bound action, if any.
    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        if !self.listens_to_keyboard() {
            return None;
        }
        self.pressed_keys.insert(key.to_lowercase(), false);
        self.action_for(key)
    }

    pub fn is_key_down(&self, key: &str) -> bool {
        self.pressed_keys
            .get(&key.to_lowercase())
            .copied()
            .unwrap_or(false)
    }

    /// Is the key bound to `action` currently held?
    pub fn is_held(&self, action: Action) -> bool {
        self.bound
            .get(&action)
            .and_then(|key| self.pressed_keys.get(key))
            .copied()
            .unwrap_or(false)
    }

    pub fn pressed_keys(&self) -> &HashMap<String, bool> {
        &self.pressed_keys
    }

    /// Track a touch event. Returns it for forwarding when touch is enabled.
    pub fn touch(&mut self, touch: TouchInput) -> Option<TouchInput> {
        if !self.listens_to_touch() {
            return None;
        }
        self.touch = match touch.phase {
            TouchPhase::Start | TouchPhase::Move => Some(touch.pos),
            TouchPhase::End => None,
        };
        Some(touch)
    }

    pub fn active_touch(&self) -> Option<Vec2> {
        self.touch
    }

    /// Unsubscribe: forget all state and ignore further events
    pub fn detach(&mut self) {
        self.attached = false;
        self.pressed_keys.clear();
        self.touch = None;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

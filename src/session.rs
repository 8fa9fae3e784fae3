//! Game session: lifecycle, input routing and the frame loop around one game

use crate::clock::{FrameClock, FrameScheduler, FrameTarget, FrameTicket, LifecycleState, ManualScheduler};
use crate::config::{Action, Config};
use crate::error::Result;
use crate::input::{InputRouter, TouchInput};
use crate::render::DrawSurface;
use crate::sim::{Frame, GameState, Simulation};

pub struct GameSession<S: FrameScheduler> {
    config: Config,
    clock: FrameClock,
    input: InputRouter,
    game: Box<dyn Simulation>,
    surface: Box<dyn DrawSurface>,
    scheduler: S,
    destroyed: bool,
}

impl<S: FrameScheduler> GameSession<S> {
    pub fn new(
        config: Config,
        game: Box<dyn Simulation>,
        surface: Box<dyn DrawSurface>,
        scheduler: S,
    ) -> Result<Self> {
        config.validate()?;
        let input = InputRouter::new(&config);
        log::info!(
            "Session created for {} ({}x{})",
            game.name(),
            config.width,
            config.height
        );

        Ok(Self {
            config,
            clock: FrameClock::new(),
            input,
            game,
            surface,
            scheduler,
            destroyed: false,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.clock.state()
    }

    /// Frames that ran update + render
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn game(&self) -> &dyn Simulation {
        self.game.as_ref()
    }

    pub fn game_state(&self) -> GameState {
        self.game.state()
    }

    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Begin the frame loop. No-op unless stopped.
    pub fn start(&mut self) {
        if self.destroyed {
            log::warn!("start() on a destroyed session ignored");
            return;
        }
        if let Some(ticket) = self.clock.start() {
            log::info!("{}: running", self.game.name());
            let now = self.scheduler.now_ms();
            self.on_frame(ticket, now);
        }
    }

    pub fn stop(&mut self) {
        if self.clock.stop() {
            self.scheduler.cancel_frame();
            log::info!("{}: stopped", self.game.name());
        }
    }

    pub fn pause(&mut self) {
        if self.clock.pause() {
            log::info!("{}: paused", self.game.name());
        }
    }

    pub fn resume(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(ticket) = self.clock.resume() {
            log::info!("{}: resumed", self.game.name());
            let now = self.scheduler.now_ms();
            self.on_frame(ticket, now);
        }
    }

    /// Stop, unsubscribe input and detach the surface. Terminal.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop();
        self.input.detach();
        self.surface.release();
        self.destroyed = true;
        log::info!("{}: destroyed", self.game.name());
    }

    /// Keydown from the host. Returns the bound action so the host can
    /// suppress default browser handling.
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        let action = self.input.key_down(key)?;
        // Edge actions only reach a running game
        if self.clock.state() == LifecycleState::Running {
            log::debug!("{}: action {}", self.game.name(), action.as_str());
            self.game.on_action(action);
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        self.input.key_up(key)
    }

    pub fn touch(&mut self, touch: TouchInput) {
        let Some(touch) = self.input.touch(touch) else {
            return;
        };
        if self.clock.state() == LifecycleState::Running {
            self.game.on_touch(&touch);
        }
    }

    /// One frame: update then render, then queue the next callback
    fn run_frame(&mut self, ticket: FrameTicket, now_ms: f64) {
        let frame = Frame {
            input: &self.input,
            now_ms,
        };
        self.game.update(&frame);
        self.game.render(self.surface.as_mut());
        self.clock.record_frame();
        self.scheduler.request_frame(ticket);
    }
}

impl<S: FrameScheduler> FrameTarget for GameSession<S> {
    fn on_frame(&mut self, ticket: FrameTicket, now_ms: f64) {
        // Stale callbacks (stopped, paused, destroyed) end here
        if self.destroyed || !self.clock.admit(ticket) {
            log::trace!("{}: stale frame dropped", self.game.name());
            return;
        }
        self.run_frame(ticket, now_ms);
    }
}

impl GameSession<ManualScheduler> {
    /// Deliver the queued frame callback, if any. Returns whether one was queued.
    pub fn pump(&mut self) -> bool {
        match self.scheduler.take_pending() {
            Some((ticket, now)) => {
                self.on_frame(ticket, now);
                true
            }
            None => false,
        }
    }

    /// Pump up to `n` frames; stops early when the chain ends
    pub fn pump_frames(&mut self, n: usize) -> usize {
        (0..n).take_while(|_| self.pump()).count()
    }
}

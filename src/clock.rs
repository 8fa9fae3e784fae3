//! Frame clock and lifecycle
//!
//! The loop is "while Running, run one frame then wait for the host's next
//! animation callback". Each chain of frames carries a ticket; stopping,
//! pausing or restarting the chain bumps the generation so any callback the
//! host already queued finds a stale ticket and does nothing.

use crate::consts::FRAME_MS;

/// Run state of the engine, independent of any game's own phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Running,
    Paused,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Stopped => "stopped",
            LifecycleState::Running => "running",
            LifecycleState::Paused => "paused",
        }
    }
}

/// Identifies the frame chain a scheduled callback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

/// Host pacing signal (`requestAnimationFrame` in the browser)
pub trait FrameScheduler {
    /// Ask for one callback on the next frame, delivered to `FrameTarget::on_frame`
    fn request_frame(&mut self, ticket: FrameTicket);

    /// Drop the pending callback, if any
    fn cancel_frame(&mut self);

    /// Current host time in milliseconds
    fn now_ms(&self) -> f64;
}

/// Receiver of scheduled frames
pub trait FrameTarget {
    fn on_frame(&mut self, ticket: FrameTicket, now_ms: f64);
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    state: LifecycleState,
    generation: u64,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Stopped,
            generation: 0,
            frames: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Completed frames (update + render) since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Stopped -> Running. Returns the ticket for the first frame, or `None`
    /// if the clock was not stopped.
    pub fn start(&mut self) -> Option<FrameTicket> {
        if self.state != LifecycleState::Stopped {
            return None;
        }
        self.state = LifecycleState::Running;
        Some(self.new_chain())
    }

    /// Any state -> Stopped. Returns whether anything changed.
    pub fn stop(&mut self) -> bool {
        if self.state == LifecycleState::Stopped {
            return false;
        }
        self.state = LifecycleState::Stopped;
        self.generation += 1;
        true
    }

    /// Running -> Paused. The queued callback stays queued and aborts when it
    /// fires.
    pub fn pause(&mut self) -> bool {
        if self.state != LifecycleState::Running {
            return false;
        }
        self.state = LifecycleState::Paused;
        true
    }

    /// Paused -> Running with a fresh chain
    pub fn resume(&mut self) -> Option<FrameTicket> {
        if self.state != LifecycleState::Paused {
            return None;
        }
        self.state = LifecycleState::Running;
        Some(self.new_chain())
    }

    /// May a callback holding `ticket` run a frame?
    pub fn admit(&self, ticket: FrameTicket) -> bool {
        self.state == LifecycleState::Running && ticket.generation == self.generation
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    fn new_chain(&mut self) -> FrameTicket {
        self.generation += 1;
        FrameTicket {
            generation: self.generation,
        }
    }
}

/// Scheduler driven by hand: tests and the headless demo
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    pending: Option<FrameTicket>,
    now_ms: f64,
    frame_ms: f64,
    requests: u64,
    cancels: u64,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(FRAME_MS)
    }
}

impl ManualScheduler {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            pending: None,
            now_ms: 0.0,
            frame_ms,
            requests: 0,
            cancels: 0,
        }
    }

    pub fn pending(&self) -> Option<FrameTicket> {
        self.pending
    }

    /// Take the queued callback and advance the fake clock by one frame
    pub fn take_pending(&mut self) -> Option<(FrameTicket, f64)> {
        let ticket = self.pending.take()?;
        self.now_ms += self.frame_ms;
        Some((ticket, self.now_ms))
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }

    pub fn cancels(&self) -> u64 {
        self.cancels
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, ticket: FrameTicket) {
        self.requests += 1;
        self.pending = Some(ticket);
    }

    fn cancel_frame(&mut self) {
        if self.pending.take().is_some() {
            self.cancels += 1;
        }
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

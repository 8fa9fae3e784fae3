//! Frame-count cooldowns and the wall-clock step timer

/// Frame-counted gate for repeated actions (shooting, spawning, stepping)
///
/// Ready at `<= 0`; firing resets the counter to `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    remaining: i32,
    period: i32,
}

impl Cooldown {
    /// A cooldown that is ready immediately
    pub fn new(period: i32) -> Self {
        Self {
            remaining: 0,
            period,
        }
    }

    /// A cooldown that first becomes ready after `period` ticks
    pub fn primed(period: i32) -> Self {
        Self {
            remaining: period,
            period,
        }
    }

    /// Decrement by one frame
    #[inline]
    pub fn tick(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.remaining <= 0
    }

    /// Fire if ready. Returns whether the action may happen this frame.
    pub fn try_fire(&mut self) -> bool {
        if self.ready() {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn period(&self) -> i32 {
        self.period
    }

    pub fn set_period(&mut self, period: i32) {
        self.period = period;
    }
}

/// Gap between two frames treated as a suspension (engine pause, hidden tab)
/// rather than a slow frame
pub const STALL_MS: f64 = 500.0;

/// Coarse fixed-interval step measured in wall-clock milliseconds
///
/// Compares elapsed time each frame so the step rate does not depend on the
/// render frame rate. A stall re-anchors instead of stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTimer {
    interval_ms: f64,
    last_step_ms: Option<f64>,
    last_seen_ms: Option<f64>,
}

impl StepTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_step_ms: None,
            last_seen_ms: None,
        }
    }

    /// True when at least one interval elapsed since the previous step.
    /// The first call, and the first call after a stall, only anchor the timer.
    pub fn due(&mut self, now_ms: f64) -> bool {
        let stalled = self.last_seen_ms.is_some_and(|seen| now_ms - seen > STALL_MS);
        self.last_seen_ms = Some(now_ms);
        if stalled {
            self.last_step_ms = Some(now_ms);
            return false;
        }

        match self.last_step_ms {
            None => {
                self.last_step_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms - last >= self.interval_ms => {
                self.last_step_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }

    /// Forget the anchor (after a pause, so the next frame does not jump)
    pub fn reset(&mut self) {
        self.last_step_ms = None;
        self.last_seen_ms = None;
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms;
    }
}

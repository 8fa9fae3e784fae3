use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use super::window;
use crate::clock::{FrameScheduler, FrameTarget, FrameTicket};
use crate::error::Result;

/// A queued `requestAnimationFrame` callback; dropping it frees the closure
struct PendingFrame {
    id: i32,
    _callback: Closure<dyn FnMut(f64)>,
}

/// `requestAnimationFrame` driver
///
/// Holds only a weak reference to its target so a dropped session simply ends
/// the callback chain.
pub struct RafScheduler {
    window: Window,
    target: Option<Weak<RefCell<dyn FrameTarget>>>,
    pending: Option<PendingFrame>,
}

impl RafScheduler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            window: window()?,
            target: None,
            pending: None,
        })
    }

    /// Set the receiver of frame callbacks
    pub fn bind(&mut self, target: Weak<RefCell<dyn FrameTarget>>) {
        self.target = Some(target);
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self, ticket: FrameTicket) {
        let Some(target) = self.target.clone() else {
            log::warn!("Frame requested before the scheduler was bound");
            return;
        };

        let callback = Closure::once(move |now_ms: f64| {
            let Some(session) = target.upgrade() else {
                return;
            };
            // A busy session means we are re-entering from inside a frame
            if let Ok(mut guard) = session.try_borrow_mut() {
                guard.on_frame(ticket, now_ms);
            }
        });

        // Replacing the previous entry frees the closure that already ran
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => {
                self.pending = Some(PendingFrame {
                    id,
                    _callback: callback,
                })
            }
            Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(frame) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(frame.id);
        }
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

impl Drop for RafScheduler {
    /// The host must not call into a freed closure
    fn drop(&mut self) {
        self.cancel_frame();
    }
}

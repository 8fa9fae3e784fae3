//! Browser bindings (wasm32 only)
//!
//! - `CanvasSurface`: `DrawSurface` over a 2D canvas context
//! - `RafScheduler`: `FrameScheduler` over `requestAnimationFrame`
//! - `ArcadeHandle`: the object an embedding page constructs and drives

mod canvas;
mod handle;
mod scheduler;

pub use canvas::CanvasSurface;
pub use handle::ArcadeHandle;
pub use scheduler::RafScheduler;

use wasm_bindgen::prelude::*;

use crate::error::EngineError;

/// Module start: panic hook and console logger, once
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("canvas-arcade loaded");
    }
}

fn js_error(err: JsValue) -> EngineError {
    EngineError::Platform(format!("{err:?}"))
}

fn window() -> Result<web_sys::Window, EngineError> {
    web_sys::window().ok_or_else(|| EngineError::Platform("no window".into()))
}

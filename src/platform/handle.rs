use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent, Window};

use super::{CanvasSurface, RafScheduler, js_error, window};
use crate::clock::FrameTarget;
use crate::config::Config;
use crate::error::Result;
use crate::games::create_game;
use crate::input::{TouchInput, TouchPhase};
use crate::session::GameSession;

type Session = GameSession<RafScheduler>;

/// Run `f` against the session if it is still alive and not mid-frame
fn with_session<R>(session: &Weak<RefCell<Session>>, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
    let session = session.upgrade()?;
    let result = match session.try_borrow_mut() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => None,
    };
    result
}

/// DOM listeners owned by one handle; removed on destroy
struct Listeners {
    window: Window,
    canvas: HtmlCanvasElement,
    keyboard: Vec<(&'static str, Closure<dyn FnMut(KeyboardEvent)>)>,
    touch: Vec<(&'static str, Closure<dyn FnMut(TouchEvent)>)>,
}

impl Listeners {
    fn attach(session: &Rc<RefCell<Session>>, canvas: HtmlCanvasElement, config: &Config) -> Result<Self> {
        let mut listeners = Self {
            window: window()?,
            canvas,
            keyboard: Vec::new(),
            touch: Vec::new(),
        };

        if config.use_keyboard {
            let weak = Rc::downgrade(session);
            let keydown = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Bound keys (arrows, space) must not scroll the page
                if with_session(&weak, |s| s.key_down(&event.key())).flatten().is_some() {
                    event.prevent_default();
                }
            });
            let weak = Rc::downgrade(session);
            let keyup = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                with_session(&weak, |s| s.key_up(&event.key()));
            });
            listeners.keyboard = vec![("keydown", keydown), ("keyup", keyup)];
        }

        if config.use_mobile {
            listeners.touch = vec![
                ("touchstart", listeners.touch_listener(session, TouchPhase::Start)),
                ("touchmove", listeners.touch_listener(session, TouchPhase::Move)),
                ("touchend", listeners.touch_listener(session, TouchPhase::End)),
            ];
        }

        for (name, closure) in &listeners.keyboard {
            listeners
                .window
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
        }
        for (name, closure) in &listeners.touch {
            listeners
                .canvas
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(js_error)?;
        }
        Ok(listeners)
    }

    fn touch_listener(
        &self,
        session: &Rc<RefCell<Session>>,
        phase: TouchPhase,
    ) -> Closure<dyn FnMut(TouchEvent)> {
        let weak = Rc::downgrade(session);
        let canvas = self.canvas.clone();
        Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            // A lifted finger is only in changedTouches
            let list = match phase {
                TouchPhase::End => event.changed_touches(),
                _ => event.touches(),
            };
            let Some(touch) = list.get(0) else {
                return;
            };

            // Client pixels to canvas pixels (CSS may scale the canvas)
            let rect = canvas.get_bounding_client_rect();
            let scale_x = canvas.width() as f64 / rect.width().max(1.0);
            let scale_y = canvas.height() as f64 / rect.height().max(1.0);
            let x = (touch.client_x() as f64 - rect.left()) * scale_x;
            let y = (touch.client_y() as f64 - rect.top()) * scale_y;

            with_session(&weak, |s| s.touch(TouchInput::new(phase, x as f32, y as f32)));
        })
    }

    fn detach(self) {
        for (name, closure) in &self.keyboard {
            let _ = self
                .window
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        for (name, closure) in &self.touch {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        log::debug!("Input listeners removed");
    }
}

/// One game mounted in a page container
///
/// ```js
/// const arcade = new ArcadeHandle("game", "breakout", JSON.stringify({ width: 640 }));
/// arcade.start();
/// ```
#[wasm_bindgen]
pub struct ArcadeHandle {
    session: Rc<RefCell<Session>>,
    listeners: Option<Listeners>,
}

#[wasm_bindgen]
impl ArcadeHandle {
    /// Fails if the container is missing, the 2D context is unavailable, the
    /// game id is unknown or the config is invalid
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        game: &str,
        config_json: Option<String>,
    ) -> std::result::Result<ArcadeHandle, JsError> {
        Ok(Self::mount(container_id, game, config_json.as_deref())?)
    }

    pub fn start(&self) {
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.start();
        }
    }

    pub fn stop(&self) {
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.stop();
        }
    }

    pub fn pause(&self) {
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.pause();
        }
    }

    pub fn resume(&self) {
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.resume();
        }
    }

    /// Stop, remove listeners and the canvas. The handle is inert afterwards.
    pub fn destroy(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            listeners.detach();
        }
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.destroy();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn lifecycle(&self) -> String {
        self.session
            .try_borrow()
            .map(|s| s.lifecycle().as_str().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter, js_name = gameState)]
    pub fn game_state(&self) -> String {
        self.session
            .try_borrow()
            .map(|s| s.game_state().as_str().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.session
            .try_borrow()
            .map(|s| s.game().score() as f64)
            .unwrap_or_default()
    }
}

impl ArcadeHandle {
    fn mount(container_id: &str, game: &str, config_json: Option<&str>) -> Result<Self> {
        let config = match config_json {
            Some(json) => Config::from_json(json)?,
            None => Config::default(),
        };
        let seed = js_sys::Date::now() as u64;
        let game = create_game(game, &config, seed)?;
        let scheduler = RafScheduler::new()?;

        let surface = CanvasSurface::mount(container_id, config.width, config.height)?;
        let canvas = surface.canvas().clone();

        let session = GameSession::new(config.clone(), game, Box::new(surface), scheduler)?;
        let session = Rc::new(RefCell::new(session));
        let target: Rc<RefCell<dyn FrameTarget>> = session.clone();
        session.borrow_mut().scheduler_mut().bind(Rc::downgrade(&target));

        let listeners = Listeners::attach(&session, canvas, &config)?;
        Ok(Self {
            session,
            listeners: Some(listeners),
        })
    }
}

//! Browser facade
//!
//! The page owns rendering, routing and the requestAnimationFrame loop. It
//! calls `frame` once per animation frame, forwards input, and pulls a
//! snapshot whenever `revision` changes.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::input::{self, Command};
use crate::persistence::LocalStorage;
use crate::sim::{GameStore, Session};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Trencher runner loaded");
}

#[wasm_bindgen]
pub struct TrencherGame {
    session: Session,
}

#[wasm_bindgen]
impl TrencherGame {
    /// Build a game; `tuning_json` optionally overrides the balance table
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> TrencherGame {
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Ignoring tuning override: {e}");
                Tuning::default()
            }
            None => Tuning::default(),
        };
        let store = GameStore::new(tuning, Box::new(LocalStorage), Box::new(WebAudio::new()));
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {seed}");
        TrencherGame {
            session: Session::new(store, seed),
        }
    }

    /// Advance one animation frame of `delta` seconds
    pub fn frame(&mut self, delta: f64) {
        self.session.frame(delta);
    }

    #[wasm_bindgen(js_name = startRun)]
    pub fn start_run(&mut self) {
        self.session.apply(Command::StartRun);
    }

    #[wasm_bindgen(js_name = resetToMenu)]
    pub fn reset_to_menu(&mut self) {
        self.session.apply(Command::ResetToMenu);
    }

    /// Forward a keydown. Returns true when the key was used.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, event: &web_sys::KeyboardEvent) -> bool {
        let phase = self.session.store().phase();
        match input::key_command(&event.key(), phase) {
            Some(command) => {
                self.session.apply(command);
                true
            }
            None => false,
        }
    }

    /// Forward a touchstart at `x` on a viewport `width` wide
    pub fn touch(&mut self, x: f32, width: f32) -> bool {
        let phase = self.session.store().phase();
        match input::touch_command(x, width, phase) {
            Some(command) => {
                self.session.apply(command);
                true
            }
            None => false,
        }
    }

    /// Write counter; unchanged means the last snapshot is still current
    pub fn revision(&self) -> f64 {
        self.session.store().revision() as f64
    }

    /// Current state as a plain JS object
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(&self.session.store().snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&json)
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.session.store().high_score()
    }
}

//! Browser bindings
//!
//! Thin `wasm_bindgen` wrapper over [`BadgerRun`]. The page owns rendering,
//! the animation loop and asset fetching; it registers whatever assets it
//! managed to load before switching to full mode.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::BadgerRun;
use crate::assets::PreloadedAssets;
use crate::consts::STORAGE_KEY;
use crate::input::{self, GestureTracker};
use crate::persistence::LocalStorageStore;
use crate::sim::VisualMode;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
    }
    log::info!("Badger Run starting...");
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Failed to serialize state: {}", e);
        String::from("{}")
    })
}

#[wasm_bindgen]
pub struct WebGame {
    game: BadgerRun,
    loader: PreloadedAssets,
    gesture: GestureTracker,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame {
            game: BadgerRun::with_store(Box::new(LocalStorageStore::new(STORAGE_KEY))),
            loader: PreloadedAssets::new(),
            gesture: GestureTracker::new(),
        }
    }

    /// Feed one animation frame's elapsed seconds
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.game.frame(dt)
    }

    pub fn primary_action(&mut self) {
        self.game.primary_action();
    }

    pub fn jump(&mut self) -> bool {
        self.game.jump()
    }

    pub fn set_duck(&mut self, on: bool) {
        self.game.set_duck(on);
    }

    pub fn move_left(&mut self) {
        self.game.move_left();
    }

    pub fn move_right(&mut self) {
        self.game.move_right();
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn buy_skin(&mut self, id: &str) -> bool {
        self.game.buy_skin(id)
    }

    pub fn equip_skin(&mut self, id: &str) -> bool {
        self.game.equip_skin(id)
    }

    /// Make a fetched texture available to full mode
    pub fn register_texture(&mut self, url: &str) {
        self.loader = std::mem::take(&mut self.loader).with_texture(url);
    }

    /// Make a fetched model available to full mode, with its bounding box size
    pub fn register_model(&mut self, url: &str, sx: f32, sy: f32, sz: f32) {
        self.loader = std::mem::take(&mut self.loader).with_model(url, Vec3::new(sx, sy, sz));
    }

    /// "prototype" or "full"; unknown names are ignored
    pub fn set_mode(&mut self, mode: &str) {
        match mode.parse::<VisualMode>() {
            Ok(mode) => self.game.set_mode(mode, &mut self.loader),
            Err(e) => log::warn!("Ignoring mode switch: {}", e),
        }
    }

    /// Returns whether the key is bound (the page should prevent default)
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(action) = input::key_down(code) else {
            return false;
        };
        self.game.apply(action);
        true
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        let Some(action) = input::key_up(code) else {
            return false;
        };
        self.game.apply(action);
        true
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.gesture.pointer_down(x, y);
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        if let Some(action) = self.gesture.pointer_up(x, y) {
            self.game.apply(action);
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.gesture.cancel();
    }

    /// HUD state as JSON
    pub fn ui_state(&self) -> String {
        to_json(&self.game.ui_state())
    }

    /// Shop/locker state as JSON
    pub fn meta_state(&self) -> String {
        to_json(&self.game.meta_state())
    }

    /// Frame snapshot as JSON
    pub fn render_snapshot(&self) -> String {
        to_json(&self.game.render_snapshot())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

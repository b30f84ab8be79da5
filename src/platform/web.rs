//! Browser boundary
//!
//! The page's renderer owns the DOM and requestAnimationFrame. It forwards
//! pointer and button events here, calls `frame()` once per refresh while it
//! returns true, and draws from `snapshot_json()`.

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, TouchEvent};

use crate::platform::JoystickGeometry;
use crate::session::{InputEvent, Session};
use crate::tuning::Tuning;

/// Element holding an optional tuning JSON document
const TUNING_ELEMENT_ID: &str = "tuning";

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    joystick_base: Option<Element>,
}

#[wasm_bindgen]
impl WebSession {
    /// `joystick_base_id` is the id of the joystick base element
    #[wasm_bindgen(constructor)]
    pub fn new(joystick_base_id: &str) -> WebSession {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            log::debug!("Logger already initialized: {}", e);
        }

        let document = web_sys::window().and_then(|w| w.document());
        let joystick_base = document
            .as_ref()
            .and_then(|d| d.get_element_by_id(joystick_base_id));
        if joystick_base.is_none() {
            log::warn!("Joystick base #{} not found", joystick_base_id);
        }

        let tuning = document
            .as_ref()
            .and_then(|d| d.get_element_by_id(TUNING_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .map(|json| Tuning::from_json_or_default(&json))
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        log::info!("Galactic Wrench session created with seed: {}", seed);

        let mut web = WebSession {
            session: Session::seeded(tuning, JoystickGeometry::default(), seed),
            joystick_base,
        };
        web.refresh_geometry();
        web
    }

    /// Start the mission. Returns false if the session was already started.
    pub fn start(&mut self) -> bool {
        self.session.start().is_ok()
    }

    /// Restart after game over. Returns false outside game over.
    pub fn restart(&mut self) -> bool {
        self.session.restart().is_ok()
    }

    pub fn mouse_down(&mut self, event: &MouseEvent) {
        self.refresh_geometry();
        self.push(InputEvent::PointerDown(Some(mouse_point(event))));
    }

    pub fn mouse_move(&mut self, event: &MouseEvent) {
        self.push(InputEvent::PointerMove(Some(mouse_point(event))));
    }

    pub fn mouse_up(&mut self) {
        self.push(InputEvent::PointerUp);
    }

    pub fn mouse_leave(&mut self) {
        self.push(InputEvent::PointerLeave);
    }

    pub fn touch_start(&mut self, event: &TouchEvent) {
        event.prevent_default();
        self.refresh_geometry();
        self.push(InputEvent::PointerDown(touch_point(event)));
    }

    pub fn touch_move(&mut self, event: &TouchEvent) {
        self.push(InputEvent::PointerMove(touch_point(event)));
    }

    pub fn touch_end(&mut self) {
        self.push(InputEvent::PointerUp);
    }

    pub fn fire_down(&mut self) {
        self.push(InputEvent::FireDown);
    }

    pub fn fire_up(&mut self) {
        self.push(InputEvent::FireUp);
    }

    /// Pointer left the fire button (mouseleave)
    pub fn fire_leave(&mut self) {
        self.push(InputEvent::FireLeave);
    }

    /// Advance one refresh. Returns whether another frame should be requested.
    pub fn frame(&mut self) -> bool {
        self.session.frame(js_sys::Date::now());
        self.session.is_clock_running()
    }

    /// Latest end-of-frame snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Score as the HUD shows it
    pub fn score_text(&self) -> String {
        crate::format_score(self.session.snapshot().score)
    }

    fn push(&mut self, event: InputEvent) {
        self.session.push(js_sys::Date::now(), event);
    }

    /// Re-read the joystick base position (layout may have changed)
    fn refresh_geometry(&mut self) {
        if let Some(base) = &self.joystick_base {
            let rect = base.get_bounding_client_rect();
            self.session.set_joystick_geometry(JoystickGeometry::from_rect(
                rect.left() as f32,
                rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            ));
        }
    }
}

fn mouse_point(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// First touch point, if the event has one
fn touch_point(event: &TouchEvent) -> Option<Vec2> {
    event
        .touches()
        .get(0)
        .map(|touch| Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}

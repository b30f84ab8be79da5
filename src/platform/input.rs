//! Virtual joystick input translation
//!
//! Raw pointer coordinates (device pixels) become a displacement vector from
//! the joystick base center, bounded to the knob's travel radius.

use glam::Vec2;

use crate::consts::JOYSTICK_KNOB_MARGIN;

/// Where the joystick base sits on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickGeometry {
    pub center: Vec2,
    /// Knob travel limit (base radius minus knob margin)
    pub max_distance: f32,
}

impl Default for JoystickGeometry {
    fn default() -> Self {
        // 120px base at the origin
        Self::from_rect(0.0, 0.0, 120.0, 120.0)
    }
}

impl JoystickGeometry {
    /// Build from the base element's bounding box
    pub fn from_rect(left: f32, top: f32, width: f32, height: f32) -> Self {
        let center = Vec2::new(left + width / 2.0, top + height / 2.0);
        let max_distance = (width / 2.0 - JOYSTICK_KNOB_MARGIN).max(0.0);
        Self {
            center,
            max_distance,
        }
    }

    /// Displacement of `pointer` from center, rescaled onto the travel
    /// circle if it lies outside it
    pub fn displacement(&self, pointer: Vec2) -> Vec2 {
        let delta = pointer - self.center;
        let distance = delta.length();
        if distance > self.max_distance {
            delta / distance * self.max_distance
        } else {
            delta
        }
    }
}

/// Joystick state driven by pointer/touch events
#[derive(Debug, Clone, Default)]
pub struct Joystick {
    pub geometry: JoystickGeometry,
    vector: Vec2,
    dragging: bool,
}

impl Joystick {
    pub fn new(geometry: JoystickGeometry) -> Self {
        Self {
            geometry,
            vector: Vec2::ZERO,
            dragging: false,
        }
    }

    /// Latest bounded displacement
    pub fn vector(&self) -> Vec2 {
        self.vector
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Press on the base. `None` (no touch point) or a non-finite position is ignored.
    pub fn pointer_down(&mut self, pointer: Option<Vec2>) {
        let Some(pointer) = pointer.filter(|p| p.is_finite()) else {
            log::debug!("Ignoring malformed pointer-down");
            return;
        };
        self.dragging = true;
        self.vector = self.geometry.displacement(pointer);
    }

    /// Drag across the base; only tracked while pressed
    pub fn pointer_move(&mut self, pointer: Option<Vec2>) {
        if !self.dragging {
            return;
        }
        if let Some(pointer) = pointer.filter(|p| p.is_finite()) {
            self.vector = self.geometry.displacement(pointer);
        }
    }

    /// Release (pointer up, or leaving the base while dragging)
    pub fn release(&mut self) {
        self.dragging = false;
        self.vector = Vec2::ZERO;
    }
}

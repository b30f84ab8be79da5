//! Platform abstraction layer
//!
//! - `input`: joystick translation from pointer/touch coordinates
//! - `web`: wasm-bindgen boundary for the browser renderer (wasm32 only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Joystick, JoystickGeometry};

//! Galactic Wrench - A joystick-driven arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, firing, collisions, session lifecycle)
//! - `session`: Event queue, frame clock and lifecycle driver
//! - `platform`: Input translation and the browser boundary
//! - `tuning`: Data-driven game balance
//! - `error`: Crate error type

pub mod error;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use session::{InputEvent, Session};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// All coordinates are percentages of the play field (0-100 on both axes,
/// y grows downward).
pub mod consts {
    /// Player movement bounds
    pub const PLAYER_MIN_X: f32 = 5.0;
    pub const PLAYER_MAX_X: f32 = 95.0;
    pub const PLAYER_MIN_Y: f32 = 10.0;
    pub const PLAYER_MAX_Y: f32 = 85.0;

    /// Player spawn point on start/restart
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 70.0;

    /// Joystick displacement (pixels) is multiplied by both of these per tick
    pub const PLAYER_BASE_SPEED: f32 = 0.4;
    pub const PLAYER_SPEED_SCALE: f32 = 0.1;

    /// Projectiles spawn this far above the ship's center
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 3.0;
    /// Upward travel per tick
    pub const PROJECTILE_STEP: f32 = 2.0;
    /// Projectiles are kept while y > this
    pub const PROJECTILE_EXIT_Y: f32 = -5.0;
    /// Travel direction in degrees (straight up)
    pub const PROJECTILE_ANGLE_DEG: f32 = -90.0;

    /// Per-tick chance of an enemy spawning
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;
    /// Horizontal spawn band
    pub const ENEMY_SPAWN_MIN_X: f32 = 10.0;
    pub const ENEMY_SPAWN_MAX_X: f32 = 90.0;
    pub const ENEMY_SPAWN_Y: f32 = -5.0;
    /// Descent speed range (units per tick)
    pub const ENEMY_MIN_SPEED: f32 = 0.2;
    pub const ENEMY_MAX_SPEED: f32 = 0.5;
    /// Enemies are kept while y < this
    pub const ENEMY_EXIT_Y: f32 = 105.0;

    /// Collision radii
    pub const PROJECTILE_HIT_RADIUS: f32 = 5.0;
    pub const PLAYER_HIT_RADIUS: f32 = 6.0;

    /// Score per enemy shot down
    pub const KILL_REWARD: u64 = 100;
    /// Health lost per enemy rammed
    pub const COLLISION_PENALTY: u32 = 20;
    pub const MAX_HEALTH: u32 = 100;

    /// Minimum time between accepted shots (and the auto-fire period)
    pub const FIRE_COOLDOWN_MS: f64 = 150.0;

    /// Joystick knob margin (pixels) subtracted from the base radius
    pub const JOYSTICK_KNOB_MARGIN: f32 = 20.0;
}

/// Euclidean distance test used by every collision check
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Format a score the way the HUD shows it (zero-padded to 6 digits)
pub fn format_score(score: u64) -> String {
    format!("{:06}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_radius_is_strict() {
        assert!(within_radius(Vec2::ZERO, Vec2::new(4.99, 0.0), 5.0));
        assert!(!within_radius(Vec2::ZERO, Vec2::new(5.0, 0.0), 5.0));
        assert!(!within_radius(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "000000");
        assert_eq!(format_score(1200), "001200");
        assert_eq!(format_score(12_345_678), "12345678");
    }
}

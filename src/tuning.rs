//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // === Player ===
    pub player_min: Vec2,
    pub player_max: Vec2,
    pub player_start: Vec2,
    pub player_base_speed: f32,
    pub player_speed_scale: f32,
    pub max_health: u32,

    // === Projectiles ===
    pub projectile_spawn_offset: f32,
    pub projectile_step: f32,
    pub projectile_exit_y: f32,

    // === Enemies ===
    pub enemy_spawn_chance: f64,
    pub enemy_spawn_min_x: f32,
    pub enemy_spawn_max_x: f32,
    pub enemy_spawn_y: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub enemy_exit_y: f32,

    // === Collisions & scoring ===
    pub projectile_hit_radius: f32,
    pub player_hit_radius: f32,
    pub kill_reward: u64,
    pub collision_penalty: u32,

    // === Firing ===
    pub fire_cooldown_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_min: Vec2::new(PLAYER_MIN_X, PLAYER_MIN_Y),
            player_max: Vec2::new(PLAYER_MAX_X, PLAYER_MAX_Y),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_base_speed: PLAYER_BASE_SPEED,
            player_speed_scale: PLAYER_SPEED_SCALE,
            max_health: MAX_HEALTH,

            projectile_spawn_offset: PROJECTILE_SPAWN_OFFSET,
            projectile_step: PROJECTILE_STEP,
            projectile_exit_y: PROJECTILE_EXIT_Y,

            enemy_spawn_chance: ENEMY_SPAWN_CHANCE,
            enemy_spawn_min_x: ENEMY_SPAWN_MIN_X,
            enemy_spawn_max_x: ENEMY_SPAWN_MAX_X,
            enemy_spawn_y: ENEMY_SPAWN_Y,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_exit_y: ENEMY_EXIT_Y,

            projectile_hit_radius: PROJECTILE_HIT_RADIUS,
            player_hit_radius: PLAYER_HIT_RADIUS,
            kill_reward: KILL_REWARD,
            collision_penalty: COLLISION_PENALTY,

            fire_cooldown_ms: FIRE_COOLDOWN_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a tuning document, falling back to defaults if it is unusable
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("{e}, using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), GameError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> GameError {
            GameError::InvalidTuning {
                field,
                reason: reason.into(),
            }
        }

        if !(self.player_min.cmple(self.player_max).all()) {
            return Err(invalid("player_min", "must not exceed player_max"));
        }
        let start = self.player_start;
        if start.clamp(self.player_min, self.player_max) != start {
            return Err(invalid("player_start", "must lie inside the player bounds"));
        }
        if !(0.0..=1.0).contains(&self.enemy_spawn_chance) {
            return Err(invalid("enemy_spawn_chance", "must be within [0, 1]"));
        }
        if self.enemy_spawn_min_x > self.enemy_spawn_max_x {
            return Err(invalid("enemy_spawn_min_x", "must not exceed enemy_spawn_max_x"));
        }
        if !(self.enemy_min_speed.is_finite() && self.enemy_min_speed > 0.0) {
            return Err(invalid("enemy_min_speed", "must be positive and finite"));
        }
        if !self.enemy_max_speed.is_finite() {
            return Err(invalid("enemy_max_speed", "must be finite"));
        }
        if self.enemy_min_speed > self.enemy_max_speed {
            return Err(invalid("enemy_min_speed", "must not exceed enemy_max_speed"));
        }
        // Projectiles must travel up and off screen
        if !(self.projectile_step.is_finite() && self.projectile_step > 0.0) {
            return Err(invalid("projectile_step", "must be positive and finite"));
        }
        if self.max_health == 0 {
            return Err(invalid("max_health", "must be positive"));
        }
        if self.projectile_hit_radius <= 0.0 {
            return Err(invalid("projectile_hit_radius", "must be positive"));
        }
        if self.player_hit_radius <= 0.0 {
            return Err(invalid("player_hit_radius", "must be positive"));
        }
        if !(self.fire_cooldown_ms.is_finite() && self.fire_cooldown_ms >= 1.0) {
            return Err(invalid("fire_cooldown_ms", "must be finite and at least 1 ms"));
        }
        Ok(())
    }

    /// Player movement per tick per pixel of joystick displacement
    pub fn movement_factor(&self) -> f32 {
        self.player_base_speed * self.player_speed_scale
    }
}

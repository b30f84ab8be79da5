//! Game state and core simulation types
//!
//! Everything the renderer reads comes out of [`GameState::snapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PROJECTILE_ANGLE_DEG;
use crate::error::GameError;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, nothing simulated yet
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Health ran out
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    /// Integrate joystick displacement and keep the ship inside its bounds
    pub fn steer(&mut self, joystick: Vec2, tuning: &Tuning) {
        let joystick = if joystick.is_finite() { joystick } else { Vec2::ZERO };
        let next = self.pos + joystick * tuning.movement_factor();
        self.pos = next.clamp(tuning.player_min, tuning.player_max);
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Travel direction in degrees (always straight up)
    pub angle: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            angle: PROJECTILE_ANGLE_DEG,
        }
    }
}

/// A descending enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Descent per tick
    pub speed: f32,
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub player: Vec2,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub health: u32,
    /// Joystick knob offset in pixels (for drawing the knob)
    pub joystick: Vec2,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: SessionPhase,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub health: u32,
    /// Enemies destroyed by projectiles this session
    pub kills: u64,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    /// Gameplay constants
    pub tuning: Tuning,
    /// Id counters survive restarts so ids never repeat
    next_projectile_id: u32,
    next_enemy_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Create a state on the title screen
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            player: Player {
                pos: tuning.player_start,
            },
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            health: tuning.max_health,
            kills: 0,
            time_ticks: 0,
            tuning,
            next_projectile_id: 0,
            next_enemy_id: 0,
        }
    }

    /// NotStarted -> Running
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(GameError::InvalidTransition {
                from: self.phase,
                action: "start",
            });
        }
        self.reset();
        log::info!("Mission started");
        Ok(())
    }

    /// GameOver -> Running
    pub fn restart(&mut self) -> Result<(), GameError> {
        if self.phase != SessionPhase::GameOver {
            return Err(GameError::InvalidTransition {
                from: self.phase,
                action: "restart",
            });
        }
        self.reset();
        log::info!("Mission restarted");
        Ok(())
    }

    /// Reinitialize the session (shared by start and restart)
    fn reset(&mut self) {
        self.phase = SessionPhase::Running;
        self.score = 0;
        self.kills = 0;
        self.health = self.tuning.max_health;
        self.player.pos = self.tuning.player_start;
        self.projectiles.clear();
        self.enemies.clear();
        self.time_ticks = 0;
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Allocate a new projectile ID
    pub fn next_projectile_id(&mut self) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        id
    }

    /// Allocate a new enemy ID
    pub fn next_enemy_id(&mut self) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        id
    }

    /// Spawn a projectile just ahead of the ship
    pub fn spawn_projectile(&mut self) -> u32 {
        let id = self.next_projectile_id();
        let pos = self.player.pos - Vec2::new(0.0, self.tuning.projectile_spawn_offset);
        self.projectiles.push(Projectile::new(id, pos));
        id
    }

    /// Sanity check run before every tick
    pub fn check_consistency(&self) -> Result<(), GameError> {
        if !self.player.pos.is_finite() {
            return Err(GameError::InconsistentState("player position is not finite"));
        }
        let pos = self.player.pos;
        if pos.clamp(self.tuning.player_min, self.tuning.player_max) != pos {
            return Err(GameError::InconsistentState("player is outside its bounds"));
        }
        if !(0.0..=1.0).contains(&self.tuning.enemy_spawn_chance) {
            return Err(GameError::InconsistentState("spawn chance is not a probability"));
        }
        if self.health > self.tuning.max_health {
            return Err(GameError::InconsistentState("health exceeds maximum"));
        }
        if self.projectiles.iter().any(|p| !p.pos.is_finite()) {
            return Err(GameError::InconsistentState("projectile position is not finite"));
        }
        if self
            .enemies
            .iter()
            .any(|e| !e.pos.is_finite() || !e.speed.is_finite())
        {
            return Err(GameError::InconsistentState("enemy state is not finite"));
        }
        Ok(())
    }

    /// End-of-tick view for the renderer
    pub fn snapshot(&self, joystick: Vec2) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player.pos,
            projectiles: self.projectiles.clone(),
            enemies: self.enemies.clone(),
            score: self.score,
            health: self.health,
            joystick,
        }
    }
}

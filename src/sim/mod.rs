//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display refresh
//! - Injected RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fire;
pub mod state;
pub mod tick;

pub use collision::{ContactResolution, HitResolution, resolve_player_contact, resolve_projectile_hits};
pub use fire::FireControl;
pub use state::{Enemy, GameState, Player, Projectile, SessionPhase, Snapshot};
pub use tick::{TickInput, TickOutcome, advance, tick};

//! Collision resolution
//!
//! Both steps are pure: they read snapshots of the entity collections and
//! return the survivors plus the score/health change, leaving the caller to
//! apply the result.

use glam::Vec2;

use super::state::{Enemy, Projectile};
use crate::within_radius;

/// Outcome of projectile vs enemy resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitResolution {
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    /// Number of projectile/enemy pairs removed
    pub hits: u32,
    pub score_delta: u64,
}

/// Outcome of player vs enemy resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactResolution {
    pub enemies: Vec<Enemy>,
    /// Id of the enemy that hit the player, if any
    pub rammed_by: Option<u32>,
    pub health_delta: u32,
}

/// Remove every projectile/enemy pair closer than `radius`.
///
/// Projectiles are scanned from last to first; for each one, enemies are
/// scanned from last to first and the first live enemy in range is taken.
/// An entity is removed at most once.
pub fn resolve_projectile_hits(
    projectiles: &[Projectile],
    enemies: &[Enemy],
    radius: f32,
    reward: u64,
) -> HitResolution {
    let mut projectile_alive = vec![true; projectiles.len()];
    let mut enemy_alive = vec![true; enemies.len()];
    let mut hits = 0u32;

    for (i, projectile) in projectiles.iter().enumerate().rev() {
        let target = enemies
            .iter()
            .enumerate()
            .rev()
            .find(|(j, enemy)| enemy_alive[*j] && within_radius(projectile.pos, enemy.pos, radius));

        if let Some((j, enemy)) = target {
            log::debug!("Projectile {} destroyed enemy {}", projectile.id, enemy.id);
            projectile_alive[i] = false;
            enemy_alive[j] = false;
            hits += 1;
        }
    }

    HitResolution {
        projectiles: keep_alive(projectiles, &projectile_alive),
        enemies: keep_alive(enemies, &enemy_alive),
        hits,
        score_delta: u64::from(hits) * reward,
    }
}

/// Remove the first enemy (in collection order) closer than `radius` to the
/// player. At most one enemy is resolved per call even when several overlap.
pub fn resolve_player_contact(
    player: Vec2,
    enemies: &[Enemy],
    radius: f32,
    penalty: u32,
) -> ContactResolution {
    match enemies
        .iter()
        .position(|enemy| within_radius(player, enemy.pos, radius))
    {
        Some(index) => {
            let rammed = enemies[index].id;
            let survivors = enemies
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, e)| *e)
                .collect();
            ContactResolution {
                enemies: survivors,
                rammed_by: Some(rammed),
                health_delta: penalty,
            }
        }
        None => ContactResolution {
            enemies: enemies.to_vec(),
            rammed_by: None,
            health_delta: 0,
        },
    }
}

fn keep_alive<T: Copy>(items: &[T], alive: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(alive)
        .filter(|(_, alive)| **alive)
        .map(|(item, _)| *item)
        .collect()
}

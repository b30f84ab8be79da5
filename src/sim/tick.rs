//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one display refresh.

use glam::Vec2;
use rand::Rng;

use super::collision::{resolve_player_contact, resolve_projectile_hits};
use super::state::{Enemy, GameState, SessionPhase};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Current joystick displacement (pixels, already bounded)
    pub joystick: Vec2,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session isn't running, nothing happened
    Idle,
    /// State advanced normally
    Advanced,
    /// State advanced and health ran out this tick
    GameOver,
    /// State failed its consistency check, tick was skipped
    Skipped,
}

/// Advance the game state by one tick
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) -> TickOutcome {
    if state.phase != SessionPhase::Running {
        return TickOutcome::Idle;
    }

    if let Err(e) = state.check_consistency() {
        log::error!("Skipping tick {}: {}", state.time_ticks, e);
        return TickOutcome::Skipped;
    }

    state.time_ticks += 1;
    let tuning = &state.tuning;

    // Move player
    state.player.steer(input.joystick, tuning);

    // Move projectiles
    let step = tuning.projectile_step;
    let exit_y = tuning.projectile_exit_y;
    for projectile in &mut state.projectiles {
        projectile.pos.y -= step;
    }
    state.projectiles.retain(|p| p.pos.y > exit_y);

    // Move enemies
    let exit_y = tuning.enemy_exit_y;
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
    }
    state.enemies.retain(|e| e.pos.y < exit_y);

    // Spawn enemies
    if rng.random_bool(tuning.enemy_spawn_chance) {
        spawn_enemy(state, rng);
    }

    let tuning = &state.tuning;

    // Projectile vs enemy
    let hits = resolve_projectile_hits(
        &state.projectiles,
        &state.enemies,
        tuning.projectile_hit_radius,
        tuning.kill_reward,
    );
    state.projectiles = hits.projectiles;
    state.enemies = hits.enemies;
    state.score = state.score.saturating_add(hits.score_delta);
    state.kills += u64::from(hits.hits);

    // Player vs enemy
    let contact = resolve_player_contact(
        state.player.pos,
        &state.enemies,
        tuning.player_hit_radius,
        tuning.collision_penalty,
    );
    state.enemies = contact.enemies;
    if let Some(id) = contact.rammed_by {
        state.health = state.health.saturating_sub(contact.health_delta);
        log::debug!("Rammed by enemy {}, health {}", id, state.health);
    }

    if state.health == 0 {
        state.phase = SessionPhase::GameOver;
        log::info!(
            "Mission failed after {} ticks, final score {}",
            state.time_ticks,
            state.score
        );
        return TickOutcome::GameOver;
    }

    TickOutcome::Advanced
}

/// Compute the next state without modifying `state`
pub fn advance<R: Rng + ?Sized>(state: &GameState, input: &TickInput, rng: &mut R) -> GameState {
    let mut next = state.clone();
    tick(&mut next, input, rng);
    next
}

/// Spawn one enemy at the top of the field
fn spawn_enemy<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let tuning = &state.tuning;
    let x = sample(rng, tuning.enemy_spawn_min_x, tuning.enemy_spawn_max_x);
    let speed = sample(rng, tuning.enemy_min_speed, tuning.enemy_max_speed);
    let pos = Vec2::new(x, tuning.enemy_spawn_y);

    let id = state.next_enemy_id();
    state.enemies.push(Enemy { id, pos, speed });
    log::debug!("Spawned enemy {} at x={:.1} speed={:.2}", id, x, speed);
}

/// Uniform draw from [min, max), or `min` when the range is empty
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Projectile;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    /// Running state that never spawns enemies on its own
    fn quiet_state() -> GameState {
        let mut state = GameState::new(Tuning {
            enemy_spawn_chance: 0.0,
            ..Default::default()
        });
        state.start().unwrap();
        state
    }

    fn push_enemy(state: &mut GameState, x: f32, y: f32, speed: f32) -> u32 {
        let id = state.next_enemy_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, y),
            speed,
        });
        id
    }

    #[test]
    fn test_tick_idle_when_not_running() {
        let mut state = GameState::default();
        let outcome = tick(&mut state, &TickInput::default(), &mut rng());
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_player_moves_with_joystick() {
        let mut state = quiet_state();
        let input = TickInput {
            joystick: Vec2::new(50.0, -25.0),
        };
        tick(&mut state, &input, &mut rng());
        assert!((state.player.pos.x - 52.0).abs() < 1e-4);
        assert!((state.player.pos.y - 69.0).abs() < 1e-4);
    }

    #[test]
    fn test_projectiles_advance_and_exit() {
        let mut state = quiet_state();
        state.projectiles.push(Projectile::new(0, Vec2::new(50.0, 40.0)));
        state.projectiles.push(Projectile::new(1, Vec2::new(50.0, -3.5)));

        tick(&mut state, &TickInput::default(), &mut rng());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.y, 38.0);
    }

    #[test]
    fn test_enemies_descend_and_exit() {
        let mut state = quiet_state();
        push_enemy(&mut state, 20.0, 10.0, 0.5);
        push_enemy(&mut state, 80.0, 104.8, 0.3);

        tick(&mut state, &TickInput::default(), &mut rng());
        assert_eq!(state.enemies.len(), 1);
        assert!((state.enemies[0].pos.y - 10.5).abs() < 1e-5);
    }

    #[test]
    fn test_spawned_enemies_respect_ranges() {
        let mut state = GameState::new(Tuning {
            enemy_spawn_chance: 1.0,
            ..Default::default()
        });
        state.start().unwrap();
        let mut rng = rng();

        // Move the ship out of the spawn lane's way
        state.player.pos = Vec2::new(50.0, 85.0);
        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert!(!state.enemies.is_empty());
        for enemy in &state.enemies {
            assert!((10.0..90.0).contains(&enemy.pos.x));
            assert!((0.2..0.5).contains(&enemy.speed));
        }
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), state.enemies.len());
    }

    #[test]
    fn test_projectile_enemy_collision_scores() {
        let mut state = quiet_state();
        // Projectile moves up 2, enemy moves down 0; they meet at y=30
        state.projectiles.push(Projectile::new(0, Vec2::new(30.0, 32.0)));
        push_enemy(&mut state, 30.0, 30.0, 0.0);

        tick(&mut state, &TickInput::default(), &mut rng());
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.kills, 1);
    }

    #[test]
    fn test_one_player_collision_per_tick() {
        let mut state = quiet_state();
        push_enemy(&mut state, 50.0, 70.0, 0.0);
        push_enemy(&mut state, 51.0, 70.0, 0.0);

        tick(&mut state, &TickInput::default(), &mut rng());
        assert_eq!(state.health, 80);
        assert_eq!(state.enemies.len(), 1);

        tick(&mut state, &TickInput::default(), &mut rng());
        assert_eq!(state.health, 60);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = quiet_state();
        state.health = 20;
        push_enemy(&mut state, 50.0, 70.0, 0.0);
        push_enemy(&mut state, 52.0, 70.0, 0.0);
        state.projectiles.push(Projectile::new(0, Vec2::new(10.0, 50.0)));

        let outcome = tick(&mut state, &TickInput::default(), &mut rng());
        assert_eq!(outcome, TickOutcome::GameOver);
        assert_eq!(state.health, 0);
        assert!(state.is_game_over());

        let frozen = state.clone();
        let outcome = tick(
            &mut state,
            &TickInput {
                joystick: Vec2::new(40.0, 0.0),
            },
            &mut rng(),
        );
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(state.player.pos, frozen.player.pos);
        assert_eq!(state.projectiles, frozen.projectiles);
        assert_eq!(state.enemies, frozen.enemies);
        assert_eq!(state.time_ticks, frozen.time_ticks);
    }

    #[test]
    fn test_inconsistent_state_skips_tick() {
        let mut state = quiet_state();
        state.projectiles.push(Projectile::new(0, Vec2::new(f32::NAN, 10.0)));
        let outcome = tick(&mut state, &TickInput::default(), &mut rng());
        assert_eq!(outcome, TickOutcome::Skipped);
        assert_eq!(state.time_ticks, 0);
        assert!(state.is_running());
    }

    #[test]
    fn test_advance_leaves_input_untouched() {
        let state = quiet_state();
        let input = TickInput {
            joystick: Vec2::new(40.0, 0.0),
        };
        let next = advance(&state, &input, &mut rng());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, Vec2::new(50.0, 70.0));
        assert_eq!(next.time_ticks, 1);
        assert!(next.player.pos.x > 50.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::default();
        let mut state2 = GameState::default();
        state1.start().unwrap();
        state2.start().unwrap();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        for i in 0..600 {
            let input = TickInput {
                joystick: Vec2::new(((i % 80) as f32) - 40.0, 0.0),
            };
            tick(&mut state1, &input, &mut rng1);
            tick(&mut state2, &input, &mut rng2);
        }

        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.health, state2.health);
        assert_eq!(state1.player, state2.player);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            moves in prop::collection::vec((-1.0e4f32..1.0e4, -1.0e4f32..1.0e4), 1..200)
        ) {
            let mut state = quiet_state();
            let mut rng = rng();
            for (x, y) in moves {
                tick(&mut state, &TickInput { joystick: Vec2::new(x, y) }, &mut rng);
                let pos = state.player.pos;
                prop_assert!((5.0..=95.0).contains(&pos.x));
                prop_assert!((10.0..=85.0).contains(&pos.y));
            }
        }

        #[test]
        fn prop_health_and_score_are_monotonic(seed in any::<u64>(), sweep in -40.0f32..40.0) {
            let mut state = GameState::new(Tuning {
                enemy_spawn_chance: 0.2,
                ..Default::default()
            });
            state.start().unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut game_overs = 0;

            for i in 0..2000u32 {
                let health = state.health;
                let score = state.score;
                let kills = state.kills;
                if i % 3 == 0 {
                    state.spawn_projectile();
                }
                let (step, exit_y) = (state.tuning.projectile_step, state.tuning.projectile_exit_y);
                let before = state.projectiles.len();
                let exiting = state
                    .projectiles
                    .iter()
                    .filter(|p| p.pos.y - step <= exit_y)
                    .count();

                let input = TickInput { joystick: Vec2::new(sweep, 0.0) };
                let outcome = tick(&mut state, &input, &mut rng);
                if outcome == TickOutcome::GameOver {
                    game_overs += 1;
                }
                prop_assert!(state.health <= health);
                prop_assert!(state.score >= score);

                // Every projectile that neither flew off nor survived hit an enemy
                let hits = if outcome == TickOutcome::Idle {
                    0
                } else {
                    (before - exiting - state.projectiles.len()) as u64
                };
                prop_assert_eq!(state.kills - kills, hits);
                prop_assert_eq!(state.score - score, 100 * hits);
            }
            prop_assert!(game_overs <= 1);
            prop_assert_eq!(game_overs == 1, state.is_game_over());
        }
    }
}

//! Session driver
//!
//! Serializes everything that can touch the simulation (pointer callbacks,
//! the fire button, the frame clock) through one queue. Events are applied in
//! arrival order at the start of the next frame, then the tick runs, then a
//! fresh snapshot is published. Renderers only ever see that snapshot.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::GameError;
use crate::platform::{Joystick, JoystickGeometry};
use crate::sim::{FireControl, GameState, SessionPhase, Snapshot, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

/// Input arriving from the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press on the joystick base (`None` when the event carried no point)
    PointerDown(Option<Vec2>),
    PointerMove(Option<Vec2>),
    PointerUp,
    /// Pointer left the joystick base
    PointerLeave,
    FireDown,
    FireUp,
    /// Pointer left the fire button while it may still be pressed
    FireLeave,
}

pub struct Session<R: Rng = Pcg32> {
    state: GameState,
    fire: FireControl,
    joystick: Joystick,
    rng: R,
    queue: VecDeque<(f64, InputEvent)>,
    clock_running: bool,
    snapshot: Snapshot,
}

impl Session<Pcg32> {
    /// Session with the production RNG
    pub fn seeded(tuning: Tuning, geometry: JoystickGeometry, seed: u64) -> Self {
        Self::new(tuning, geometry, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(tuning: Tuning, geometry: JoystickGeometry, rng: R) -> Self {
        let state = GameState::new(tuning);
        let snapshot = state.snapshot(Vec2::ZERO);
        Self {
            state,
            fire: FireControl::new(),
            joystick: Joystick::new(geometry),
            rng,
            queue: VecDeque::new(),
            clock_running: false,
            snapshot,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Last end-of-frame snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Whether frames should still be scheduled
    pub fn is_clock_running(&self) -> bool {
        self.clock_running
    }

    pub fn is_firing(&self) -> bool {
        self.fire.is_held()
    }

    /// Joystick base moved or resized
    pub fn set_joystick_geometry(&mut self, geometry: JoystickGeometry) {
        self.joystick.geometry = geometry;
    }

    /// Queue an input event stamped with the time it happened
    pub fn push(&mut self, now_ms: f64, event: InputEvent) {
        self.queue.push_back((now_ms, event));
    }

    /// Title screen -> Running
    pub fn start(&mut self) -> Result<(), GameError> {
        self.state.start().inspect_err(|e| log::warn!("{e}"))?;
        self.begin();
        Ok(())
    }

    /// Game over -> Running
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.state.restart().inspect_err(|e| log::warn!("{e}"))?;
        self.begin();
        Ok(())
    }

    fn begin(&mut self) {
        self.queue.clear();
        self.fire.reset();
        self.joystick.release();
        self.clock_running = true;
        self.publish();
    }

    /// Stop the frame clock and the auto-fire schedule
    fn halt(&mut self) {
        self.fire.release();
        self.clock_running = false;
    }

    /// Run one display refresh at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> TickOutcome {
        // Auto-fire boundaries are polled at each event's own time, so a
        // release later in the queue cannot cancel a shot that was already due
        while let Some((at, event)) = self.queue.pop_front() {
            self.auto_fire(at);
            self.apply(at, event);
        }
        self.auto_fire(now_ms);

        let input = TickInput {
            joystick: self.joystick.vector(),
        };
        let outcome = tick(&mut self.state, &input, &mut self.rng);

        if !self.state.is_running() {
            self.halt();
        }
        self.publish();
        outcome
    }

    fn auto_fire(&mut self, at: f64) {
        if self.state.is_running() && self.fire.poll(at, self.state.tuning.fire_cooldown_ms) {
            self.state.spawn_projectile();
        }
    }

    fn apply(&mut self, at: f64, event: InputEvent) {
        match event {
            InputEvent::PointerDown(pointer) => self.joystick.pointer_down(pointer),
            InputEvent::PointerMove(pointer) => self.joystick.pointer_move(pointer),
            InputEvent::PointerUp => self.joystick.release(),
            InputEvent::PointerLeave => {
                if self.joystick.is_dragging() {
                    self.joystick.release();
                }
            }
            InputEvent::FireDown => {
                if !self.state.is_running() {
                    return;
                }
                let cooldown = self.state.tuning.fire_cooldown_ms;
                if self.fire.press(at, cooldown) {
                    self.state.spawn_projectile();
                }
            }
            InputEvent::FireUp | InputEvent::FireLeave => self.fire.release(),
        }
    }

    fn publish(&mut self) {
        self.snapshot = self.state.snapshot(self.joystick.vector());
    }
}

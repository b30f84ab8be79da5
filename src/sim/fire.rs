//! Firing control
//!
//! A shot is accepted only once the cooldown has elapsed since the last
//! accepted shot. Holding the fire button fires immediately and then again on
//! every cooldown boundary after the press, until released.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireControl {
    /// Timestamp (ms) of the last accepted shot
    last_fire_ms: Option<f64>,
    /// Next auto-fire boundary while the button is held
    next_auto_ms: Option<f64>,
}

impl FireControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fire button is currently held
    pub fn is_held(&self) -> bool {
        self.next_auto_ms.is_some()
    }

    /// Try to fire at `now_ms`. Returns true if the shot is accepted.
    pub fn request(&mut self, now_ms: f64, cooldown_ms: f64) -> bool {
        if let Some(last) = self.last_fire_ms {
            if now_ms - last < cooldown_ms {
                return false;
            }
        }
        self.last_fire_ms = Some(now_ms);
        true
    }

    /// Button pressed: fire now and start the auto-fire schedule.
    /// Returns true if the immediate shot was accepted.
    pub fn press(&mut self, now_ms: f64, cooldown_ms: f64) -> bool {
        if !self.is_held() {
            self.next_auto_ms = Some(now_ms + cooldown_ms);
        }
        self.request(now_ms, cooldown_ms)
    }

    /// Button released: cancel the auto-fire schedule
    pub fn release(&mut self) {
        self.next_auto_ms = None;
    }

    /// Issue the auto-fire request due by `now_ms`, if any.
    ///
    /// At most one request is issued per poll. Boundaries missed during a long
    /// gap are skipped; the shot is stamped at the latest elapsed boundary and
    /// the schedule stays aligned to `press + k * cooldown`.
    pub fn poll(&mut self, now_ms: f64, cooldown_ms: f64) -> bool {
        let Some(due) = self.next_auto_ms else {
            return false;
        };
        if due > now_ms {
            return false;
        }
        let skipped = ((now_ms - due) / cooldown_ms).floor();
        let boundary = due + skipped * cooldown_ms;
        self.next_auto_ms = Some(boundary + cooldown_ms);
        self.request(boundary, cooldown_ms)
    }

    /// Forget all timing (new session)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

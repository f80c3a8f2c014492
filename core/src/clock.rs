//! Game clock: owns virtual time.

use crate::types::Millis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameClock {
    now: Millis,
}

impl GameClock {
    pub fn new() -> Self {
        Self { now: 0 }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Move time forward to `t`.
    /// Panics if `t` is in the past.
    pub fn advance_to(&mut self, t: Millis) {
        assert!(t >= self.now, "clock moved backwards: {} -> {t}", self.now);
        self.now = t;
    }
}

//! Tunable game constants.
//!
//! Every cost, yield and delay lives here rather than in the managers.
//! `GameConfig::default()` is the canonical set; a JSON file may override
//! any subset of fields.

use crate::types::Millis;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Wood per hut.
    pub hut:  u32,
    /// Wood per trap.
    pub trap: u32,
    /// Wood for the (single) cart.
    pub cart: u32,
    /// Wood per fuel stoke once the settlement phase begins.
    pub fuel: u32,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self { hut: 100, trap: 10, cart: 30, fuel: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldConfig {
    /// Wood per chop without a cart.
    pub wood_per_chop:           u32,
    /// Wood per chop once a cart exists.
    pub wood_per_chop_with_cart: u32,
    /// Villagers housed per hut.
    pub hut_population_capacity: u32,
}

impl Default for YieldConfig {
    fn default() -> Self {
        Self {
            wood_per_chop:           10,
            wood_per_chop_with_cart: 50,
            hut_population_capacity: 4,
        }
    }
}

/// Step delays for the two scripted sequences. Each delay is measured
/// from the moment the previous step fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    pub stranger_arrival: Millis,
    pub stranger_mumble:  Millis,
    pub stranger_calm:    Millis,
    pub stranger_help:    Millis,
    pub builder_traps:    Millis,
    pub builder_cart:     Millis,
    pub builder_workers:  Millis,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            stranger_arrival: 10_000,
            stranger_mumble:   5_000,
            stranger_calm:     5_000,
            stranger_help:     5_000,
            builder_traps:    15_000,
            builder_cart:      5_000,
            builder_workers:   5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTimerConfig {
    /// Ember phase: heat decay + announcement period.
    pub ember_decay_period:        Millis,
    /// Settlement phase: announcement-only period.
    pub settlement_status_period:  Millis,
    /// Settlement phase: heat decay + announcement period.
    pub settlement_decay_period:   Millis,
}

impl Default for RoomTimerConfig {
    fn default() -> Self {
        Self {
            ember_decay_period:       10_000,
            settlement_status_period: 30_000,
            settlement_decay_period:  60_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    /// Wood seeded silently when the game starts.
    pub starting_wood:    u32,
    /// Wood left after the settlement phase resets the stockpile.
    pub settlement_wood:  u32,
    /// Delay before the opening messages and the first room timer.
    pub intro_delay:      Millis,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            starting_wood:   10,
            settlement_wood: 5,
            intro_delay:     500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub costs:       CostConfig,
    pub yields:      YieldConfig,
    pub narrative:   NarrativeConfig,
    pub room_timers: RoomTimerConfig,
    pub start:       StartConfig,
}

impl GameConfig {
    /// Load from a JSON file. Missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Repeating timers with a zero period would never let time advance,
    /// and a zero chop yield would make every chop an invalid increase.
    fn validate(&self) -> anyhow::Result<()> {
        let periods = [
            ("room_timers.ember_decay_period",       self.room_timers.ember_decay_period),
            ("room_timers.settlement_status_period", self.room_timers.settlement_status_period),
            ("room_timers.settlement_decay_period",  self.room_timers.settlement_decay_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                anyhow::bail!("{name} must be > 0");
            }
        }

        let yields = [
            ("yields.wood_per_chop",           self.yields.wood_per_chop),
            ("yields.wood_per_chop_with_cart", self.yields.wood_per_chop_with_cart),
        ];
        for (name, value) in yields {
            if value == 0 {
                anyhow::bail!("{name} must be > 0");
            }
        }
        Ok(())
    }
}

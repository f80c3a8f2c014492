//! Read-only view of the whole game, for tooling and headless runners.
//!
//! Presentation code learns state from events; this is for the runner's
//! `get_state` reply and for tests. Nothing is ever loaded back from it.

use crate::{
    room_timers::Regime,
    types::{BuildingMap, Millis, ResourceMap},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub now:                 Millis,
    pub started:             bool,
    pub settlement:          bool,
    pub room_heat:           usize,
    pub room_status:         String,
    pub resources:           ResourceMap,
    pub buildings:           BuildingMap,
    pub population_capacity: u32,
    pub room_timers:         Regime,
    pub pending_tasks:       usize,
}

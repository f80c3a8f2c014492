//! The central mutable game model.
//!
//! Counts are unsigned, so nothing here can go negative; a decrease that
//! would overdraw is refused instead. Buildings only ever grow.

use crate::{
    error::{GameError, GameResult},
    text::ROOM_STATUS,
    types::{Building, BuildingMap, Resource, ResourceMap},
};

pub const INITIAL_ROOM_HEAT: usize = 2;
pub const MAX_ROOM_HEAT: usize = ROOM_STATUS.len() - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    resources:   ResourceMap,
    buildings:   BuildingMap,
    room_heat:   usize,
    game_phase2: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            resources:   ResourceMap::new(),
            buildings:   BuildingMap::new(),
            room_heat:   INITIAL_ROOM_HEAT,
            game_phase2: false,
        }
    }

    pub fn resource(&self, resource: Resource) -> u32 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    pub fn resources(&self) -> &ResourceMap {
        &self.resources
    }

    pub fn increase_resource(&mut self, resource: Resource, amount: u32) -> GameResult<()> {
        if amount == 0 {
            return Err(GameError::InvalidAmount { amount });
        }
        let entry = self.resources.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
        Ok(())
    }

    /// Returns false, leaving the stock untouched, if fewer than
    /// `amount` are held.
    pub fn decrease_resource(&mut self, resource: Resource, amount: u32) -> bool {
        let current = self.resource(resource);
        if current < amount {
            return false;
        }
        self.resources.insert(resource, current - amount);
        true
    }

    /// Drop every resource, then hold exactly `wood` wood.
    pub fn reset_resources(&mut self, wood: u32) {
        self.resources.clear();
        self.resources.insert(Resource::Wood, wood);
    }

    pub fn building(&self, building: Building) -> u32 {
        self.buildings.get(&building).copied().unwrap_or(0)
    }

    pub fn buildings(&self) -> &BuildingMap {
        &self.buildings
    }

    pub fn increase_building(&mut self, building: Building) {
        let entry = self.buildings.entry(building).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    pub fn room_heat(&self) -> usize {
        self.room_heat
    }

    pub fn increase_room_heat(&mut self) {
        self.room_heat = (self.room_heat + 1).min(MAX_ROOM_HEAT);
    }

    pub fn decrease_room_heat(&mut self) {
        self.room_heat = self.room_heat.saturating_sub(1);
    }

    pub fn room_status_message(&self) -> &'static str {
        ROOM_STATUS[self.room_heat.min(MAX_ROOM_HEAT)]
    }

    pub fn is_game_phase2(&self) -> bool {
        self.game_phase2
    }

    pub fn set_game_phase2(&mut self, phase2: bool) {
        self.game_phase2 = phase2;
    }
}

impl Default for GameState {
    fn default() -> Self { Self::new() }
}

//! Narrow services handed to the managers.
//!
//! Managers never see GameState or the bus directly. ResourceService pairs
//! every stock mutation with its notification; MessageService is the only
//! way to put text (and scene cues) in front of the player.

use crate::{
    bus::EventBus,
    error::GameResult,
    rng::StreamRng,
    state::GameState,
    types::{Building, Resource},
};

/// Read-only view of stock levels, shared by the live model and the
/// mutation service so managers can answer queries from either.
pub trait Stockpile {
    fn resource(&self, resource: Resource) -> u32;
    fn building(&self, building: Building) -> u32;
}

impl Stockpile for GameState {
    fn resource(&self, resource: Resource) -> u32 {
        GameState::resource(self, resource)
    }

    fn building(&self, building: Building) -> u32 {
        GameState::building(self, building)
    }
}

pub struct MessageService<'a> {
    bus: &'a EventBus,
}

impl<'a> MessageService<'a> {
    pub fn new(bus: &'a EventBus) -> Self {
        Self { bus }
    }

    pub fn send_message(&self, text: &str) {
        self.bus.publish_message(text);
    }

    pub fn send_messages(&self, texts: &[&str]) {
        for text in texts {
            self.send_message(text);
        }
    }

    /// Tell the presentation layer to switch views.
    pub fn change_scene(&self, scene: &str) {
        self.bus.publish_scene(scene);
    }

    /// Send one entry chosen uniformly at random. An empty list sends nothing.
    pub fn send_random_message(&self, texts: &[&str], rng: &mut StreamRng) {
        if let Some(i) = rng.pick_index(texts.len()) {
            self.send_message(texts[i]);
        }
    }
}

pub struct ResourceService<'a> {
    state: &'a mut GameState,
    bus:   &'a EventBus,
}

impl<'a> ResourceService<'a> {
    pub fn new(state: &'a mut GameState, bus: &'a EventBus) -> Self {
        Self { state, bus }
    }

    pub fn increase_resource(&mut self, resource: Resource, amount: u32) -> GameResult<()> {
        self.state.increase_resource(resource, amount)?;
        self.notify_resources();
        Ok(())
    }

    /// Publishes whether or not the decrease went through.
    pub fn decrease_resource(&mut self, resource: Resource, amount: u32) -> bool {
        let ok = self.state.decrease_resource(resource, amount);
        self.notify_resources();
        ok
    }

    /// Clear the stockpile down to `wood` wood, with a single notification.
    pub fn reset_resources(&mut self, wood: u32) {
        self.state.reset_resources(wood);
        self.notify_resources();
    }

    pub fn increase_building(&mut self, building: Building) {
        self.state.increase_building(building);
        self.bus.publish_buildings(self.state.buildings());
    }

    pub fn notify_resources(&self) {
        self.bus.publish_resources(self.state.resources());
    }
}

impl Stockpile for ResourceService<'_> {
    fn resource(&self, resource: Resource) -> u32 {
        self.state.resource(resource)
    }

    fn building(&self, building: Building) -> u32 {
        self.state.building(building)
    }
}

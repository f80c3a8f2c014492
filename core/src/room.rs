//! Huts: housing for the village. The first hut moves the player
//! to the "lonely hut" scene.

use crate::{
    service::{MessageService, ResourceService, Stockpile},
    text,
    types::{Building, BuildOutcome, Resource},
};

pub struct RoomManager {
    cost:             u32,
    capacity_per_hut: u32,
}

impl RoomManager {
    pub fn new(cost: u32, capacity_per_hut: u32) -> Self {
        Self { cost, capacity_per_hut }
    }

    pub fn hut_count(&self, stock: &impl Stockpile) -> u32 {
        stock.building(Building::Hut)
    }

    pub fn build_hut(
        &self,
        resources: &mut ResourceService,
        messages: &MessageService,
    ) -> BuildOutcome {
        if resources.resource(Resource::Wood) < self.cost {
            messages.send_message(text::WOOD_SHORTAGE);
            return BuildOutcome::InsufficientWood;
        }

        resources.decrease_resource(Resource::Wood, self.cost);
        resources.increase_building(Building::Hut);
        messages.send_message(text::HUT_BUILT);

        let huts = self.hut_count(&*resources);
        log::debug!("hut built, now {huts}");
        if huts == 1 {
            messages.change_scene(text::SCENE_LONELY_HUT);
        }
        BuildOutcome::Built
    }

    pub fn population_capacity(&self, stock: &impl Stockpile) -> u32 {
        self.hut_count(stock) * self.capacity_per_hut
    }
}

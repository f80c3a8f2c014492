//! Traps: built with wood, checked for random hauls of fur, meat and teeth.
//!
//! A check with N traps draws each of fur, meat and teeth independently
//! and uniformly from [0, N]. Draw order is fixed (fur, meat, teeth) so a
//! seeded game replays identically.

use crate::{
    error::GameResult,
    rng::StreamRng,
    service::{MessageService, ResourceService, Stockpile},
    text,
    types::{Building, BuildOutcome, Resource},
};
use serde::{Deserialize, Serialize};

/// One trap check's yield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapHaul {
    pub fur:   u32,
    pub meat:  u32,
    pub teeth: u32,
}

impl TrapHaul {
    pub fn is_empty(&self) -> bool {
        self.fur == 0 && self.meat == 0 && self.teeth == 0
    }

    /// The player-facing catch report.
    pub fn message(&self) -> String {
        let caught: Vec<&str> = [
            (self.fur, text::FUR_SCRAPS),
            (self.meat, text::MEAT_SCRAPS),
            (self.teeth, text::BROKEN_TEETH),
        ]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(_, label)| label)
        .collect();

        if caught.is_empty() {
            return text::TRAP_EMPTY.to_string();
        }
        format!("{}{}.", text::TRAP_CATCH_PREFIX, caught.join(text::TRAP_CATCH_JOIN))
    }
}

pub struct TrapManager {
    cost: u32,
    rng:  StreamRng,
}

impl TrapManager {
    pub fn new(cost: u32, rng: StreamRng) -> Self {
        Self { cost, rng }
    }

    pub fn trap_count(&self, stock: &impl Stockpile) -> u32 {
        stock.building(Building::Trap)
    }

    pub fn build_trap(
        &mut self,
        resources: &mut ResourceService,
        messages: &MessageService,
    ) -> BuildOutcome {
        if resources.resource(Resource::Wood) < self.cost {
            messages.send_message(text::WOOD_SHORTAGE);
            return BuildOutcome::InsufficientWood;
        }
        resources.decrease_resource(Resource::Wood, self.cost);
        resources.increase_building(Building::Trap);
        log::debug!("trap built, now {}", resources.building(Building::Trap));
        messages.send_message(text::TRAP_MORE_PREY);
        BuildOutcome::Built
    }

    /// Returns None, touching nothing, when no traps exist.
    pub fn check_traps(
        &mut self,
        resources: &mut ResourceService,
        messages: &MessageService,
    ) -> GameResult<Option<TrapHaul>> {
        let traps = self.trap_count(&*resources);
        if traps == 0 {
            return Ok(None);
        }

        let haul = TrapHaul {
            fur:   self.rng.roll_inclusive(traps),
            meat:  self.rng.roll_inclusive(traps),
            teeth: self.rng.roll_inclusive(traps),
        };

        for (resource, amount) in [
            (Resource::Fur, haul.fur),
            (Resource::Meat, haul.meat),
            (Resource::Teeth, haul.teeth),
        ] {
            if amount > 0 {
                resources.increase_resource(resource, amount)?;
            }
        }

        log::debug!("traps={traps} haul={haul:?} ({} stream)", self.rng.name());
        messages.send_message(&haul.message());
        Ok(Some(haul))
    }
}

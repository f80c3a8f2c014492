//! The cart: a one-off build that raises the wood gained per chop.

use crate::{
    config::YieldConfig,
    service::{MessageService, ResourceService, Stockpile},
    text,
    types::{Building, BuildOutcome, Resource},
};

pub struct VehicleManager {
    cost:                u32,
    wood_gain:           u32,
    wood_gain_with_cart: u32,
}

impl VehicleManager {
    pub fn new(cost: u32, yields: &YieldConfig) -> Self {
        Self {
            cost,
            wood_gain:           yields.wood_per_chop,
            wood_gain_with_cart: yields.wood_per_chop_with_cart,
        }
    }

    pub fn has_cart(&self, stock: &impl Stockpile) -> bool {
        stock.building(Building::Cart) > 0
    }

    /// At most one cart is ever built; later calls only remind the player.
    pub fn build_cart(
        &self,
        resources: &mut ResourceService,
        messages: &MessageService,
    ) -> BuildOutcome {
        if self.has_cart(&*resources) {
            messages.send_message(text::CART_EXISTS);
            return BuildOutcome::AlreadyOwned;
        }
        if resources.resource(Resource::Wood) < self.cost {
            messages.send_message(text::WOOD_SHORTAGE);
            return BuildOutcome::InsufficientWood;
        }

        resources.decrease_resource(Resource::Wood, self.cost);
        resources.increase_building(Building::Cart);
        log::debug!("cart built");
        messages.send_message(text::CART_BUILT);
        BuildOutcome::Built
    }

    /// Wood gained per chop.
    pub fn wood_gain_amount(&self, stock: &impl Stockpile) -> u32 {
        if self.has_cart(stock) {
            self.wood_gain_with_cart
        } else {
            self.wood_gain
        }
    }
}

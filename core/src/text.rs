//! Hard-coded narrative text.

/// Room status by heat level, coldest first.
pub const ROOM_STATUS: [&str; 6] = [
    "the room is freezing.",
    "the room is cold.",
    "the room is warm.",
    "the room is pleasant.",
    "the room is hot.",
    "the room is scorching.",
];

pub const FIRE_DEAD: &str = "the fire is dead.";

pub const FIRE_STOKED: [&str; 4] = [
    "the fire sputters into flame.",
    "the light from the fire spills from the windows, out into the dark.",
    "the fire is burning.",
    "the fire is roaring.",
];

pub const WOOD_SHORTAGE: &str = "not enough wood.";
pub const WOOD_SCATTERED: &str = "dry brush and dead branches litter the forest floor.";

pub const HUT_BUILT: &str =
    "builder puts up a hut, out in the forest. says word will get around.";
pub const TRAP_MORE_PREY: &str = "more traps to catch more creatures.";
pub const TRAP_EMPTY: &str = "the traps are empty.";
pub const CART_BUILT: &str = "the rickety cart will carry more wood from the forest.";
pub const CART_EXISTS: &str = "no need for another cart.";

pub const TRAP_CATCH_PREFIX: &str = "the traps contain ";
pub const TRAP_CATCH_JOIN: &str = " and ";
pub const FUR_SCRAPS: &str = "scraps of fur";
pub const MEAT_SCRAPS: &str = "bits of meat";
pub const BROKEN_TEETH: &str = "strange broken teeth";

pub const STRANGER_ARRIVAL: &str =
    "a ragged stranger stumbles through the door and collapses in the corner.";
pub const STRANGER_MUMBLE: &str = "the stranger shivers, and mumbles quietly. her words are unintelligible.";
pub const STRANGER_CALM: &str = "the stranger in the corner stops shivering. her breathing calms.";
pub const STRANGER_HELP: &str =
    "the stranger is standing by the fire. she says she can help. says she builds things.";

pub const BUILDER_TRAPS: &str =
    "builder says she can make traps to catch any creatures might still be alive out there.";
pub const BUILDER_CART: &str = "builder says she could make a cart for carrying wood.";
pub const BUILDER_WORKERS: &str = "builder says there are more wanderers. says they'll work, too.";

pub const SCENE_LONELY_HUT: &str = "lonely hut";

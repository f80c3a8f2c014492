use serde::{Deserialize, Serialize};

/// Every player action the presentation layer can trigger.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Fire room ─────────────────────────────────
    AddFuel,

    // ── Forest ────────────────────────────────────
    ChopWood,
    CheckTraps,

    // ── Village ───────────────────────────────────
    BuildHut,
    BuildTrap,
    BuildCart,
}

impl PlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddFuel    => "add_fuel",
            Self::ChopWood   => "chop_wood",
            Self::CheckTraps => "check_traps",
            Self::BuildHut   => "build_hut",
            Self::BuildTrap  => "build_trap",
            Self::BuildCart  => "build_cart",
        }
    }
}

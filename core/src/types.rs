//! Shared primitive types used across the entire engine.

use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Virtual game time in milliseconds since the engine was built.
pub type Millis = u64;

/// Resource counts keyed by resource. Absent keys read as zero.
pub type ResourceMap = BTreeMap<Resource, u32>;

/// Building counts keyed by building. Absent keys read as zero.
pub type BuildingMap = BTreeMap<Building, u32>;

/// Every stockpiled resource.
/// Variants are serialized by their stable snake_case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Wood,
    Fur,
    Meat,
    Teeth,
}

impl Resource {
    pub const ALL: [Resource; 4] = [Self::Wood, Self::Fur, Self::Meat, Self::Teeth];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Wood  => "wood",
            Self::Fur   => "fur",
            Self::Meat  => "meat",
            Self::Teeth => "teeth",
        }
    }
}

impl FromStr for Resource {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| GameError::UnknownResource { name: s.to_string() })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every constructible building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Building {
    Hut,
    Trap,
    Cart,
}

impl Building {
    pub const ALL: [Building; 3] = [Self::Hut, Self::Trap, Self::Cart];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hut  => "hut",
            Self::Trap => "trap",
            Self::Cart => "cart",
        }
    }
}

impl FromStr for Building {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| GameError::UnknownBuilding { name: s.to_string() })
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a build action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    Built,
    InsufficientWood,
    /// The building is capped and one already exists.
    AlreadyOwned,
}

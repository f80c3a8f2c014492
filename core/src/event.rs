//! Engine notifications: the only way observers learn engine state.
//!
//! RULE: Observers never read GameState directly.
//! Every change they care about is published as one of these events.

use crate::types::{BuildingMap, ResourceMap};
use serde::{Deserialize, Serialize};

/// Every notification published on the bus, in a single tagged form.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Narrative ──────────────────────────────────
    Message {
        text: String,
    },

    // ── Economy ────────────────────────────────────
    ResourcesChanged {
        resources: ResourceMap,
    },
    BuildingsChanged {
        buildings: BuildingMap,
    },

    // ── Progression ────────────────────────────────
    PhaseChanged {
        settlement: bool,
    },
    SceneChanged {
        scene: String,
    },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Message { .. }          => EventKind::Message,
            Self::ResourcesChanged { .. } => EventKind::ResourcesChanged,
            Self::BuildingsChanged { .. } => EventKind::BuildingsChanged,
            Self::PhaseChanged { .. }     => EventKind::PhaseChanged,
            Self::SceneChanged { .. }     => EventKind::SceneChanged,
        }
    }
}

/// Event category, one per bus channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Message,
    ResourcesChanged,
    BuildingsChanged,
    PhaseChanged,
    SceneChanged,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message          => "message",
            Self::ResourcesChanged => "resources_changed",
            Self::BuildingsChanged => "buildings_changed",
            Self::PhaseChanged     => "phase_changed",
            Self::SceneChanged     => "scene_changed",
        }
    }
}

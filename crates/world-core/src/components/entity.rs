//! Core entity components shared by every world object.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use world_events::Vec3;

/// Stable, opaque identifier for a world entity. Unique per simulation
/// and never reused, even after the entity is deleted.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of entity variants. Fixed at spawn time.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Pawn,
    Player,
    Tree,
    Rock,
}

impl EntityKind {
    /// Entity variants a pawn can gather from.
    pub fn is_gatherable(&self) -> bool {
        matches!(self, EntityKind::Tree | EntityKind::Rock)
    }

    /// Entity variants that can take part in a trade.
    pub fn can_trade(&self) -> bool {
        matches!(self, EntityKind::Pawn | EntityKind::Player)
    }
}

/// Human-readable display name.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct EntityName(pub String);

impl EntityName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Current position in world space.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Current velocity command. Integration into position is a host
/// concern; behaviors only ever write this.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Logical-death flag. A flagged entity stays in the world until the
/// end-of-tick sweep despawns it, but must not be targeted by new
/// behaviors once the flag is set.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MarkedForDeletion(pub bool);

impl MarkedForDeletion {
    pub fn mark(&mut self) {
        self.0 = true;
    }

    pub fn is_marked(&self) -> bool {
        self.0
    }
}

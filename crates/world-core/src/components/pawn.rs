//! Pawn components: behavior mode, targeting state, relationships.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::entity::EntityId;
use super::nation::NationId;
use crate::behavior::BehaviorType;

/// Marker component identifying an entity as an autonomous pawn.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Pawn;

/// Mutable per-pawn behavior state.
///
/// Both the nation and the target are weak, id-based references: they are
/// re-resolved through the registries on every access and every access
/// path tolerates the referent having vanished in the meantime.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct PawnState {
    /// Nation this pawn belongs to, if any.
    pub nation: Option<NationId>,
    /// Entity the pawn is currently acting upon.
    pub target: Option<EntityId>,
    /// Movement rate in world units per tick.
    pub speed: f32,
}

impl PawnState {
    pub fn new(speed: f32) -> Self {
        Self {
            nation: None,
            target: None,
            speed,
        }
    }

    pub fn with_nation(mut self, nation: NationId) -> Self {
        self.nation = Some(nation);
        self
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_target(&mut self, target: EntityId) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }
}

/// Integer affinity scores this pawn tracks toward other entities.
/// Entries are created lazily on first interaction.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationships {
    scores: HashMap<EntityId, i32>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score toward an entity, zero when never interacted.
    pub fn score(&self, target: EntityId) -> i32 {
        self.scores.get(&target).copied().unwrap_or(0)
    }

    /// Adjusts the score toward an entity and returns the new value.
    pub fn increase(&mut self, target: EntityId, amount: i32) -> i32 {
        let entry = self.scores.entry(target).or_insert(0);
        *entry += amount;
        *entry
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// The behavior mode governing this pawn's per-tick logic. Selection of
/// the mode itself is a host concern; the executor only dispatches on it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBehavior(pub BehaviorType);

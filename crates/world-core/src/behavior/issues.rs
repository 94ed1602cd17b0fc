//! Behavior issues: recoverable conditions a behavior runs into.
//!
//! Issues are not errors that abort the tick. They are recorded in the
//! `IssueLog` resource for the host and tests to inspect, and mirrored
//! to the log at warn level. The pawn simply tries again next tick.

use bevy_ecs::prelude::*;
use tracing::warn;

use crate::components::{EntityId, EntityKind, ItemType};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BehaviorIssue {
    #[error("pawn {pawn} found no tree or rock to gather from")]
    NoGatherTarget { pawn: EntityId },

    #[error("pawn {pawn} is at a {kind:?} target its behavior cannot act on")]
    WrongTargetKind { pawn: EntityId, kind: EntityKind },

    #[error("pawn {pawn} target {target} no longer exists")]
    TargetVanished { pawn: EntityId, target: EntityId },

    #[error("seller {seller} has no {item} to sell")]
    InsufficientStock { seller: EntityId, item: ItemType },

    #[error("no sale price defined for {item}")]
    UnpricedItem { item: ItemType },

    #[error("buyer {buyer} cannot afford {item} at {price} gold")]
    InsufficientGold {
        buyer: EntityId,
        item: ItemType,
        price: u32,
    },
}

/// Resource collecting the issues raised during the current run.
#[derive(Resource, Debug, Default)]
pub struct IssueLog {
    issues: Vec<BehaviorIssue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an issue and emits it at warn level.
    pub fn record(&mut self, issue: BehaviorIssue) {
        warn!("{issue}");
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[BehaviorIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn clear(&mut self) {
        self.issues.clear();
    }
}

//! Behavior System
//!
//! Per-tick behavior execution for pawns. Each pawn carries an
//! `ActiveBehavior` mode; the executor dispatches on it and advances
//! the pawn exactly one step per tick (acquire a target, move toward
//! it, or interact with it).

use serde::{Deserialize, Serialize};

pub mod executor;
pub mod issues;

pub use executor::{execute_pawn_behaviors, integrate_velocities, INTERACTION_RANGE};
pub use issues::{BehaviorIssue, IssueLog};

/// Closed set of behavior modes a pawn can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorType {
    /// Seek the nearest tree or rock, harvest it on contact.
    GatherResources,
    /// Seek the pawn's nation leader and sell them resources.
    SellResources,
    /// Occasionally pick a random nearby point and drift toward it.
    Wander,
    /// Seek the nation leader and buy an apple from them.
    PurchaseFood,
    /// Do nothing this tick.
    Idle,
}

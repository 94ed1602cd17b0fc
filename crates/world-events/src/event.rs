//! Immutable domain event records.
//!
//! One variant per occurrence kind, each carrying the minimal payload
//! needed to describe it. Events are created once, appended to an ordered
//! log, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::position::Vec3;

/// Position in the log, assigned at append time. Append order is
/// production order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt_{:08}", self.0)
    }
}

/// A notable occurrence in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Simulation tick the event was produced on.
    pub tick: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Payload variants, one per event kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    ChunkGenerate {
        chunk_x: i32,
        chunk_z: i32,
    },
    PlayerFallingIntoVoid {
        position: Vec3,
    },
    NationCreation {
        nation_id: Uuid,
        name: String,
    },
    NationJoin {
        nation_id: Uuid,
        entity_id: Uuid,
    },
    NationLeave {
        nation_id: Uuid,
        entity_id: Uuid,
    },
    PawnSpawn {
        entity_id: Uuid,
        name: String,
        position: Vec3,
    },
    NationDisband {
        nation_id: Uuid,
    },
    PawnRelationshipIncrease {
        pawn_id: Uuid,
        target_id: Uuid,
        amount: i32,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [tick {}] ", self.id, self.tick)?;
        match &self.kind {
            EventKind::ChunkGenerate { chunk_x, chunk_z } => {
                write!(f, "chunk ({chunk_x}, {chunk_z}) generated")
            }
            EventKind::PlayerFallingIntoVoid { position } => {
                write!(f, "player falling into the void at ({}, {}, {})", position.x, position.y, position.z)
            }
            EventKind::NationCreation { name, .. } => write!(f, "nation '{name}' created"),
            EventKind::NationJoin { entity_id, .. } => write!(f, "{entity_id} joined a nation"),
            EventKind::NationLeave { entity_id, .. } => write!(f, "{entity_id} left a nation"),
            EventKind::PawnSpawn { name, .. } => write!(f, "pawn '{name}' spawned"),
            EventKind::NationDisband { nation_id } => write!(f, "nation {nation_id} disbanded"),
            EventKind::PawnRelationshipIncrease { amount, .. } => {
                write!(f, "relationship increased by {amount}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_expected_shape() {
        let event = Event {
            id: EventId(3),
            tick: 42,
            kind: EventKind::PawnRelationshipIncrease {
                pawn_id: Uuid::nil(),
                target_id: Uuid::nil(),
                amount: 2,
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["tick"], 42);
        assert_eq!(json["type"], "pawn_relationship_increase");
        assert_eq!(json["amount"], 2);
    }

    #[test]
    fn round_trips_through_json() {
        let event = Event {
            id: EventId(1),
            tick: 7,
            kind: EventKind::ChunkGenerate {
                chunk_x: -1,
                chunk_z: 2,
            },
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn event_id_formats_padded() {
        assert_eq!(EventId(1).to_string(), "evt_00000001");
    }

    #[test]
    fn spawn_event_keeps_position() {
        let event = Event {
            id: EventId(5),
            tick: 0,
            kind: EventKind::PawnSpawn {
                entity_id: Uuid::nil(),
                name: "Alder".to_string(),
                position: Vec3::new(1.0, 0.0, -2.0),
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "pawn_spawn");
        assert_eq!(json["name"], "Alder");
        assert_eq!(json["position"]["z"], -2.0);
    }
}

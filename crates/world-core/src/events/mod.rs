//! Event Production
//!
//! Behaviors record what happened through the `EventLog` resource.
//! Events are immutable once produced: the log only ever appends, and
//! ids are assigned sequentially at production time.

use bevy_ecs::prelude::*;
use tracing::debug;
use uuid::Uuid;
use world_events::{Event, EventId, EventKind, Vec3};

pub mod journal;

pub use journal::EventJournal;

/// Append-only in-memory event log.
#[derive(Resource, Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    next_event_id: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_event_id: 1,
        }
    }

    fn produce(&mut self, tick: u64, kind: EventKind) -> EventId {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        let event = Event { id, tick, kind };
        debug!("{event}");
        self.events.push(event);
        id
    }

    pub fn produce_chunk_generate(&mut self, tick: u64, chunk_x: i32, chunk_z: i32) -> EventId {
        self.produce(tick, EventKind::ChunkGenerate { chunk_x, chunk_z })
    }

    pub fn produce_player_falling_into_void(&mut self, tick: u64, position: Vec3) -> EventId {
        self.produce(tick, EventKind::PlayerFallingIntoVoid { position })
    }

    pub fn produce_nation_creation(&mut self, tick: u64, nation_id: Uuid, name: &str) -> EventId {
        self.produce(
            tick,
            EventKind::NationCreation {
                nation_id,
                name: name.to_string(),
            },
        )
    }

    pub fn produce_nation_join(&mut self, tick: u64, nation_id: Uuid, entity_id: Uuid) -> EventId {
        self.produce(
            tick,
            EventKind::NationJoin {
                nation_id,
                entity_id,
            },
        )
    }

    pub fn produce_nation_leave(&mut self, tick: u64, nation_id: Uuid, entity_id: Uuid) -> EventId {
        self.produce(
            tick,
            EventKind::NationLeave {
                nation_id,
                entity_id,
            },
        )
    }

    pub fn produce_nation_disband(&mut self, tick: u64, nation_id: Uuid) -> EventId {
        self.produce(tick, EventKind::NationDisband { nation_id })
    }

    pub fn produce_pawn_spawn(
        &mut self,
        tick: u64,
        entity_id: Uuid,
        name: &str,
        position: Vec3,
    ) -> EventId {
        self.produce(
            tick,
            EventKind::PawnSpawn {
                entity_id,
                name: name.to_string(),
                position,
            },
        )
    }

    pub fn produce_pawn_relationship_increase(
        &mut self,
        tick: u64,
        pawn_id: Uuid,
        target_id: Uuid,
        amount: i32,
    ) -> EventId {
        self.produce(
            tick,
            EventKind::PawnRelationshipIncrease {
                pawn_id,
                target_id,
                amount,
            },
        )
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Takes all accumulated events, leaving the log empty but keeping
    /// the id sequence running.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

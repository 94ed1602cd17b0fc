//! Environment Index
//!
//! Rebuilt once per tick before behaviors run, the environment maps
//! stable entity ids to ECS entities plus the spatial data behaviors
//! query against. Entities flagged for deletion are excluded at build
//! time and evicted again at mark time, so a freshly felled tree can
//! never be re-acquired within the same tick. World upkeep systems
//! (deletion sweep, void recovery) live here too.

use bevy_ecs::prelude::*;
use std::collections::HashMap;
use world_events::Vec3;

use crate::components::{EntityId, EntityKind, MarkedForDeletion, Position};
use crate::events::EventLog;
use crate::TickCounter;

/// Snapshot of one entity as seen by behaviors this tick.
#[derive(Debug, Clone, Copy)]
pub struct EnvEntry {
    pub id: EntityId,
    pub entity: Entity,
    pub kind: EntityKind,
    pub position: Vec3,
}

/// Resource mapping entity ids to their per-tick snapshots.
#[derive(Resource, Debug, Default)]
pub struct Environment {
    entries: HashMap<EntityId, EnvEntry>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn insert(&mut self, entry: EnvEntry) {
        self.entries.insert(entry.id, entry);
    }

    /// Evicts an entity from the index. Called when the entity is
    /// flagged for deletion mid-tick.
    pub fn remove(&mut self, id: EntityId) {
        self.entries.remove(&id);
    }

    /// Resolves a weak id reference, `None` when the entity is gone or
    /// already flagged for deletion.
    pub fn lookup(&self, id: EntityId) -> Option<&EnvEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest entity of the given kind to `from`, by Euclidean
    /// distance. Ties keep the first candidate encountered.
    pub fn nearest_of_kind(&self, kind: EntityKind, from: Vec3) -> Option<&EnvEntry> {
        let mut best: Option<(&EnvEntry, f32)> = None;
        for entry in self.entries.values() {
            if entry.kind != kind {
                continue;
            }
            let dist = entry.position.distance(from);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((entry, dist)),
            }
        }
        best.map(|(entry, _)| entry)
    }

    pub fn nearest_tree(&self, from: Vec3) -> Option<&EnvEntry> {
        self.nearest_of_kind(EntityKind::Tree, from)
    }

    pub fn nearest_rock(&self, from: Vec3) -> Option<&EnvEntry> {
        self.nearest_of_kind(EntityKind::Rock, from)
    }
}

/// System rebuilding the environment index. Runs before any behavior
/// executes each tick.
pub fn build_environment_index(
    mut environment: ResMut<Environment>,
    query: Query<(Entity, &EntityId, &EntityKind, &Position, &MarkedForDeletion)>,
) {
    environment.clear();

    for (entity, id, kind, position, marked) in query.iter() {
        if marked.is_marked() {
            continue;
        }
        environment.insert(EnvEntry {
            id: *id,
            entity,
            kind: *kind,
            position: position.0,
        });
    }
}

/// Altitude below which an entity counts as fallen out of the world.
pub const VOID_Y: f32 = -64.0;

/// Recovers players that fell below the world, producing an event and
/// putting them back at ground level.
pub fn recover_void_falls(
    mut events: ResMut<EventLog>,
    tick: Res<TickCounter>,
    mut query: Query<(&EntityKind, &mut Position)>,
) {
    for (kind, mut position) in query.iter_mut() {
        if *kind != EntityKind::Player || position.0.y >= VOID_Y {
            continue;
        }
        events.produce_player_falling_into_void(tick.tick(), position.0);
        position.0.y = 0.0;
    }
}

/// Despawns every entity flagged for deletion. Runs at the end of the
/// tick, after all behaviors.
pub fn sweep_marked_entities(world: &mut World) {
    let doomed: Vec<Entity> = world
        .query::<(Entity, &MarkedForDeletion)>()
        .iter(world)
        .filter(|(_, marked)| marked.is_marked())
        .map(|(entity, _)| entity)
        .collect();

    for entity in doomed {
        world.despawn(entity);
    }
}

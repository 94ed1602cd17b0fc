//! Terrain Generation
//!
//! Populates a square of chunks around the origin with trees and rocks,
//! each pre-stocked with the resources a pawn harvests from it.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use world_events::Vec3;

use crate::components::{EntityId, EntityKind, Inventory, ItemType, MarkedForDeletion, Position};
use crate::config::WorldConfig;
use crate::events::EventLog;

/// Spawns one gatherable resource entity.
fn spawn_resource(world: &mut World, kind: EntityKind, position: Vec3, stock: (ItemType, u32)) {
    world.spawn((
        EntityId::new(),
        kind,
        Position(position),
        MarkedForDeletion::default(),
        Inventory::with_items(&[stock]),
    ));
}

/// Random point within the bounds of chunk `(chunk_x, chunk_z)`.
fn point_in_chunk(rng: &mut SmallRng, chunk_x: i32, chunk_z: i32, chunk_size: f32) -> Vec3 {
    let base_x = chunk_x as f32 * chunk_size;
    let base_z = chunk_z as f32 * chunk_size;
    Vec3::new(
        base_x + rng.gen_range(0.0..chunk_size),
        0.0,
        base_z + rng.gen_range(0.0..chunk_size),
    )
}

/// Generates all chunks in the configured radius, producing a
/// chunk-generate event per chunk and populating it with resources.
pub fn generate_chunks(world: &mut World, config: &WorldConfig, rng: &mut SmallRng) {
    for chunk_x in -config.chunk_radius..=config.chunk_radius {
        for chunk_z in -config.chunk_radius..=config.chunk_radius {
            world
                .resource_mut::<EventLog>()
                .produce_chunk_generate(0, chunk_x, chunk_z);

            for _ in 0..config.trees_per_chunk {
                let position = point_in_chunk(rng, chunk_x, chunk_z, config.chunk_size);
                spawn_resource(
                    world,
                    EntityKind::Tree,
                    position,
                    (ItemType::Wood, config.wood_per_tree),
                );
            }
            for _ in 0..config.rocks_per_chunk {
                let position = point_in_chunk(rng, chunk_x, chunk_z, config.chunk_size);
                spawn_resource(
                    world,
                    EntityKind::Rock,
                    position,
                    (ItemType::Stone, config.stone_per_rock),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use world_events::EventKind;

    #[test]
    fn generates_expected_resource_counts() {
        let mut world = World::new();
        world.insert_resource(EventLog::new());
        let mut rng = SmallRng::seed_from_u64(1);

        let config = WorldConfig {
            chunk_radius: 1,
            chunk_size: 16.0,
            trees_per_chunk: 3,
            rocks_per_chunk: 2,
            wood_per_tree: 5,
            stone_per_rock: 3,
        };
        generate_chunks(&mut world, &config, &mut rng);

        // 3x3 chunks
        let trees = world
            .query::<&EntityKind>()
            .iter(&world)
            .filter(|kind| **kind == EntityKind::Tree)
            .count();
        let rocks = world
            .query::<&EntityKind>()
            .iter(&world)
            .filter(|kind| **kind == EntityKind::Rock)
            .count();
        assert_eq!(trees, 27);
        assert_eq!(rocks, 18);

        let events = world.resource::<EventLog>();
        assert_eq!(events.len(), 9);
        assert!(events
            .events()
            .iter()
            .all(|e| matches!(e.kind, EventKind::ChunkGenerate { .. })));
    }

    #[test]
    fn resources_spawn_inside_their_chunk() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..100 {
            let point = point_in_chunk(&mut rng, -1, 2, 16.0);
            assert!(point.x >= -16.0 && point.x < 0.0);
            assert!(point.z >= 32.0 && point.z < 48.0);
            assert_eq!(point.y, 0.0);
        }
    }
}

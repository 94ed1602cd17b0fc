//! Pawn and Player Spawning

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use world_events::Vec3;

use crate::behavior::BehaviorType;
use crate::components::{
    ActiveBehavior, EntityId, EntityKind, EntityName, Inventory, ItemType, MarkedForDeletion, Pawn,
    PawnState, Player, PlayerStatus, Position, Relationships, Velocity,
};
use crate::config::PawnConfig;
use crate::events::EventLog;
use crate::nations::found_nation;

const PAWN_NAMES: &[&str] = &[
    "Toren", "Maris", "Edrin", "Sella", "Garrick", "Lunet", "Osric", "Wilda", "Corvin", "Ysolde",
    "Bram", "Hesper", "Aldous", "Nerine", "Fenwick", "Thessaly", "Jorund", "Elowen", "Padric",
    "Sabeline",
];

fn generate_name(index: usize, rng: &mut SmallRng) -> String {
    let offset = rng.gen_range(0..PAWN_NAMES.len());
    PAWN_NAMES[(index + offset) % PAWN_NAMES.len()].to_string()
}

/// Spawns a single pawn and produces its spawn event.
pub fn spawn_pawn(
    world: &mut World,
    name: &str,
    position: Vec3,
    config: &PawnConfig,
) -> (Entity, EntityId) {
    let id = EntityId::new();
    let entity = world
        .spawn((
            Pawn,
            id,
            EntityKind::Pawn,
            EntityName::new(name),
            Position(position),
            Velocity::default(),
            MarkedForDeletion::default(),
            Inventory::with_items(&[
                (ItemType::GoldCoin, config.starting_gold),
                (ItemType::Apple, config.starting_apples),
            ]),
            PawnState::new(config.speed),
            Relationships::new(),
            ActiveBehavior(BehaviorType::Wander),
        ))
        .id();

    world
        .resource_mut::<EventLog>()
        .produce_pawn_spawn(0, id.0, name, position);

    (entity, id)
}

/// Spawns the player-controlled entity.
pub fn spawn_player(world: &mut World, name: &str, position: Vec3) -> (Entity, EntityId) {
    let id = EntityId::new();
    let entity = world
        .spawn((
            Player,
            id,
            EntityKind::Player,
            EntityName::new(name),
            Position(position),
            Velocity::default(),
            MarkedForDeletion::default(),
            Inventory::with_items(&[(ItemType::GoldCoin, 20), (ItemType::Apple, 5)]),
            PlayerStatus::new(),
        ))
        .id();
    (entity, id)
}

/// Spawns the configured pawn population and gathers them into one
/// founding nation led by the first pawn.
pub fn spawn_all_pawns(world: &mut World, config: &PawnConfig, rng: &mut SmallRng) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(config.count as usize);
    let mut member_ids = Vec::with_capacity(config.count as usize);

    for i in 0..config.count as usize {
        let name = generate_name(i, rng);
        let position = Vec3::new(
            rng.gen_range(-config.spawn_radius..config.spawn_radius),
            0.0,
            rng.gen_range(-config.spawn_radius..config.spawn_radius),
        );
        let (entity, id) = spawn_pawn(world, &name, position, config);
        spawned.push(entity);
        member_ids.push(id);
    }

    if let Some(&leader) = member_ids.first() {
        let nation_id = found_nation(world, "Meridia", leader, &member_ids);
        for &entity in &spawned {
            if let Some(mut state) = world.get_mut::<PawnState>(entity) {
                state.nation = Some(nation_id);
            }
        }
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NationRegistry;
    use rand::SeedableRng;
    use world_events::EventKind;

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(EventLog::new());
        world.insert_resource(NationRegistry::new());
        world
    }

    #[test]
    fn spawned_pawn_carries_starting_inventory() {
        let mut world = test_world();
        let config = PawnConfig {
            count: 1,
            speed: 1.0,
            starting_gold: 10,
            starting_apples: 2,
            spawn_radius: 5.0,
        };

        let (entity, _) = spawn_pawn(&mut world, "Toren", Vec3::ZERO, &config);

        let inventory = world.get::<Inventory>(entity).unwrap();
        assert_eq!(inventory.count(ItemType::GoldCoin), 10);
        assert_eq!(inventory.count(ItemType::Apple), 2);
        assert!(matches!(
            world.resource::<EventLog>().events()[0].kind,
            EventKind::PawnSpawn { .. }
        ));
    }

    #[test]
    fn population_shares_one_nation_with_leader() {
        let mut world = test_world();
        let mut rng = SmallRng::seed_from_u64(9);
        let config = PawnConfig {
            count: 4,
            speed: 1.0,
            starting_gold: 10,
            starting_apples: 2,
            spawn_radius: 5.0,
        };

        let spawned = spawn_all_pawns(&mut world, &config, &mut rng);
        assert_eq!(spawned.len(), 4);

        let leader_id = *world.get::<EntityId>(spawned[0]).unwrap();
        let registry = world.resource::<NationRegistry>();
        assert_eq!(registry.len(), 1);
        let nation = registry.iter().next().unwrap();
        assert_eq!(nation.leader, Some(leader_id));
        assert_eq!(nation.member_count(), 4);

        for &entity in &spawned {
            let state = world.get::<PawnState>(entity).unwrap();
            assert_eq!(state.nation, Some(nation.id));
        }
    }

    #[test]
    fn pawns_spawn_within_radius() {
        let mut world = test_world();
        let mut rng = SmallRng::seed_from_u64(3);
        let config = PawnConfig {
            count: 8,
            speed: 1.0,
            starting_gold: 0,
            starting_apples: 0,
            spawn_radius: 5.0,
        };

        for entity in spawn_all_pawns(&mut world, &config, &mut rng) {
            let position = world.get::<Position>(entity).unwrap().0;
            assert!(position.x.abs() <= 5.0);
            assert!(position.z.abs() <= 5.0);
        }
    }
}

//! Determinism verification tests
//!
//! The same seed must reproduce the same run: identical event sequences
//! and identical final pawn positions.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use world_events::EventKind;

use world_core::behavior::{execute_pawn_behaviors, integrate_velocities, IssueLog};
use world_core::components::{NationRegistry, Pawn, Position};
use world_core::config::SimConfig;
use world_core::environment::{build_environment_index, sweep_marked_entities, Environment};
use world_core::events::EventLog;
use world_core::setup;
use world_core::{SimRng, TickCounter};

/// Seed-insensitive description of one event.
fn fingerprint(kind: &EventKind) -> String {
    match kind {
        EventKind::ChunkGenerate { chunk_x, chunk_z } => {
            format!("chunk_generate {chunk_x} {chunk_z}")
        }
        EventKind::PlayerFallingIntoVoid { .. } => "player_falling_into_void".to_string(),
        EventKind::NationCreation { name, .. } => format!("nation_creation {name}"),
        EventKind::NationJoin { .. } => "nation_join".to_string(),
        EventKind::NationLeave { .. } => "nation_leave".to_string(),
        EventKind::PawnSpawn { name, .. } => format!("pawn_spawn {name}"),
        EventKind::NationDisband { .. } => "nation_disband".to_string(),
        EventKind::PawnRelationshipIncrease { amount, .. } => {
            format!("pawn_relationship_increase {amount}")
        }
    }
}

/// Builds a world from the default config and runs it for `ticks`,
/// returning the event fingerprints and final pawn positions.
fn run_simulation(seed: u64, ticks: u64) -> (Vec<String>, Vec<(f32, f32, f32)>) {
    let config = SimConfig::default();

    let mut world = World::new();
    world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
    world.insert_resource(TickCounter::new());
    world.insert_resource(Environment::new());
    world.insert_resource(NationRegistry::new());
    world.insert_resource(EventLog::new());
    world.insert_resource(IssueLog::new());

    {
        let mut sim_rng = world.remove_resource::<SimRng>().unwrap();
        setup::generate_chunks(&mut world, &config.world, &mut sim_rng.0);
        setup::spawn_all_pawns(&mut world, &config.pawns, &mut sim_rng.0);
        world.insert_resource(sim_rng);
    }
    setup::spawn_player(&mut world, "Wanderer", world_events::Vec3::ZERO);

    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            build_environment_index,
            execute_pawn_behaviors,
            integrate_velocities,
            sweep_marked_entities,
        )
            .chain(),
    );

    for _ in 0..ticks {
        schedule.run(&mut world);
        world.resource_mut::<TickCounter>().advance();
    }

    let fingerprints = world
        .resource::<EventLog>()
        .events()
        .iter()
        .map(|event| format!("{} {}", event.tick, fingerprint(&event.kind)))
        .collect();

    let mut query = world.query_filtered::<&Position, With<Pawn>>();
    let positions = query
        .iter(&world)
        .map(|position| (position.0.x, position.0.y, position.0.z))
        .collect();

    (fingerprints, positions)
}

#[test]
fn rng_reproduces_with_same_seed() {
    let mut rng1 = SmallRng::seed_from_u64(42);
    let values1: Vec<f32> = (0..100).map(|_| rng1.gen()).collect();

    let mut rng2 = SmallRng::seed_from_u64(42);
    let values2: Vec<f32> = (0..100).map(|_| rng2.gen()).collect();

    assert_eq!(values1, values2);
}

#[test]
fn same_seed_reproduces_the_run() {
    let (events1, positions1) = run_simulation(1234, 60);
    let (events2, positions2) = run_simulation(1234, 60);

    assert_eq!(events1, events2, "event sequences diverged");
    assert_eq!(positions1, positions2, "pawn positions diverged");
}

#[test]
fn different_seeds_diverge() {
    let (_, positions1) = run_simulation(1, 60);
    let (_, positions2) = run_simulation(2, 60);

    assert_ne!(positions1, positions2);
}

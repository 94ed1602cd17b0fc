//! Pawn World Simulation
//!
//! Spawns a small open world of pawns, trees, and rocks, then runs the
//! per-tick behavior loop: gather, sell, buy food, wander.

use bevy_ecs::prelude::*;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use world_core::behavior::{execute_pawn_behaviors, integrate_velocities, BehaviorType, IssueLog};
use world_core::components::{ActiveBehavior, Inventory, ItemType, NationRegistry, Pawn, PawnState};
use world_core::config::SimConfig;
use world_core::environment::{
    build_environment_index, recover_void_falls, sweep_marked_entities, Environment,
};
use world_core::events::{EventJournal, EventLog};
use world_core::setup;
use world_core::{SimRng, TickCounter};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "pawn_sim")]
#[command(about = "An open-world pawn behavior simulation")]
struct Args {
    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate (overrides the config file)
    #[arg(long)]
    ticks: Option<u64>,

    /// Path to the tuning config file
    #[arg(long, default_value = "world.toml")]
    config: String,

    /// Write the event journal to this JSONL file
    #[arg(long)]
    events_out: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let config = if std::path::Path::new(&args.config).exists() {
        match SimConfig::load(&args.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Could not load {}: {}. Using defaults.", args.config, e);
                SimConfig::default()
            }
        }
    } else {
        SimConfig::default()
    };

    let seed = args.seed.unwrap_or(config.simulation.default_seed);
    let ticks = args.ticks.unwrap_or(config.simulation.default_ticks);

    println!("Pawn World Simulation");
    println!("=====================");
    println!("Seed: {}", seed);
    println!("Ticks: {}", ticks);
    println!();

    let mut world = World::new();
    world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
    world.insert_resource(TickCounter::new());
    world.insert_resource(Environment::new());
    world.insert_resource(NationRegistry::new());
    world.insert_resource(EventLog::new());
    world.insert_resource(IssueLog::new());

    let journal = match &args.events_out {
        Some(path) => match EventJournal::new(path) {
            Ok(journal) => journal,
            Err(e) => {
                eprintln!("Warning: Could not open {}: {}. Events discarded.", path.display(), e);
                EventJournal::null()
            }
        },
        None => EventJournal::null(),
    };
    world.insert_resource(journal);

    println!("Generating terrain...");
    {
        let mut sim_rng = match world.remove_resource::<SimRng>() {
            Some(rng) => rng,
            None => return,
        };
        setup::generate_chunks(&mut world, &config.world, &mut sim_rng.0);
        println!("Spawning pawns...");
        setup::spawn_all_pawns(&mut world, &config.pawns, &mut sim_rng.0);
        world.insert_resource(sim_rng);
    }
    setup::spawn_player(&mut world, "Wanderer", world_events::Vec3::ZERO);

    let mut pawn_query = world.query_filtered::<(), With<Pawn>>();
    let pawn_count = pawn_query.iter(&world).count();
    println!("  Spawned {} pawns and 1 player", pawn_count);
    flush_events(&mut world);

    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            build_environment_index,
            plan_behaviors,
            execute_pawn_behaviors,
            integrate_velocities,
            recover_void_falls,
            sweep_marked_entities,
        )
            .chain(),
    );

    println!();
    println!("Starting simulation...");
    println!();

    for tick in 0..ticks {
        schedule.run(&mut world);

        let produced = flush_events(&mut world);
        let at_interval = world
            .resource::<TickCounter>()
            .every(config.simulation.progress_interval);
        if tick > 0 && at_interval {
            let issues = world.resource::<IssueLog>().len();
            println!(
                "[Tick {:>4}] {} events this interval, {} issues total",
                tick, produced, issues
            );
        }

        world.resource_mut::<TickCounter>().advance();
    }

    if let Err(e) = world.resource_mut::<EventJournal>().flush() {
        eprintln!("Warning: Could not flush event journal: {}", e);
    }

    println!();
    println!(
        "Simulation complete. Ran {} ticks, journaled {} events, {} issues.",
        ticks,
        world.resource::<EventJournal>().event_count(),
        world.resource::<IssueLog>().len()
    );
}

/// Moves this tick's events from the in-memory log to the journal.
fn flush_events(world: &mut World) -> usize {
    let events = world.resource_mut::<EventLog>().drain();
    let count = events.len();
    if let Err(e) = world.resource_mut::<EventJournal>().log_batch(&events) {
        eprintln!("Warning: Could not journal events: {}", e);
    }
    count
}

/// Picks each pawn's behavior for the tick from its current needs:
/// hungry pawns with gold buy food, loaded pawns sell, broke pawns
/// gather, and everyone else mostly wanders.
fn plan_behaviors(world: &mut World) {
    let mut pawn_query = world.query_filtered::<Entity, With<Pawn>>();
    let pawns: Vec<Entity> = pawn_query.iter(world).collect();

    for pawn in pawns {
        let Some(inventory) = world.get::<Inventory>(pawn) else {
            continue;
        };
        let apples = inventory.count(ItemType::Apple);
        let gold = inventory.count(ItemType::GoldCoin);
        let haul = inventory.count(ItemType::Wood) + inventory.count(ItemType::Stone);
        let has_nation = world
            .get::<PawnState>(pawn)
            .map(|state| state.nation.is_some())
            .unwrap_or(false);

        let behavior = if apples == 0 && gold >= 5 && has_nation {
            BehaviorType::PurchaseFood
        } else if haul >= 5 && has_nation {
            BehaviorType::SellResources
        } else if gold < 5 || haul < 5 {
            BehaviorType::GatherResources
        } else {
            BehaviorType::Wander
        };

        // a dash of idle wandering keeps the crowd from lockstep
        let behavior = if behavior == BehaviorType::GatherResources
            && world.resource_mut::<SimRng>().0.gen_range(0..10) == 0
        {
            BehaviorType::Wander
        } else {
            behavior
        };

        if let Some(mut active) = world.get_mut::<ActiveBehavior>(pawn) {
            active.0 = behavior;
        }
    }
}

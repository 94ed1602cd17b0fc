//! Pawn world simulation core.
//!
//! Autonomous pawns execute per-tick behaviors (gathering, trading,
//! wandering) against a shared world of entities, nations, and
//! inventories, emitting immutable domain events as they go.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod behavior;
pub mod components;
pub mod config;
pub mod environment;
pub mod events;
pub mod nations;
pub mod setup;

pub use components::*;

/// Seeded random number generator resource.
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Resource tracking the current simulation tick, advanced once per
/// iteration of the host update loop.
#[derive(Resource, Debug, Default)]
pub struct TickCounter {
    tick: u64,
}

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// True on every `interval`-th tick. Zero intervals never fire.
    pub fn every(&self, interval: u64) -> bool {
        interval != 0 && self.tick % interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_counter_advances() {
        let mut counter = TickCounter::new();
        assert_eq!(counter.tick(), 0);
        counter.advance();
        counter.advance();
        assert_eq!(counter.tick(), 2);
    }

    #[test]
    fn every_matches_interval() {
        let mut counter = TickCounter::new();
        for _ in 0..10 {
            counter.advance();
        }
        assert!(counter.every(5));
        assert!(!counter.every(3));
        assert!(!counter.every(0));
    }
}

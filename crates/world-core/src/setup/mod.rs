//! World Setup
//!
//! Initial world population: terrain chunk generation and pawn/player
//! spawning. All randomness flows through the caller's generator so
//! seeded runs reproduce the same world.

pub mod pawns;
pub mod terrain;

pub use pawns::{spawn_all_pawns, spawn_pawn, spawn_player};
pub use terrain::generate_chunks;

//! Shared event types and position math for the pawn world simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod position;

pub use event::{Event, EventId, EventKind};
pub use position::Vec3;

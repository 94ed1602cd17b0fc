//! World model components: entities, inventories, pawns, players, nations.

pub mod entity;
pub mod inventory;
pub mod nation;
pub mod pawn;
pub mod player;

pub use entity::{EntityId, EntityKind, EntityName, MarkedForDeletion, Position, Velocity};
pub use inventory::{Inventory, InventoryError, ItemType};
pub use nation::{Nation, NationId, NationRegistry};
pub use pawn::{ActiveBehavior, Pawn, PawnState, Relationships};
pub use player::{Player, PlayerStatus};

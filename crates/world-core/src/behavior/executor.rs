//! Behavior Executor
//!
//! Runs one step of a pawn's active behavior. Behaviors mutate pawn and
//! target state in place, emit events through the `EventLog`, and record
//! recoverable problems in the `IssueLog`. Execution is synchronous and
//! single-threaded: one pawn runs to completion before the next starts.

use bevy_ecs::prelude::*;
use rand::Rng;
use world_events::Vec3;

use crate::components::{
    ActiveBehavior, EntityId, EntityKind, EntityName, Inventory, ItemType, MarkedForDeletion, Pawn,
    PawnState, PlayerStatus, Position, Relationships, Velocity,
};
use crate::environment::{EnvEntry, Environment};
use crate::events::EventLog;
use crate::{NationRegistry, SimRng, TickCounter};

use super::issues::{BehaviorIssue, IssueLog};
use super::BehaviorType;

/// Distance at which a pawn counts as having reached its target.
pub const INTERACTION_RANGE: f32 = 2.0;

const APPLE_PRICE: u32 = 5;

/// Exclusive system running every live pawn's active behavior once.
pub fn execute_pawn_behaviors(world: &mut World) {
    let pawns: Vec<(Entity, BehaviorType)> = world
        .query_filtered::<(Entity, &ActiveBehavior, &MarkedForDeletion), With<Pawn>>()
        .iter(world)
        .filter(|(_, _, marked)| !marked.is_marked())
        .map(|(entity, behavior, _)| (entity, behavior.0))
        .collect();

    for (entity, behavior) in pawns {
        execute_behavior(world, entity, behavior);
    }
}

/// Runs one step of `behavior` for a single pawn.
pub fn execute_behavior(world: &mut World, pawn: Entity, behavior: BehaviorType) {
    match behavior {
        BehaviorType::GatherResources => execute_gather_resources(world, pawn),
        BehaviorType::SellResources => execute_sell_resources(world, pawn),
        BehaviorType::Wander => execute_wander(world, pawn),
        BehaviorType::PurchaseFood => execute_purchase_food(world, pawn),
        BehaviorType::Idle => {}
    }
}

/// System integrating velocity commands into positions, once per tick.
pub fn integrate_velocities(mut query: Query<(&mut Position, &Velocity)>) {
    for (mut position, velocity) in query.iter_mut() {
        position.0 = position.0 + velocity.0;
    }
}

struct PawnSnapshot {
    id: EntityId,
    position: Vec3,
}

fn pawn_snapshot(world: &World, pawn: Entity) -> Option<PawnSnapshot> {
    let id = *world.get::<EntityId>(pawn)?;
    let position = world.get::<Position>(pawn)?.0;
    Some(PawnSnapshot { id, position })
}

fn current_target(world: &World, pawn: Entity) -> Option<EntityId> {
    world.get::<PawnState>(pawn).and_then(|state| state.target)
}

fn set_target(world: &mut World, pawn: Entity, target: Option<EntityId>) {
    if let Some(mut state) = world.get_mut::<PawnState>(pawn) {
        state.target = target;
    }
}

fn record_issue(world: &mut World, issue: BehaviorIssue) {
    world.resource_mut::<IssueLog>().record(issue);
}

fn at_target(position: Vec3, target: Vec3) -> bool {
    position.distance(target) <= INTERACTION_RANGE
}

/// Points the pawn's velocity at `destination`, scaled by its speed.
fn move_towards(world: &mut World, pawn: Entity, destination: Vec3) {
    let Some(position) = world.get::<Position>(pawn).map(|p| p.0) else {
        return;
    };
    let Some(speed) = world.get::<PawnState>(pawn).map(|s| s.speed) else {
        return;
    };
    let direction = (destination - position).normalized_or_zero();
    if let Some(mut velocity) = world.get_mut::<Velocity>(pawn) {
        velocity.0 = direction * speed;
    }
}

fn halt(world: &mut World, pawn: Entity) {
    if let Some(mut velocity) = world.get_mut::<Velocity>(pawn) {
        velocity.0 = Vec3::ZERO;
    }
}

fn execute_gather_resources(world: &mut World, pawn: Entity) {
    let Some(snapshot) = pawn_snapshot(world, pawn) else {
        return;
    };

    let target_is_gatherable = current_target(world, pawn)
        .and_then(|id| world.resource::<Environment>().lookup(id))
        .map(|entry| entry.kind.is_gatherable())
        .unwrap_or(false);

    if !target_is_gatherable {
        let choice = {
            let env = world.resource::<Environment>();
            let tree = env.nearest_tree(snapshot.position).map(|e| (e.id, e.position));
            let rock = env.nearest_rock(snapshot.position).map(|e| (e.id, e.position));
            match (tree, rock) {
                (Some((tree_id, tree_pos)), Some((rock_id, rock_pos))) => {
                    // strict comparison: an equidistant pair resolves to the rock
                    if tree_pos.distance(snapshot.position) < rock_pos.distance(snapshot.position)
                    {
                        Some(tree_id)
                    } else {
                        Some(rock_id)
                    }
                }
                (Some((tree_id, _)), None) => Some(tree_id),
                (None, Some((rock_id, _))) => Some(rock_id),
                (None, None) => None,
            }
        };
        set_target(world, pawn, choice);
    }

    let Some(target_id) = current_target(world, pawn) else {
        record_issue(world, BehaviorIssue::NoGatherTarget { pawn: snapshot.id });
        return;
    };
    let Some(target) = world.resource::<Environment>().lookup(target_id).copied() else {
        record_issue(world, BehaviorIssue::NoGatherTarget { pawn: snapshot.id });
        return;
    };

    if !at_target(snapshot.position, target.position) {
        move_towards(world, pawn, target.position);
        return;
    }

    if target.kind.is_gatherable() {
        halt(world, pawn);
        if let Ok([mut pawn_ref, mut target_ref]) =
            world.get_many_entities_mut([pawn, target.entity])
        {
            if let (Some(mut pawn_inv), Some(mut target_inv)) =
                (pawn_ref.get_mut::<Inventory>(), target_ref.get_mut::<Inventory>())
            {
                pawn_inv.transfer_contents_of(&mut target_inv);
            }
        }
        if let Some(mut marked) = world.get_mut::<MarkedForDeletion>(target.entity) {
            marked.mark();
        }
        // evicted immediately so no pawn re-acquires it before the sweep
        world.resource_mut::<Environment>().remove(target.id);
        set_target(world, pawn, None);
    } else {
        record_issue(
            world,
            BehaviorIssue::WrongTargetKind {
                pawn: snapshot.id,
                kind: target.kind,
            },
        );
        set_target(world, pawn, None);
    }
}

fn execute_sell_resources(world: &mut World, pawn: Entity) {
    let Some(snapshot) = pawn_snapshot(world, pawn) else {
        return;
    };

    let Some(target_id) = current_target(world, pawn) else {
        // acquiring the leader as target consumes the tick
        let leader = leader_target(world, pawn, snapshot.id);
        set_target(world, pawn, leader);
        return;
    };

    let Some(target) = world.resource::<Environment>().lookup(target_id).copied() else {
        record_issue(
            world,
            BehaviorIssue::TargetVanished {
                pawn: snapshot.id,
                target: target_id,
            },
        );
        set_target(world, pawn, None);
        return;
    };

    if !at_target(snapshot.position, target.position) {
        move_towards(world, pawn, target.position);
        return;
    }

    if !target.kind.can_trade() {
        record_issue(
            world,
            BehaviorIssue::WrongTargetKind {
                pawn: snapshot.id,
                kind: target.kind,
            },
        );
        set_target(world, pawn, None);
        return;
    }

    halt(world, pawn);
    // each sale stands alone; one failing never aborts the others
    sell_item(world, pawn, snapshot.id, &target, ItemType::Wood, 1);
    sell_item(world, pawn, snapshot.id, &target, ItemType::Stone, 1);
    sell_item(world, pawn, snapshot.id, &target, ItemType::Apple, 1);
}

fn execute_wander(world: &mut World, pawn: Entity) {
    world.resource_scope(|world, mut rng: Mut<SimRng>| {
        // 95% of invocations do nothing
        if rng.0.gen_range(0..100) < 95 {
            return;
        }
        let offset = Vec3::new(rng.0.gen_range(-1.0..1.0), 0.0, rng.0.gen_range(-1.0..1.0));
        let Some(speed) = world.get::<PawnState>(pawn).map(|s| s.speed) else {
            return;
        };
        if let Some(mut velocity) = world.get_mut::<Velocity>(pawn) {
            velocity.0 = offset.normalized_or_zero() * speed;
        }
    });
}

fn execute_purchase_food(world: &mut World, pawn: Entity) {
    let Some(snapshot) = pawn_snapshot(world, pawn) else {
        return;
    };

    let Some(target_id) = current_target(world, pawn) else {
        let leader = leader_target(world, pawn, snapshot.id);
        set_target(world, pawn, leader);
        return;
    };

    let Some(target) = world.resource::<Environment>().lookup(target_id).copied() else {
        record_issue(
            world,
            BehaviorIssue::TargetVanished {
                pawn: snapshot.id,
                target: target_id,
            },
        );
        set_target(world, pawn, None);
        return;
    };

    if !at_target(snapshot.position, target.position) {
        move_towards(world, pawn, target.position);
        return;
    }

    if !target.kind.can_trade() {
        record_issue(
            world,
            BehaviorIssue::WrongTargetKind {
                pawn: snapshot.id,
                kind: target.kind,
            },
        );
        set_target(world, pawn, None);
        return;
    }

    halt(world, pawn);

    // both sides checked before anything mutates
    let gold = world
        .get::<Inventory>(pawn)
        .map(|inv| inv.count(ItemType::GoldCoin))
        .unwrap_or(0);
    if gold < APPLE_PRICE {
        record_issue(
            world,
            BehaviorIssue::InsufficientGold {
                buyer: snapshot.id,
                item: ItemType::Apple,
                price: APPLE_PRICE,
            },
        );
        set_target(world, pawn, None);
        return;
    }

    let target_apples = world
        .get::<Inventory>(target.entity)
        .map(|inv| inv.count(ItemType::Apple))
        .unwrap_or(0);
    if target_apples < 1 {
        record_issue(
            world,
            BehaviorIssue::InsufficientStock {
                seller: target.id,
                item: ItemType::Apple,
            },
        );
        set_target(world, pawn, None);
        return;
    }

    {
        let Ok([mut pawn_ref, mut target_ref]) =
            world.get_many_entities_mut([pawn, target.entity])
        else {
            return;
        };
        let (Some(mut pawn_inv), Some(mut target_inv)) =
            (pawn_ref.get_mut::<Inventory>(), target_ref.get_mut::<Inventory>())
        else {
            return;
        };
        if pawn_inv.remove_item(ItemType::GoldCoin, APPLE_PRICE).is_err() {
            return;
        }
        if target_inv.remove_item(ItemType::Apple, 1).is_err() {
            pawn_inv.add_item(ItemType::GoldCoin, APPLE_PRICE);
            return;
        }
        target_inv.add_item(ItemType::GoldCoin, APPLE_PRICE);
        pawn_inv.add_item(ItemType::Apple, 1);
    }

    let amount = world.resource_mut::<SimRng>().0.gen_range(1..5);
    let new_score = match world.get_mut::<Relationships>(pawn) {
        Some(mut relationships) => relationships.increase(target.id, amount),
        None => amount,
    };

    let tick = world.resource::<TickCounter>().tick();
    world
        .resource_mut::<EventLog>()
        .produce_pawn_relationship_increase(tick, snapshot.id.0, target.id.0, amount);

    if target.kind == EntityKind::Player {
        let name = world
            .get::<EntityName>(pawn)
            .map(|n| n.0.clone())
            .unwrap_or_default();
        if let Some(mut status) = world.get_mut::<PlayerStatus>(target.entity) {
            status.update(format!(
                "{name} bought an apple from you. Relationship: {new_score}"
            ));
        }
    }
}

/// Resolves the pawn's nation leader as a trade target. `None` when the
/// pawn has no nation, the nation has no resolvable leader, or the pawn
/// is the leader itself.
fn leader_target(world: &World, pawn: Entity, pawn_id: EntityId) -> Option<EntityId> {
    let nation = world.get::<PawnState>(pawn)?.nation?;
    let leader = world.resource::<NationRegistry>().leader_of(nation)?;
    if leader == pawn_id {
        return None;
    }
    world
        .resource::<Environment>()
        .lookup(leader)
        .map(|entry| entry.id)
}

/// Sells `count` of `item` from `seller` to `buyer` at the fixed price
/// table. Zero side effects unless every precondition holds.
fn sell_item(
    world: &mut World,
    seller: Entity,
    seller_id: EntityId,
    buyer: &EnvEntry,
    item: ItemType,
    count: u32,
) {
    let stock = world
        .get::<Inventory>(seller)
        .map(|inv| inv.count(item))
        .unwrap_or(0);
    if stock < count {
        record_issue(
            world,
            BehaviorIssue::InsufficientStock {
                seller: seller_id,
                item,
            },
        );
        return;
    }

    let Some(price) = item.unit_price() else {
        record_issue(world, BehaviorIssue::UnpricedItem { item });
        return;
    };
    let total = price * count;

    let buyer_gold = world
        .get::<Inventory>(buyer.entity)
        .map(|inv| inv.count(ItemType::GoldCoin))
        .unwrap_or(0);
    if buyer_gold < total {
        record_issue(
            world,
            BehaviorIssue::InsufficientGold {
                buyer: buyer.id,
                item,
                price: total,
            },
        );
        return;
    }

    {
        let Ok([mut seller_ref, mut buyer_ref]) =
            world.get_many_entities_mut([seller, buyer.entity])
        else {
            return;
        };
        let (Some(mut seller_inv), Some(mut buyer_inv)) =
            (seller_ref.get_mut::<Inventory>(), buyer_ref.get_mut::<Inventory>())
        else {
            return;
        };
        if seller_inv.remove_item(item, count).is_err() {
            return;
        }
        if buyer_inv.remove_item(ItemType::GoldCoin, total).is_err() {
            seller_inv.add_item(item, count);
            return;
        }
        buyer_inv.add_item(item, count);
        seller_inv.add_item(ItemType::GoldCoin, total);
    }

    let amount = world.resource_mut::<SimRng>().0.gen_range(1..5);
    let new_score = match world.get_mut::<Relationships>(seller) {
        Some(mut relationships) => relationships.increase(buyer.id, amount),
        None => amount,
    };

    let tick = world.resource::<TickCounter>().tick();
    world
        .resource_mut::<EventLog>()
        .produce_pawn_relationship_increase(tick, seller_id.0, buyer.id.0, amount);

    if buyer.kind == EntityKind::Player {
        let name = world
            .get::<EntityName>(seller)
            .map(|n| n.0.clone())
            .unwrap_or_default();
        if let Some(mut status) = world.get_mut::<PlayerStatus>(buyer.entity) {
            status.update(format!(
                "{name} sold {count} {item} to you. Relationship: {new_score}"
            ));
        }
    }
}

//! Nation Lifecycle
//!
//! World-level operations for founding, joining, leaving, and
//! disbanding nations. Each operation keeps the registry consistent and
//! produces the matching event.

use bevy_ecs::prelude::*;

use crate::components::{EntityId, Nation, NationId, NationRegistry, PawnState};
use crate::events::EventLog;
use crate::TickCounter;

fn current_tick(world: &World) -> u64 {
    world
        .get_resource::<TickCounter>()
        .map(|counter| counter.tick())
        .unwrap_or(0)
}

/// Founds a nation with the given leader and initial members, producing
/// a creation event plus one join event per member.
pub fn found_nation(
    world: &mut World,
    name: &str,
    leader: EntityId,
    members: &[EntityId],
) -> NationId {
    let tick = current_tick(world);

    let mut nation = Nation::new(name);
    nation.leader = Some(leader);
    nation.add_member(leader);
    for &member in members {
        nation.add_member(member);
    }
    let member_ids: Vec<EntityId> = nation.members.clone();
    let nation_id = world.resource_mut::<NationRegistry>().register(nation);

    let mut events = world.resource_mut::<EventLog>();
    events.produce_nation_creation(tick, nation_id.0, name);
    for member in member_ids {
        events.produce_nation_join(tick, nation_id.0, member.0);
    }

    nation_id
}

/// Adds a member to an existing nation. No-op when the nation is gone.
pub fn join_nation(world: &mut World, nation_id: NationId, member: EntityId) -> bool {
    let tick = current_tick(world);
    let joined = match world.resource_mut::<NationRegistry>().get_mut(nation_id) {
        Some(nation) => {
            nation.add_member(member);
            true
        }
        None => false,
    };
    if joined {
        world
            .resource_mut::<EventLog>()
            .produce_nation_join(tick, nation_id.0, member.0);
    }
    joined
}

/// Removes a member from a nation, producing a leave event. When the
/// last member leaves, the nation disbands.
pub fn leave_nation(world: &mut World, nation_id: NationId, member: EntityId) -> bool {
    let tick = current_tick(world);
    let (left, now_empty) = match world.resource_mut::<NationRegistry>().get_mut(nation_id) {
        Some(nation) => {
            let was_member = nation.members.contains(&member);
            if was_member {
                nation.remove_member(member);
            }
            (was_member, nation.members.is_empty())
        }
        None => (false, false),
    };

    if left {
        world
            .resource_mut::<EventLog>()
            .produce_nation_leave(tick, nation_id.0, member.0);
    }
    if now_empty {
        disband_nation(world, nation_id);
    }
    left
}

/// Removes a nation entirely, clearing every member pawn's affiliation
/// and producing a disband event.
pub fn disband_nation(world: &mut World, nation_id: NationId) -> bool {
    let tick = current_tick(world);
    if world
        .resource_mut::<NationRegistry>()
        .remove(nation_id)
        .is_none()
    {
        return false;
    }

    let mut members = world.query::<&mut PawnState>();
    for mut state in members.iter_mut(world) {
        if state.nation == Some(nation_id) {
            state.nation = None;
        }
    }

    world
        .resource_mut::<EventLog>()
        .produce_nation_disband(tick, nation_id.0);
    true
}

//! Nations and the registry that owns them.
//!
//! Nations are plain records held in a single `NationRegistry` resource
//! rather than ECS entities; pawns reference them by `NationId` and the
//! registry tolerates lookups for nations that have been disbanded.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use super::entity::EntityId;

/// Stable identifier for a nation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationId(pub Uuid);

impl NationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named grouping of pawns under an optional leader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nation {
    pub id: NationId,
    pub name: String,
    /// Current leader, if one has been appointed. Weak reference: the
    /// entity behind it may have despawned.
    pub leader: Option<EntityId>,
    pub members: Vec<EntityId>,
}

impl Nation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NationId::new(),
            name: name.into(),
            leader: None,
            members: Vec::new(),
        }
    }

    pub fn add_member(&mut self, member: EntityId) {
        if !self.members.contains(&member) {
            self.members.push(member);
        }
    }

    pub fn remove_member(&mut self, member: EntityId) {
        self.members.retain(|m| *m != member);
        if self.leader == Some(member) {
            self.leader = None;
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Resource mapping nation ids to nation records.
#[derive(Resource, Debug, Default)]
pub struct NationRegistry {
    nations: HashMap<NationId, Nation>,
}

impl NationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a nation and returns its id.
    pub fn register(&mut self, nation: Nation) -> NationId {
        let id = nation.id;
        self.nations.insert(id, nation);
        id
    }

    pub fn get(&self, id: NationId) -> Option<&Nation> {
        self.nations.get(&id)
    }

    pub fn get_mut(&mut self, id: NationId) -> Option<&mut Nation> {
        self.nations.get_mut(&id)
    }

    /// Removes a nation record, returning it when present.
    pub fn remove(&mut self, id: NationId) -> Option<Nation> {
        self.nations.remove(&id)
    }

    /// Leader of the given nation, when both the nation and an
    /// appointed leader exist.
    pub fn leader_of(&self, id: NationId) -> Option<EntityId> {
        self.get(id).and_then(|nation| nation.leader)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nation> {
        self.nations.values()
    }

    pub fn len(&self) -> usize {
        self.nations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = NationRegistry::new();
        let id = registry.register(Nation::new("Meridia"));
        assert_eq!(registry.get(id).map(|n| n.name.as_str()), Some("Meridia"));
        assert!(registry.get(NationId::new()).is_none());
    }

    #[test]
    fn leader_resolution() {
        let mut registry = NationRegistry::new();
        let leader = EntityId::new();
        let mut nation = Nation::new("Tessive");
        nation.add_member(leader);
        nation.leader = Some(leader);
        let id = registry.register(nation);

        assert_eq!(registry.leader_of(id), Some(leader));
        assert_eq!(registry.leader_of(NationId::new()), None);
    }

    #[test]
    fn removing_leader_member_clears_leadership() {
        let leader = EntityId::new();
        let other = EntityId::new();
        let mut nation = Nation::new("Corvane");
        nation.add_member(leader);
        nation.add_member(other);
        nation.leader = Some(leader);

        nation.remove_member(leader);

        assert_eq!(nation.leader, None);
        assert_eq!(nation.member_count(), 1);
    }

    #[test]
    fn duplicate_members_ignored() {
        let member = EntityId::new();
        let mut nation = Nation::new("Velmor");
        nation.add_member(member);
        nation.add_member(member);
        assert_eq!(nation.member_count(), 1);
    }
}

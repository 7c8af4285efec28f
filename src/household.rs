// 🏠 Household Store - ordered list of members for the current session
//
// "Member values never change; a member is either in the list or gone."
//
// - Insertion order is display order
// - Every record gets an id the store has never handed out before
// - Removing an unknown id is a no-op, not an error

use crate::member::{MemberId, MemberRecord, NewMember};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ID GENERATION
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Monotonic counter: 1, 2, 3, ...
    #[default]
    Sequential,
    /// Random v4 UUIDs
    Uuid,
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Sequential => f.write_str("sequential"),
            IdStrategy::Uuid => f.write_str("uuid"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        IdGenerator { strategy, next: 1 }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub fn next_id(&mut self) -> MemberId {
        match self.strategy {
            IdStrategy::Sequential => {
                let id = self.next;
                self.next += 1;
                MemberId::new(id.to_string())
            }
            IdStrategy::Uuid => MemberId::new(uuid::Uuid::new_v4().to_string()),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

// ============================================================================
// HOUSEHOLD STORE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct HouseholdStore {
    members: Vec<MemberRecord>,
    ids: IdGenerator,
}

impl HouseholdStore {
    /// Empty store with sequential ids
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: IdStrategy) -> Self {
        HouseholdStore {
            members: Vec::new(),
            ids: IdGenerator::new(strategy),
        }
    }

    /// Give the member a fresh id and add it to the end
    pub fn append(&mut self, member: NewMember) -> &MemberRecord {
        let mut id = self.ids.next_id();
        while self.contains(&id) {
            id = self.ids.next_id();
        }

        self.members.push(MemberRecord::from_new(id, member));
        let index = self.members.len() - 1;
        &self.members[index]
    }

    /// Remove the member with this id. Unknown ids leave the store untouched.
    pub fn remove_by_id(&mut self, id: &MemberId) -> Option<MemberRecord> {
        let index = self.members.iter().position(|m| &m.id == id)?;
        Some(self.members.remove(index))
    }

    /// All members in insertion order
    pub fn all(&self) -> &[MemberRecord] {
        &self.members
    }

    pub fn get(&self, id: &MemberId) -> Option<&MemberRecord> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.ids.strategy()
    }
}

// ============================================================================
// TESTS
// ============================================================================

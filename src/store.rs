use std::collections::HashMap;

use crate::{
    error::{StoreError, StoreResult},
    member::{Member, MemberIndex},
};

/// Canonical, insertion-ordered collection of DAO members.
///
/// Insertion order is join order. Records are never mutated in place, a change
/// of weight or activity is applied by replacing the whole record.
#[derive(Debug, Default, Clone)]
pub struct MemberStore {
    members: Vec<Member>,
    positions: HashMap<MemberIndex, usize>,
    version: u64,
}

impl MemberStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_members(members: impl IntoIterator<Item = Member>) -> StoreResult<Self> {
        let mut store = Self::new();
        for member in members {
            store.insert(member)?;
        }

        Ok(store)
    }

    pub fn insert(&mut self, member: Member) -> StoreResult<()> {
        let index = member.index();
        if index == 0 {
            return Err(StoreError::ZeroIndex);
        }
        if self.positions.contains_key(&index) {
            return Err(StoreError::DuplicateIndex(index));
        }

        log::debug!(target: "registry", "member #{index} added");

        self.positions.insert(index, self.members.len());
        self.members.push(member);
        self.version += 1;

        Ok(())
    }

    /// Swap in a new record for an existing member, keeping its position.
    ///
    /// Returns the previous record.
    pub fn replace(&mut self, member: Member) -> StoreResult<Member> {
        let index = member.index();
        let position = *self
            .positions
            .get(&index)
            .ok_or(StoreError::UnknownIndex(index))?;

        let current = &mut self.members[position];
        if current.joined_block() != member.joined_block() {
            return Err(StoreError::JoinedBlockChanged {
                index,
                joined: current.joined_block(),
                claimed: member.joined_block(),
            });
        }

        let previous = std::mem::replace(current, member);
        self.version += 1;

        Ok(previous)
    }

    pub fn get(&self, index: MemberIndex) -> Option<&Member> {
        self.positions.get(&index).map(|&p| &self.members[p])
    }

    /// Snapshot of all members in join order.
    pub fn all(&self) -> &[Member] {
        &self.members
    }

    pub fn total_weight(&self) -> u128 {
        self.members
            .iter()
            .map(|m| m.governance_weight() as u128)
            .sum()
    }

    pub fn delegates(&self) -> Vec<&Member> {
        self.members.iter().filter(|m| m.is_delegate()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Bumped on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }
}

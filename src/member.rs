use serde::{Deserialize, Serialize};

/// Stable, positive identity of a member within a store.
pub type MemberIndex = u32;

/// Voting power attributed to a member.
pub type Weight = u64;

/// Block number marker.
pub type BlockNumber = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    index: MemberIndex,
    governance_weight: Weight,
    last_active_block: Option<BlockNumber>,
    is_delegate: bool,
    joined_block: BlockNumber,
}

impl Member {
    pub fn new(index: MemberIndex, governance_weight: Weight, joined_block: BlockNumber) -> Self {
        Self {
            index,
            governance_weight,
            last_active_block: None,
            is_delegate: false,
            joined_block,
        }
    }

    pub fn with_delegate(mut self, is_delegate: bool) -> Self {
        self.is_delegate = is_delegate;
        self
    }

    pub fn with_last_active(mut self, block: BlockNumber) -> Self {
        self.last_active_block = Some(block);
        self
    }

    /// Copy of this record carrying a new weight, for use with
    /// [`MemberStore::replace`](crate::MemberStore::replace).
    pub fn with_weight(mut self, governance_weight: Weight) -> Self {
        self.governance_weight = governance_weight;
        self
    }

    pub fn index(&self) -> MemberIndex {
        self.index
    }

    pub fn governance_weight(&self) -> Weight {
        self.governance_weight
    }

    pub fn last_active_block(&self) -> Option<BlockNumber> {
        self.last_active_block
    }

    /// Activity block used for ordering, absent activity counts as block 0.
    pub fn recency(&self) -> BlockNumber {
        self.last_active_block.unwrap_or(0)
    }

    pub fn is_delegate(&self) -> bool {
        self.is_delegate
    }

    pub fn joined_block(&self) -> BlockNumber {
        self.joined_block
    }
}

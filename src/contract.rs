use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ValidationError, ValidationResult},
    form::{ProposalType, Role},
};

pub type MemberId = u64;
pub type ProposalId = u64;
pub type VoteId = u64;
pub type TransactionId = u64;

/// `0x`-prefixed, 20 byte hex account or contract address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn parse(value: &str) -> ValidationResult<Self> {
        let valid = value
            .strip_prefix("0x")
            .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));

        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(ValidationError::InvalidAddress(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// State changing contract calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractCall {
    JoinDao {
        name: String,
        role: Role,
        reputation: u8,
    },
    CreateProposal {
        title: String,
        description: String,
        proposal_type: ProposalType,
        duration_seconds: u64,
        required_quorum_pct: u8,
    },
    CastVote {
        proposal_id: ProposalId,
        member_id: MemberId,
        is_for: bool,
    },
    ExecuteProposal {
        proposal_id: ProposalId,
    },
    CreateTreasuryTransaction {
        recipient: Address,
        amount: u64,
        description: String,
        transaction_type: u8,
    },
}

impl ContractCall {
    pub fn name(&self) -> &'static str {
        match self {
            ContractCall::JoinDao { .. } => "joinDAO",
            ContractCall::CreateProposal { .. } => "createProposal",
            ContractCall::CastVote { .. } => "castVote",
            ContractCall::ExecuteProposal { .. } => "executeProposal",
            ContractCall::CreateTreasuryTransaction { .. } => "createTreasuryTransaction",
        }
    }

    /// Whether the call hands back an id in its receipt.
    pub fn returns_id(&self) -> bool {
        !matches!(self, ContractCall::ExecuteProposal { .. })
    }

    /// Calldata for bindings that ship raw bytes.
    pub fn encode(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn decode(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Success,
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx: TxHash,
    pub block: u64,
    pub status: TxStatus,
    /// Id returned by the call, if it returns one.
    pub output: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    pub role: String,
    pub reputation: u8,
    pub voting_power: u8,
    pub contribution_score: u8,
    pub is_active: bool,
    pub is_verified: bool,
    pub member_address: Address,
    pub join_time: u64,
    pub last_activity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalInfo {
    pub title: String,
    pub description: String,
    pub proposal_type: String,
    pub votes_for: u8,
    pub votes_against: u8,
    pub total_votes: u8,
    pub required_quorum: u8,
    pub is_active: bool,
    pub is_executed: bool,
    pub proposer: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub execution_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryTransactionInfo {
    pub amount: u8,
    pub transaction_type: u8,
    pub is_approved: bool,
    pub description: String,
    pub recipient: Address,
    pub approver: Address,
    pub timestamp: u64,
}

/// Binding to the deployed DAO contract.
pub trait ContractClient: Sized {
    type Error: Display + Debug;

    fn connect(
        contract: Address,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> + Send;

    /// Submit a call, resolving once the transaction is accepted for inclusion.
    fn send(
        &self,
        call: &ContractCall,
    ) -> impl std::future::Future<Output = Result<TxHash, Self::Error>> + Send;

    /// Wait for the receipt of a submitted transaction.
    fn confirm(
        &self,
        tx: &TxHash,
    ) -> impl std::future::Future<Output = Result<Receipt, Self::Error>> + Send;

    fn member_info(
        &self,
        id: MemberId,
    ) -> impl std::future::Future<Output = Result<Option<MemberInfo>, Self::Error>> + Send;

    fn proposal_info(
        &self,
        id: ProposalId,
    ) -> impl std::future::Future<Output = Result<Option<ProposalInfo>, Self::Error>> + Send;

    fn treasury_transaction_info(
        &self,
        id: TransactionId,
    ) -> impl std::future::Future<Output = Result<Option<TreasuryTransactionInfo>, Self::Error>> + Send;

    fn contract(&self) -> Address;
}

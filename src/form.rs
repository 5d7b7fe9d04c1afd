//! Typed submission forms.
//!
//! Each form knows its fields and their constraints and turns into a
//! [`ContractCall`] only once every constraint holds.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    contract::{Address, ContractCall},
    error::{Field, ValidationError, ValidationResult},
};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Contributor,
    Developer,
    Designer,
    Marketer,
    Advisor,
    Investor,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Contributor,
        Role::Developer,
        Role::Designer,
        Role::Marketer,
        Role::Advisor,
        Role::Investor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Contributor => "contributor",
            Role::Developer => "developer",
            Role::Designer => "designer",
            Role::Marketer => "marketer",
            Role::Advisor => "advisor",
            Role::Investor => "investor",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalType {
    Governance,
    Treasury,
    Membership,
    Technical,
}

impl ProposalType {
    pub const ALL: [ProposalType; 4] = [
        ProposalType::Governance,
        ProposalType::Treasury,
        ProposalType::Membership,
        ProposalType::Technical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalType::Governance => "governance",
            ProposalType::Treasury => "treasury",
            ProposalType::Membership => "membership",
            ProposalType::Technical => "technical",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl Display for ProposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn required(field: Field, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn within(field: Field, value: u64, min: u64, max: u64) -> ValidationResult<()> {
    // must be min <= value <= max
    if !(min..=max).contains(&value) {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinForm {
    pub name: String,
    pub role: Option<Role>,
    pub initial_reputation: u8,
}

impl Default for JoinForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: None,
            initial_reputation: 50,
        }
    }
}

impl JoinForm {
    pub const MAX_REPUTATION: u8 = 100;

    pub fn into_call(self) -> ValidationResult<ContractCall> {
        required(Field::Name, &self.name)?;
        let role = self.role.ok_or(ValidationError::Required(Field::Role))?;
        within(
            Field::Reputation,
            self.initial_reputation.into(),
            0,
            Self::MAX_REPUTATION.into(),
        )?;

        Ok(ContractCall::JoinDao {
            name: self.name,
            role,
            reputation: self.initial_reputation,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalForm {
    pub title: String,
    pub description: String,
    pub proposal_type: Option<ProposalType>,
    pub duration_days: u32,
    pub required_quorum_pct: u8,
}

impl Default for ProposalForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            proposal_type: None,
            duration_days: 7,
            required_quorum_pct: 30,
        }
    }
}

impl ProposalForm {
    pub const DURATION_DAYS: (u32, u32) = (1, 30);
    pub const QUORUM_PCT: (u8, u8) = (1, 100);

    pub fn into_call(self) -> ValidationResult<ContractCall> {
        required(Field::Title, &self.title)?;
        required(Field::Description, &self.description)?;
        let proposal_type = self
            .proposal_type
            .ok_or(ValidationError::Required(Field::ProposalType))?;

        let (min_days, max_days) = Self::DURATION_DAYS;
        within(
            Field::Duration,
            self.duration_days.into(),
            min_days.into(),
            max_days.into(),
        )?;

        let (min_quorum, max_quorum) = Self::QUORUM_PCT;
        within(
            Field::Quorum,
            self.required_quorum_pct.into(),
            min_quorum.into(),
            max_quorum.into(),
        )?;

        Ok(ContractCall::CreateProposal {
            title: self.title,
            description: self.description,
            proposal_type,
            duration_seconds: u64::from(self.duration_days) * SECONDS_PER_DAY,
            required_quorum_pct: self.required_quorum_pct,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryForm {
    pub recipient: String,
    pub amount: u64,
    pub description: String,
    pub transaction_type: u8,
}

impl TreasuryForm {
    pub fn into_call(self) -> ValidationResult<ContractCall> {
        required(Field::Recipient, &self.recipient)?;
        let recipient = Address::parse(&self.recipient)?;
        within(Field::Amount, self.amount, 1, u64::MAX)?;
        required(Field::Description, &self.description)?;

        Ok(ContractCall::CreateTreasuryTransaction {
            recipient,
            amount: self.amount,
            description: self.description,
            transaction_type: self.transaction_type,
        })
    }
}

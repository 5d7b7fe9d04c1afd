use std::fmt::Display;

use thiserror::Error;

use crate::member::{BlockNumber, MemberIndex};

pub type StoreResult<T> = Result<T, StoreError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type DaoResult<T> = Result<T, DaoError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Member index must be positive")]
    ZeroIndex,

    #[error("Member #{0} already exists")]
    DuplicateIndex(MemberIndex),

    #[error("Member #{0} not found")]
    UnknownIndex(MemberIndex),

    #[error("Member #{index} joined at block {joined}, replacement claims {claimed}")]
    JoinedBlockChanged {
        index: MemberIndex,
        joined: BlockNumber,
        claimed: BlockNumber,
    },
}

/// Form field names reported by [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Role,
    Reputation,
    Title,
    Description,
    ProposalType,
    Duration,
    Quorum,
    Recipient,
    Amount,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Role => "role",
            Field::Reputation => "initial reputation",
            Field::Title => "title",
            Field::Description => "description",
            Field::ProposalType => "proposal type",
            Field::Duration => "duration",
            Field::Quorum => "required quorum",
            Field::Recipient => "recipient",
            Field::Amount => "amount",
        };

        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Required(Field),

    #[error("Invalid {field} {value}, must be {min} <= {field} <= {max}")]
    OutOfRange {
        field: Field,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("Invalid address {0:?}, expected 0x followed by 40 hex digits")]
    InvalidAddress(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DaoError {
    #[error("Wallet is not connected")]
    Rejected,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Contract client error: {0}")]
    Client(String),

    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Transaction {0} not confirmed in time")]
    ConfirmationTimeout(String),
}

impl DaoError {
    pub(crate) fn client(e: impl Display) -> Self {
        DaoError::Client(e.to_string())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {msg}")]
    Invalid { var: &'static str, msg: String },
}

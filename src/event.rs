use crate::contract::{Receipt, TxHash};

/// Phase of a contract write, broadcast to session subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submitted {
        call: &'static str,
        tx: TxHash,
    },
    Confirmed {
        call: &'static str,
        receipt: Receipt,
    },
    Failed {
        call: &'static str,
        tx: Option<TxHash>,
        reason: String,
    },
}

impl Event {
    pub fn call(&self) -> &'static str {
        match self {
            Event::Submitted { call, .. }
            | Event::Confirmed { call, .. }
            | Event::Failed { call, .. } => *call,
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, Event::Submitted { .. })
    }
}

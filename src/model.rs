//! Core domain types for the ledger.

use chrono::{DateTime, Utc};

use crate::Amount;

/// Client identifier, as it appears in `/clientes/{id}/...`.
pub type ClientId = u32;

/// Direction of a transaction. The amount itself is always a positive magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Adds to the balance.
    Credit,
    /// Subtracts from the balance.
    Debit,
}

impl TransactionKind {
    /// Single-character wire code.
    pub fn code(self) -> &'static str {
        match self {
            TransactionKind::Credit => "c",
            TransactionKind::Debit => "d",
        }
    }

    /// Parse a wire code; only an exact `"c"` or `"d"` is recognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "c" => Some(TransactionKind::Credit),
            "d" => Some(TransactionKind::Debit),
            _ => None,
        }
    }
}

/// A committed transaction. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub amount: Amount,
    pub kind: TransactionKind,
    pub description: String,
    /// Set by the ledger at commit time.
    pub recorded_at: DateTime<Utc>,
}

/// Outcome of an accepted credit or debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub limit: Amount,
    pub balance: Amount,
}

/// Read-only snapshot of one client.
#[derive(Debug, Clone)]
pub struct Statement {
    pub balance: Amount,
    pub limit: Amount,
    pub as_of: DateTime<Utc>,
    /// Full history, oldest first.
    pub transactions: Vec<Transaction>,
}

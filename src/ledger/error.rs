//! Error types for ledger operations.

use thiserror::Error;

use crate::Amount;
use crate::model::{ClientId, TransactionKind};

/// Reasons the ledger refuses an operation. No client state changes when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("client {0} not found")]
    UnknownClient(ClientId),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Amount),

    #[error(
        "{kind:?} of {amount} for client {client} would breach limit {limit} (balance {balance})"
    )]
    LimitExceeded {
        client: ClientId,
        kind: TransactionKind,
        amount: Amount,
        balance: Amount,
        limit: Amount,
    },
}

use chrono::Utc;

use crate::Amount;
use crate::model::{Receipt, Transaction, TransactionKind};

/// A client account: immutable limit, running balance and its history.
///
/// Invariant: `-limit <= balance <= limit` after every committed operation.
#[derive(Debug)]
pub struct ClientAccount {
    limit: Amount,
    balance: Amount,
    history: Vec<Transaction>,
}

impl ClientAccount {
    /// # Panics
    ///
    /// Panics if `limit` is negative.
    pub fn new(limit: Amount) -> Self {
        assert!(limit >= Amount::ZERO, "limit must be non-negative, got {limit}");
        Self {
            limit,
            balance: Amount::ZERO,
            history: Vec::new(),
        }
    }

    pub fn limit(&self) -> Amount {
        self.limit
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn receipt(&self) -> Receipt {
        Receipt {
            limit: self.limit,
            balance: self.balance,
        }
    }

    /// Balance after crediting `amount`, if it stays at or below the limit.
    pub fn credit_candidate(&self, amount: Amount) -> Option<Amount> {
        self.balance
            .checked_add(amount)
            .filter(|candidate| *candidate <= self.limit)
    }

    /// Balance after debiting `amount`, if it stays at or above `-limit`.
    pub fn debit_candidate(&self, amount: Amount) -> Option<Amount> {
        self.balance
            .checked_sub(amount)
            .filter(|candidate| *candidate >= -self.limit)
    }

    /// Commit a checked balance and append the matching history entry.
    pub fn commit(
        &mut self,
        balance: Amount,
        kind: TransactionKind,
        amount: Amount,
        description: String,
    ) -> Receipt {
        self.balance = balance;
        self.history.push(Transaction {
            amount,
            kind,
            description,
            recorded_at: Utc::now(),
        });
        self.receipt()
    }
}

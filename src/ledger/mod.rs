//! Account ledger.
//!
//! The ledger owns a fixed roster of clients, each with an immutable limit, a
//! running balance and an append-only history. Credits and debits are checked
//! against the limit and committed atomically per client.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::info;

use crate::Amount;
use crate::model::{ClientId, Receipt, Statement, TransactionKind};
use crate::validation::ValidTransaction;

mod state;
pub use state::ClientAccount;

mod error;
pub use error::LedgerError;

/// Clients served by a default deployment, as `(id, limit)`.
pub const DEFAULT_ROSTER: [(ClientId, Amount); 5] = [
    (1, Amount::new(100_000)),
    (2, Amount::new(80_000)),
    (3, Amount::new(1_000_000)),
    (4, Amount::new(10_000_000)),
    (5, Amount::new(500_000)),
];

/// The in-memory authority over client balances and history.
///
/// The roster is fixed at construction. Each client sits behind its own lock,
/// so operations on different clients never contend and the check-then-commit
/// sequence on one client cannot interleave with another operation on it.
pub struct Ledger {
    clients: BTreeMap<ClientId, Mutex<ClientAccount>>,
}

/// Public API
impl Ledger {
    /// Build a ledger from `(id, limit)` pairs. Every client starts at balance zero.
    /// A repeated id keeps the last limit given for it.
    ///
    /// # Panics
    ///
    /// Panics if any limit is negative.
    pub fn new(roster: impl IntoIterator<Item = (ClientId, Amount)>) -> Self {
        let clients = roster
            .into_iter()
            .map(|(id, limit)| (id, Mutex::new(ClientAccount::new(limit))))
            .collect();
        Self { clients }
    }

    pub fn with_default_roster() -> Self {
        Self::new(DEFAULT_ROSTER)
    }

    pub fn exists(&self, client: ClientId) -> bool {
        self.clients.contains_key(&client)
    }

    /// Roster ids in ascending order.
    pub fn clients(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.clients.keys().copied()
    }

    /// Apply a validated transaction to `client`.
    pub fn apply(&self, client: ClientId, tx: ValidTransaction) -> Result<Receipt, LedgerError> {
        let ValidTransaction {
            amount,
            kind,
            description,
        } = tx;
        match kind {
            TransactionKind::Credit => self.apply_credit(client, amount, description),
            TransactionKind::Debit => self.apply_debit(client, amount, description),
        }
    }

    /// Add `amount` to the balance. Rejected when the result would exceed the limit.
    pub fn apply_credit(
        &self,
        client: ClientId,
        amount: Amount,
        description: impl Into<String>,
    ) -> Result<Receipt, LedgerError> {
        let result = self.commit_with(
            client,
            TransactionKind::Credit,
            amount,
            description,
            |account| account.credit_candidate(amount),
        );
        Self::log_result(TransactionKind::Credit, client, amount, &result);
        result
    }

    /// Subtract `amount` from the balance. Rejected when the result would fall below `-limit`.
    pub fn apply_debit(
        &self,
        client: ClientId,
        amount: Amount,
        description: impl Into<String>,
    ) -> Result<Receipt, LedgerError> {
        let result = self.commit_with(
            client,
            TransactionKind::Debit,
            amount,
            description,
            |account| account.debit_candidate(amount),
        );
        Self::log_result(TransactionKind::Debit, client, amount, &result);
        result
    }

    /// Snapshot of balance, limit and full history (oldest first).
    pub fn statement(&self, client: ClientId) -> Result<Statement, LedgerError> {
        let account = self.lock(client)?;
        Ok(Statement {
            balance: account.balance(),
            limit: account.limit(),
            as_of: Utc::now(),
            transactions: account.history().to_vec(),
        })
    }
}

/// Private API
impl Ledger {
    fn lock(&self, client: ClientId) -> Result<MutexGuard<'_, ClientAccount>, LedgerError> {
        let account = self
            .clients
            .get(&client)
            .ok_or(LedgerError::UnknownClient(client))?;
        // Poison is ignored: balance and history only change together in `commit`.
        Ok(account.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Lock the client, compute the new balance with `candidate` and commit it.
    /// The lock is held from the check until the history entry is appended.
    fn commit_with(
        &self,
        client: ClientId,
        kind: TransactionKind,
        amount: Amount,
        description: impl Into<String>,
        candidate: impl FnOnce(&ClientAccount) -> Option<Amount>,
    ) -> Result<Receipt, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        let mut account = self.lock(client)?;

        let Some(balance) = candidate(&account) else {
            return Err(LedgerError::LimitExceeded {
                client,
                kind,
                amount,
                balance: account.balance(),
                limit: account.limit(),
            });
        };

        Ok(account.commit(balance, kind, amount, description.into()))
    }

    fn log_result(
        kind: TransactionKind,
        client: ClientId,
        amount: Amount,
        result: &Result<Receipt, LedgerError>,
    ) {
        match result {
            Ok(receipt) => {
                info!(
                    client = %client,
                    kind = kind.code(),
                    amount = %amount,
                    balance = %receipt.balance,
                    "transaction applied"
                );
            }
            Err(e) => {
                info!(
                    client = %client,
                    kind = kind.code(),
                    amount = %amount,
                    reason = %e,
                    "transaction rejected"
                );
            }
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_default_roster()
    }
}

//! JSON response bodies.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::Amount;
use crate::model::{Receipt, Statement, Transaction};

/// Body of a successful `POST /clientes/{id}/transacoes`.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub limite: Amount,
    pub saldo: Amount,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            limite: receipt.limit,
            saldo: receipt.balance,
        }
    }
}

/// Body of a successful `GET /clientes/{id}/extrato`.
#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub saldo: BalanceSummary,
    pub ultimas_transacoes: Vec<TransactionEntry>,
}

#[derive(Debug, Serialize)]
pub struct BalanceSummary {
    pub total: Amount,
    pub data_extrato: String,
    pub limite: Amount,
}

#[derive(Debug, Serialize)]
pub struct TransactionEntry {
    pub valor: Amount,
    pub tipo: &'static str,
    pub descricao: String,
    pub at: String,
}

impl From<Statement> for StatementResponse {
    fn from(statement: Statement) -> Self {
        Self {
            saldo: BalanceSummary {
                total: statement.balance,
                data_extrato: timestamp(statement.as_of),
                limite: statement.limit,
            },
            ultimas_transacoes: statement
                .transactions
                .into_iter()
                .map(TransactionEntry::from)
                .collect(),
        }
    }
}

impl From<Transaction> for TransactionEntry {
    fn from(tx: Transaction) -> Self {
        Self {
            valor: tx.amount,
            tipo: tx.kind.code(),
            descricao: tx.description,
            at: timestamp(tx.recorded_at),
        }
    }
}

/// UTC, millisecond precision, `Z` suffix: `2024-02-01T12:00:00.000Z`.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

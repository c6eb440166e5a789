pub mod amount;
pub mod api;
pub mod config;
pub mod ledger;
pub mod model;
pub mod router;
pub mod validation;

pub use amount::Amount;
pub use ledger::{Ledger, LedgerError};
pub use model::{ClientId, Receipt, Statement, Transaction, TransactionKind};

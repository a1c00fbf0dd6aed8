//! Transactions module - the append-only ledger of value-affecting events.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::{sum_by_type, Transaction, TransactionType};
pub use transactions_traits::TransactionRepositoryTrait;

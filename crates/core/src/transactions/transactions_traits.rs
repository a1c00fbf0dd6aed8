//! Repository trait for the transaction ledger.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use super::Transaction;
use crate::errors::Result;

#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Appends transactions to the ledger. Returns the number of rows written.
    async fn insert_many(&self, transactions: &[Transaction]) -> Result<usize>;

    /// Removes every transaction. Used when a full re-import replaces the ledger.
    async fn delete_all(&self) -> Result<usize>;

    /// Transactions of one investment dated on or before `cutoff`, oldest first.
    async fn get_up_to_date(
        &self,
        investment_id: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<Transaction>>;

    /// Transactions dated on or before `cutoff` for each of `investment_ids`,
    /// keyed by investment id and ordered oldest first.
    ///
    /// Investments without transactions may be absent from the map or map to
    /// an empty list; callers must treat both the same.
    async fn get_up_to_date_by_investment_ids(
        &self,
        investment_ids: &[String],
        cutoff: NaiveDate,
    ) -> Result<HashMap<String, Vec<Transaction>>>;
}

//! Repository trait for security price history.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::Quote;
use crate::errors::Result;

#[async_trait]
pub trait QuoteRepositoryTrait: Send + Sync {
    /// Stores price points. A second price for the same security and day
    /// replaces the first. Returns the number of rows written.
    async fn insert_many(&self, quotes: &[Quote]) -> Result<usize>;

    /// Removes every stored price point.
    async fn delete_all(&self) -> Result<usize>;

    /// Latest price dated on or before `date`.
    async fn get_latest_price(&self, isin: &str, date: NaiveDate) -> Result<Option<Decimal>>;

    /// Latest price dated on or before `date` for each of `isins`.
    ///
    /// Securities without an eligible price may be absent or map to `None`;
    /// callers must treat both the same.
    async fn get_latest_prices(
        &self,
        isins: &[String],
        date: NaiveDate,
    ) -> Result<HashMap<String, Option<Decimal>>>;
}

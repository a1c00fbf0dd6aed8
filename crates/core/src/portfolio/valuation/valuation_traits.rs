use async_trait::async_trait;
use chrono::NaiveDate;

use super::PortfolioValuation;
use crate::errors::Result;

#[async_trait]
pub trait PortfolioValuationServiceTrait: Send + Sync {
    /// Values everything `investor_id` holds, directly or through funds, as of
    /// `reference_date` (inclusive).
    ///
    /// Missing metadata, missing prices and fund cycles are logged and valued
    /// at zero. Only a failing repository call makes this return an error.
    async fn calculate(
        &self,
        investor_id: &str,
        reference_date: NaiveDate,
    ) -> Result<PortfolioValuation>;
}

//! Repository trait for the investment catalog.

use async_trait::async_trait;
use std::collections::HashMap;

use super::Investment;
use crate::errors::Result;

/// Read and write access to investment classifications.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// Inserts or replaces investments by id. Returns the number of rows written.
    async fn upsert_many(&self, investments: &[Investment]) -> Result<usize>;

    /// Loads a single investment, `None` if the catalog has no such id.
    async fn get_by_id(&self, investment_id: &str) -> Result<Option<Investment>>;

    /// Loads the classifications for `investment_ids`, keyed by id.
    ///
    /// Ids missing from the catalog are absent from the map. An empty input
    /// yields an empty map.
    async fn get_by_ids(&self, investment_ids: &[String]) -> Result<HashMap<String, Investment>>;
}

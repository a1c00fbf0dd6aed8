//! Repository trait for the ownership index.

use async_trait::async_trait;

use super::{OwnerType, OwnershipLink};
use crate::errors::Result;

#[async_trait]
pub trait OwnershipRepositoryTrait: Send + Sync {
    /// Stores links, ignoring triples that already exist.
    /// Returns the number of links actually added.
    async fn upsert_links(&self, links: &[OwnershipLink]) -> Result<usize>;

    /// Ids of the investments held by the given owner, in insertion order.
    /// An unknown owner yields an empty list.
    async fn get_owned_investment_ids(
        &self,
        owner_type: OwnerType,
        owner_id: &str,
    ) -> Result<Vec<String>>;
}

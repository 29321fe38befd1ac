//! Catalog service port

use async_trait::async_trait;

use super::model::{NewRateTier, RateTier};
use crate::domain::{DomainResult, RateTierId};

/// Remote store of rate tiers. Tiers can be listed and created; there is no
/// update or delete.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<RateTier>>;

    /// Create a tier. Returns the stored tier when the service echoes it.
    async fn create(&self, tier: NewRateTier) -> DomainResult<Option<RateTier>>;

    async fn find_by_id(&self, id: &RateTierId) -> DomainResult<Option<RateTier>> {
        Ok(self.list().await?.into_iter().find(|t| t.id.matches(id)))
    }
}

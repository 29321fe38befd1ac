//! Rate tier catalog management

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use validator::Validate;

use crate::domain::{CatalogService, DomainResult, NewRateTier, RateTier, TierStatus};
use crate::shared::validations::into_domain_error;

/// Lists and creates rate tiers
pub struct CatalogManager {
    catalog: Arc<dyn CatalogService>,
}

impl CatalogManager {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }

    pub async fn list_tiers(&self) -> DomainResult<Vec<RateTier>> {
        self.catalog.list().await
    }

    pub async fn active_tiers(&self) -> DomainResult<Vec<RateTier>> {
        Ok(self
            .catalog
            .list()
            .await?
            .into_iter()
            .filter(|t| t.status.is_active())
            .collect())
    }

    /// Validate and create a tier. Nothing is sent if validation fails.
    pub async fn add_tier(
        &self,
        name: &str,
        hourly_rate: Decimal,
        status: TierStatus,
    ) -> DomainResult<Option<RateTier>> {
        let tier = NewRateTier::new(name, hourly_rate, status);
        tier.validate().map_err(into_domain_error)?;

        let created = self.catalog.create(tier.clone()).await?;
        info!(
            name = tier.name.as_str(),
            rate = %tier.hourly_rate,
            status = %tier.status,
            echoed = created.is_some(),
            "Rate tier added"
        );
        Ok(created)
    }
}

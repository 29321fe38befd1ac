//! Catalog service over HTTP

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, warn};
use validator::Validate;

use super::client::ApiClient;
use super::dto::{CreateTierRequest, RateTierDto};
use super::envelope::{ListEnvelope, MutationAck};
use crate::domain::{CatalogService, DomainError, DomainResult, NewRateTier, RateTier};
use crate::shared::validations::into_domain_error;

pub struct HttpCatalogService {
    client: Arc<ApiClient>,
}

impl HttpCatalogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list(&self) -> DomainResult<Vec<RateTier>> {
        let path = &self.client.config().endpoints.tiers_list;
        let body = self.client.get_json(path).await?;

        let envelope = ListEnvelope::from_value(body, "jenis");
        debug!(shape = envelope.shape(), "Tier list envelope");

        let rows: Vec<RateTierDto> = envelope.decode();
        let tiers: Vec<RateTier> = rows
            .into_iter()
            .filter_map(|row| match RateTier::try_from(row) {
                Ok(tier) => Some(tier),
                Err(reason) => {
                    warn!(reason = reason.as_str(), "Skipping unusable rate tier");
                    None
                }
            })
            .collect();

        debug!(count = tiers.len(), "Rate tiers loaded");
        Ok(tiers)
    }

    async fn create(&self, tier: NewRateTier) -> DomainResult<Option<RateTier>> {
        tier.validate().map_err(into_domain_error)?;

        let path = &self.client.config().endpoints.tiers_create;
        let body = self
            .client
            .send_json(Method::POST, path, &CreateTierRequest::from(&tier))
            .await?;

        match MutationAck::from_value(body, "jpr_id") {
            MutationAck::Rejected { message } => {
                warn!(name = tier.name.as_str(), message = message.as_str(), "Tier creation rejected");
                Err(DomainError::RemoteFailure(message))
            }
            MutationAck::Accepted { item } => {
                info!(name = tier.name.as_str(), rate = %tier.hourly_rate, "Rate tier created");
                Ok(item
                    .and_then(|v| serde_json::from_value::<RateTierDto>(v).ok())
                    .and_then(|dto| RateTier::try_from(dto).ok()))
            }
        }
    }
}

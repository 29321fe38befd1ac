//! Vehicle entry recording

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{
    CatalogService, Clock, DomainError, DomainResult, NewParkingRecord, OccupancyService,
    ParkingRecord, RateTier, RateTierId,
};
use crate::shared::time::truncate_to_minute;
use crate::shared::validations::into_domain_error;

/// What the operator filled in
#[derive(Debug, Clone)]
pub struct EntryRequest {
    pub plate_number: String,
    pub rate_tier_id: Option<RateTierId>,
    /// Defaults to the clock's current minute
    pub entry_at: Option<NaiveDateTime>,
}

/// Result of a recorded entry
#[derive(Debug, Clone)]
pub struct EntryReceipt {
    pub plate_number: String,
    pub tier: RateTier,
    pub entry_at: NaiveDateTime,
    /// Stored record, when the service echoed it
    pub record: Option<ParkingRecord>,
}

pub struct EntryService {
    catalog: Arc<dyn CatalogService>,
    occupancy: Arc<dyn OccupancyService>,
    clock: Arc<dyn Clock>,
}

impl EntryService {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        occupancy: Arc<dyn OccupancyService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            occupancy,
            clock,
        }
    }

    pub async fn record_entry(&self, request: EntryRequest) -> DomainResult<EntryReceipt> {
        let tier_id = request
            .rate_tier_id
            .ok_or_else(|| DomainError::Validation("a rate tier must be chosen".to_string()))?;

        let entry_at = request
            .entry_at
            .unwrap_or_else(|| truncate_to_minute(self.clock.now()));
        let record = NewParkingRecord::new(&request.plate_number, entry_at, tier_id);
        record.validate().map_err(into_domain_error)?;

        let tier = self
            .catalog
            .find_by_id(&record.rate_tier_id)
            .await?
            .ok_or_else(|| DomainError::tier_not_found(&record.rate_tier_id))?;
        if !tier.status.is_active() {
            warn!(tier_id = %tier.id, name = tier.name.as_str(), "Entry recorded on an inactive tier");
        }

        let plate_number = record.plate_number.clone();
        let stored = self.occupancy.create(record).await?;

        info!(
            plate = plate_number.as_str(),
            tier = tier.name.as_str(),
            entry_at = %entry_at,
            "Vehicle entered"
        );

        Ok(EntryReceipt {
            plate_number,
            tier,
            entry_at,
            record: stored,
        })
    }
}

//! In-memory catalog and occupancy stores

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;
use validator::Validate;

use crate::domain::{
    CatalogService, DomainError, DomainResult, ExitRecord, NewParkingRecord, NewRateTier,
    OccupancyService, ParkingRecord, RateTier, RateTierId, RecordId, TierStatus,
};
use crate::shared::validations::into_domain_error;

fn sort_key(id: &str) -> (i64, String) {
    (id.parse().unwrap_or(i64::MAX), id.to_string())
}

/// In-memory rate tier catalog for development and testing
pub struct InMemoryCatalog {
    tiers: DashMap<String, RateTier>,
    tier_counter: AtomicI64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            tiers: DashMap::new(),
            tier_counter: AtomicI64::new(1),
        }
    }

    /// Catalog pre-filled with the usual lot tiers.
    pub fn with_sample_tiers() -> Self {
        let catalog = Self::new();
        for (name, rate) in [("Motor", 2000), ("Mobil", 5000), ("Truk", 10000)] {
            catalog.insert(NewRateTier::new(name, Decimal::from(rate), TierStatus::Active));
        }
        catalog
    }

    fn insert(&self, tier: NewRateTier) -> RateTier {
        let id = self.tier_counter.fetch_add(1, Ordering::SeqCst);
        let stored = RateTier {
            id: RateTierId::from(id),
            name: tier.name,
            hourly_rate: tier.hourly_rate,
            status: tier.status,
        };
        self.tiers.insert(stored.id.to_string(), stored.clone());
        stored
    }

    fn lookup(&self, id: &RateTierId) -> Option<RateTier> {
        self.tiers
            .iter()
            .find(|e| e.value().id.matches(id))
            .map(|e| e.value().clone())
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn list(&self) -> DomainResult<Vec<RateTier>> {
        let mut tiers: Vec<RateTier> = self.tiers.iter().map(|e| e.value().clone()).collect();
        tiers.sort_by_key(|t| sort_key(t.id.as_str()));
        Ok(tiers)
    }

    async fn create(&self, tier: NewRateTier) -> DomainResult<Option<RateTier>> {
        tier.validate().map_err(into_domain_error)?;
        let stored = self.insert(tier);
        debug!(tier_id = %stored.id, name = stored.name.as_str(), "Tier stored in memory");
        Ok(Some(stored))
    }
}

/// In-memory parking records for development and testing
pub struct InMemoryOccupancy {
    records: DashMap<String, ParkingRecord>,
    record_counter: AtomicI64,
    catalog: Option<Arc<InMemoryCatalog>>,
}

impl InMemoryOccupancy {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            record_counter: AtomicI64::new(1),
            catalog: None,
        }
    }

    /// Join tier name and rate into stored records, like the listing endpoint.
    pub fn with_catalog(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::new()
        }
    }

    /// Seed a record as-is.
    pub fn insert(&self, record: ParkingRecord) {
        self.records.insert(record.id.to_string(), record);
    }
}

impl Default for InMemoryOccupancy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OccupancyService for InMemoryOccupancy {
    async fn list(&self) -> DomainResult<Vec<ParkingRecord>> {
        let mut records: Vec<ParkingRecord> =
            self.records.iter().map(|e| e.value().clone()).collect();
        records.sort_by_key(|r| sort_key(r.id.as_str()));
        Ok(records)
    }

    async fn create(&self, record: NewParkingRecord) -> DomainResult<Option<ParkingRecord>> {
        record.validate().map_err(into_domain_error)?;

        let tier = match &self.catalog {
            Some(catalog) => Some(
                catalog
                    .lookup(&record.rate_tier_id)
                    .ok_or_else(|| DomainError::tier_not_found(&record.rate_tier_id))?,
            ),
            None => None,
        };

        let id = self.record_counter.fetch_add(1, Ordering::SeqCst);
        let stored = ParkingRecord {
            id: RecordId::from(id),
            plate_number: record.plate_number,
            rate_tier_id: Some(record.rate_tier_id),
            tier_name: tier.as_ref().map(|t| t.name.clone()),
            hourly_rate: tier.as_ref().map(|t| t.hourly_rate),
            entry_at: record.entry_at,
            exit_at: None,
            total_fee: None,
        };
        self.records.insert(stored.id.to_string(), stored.clone());
        Ok(Some(stored))
    }

    async fn record_exit(&self, exit: ExitRecord) -> DomainResult<Option<ParkingRecord>> {
        let mut entry = self
            .records
            .iter_mut()
            .find(|e| e.value().id.matches(&exit.record_id))
            .ok_or_else(|| DomainError::record_not_found(&exit.record_id))?;
        entry.value_mut().record_exit(exit.exit_at, exit.total_fee)?;
        Ok(Some(entry.value().clone()))
    }
}

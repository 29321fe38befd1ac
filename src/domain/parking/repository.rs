//! Occupancy service port

use async_trait::async_trait;

use super::model::{ExitRecord, NewParkingRecord, ParkingRecord};
use crate::domain::{DomainResult, RecordId};

/// Remote store of parking records.
#[async_trait]
pub trait OccupancyService: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<ParkingRecord>>;

    /// Look up one record. The default scans the full list, which is all the
    /// legacy backend offers.
    async fn find_by_id(&self, id: &RecordId) -> DomainResult<Option<ParkingRecord>> {
        Ok(self.list().await?.into_iter().find(|r| r.id.matches(id)))
    }

    /// Record a vehicle entry. Returns the stored record when the service
    /// echoes it.
    async fn create(&self, record: NewParkingRecord) -> DomainResult<Option<ParkingRecord>>;

    /// Set exit time and fee in one call.
    async fn record_exit(&self, exit: ExitRecord) -> DomainResult<Option<ParkingRecord>>;
}

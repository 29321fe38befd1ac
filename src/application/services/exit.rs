//! Exit recording
//!
//! An [`ExitForm`] binds one parked record to a candidate exit time and keeps
//! the fee quote in step with it. [`ExitWorkflow::confirm`] sends the final
//! exit time and fee as a single update; nothing is changed locally, so the
//! remote acknowledgement decides whether the exit happened.

use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::{
    compute_fee, CatalogService, Clock, DomainError, DomainResult, ExitRecord, FeeQuote,
    OccupancyService, ParkingRecord, RecordId,
};
use crate::shared::time::truncate_to_minute;

/// In-progress exit for one record
#[derive(Debug, Clone)]
pub struct ExitForm {
    record: ParkingRecord,
    hourly_rate: Decimal,
    exit_at: NaiveDateTime,
    quote: Option<FeeQuote>,
}

impl ExitForm {
    fn new(record: ParkingRecord, hourly_rate: Decimal, exit_at: NaiveDateTime) -> Self {
        let mut form = Self {
            record,
            hourly_rate,
            exit_at,
            quote: None,
        };
        form.recompute();
        form
    }

    pub fn record(&self) -> &ParkingRecord {
        &self.record
    }

    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    pub fn exit_at(&self) -> NaiveDateTime {
        self.exit_at
    }

    /// Current quote, `None` while the candidate exit precedes entry.
    pub fn quote(&self) -> Option<&FeeQuote> {
        self.quote.as_ref()
    }

    /// Move the candidate exit time and recompute the fee.
    pub fn set_exit_time(&mut self, exit_at: NaiveDateTime) -> DomainResult<&FeeQuote> {
        self.exit_at = exit_at;
        self.quote = None;
        let quote = compute_fee(self.record.entry_at, exit_at, self.hourly_rate)?;
        Ok(self.quote.insert(quote))
    }

    /// Follow the clock to its current minute.
    pub fn tick(&mut self, clock: &dyn Clock) -> DomainResult<&FeeQuote> {
        self.set_exit_time(truncate_to_minute(clock.now()))
    }

    fn recompute(&mut self) {
        self.quote = compute_fee(self.record.entry_at, self.exit_at, self.hourly_rate).ok();
    }
}

/// What was submitted, plus the service's echo when it sent one
#[derive(Debug, Clone)]
pub struct ExitReceipt {
    pub record_id: RecordId,
    pub plate_number: String,
    pub exit_at: NaiveDateTime,
    pub quote: FeeQuote,
    pub stored: Option<ParkingRecord>,
}

pub struct ExitWorkflow {
    occupancy: Arc<dyn OccupancyService>,
    catalog: Arc<dyn CatalogService>,
    clock: Arc<dyn Clock>,
    recheck_before_exit: bool,
}

impl ExitWorkflow {
    pub fn new(
        occupancy: Arc<dyn OccupancyService>,
        catalog: Arc<dyn CatalogService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            occupancy,
            catalog,
            clock,
            recheck_before_exit: true,
        }
    }

    pub fn with_recheck(mut self, enabled: bool) -> Self {
        self.recheck_before_exit = enabled;
        self
    }

    /// Load a parked record and quote its exit at the current minute.
    pub async fn open(&self, record_id: &RecordId) -> DomainResult<ExitForm> {
        let record = self.load_parked(record_id).await?;
        let hourly_rate = self.resolve_rate(&record).await?;
        let exit_at = truncate_to_minute(self.clock.now());

        Ok(ExitForm::new(record, hourly_rate, exit_at))
    }

    /// Submit the form's exit time and fee as one update.
    pub async fn confirm(&self, form: &ExitForm) -> DomainResult<ExitReceipt> {
        let quote = match form.quote() {
            Some(quote) => quote.clone(),
            None => compute_fee(form.record.entry_at, form.exit_at, form.hourly_rate)?,
        };

        if self.recheck_before_exit {
            self.load_parked(&form.record.id).await?;
        }

        let update = ExitRecord {
            record_id: form.record.id.clone(),
            exit_at: form.exit_at,
            total_fee: quote.fee,
        };
        let stored = self.occupancy.record_exit(update).await?;

        info!(
            record_id = %form.record.id,
            plate = form.record.plate_number.as_str(),
            billable_hours = quote.billable_hours,
            fee = %quote.fee,
            "Vehicle exit confirmed"
        );

        Ok(ExitReceipt {
            record_id: form.record.id.clone(),
            plate_number: form.record.plate_number.clone(),
            exit_at: form.exit_at,
            quote,
            stored,
        })
    }

    async fn load_parked(&self, record_id: &RecordId) -> DomainResult<ParkingRecord> {
        let record = self
            .occupancy
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| DomainError::record_not_found(record_id))?;

        if record.has_exited() {
            warn!(record_id = %record.id, "Exit requested for a vehicle that already left");
            return Err(DomainError::AlreadyExited(record.id));
        }
        Ok(record)
    }

    async fn resolve_rate(&self, record: &ParkingRecord) -> DomainResult<Decimal> {
        if let Some(rate) = record.hourly_rate {
            return Ok(rate);
        }

        let tier_id = record.rate_tier_id.as_ref().ok_or_else(|| {
            DomainError::Validation(format!("record {} has no rate tier", record.id))
        })?;
        let tier = self
            .catalog
            .find_by_id(tier_id)
            .await?
            .ok_or_else(|| DomainError::tier_not_found(tier_id))?;
        Ok(tier.hourly_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, RateTierId};
    use crate::infrastructure::{InMemoryCatalog, InMemoryOccupancy};
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn parked(id: i64, rate: Option<i64>) -> ParkingRecord {
        ParkingRecord {
            id: RecordId::from(id),
            plate_number: "B 1234 XYZ".into(),
            rate_tier_id: Some(RateTierId::from(2)),
            tier_name: rate.map(|_| "Mobil".to_string()),
            hourly_rate: rate.map(Decimal::from),
            entry_at: at(10, 0),
            exit_at: None,
            total_fee: None,
        }
    }

    struct Fixture {
        workflow: ExitWorkflow,
        store: Arc<InMemoryOccupancy>,
        clock: Arc<FixedClock>,
    }

    fn fixture(now: NaiveDateTime) -> Fixture {
        let catalog = Arc::new(InMemoryCatalog::with_sample_tiers());
        let store = Arc::new(InMemoryOccupancy::with_catalog(catalog.clone()));
        let clock = Arc::new(FixedClock::new(now));
        let workflow = ExitWorkflow::new(store.clone(), catalog, clock.clone());
        Fixture {
            workflow,
            store,
            clock,
        }
    }

    #[tokio::test]
    async fn open_quotes_at_current_minute() {
        let f = fixture(at(10, 30) + Duration::seconds(59));
        f.store.insert(parked(1, Some(5000)));

        let form = f.workflow.open(&RecordId::from("1")).await.unwrap();
        assert_eq!(form.exit_at(), at(10, 30));
        let quote = form.quote().unwrap();
        assert_eq!(quote.billable_hours, 1);
        assert_eq!(quote.fee, Decimal::from(5000));
    }

    #[tokio::test]
    async fn tick_follows_clock() {
        let f = fixture(at(10, 30));
        f.store.insert(parked(1, Some(2000)));

        let mut form = f.workflow.open(&RecordId::from(1)).await.unwrap();
        f.clock.set(at(12, 1));
        let quote = form.tick(&*f.clock).unwrap();
        assert_eq!(quote.billable_hours, 3);
        assert_eq!(quote.fee, Decimal::from(6000));
    }

    #[tokio::test]
    async fn rate_falls_back_to_catalog() {
        let f = fixture(at(11, 15));
        f.store.insert(parked(1, None));

        let form = f.workflow.open(&RecordId::from(1)).await.unwrap();
        assert_eq!(form.hourly_rate(), Decimal::from(5000));
        assert_eq!(form.quote().unwrap().fee, Decimal::from(10000));
    }

    #[tokio::test]
    async fn confirm_submits_exit_once() {
        let f = fixture(at(12, 1));
        f.store.insert(parked(1, Some(2000)));

        let form = f.workflow.open(&RecordId::from(1)).await.unwrap();
        let receipt = f.workflow.confirm(&form).await.unwrap();
        assert_eq!(receipt.quote.fee, Decimal::from(6000));
        assert_eq!(receipt.exit_at, at(12, 1));

        let stored = receipt.stored.unwrap();
        assert_eq!(stored.exit_at, Some(at(12, 1)));
        assert_eq!(stored.total_fee, Some(Decimal::from(6000)));
        assert!(!stored.exit_allowed());
    }

    #[tokio::test]
    async fn unknown_record_is_not_found() {
        let f = fixture(at(12, 0));
        let err = f.workflow.open(&RecordId::from(42)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "ParkingRecord", .. }));
    }

    #[tokio::test]
    async fn exited_record_cannot_be_opened() {
        let f = fixture(at(12, 0));
        let mut record = parked(1, Some(5000));
        record.exit_at = Some(at(11, 0));
        record.total_fee = Some(Decimal::from(5000));
        f.store.insert(record);

        let err = f.workflow.open(&RecordId::from(1)).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExited(_)));
    }

    #[tokio::test]
    async fn recheck_catches_concurrent_exit() {
        let f = fixture(at(12, 0));
        f.store.insert(parked(1, Some(5000)));

        let form = f.workflow.open(&RecordId::from(1)).await.unwrap();
        f.store
            .record_exit(ExitRecord {
                record_id: RecordId::from(1),
                exit_at: at(11, 50),
                total_fee: Decimal::from(10000),
            })
            .await
            .unwrap();

        let err = f.workflow.confirm(&form).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExited(_)));
        let stored = f.store.find_by_id(&RecordId::from(1)).await.unwrap().unwrap();
        assert_eq!(stored.exit_at, Some(at(11, 50)));
    }

    #[tokio::test]
    async fn exit_before_entry_is_rejected() {
        let f = fixture(at(12, 0));
        f.store.insert(parked(1, Some(5000)));

        let mut form = f.workflow.open(&RecordId::from(1)).await.unwrap();
        let err = form.set_exit_time(at(9, 0)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDuration { .. }));
        assert!(form.quote().is_none());

        let err = f.workflow.confirm(&form).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidDuration { .. }));
        let stored = f.store.find_by_id(&RecordId::from(1)).await.unwrap().unwrap();
        assert!(stored.exit_allowed());
    }
}

//! Parking record domain entity

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use validator::Validate;

use crate::domain::{RateTierId, RecordId};
use crate::shared::validations::{normalize_plate, validate_not_blank};
use crate::shared::{DomainError, DomainResult};

/// One vehicle's stay, from entry to (eventually) exit
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingRecord {
    pub id: RecordId,
    /// Upper-cased plate number
    pub plate_number: String,
    pub rate_tier_id: Option<RateTierId>,
    /// Tier name joined in by the listing endpoint
    pub tier_name: Option<String>,
    /// Tier hourly rate joined in by the listing endpoint
    pub hourly_rate: Option<Decimal>,
    pub entry_at: NaiveDateTime,
    /// Set once, together with `total_fee`
    pub exit_at: Option<NaiveDateTime>,
    pub total_fee: Option<Decimal>,
}

impl ParkingRecord {
    pub fn has_exited(&self) -> bool {
        self.exit_at.is_some()
    }

    /// Whether the exit action may be offered for this record.
    pub fn exit_allowed(&self) -> bool {
        !self.has_exited()
    }

    /// Apply an exit. Exit time and fee are set together, exactly once.
    pub fn record_exit(&mut self, exit_at: NaiveDateTime, total_fee: Decimal) -> DomainResult<()> {
        if self.has_exited() {
            return Err(DomainError::AlreadyExited(self.id.clone()));
        }
        if exit_at < self.entry_at {
            return Err(DomainError::InvalidDuration {
                entry: self.entry_at,
                exit: exit_at,
            });
        }
        self.exit_at = Some(exit_at);
        self.total_fee = Some(total_fee);
        Ok(())
    }
}

/// Input for recording a vehicle entry
#[derive(Debug, Clone, Validate)]
pub struct NewParkingRecord {
    #[validate(custom(function = "validate_not_blank", message = "plate number is required"))]
    pub plate_number: String,
    pub entry_at: NaiveDateTime,
    pub rate_tier_id: RateTierId,
}

impl NewParkingRecord {
    pub fn new(plate_number: &str, entry_at: NaiveDateTime, rate_tier_id: RateTierId) -> Self {
        Self {
            plate_number: normalize_plate(plate_number),
            entry_at,
            rate_tier_id,
        }
    }
}

/// The single update sent when a vehicle leaves
#[derive(Debug, Clone, PartialEq)]
pub struct ExitRecord {
    pub record_id: RecordId,
    pub exit_at: NaiveDateTime,
    pub total_fee: Decimal,
}

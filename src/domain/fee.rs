//! Parking fee engine
//!
//! Pure computation from an entry time, a candidate exit time and an hourly
//! rate to billable hours and a fee. Elapsed time is counted in whole
//! minutes; any partial hour is billed as a full hour and a stay is never
//! billed less than one hour.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::shared::{DomainError, DomainResult};

/// Lower bound on billable hours.
pub const MIN_BILLABLE_HOURS: i64 = 1;

const MINUTES_PER_HOUR: i64 = 60;

/// Result of a fee computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuote {
    /// Whole hours actually elapsed (before rounding)
    pub elapsed_hours: i64,
    /// Minutes past the last whole hour
    pub elapsed_minutes: i64,
    /// Hours that are charged
    pub billable_hours: i64,
    pub hourly_rate: Decimal,
    pub fee: Decimal,
}

/// Compute billable hours and the fee for a stay.
///
/// Fails with [`DomainError::InvalidDuration`] when `exit` is earlier than
/// `entry`, and with [`DomainError::Validation`] for a negative rate or a fee
/// too large to represent.
pub fn compute_fee(
    entry: NaiveDateTime,
    exit: NaiveDateTime,
    hourly_rate: Decimal,
) -> DomainResult<FeeQuote> {
    if hourly_rate.is_sign_negative() && !hourly_rate.is_zero() {
        return Err(DomainError::Validation(format!(
            "hourly rate must not be negative (got {})",
            hourly_rate
        )));
    }

    let elapsed = exit.signed_duration_since(entry);
    if elapsed < chrono::Duration::zero() {
        return Err(DomainError::InvalidDuration { entry, exit });
    }

    let total_minutes = elapsed.num_minutes();
    let elapsed_hours = total_minutes / MINUTES_PER_HOUR;
    let elapsed_minutes = total_minutes % MINUTES_PER_HOUR;

    let rounded = if elapsed_minutes > 0 {
        elapsed_hours + 1
    } else {
        elapsed_hours
    };
    let billable_hours = rounded.max(MIN_BILLABLE_HOURS);
    let fee = Decimal::from(billable_hours)
        .checked_mul(hourly_rate)
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "fee for {} hours at rate {} is out of range",
                billable_hours, hourly_rate
            ))
        })?;

    Ok(FeeQuote {
        elapsed_hours,
        elapsed_minutes,
        billable_hours,
        hourly_rate,
        fee,
    })
}

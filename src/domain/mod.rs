pub mod clock;
pub mod fee;
pub mod identifier;
pub mod parking;
pub mod rate_tier;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use fee::{compute_fee, FeeQuote, MIN_BILLABLE_HOURS};
pub use identifier::{RateTierId, RecordId};
pub use parking::{ExitRecord, NewParkingRecord, OccupancyService, ParkingRecord};
pub use rate_tier::{CatalogService, NewRateTier, RateTier, TierStatus};

// Re-export DomainError from shared for convenience
pub use crate::shared::{DomainError, DomainResult};

//! Rate tier aggregate
//!
//! Contains the RateTier entity and the catalog service interface.

pub mod model;
pub mod repository;

pub use model::{NewRateTier, RateTier, TierStatus};
pub use repository::CatalogService;

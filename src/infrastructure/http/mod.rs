//! HTTP adapters for the remote parking API

pub mod catalog;
pub mod client;
pub mod dto;
pub mod envelope;
pub mod lenient;
pub mod occupancy;

pub use catalog::HttpCatalogService;
pub use client::ApiClient;
pub use envelope::{ListEnvelope, MutationAck};
pub use occupancy::HttpOccupancyService;

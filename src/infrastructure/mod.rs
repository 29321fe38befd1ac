//! Infrastructure layer - external concerns

pub mod http;
pub mod storage;

pub use http::{ApiClient, HttpCatalogService, HttpOccupancyService};
pub use storage::{InMemoryCatalog, InMemoryOccupancy};

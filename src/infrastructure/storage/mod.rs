//! In-memory implementations of the service ports

mod memory;

pub use memory::{InMemoryCatalog, InMemoryOccupancy};

//! # Parking Desk
//!
//! Fee engine and operator workflows for a parking lot whose rate tiers and
//! parking records live behind two remote HTTP services.
//!
//! ## Architecture
//!
//! - **domain**: entities, identifiers, the fee engine and service ports
//! - **application**: catalog management, entry, occupancy board and exit workflow
//! - **infrastructure**: HTTP adapters for the remote services, in-memory stores
//! - **runtime**: tracing setup and service wiring
//! - **shared**: errors, time and money formatting, validation helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use runtime::{init_tracing, AppContext};

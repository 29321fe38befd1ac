//! Application services

mod catalog;
mod entry;
mod exit;
mod occupancy;

pub use catalog::CatalogManager;
pub use entry::{EntryReceipt, EntryRequest, EntryService};
pub use exit::{ExitForm, ExitReceipt, ExitWorkflow};
pub use occupancy::{BoardRow, OccupancyBoard, OccupancySnapshot};

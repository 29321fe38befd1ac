pub mod services;

// Re-export key types for convenience
pub use services::{
    BoardRow, CatalogManager, EntryReceipt, EntryRequest, EntryService, ExitForm, ExitReceipt,
    ExitWorkflow, OccupancyBoard, OccupancySnapshot,
};

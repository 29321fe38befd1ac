//! Runtime wiring: tracing setup and the service graph.
//!
//! [`AppContext`] owns the adapters behind the two remote services plus the
//! clock, and hands out the application services built on them.

use std::sync::Arc;

use tracing::info;

use crate::application::{CatalogManager, EntryService, ExitWorkflow, OccupancyBoard};
use crate::config::AppConfig;
use crate::domain::{CatalogService, Clock, OccupancyService, SystemClock};
use crate::infrastructure::{
    ApiClient, HttpCatalogService, HttpOccupancyService, InMemoryCatalog, InMemoryOccupancy,
};
use crate::shared::InfraError;

/// Initialise tracing from config. `RUST_LOG` takes precedence.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Shared handles for one session of the desk
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub catalog: Arc<dyn CatalogService>,
    pub occupancy: Arc<dyn OccupancyService>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Connect to the remote catalog and occupancy services.
    pub fn connect(config: AppConfig) -> Result<Self, InfraError> {
        let client = Arc::new(ApiClient::new(config.api.clone())?);
        info!(base_url = config.api.base_url.as_str(), "Using remote parking API");

        Ok(Self {
            catalog: Arc::new(HttpCatalogService::new(client.clone())),
            occupancy: Arc::new(HttpOccupancyService::new(client)),
            clock: Arc::new(SystemClock),
            config,
        })
    }

    /// In-memory services seeded with the sample tiers.
    pub fn offline(config: AppConfig) -> Self {
        let catalog = Arc::new(InMemoryCatalog::with_sample_tiers());
        let occupancy = Arc::new(InMemoryOccupancy::with_catalog(catalog.clone()));
        info!("Using in-memory parking services");

        Self {
            catalog,
            occupancy,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn catalog_manager(&self) -> CatalogManager {
        CatalogManager::new(self.catalog.clone())
    }

    pub fn entry_service(&self) -> EntryService {
        EntryService::new(self.catalog.clone(), self.occupancy.clone(), self.clock.clone())
    }

    pub fn occupancy_board(&self) -> OccupancyBoard {
        OccupancyBoard::new(self.occupancy.clone())
    }

    pub fn exit_workflow(&self) -> ExitWorkflow {
        ExitWorkflow::new(self.occupancy.clone(), self.catalog.clone(), self.clock.clone())
            .with_recheck(self.config.workflow.recheck_before_exit)
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config.display.currency_symbol
    }
}

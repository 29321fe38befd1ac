//! Configuration module
//!
//! Loaded from a TOML file (default `~/.config/parking-desk/config.toml`).
//! Every section and field has a default, so a missing or partial file is
//! fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::InfraError;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
    pub workflow: WorkflowConfig,
}

/// Remote parking API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds, 0 disables it
    pub request_timeout_secs: u64,
    pub endpoints: EndpointConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 0,
            endpoints: EndpointConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Join the base URL and an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Endpoint paths of the legacy PHP backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub tiers_list: String,
    pub tiers_create: String,
    pub records_list: String,
    pub records_entry: String,
    pub records_exit: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            tiers_list: "/jenis/read2.php".to_string(),
            tiers_create: "/jenis/create.php".to_string(),
            records_list: "/parkir/read2.php".to_string(),
            records_entry: "/parkir/masuk.php".to_string(),
            records_exit: "/parkir/keluar.php".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "Rp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Re-read the record right before submitting an exit, so an exit
    /// recorded meanwhile by another operator is caught.
    pub recheck_before_exit: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            recheck_before_exit: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Load configuration, falling back to defaults when the file does not
    /// exist. A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, InfraError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(raw)?)
    }

    /// Sanity checks that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!(
                "api.base_url must start with http:// or https:// (got '{}')",
                base
            ));
        }

        let endpoints = [
            ("tiers_list", &self.api.endpoints.tiers_list),
            ("tiers_create", &self.api.endpoints.tiers_create),
            ("records_list", &self.api.endpoints.records_list),
            ("records_entry", &self.api.endpoints.records_entry),
            ("records_exit", &self.api.endpoints.records_exit),
        ];
        for (name, path) in endpoints {
            if path.trim().is_empty() {
                return Err(format!("api.endpoints.{} must not be empty", name));
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(format!(
                    "logging.format must be 'pretty' or 'json' (got '{}')",
                    other
                ))
            }
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err("display.currency_symbol must not be empty".to_string());
        }

        Ok(())
    }
}

/// Default configuration path: `<config_dir>/parking-desk/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parking-desk")
        .join("config.toml")
}

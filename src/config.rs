//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the configured API endpoint
pub const API_URL_ENV: &str = "KITAB_BAZAR_API_URL";

/// Default GraphQL endpoint
const DEFAULT_API_ENDPOINT: &str = "http://localhost:8000/graphql/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// GraphQL endpoint URL
    pub api_endpoint: Option<String>,
    /// Timeout for a single API request
    pub request_timeout_secs: Option<u64>,
    /// How long success notifications stay in the status bar
    pub notification_ttl_secs: Option<u64>,
    /// Render organization fields read-only while a registration is in flight
    pub lock_fields_while_submitting: Option<bool>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("np", "kitabbazar", "kitab-bazar-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config: AppConfig = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?;
                Ok(config)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Endpoint from the environment, then the config file, then the default
    pub fn api_endpoint(&self) -> String {
        self.resolve_endpoint(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_endpoint(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_endpoint.clone())
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(
            self.notification_ttl_secs
                .unwrap_or(DEFAULT_NOTIFICATION_TTL_SECS),
        )
    }

    pub fn lock_fields_while_submitting(&self) -> bool {
        self.lock_fields_while_submitting.unwrap_or(false)
    }
}

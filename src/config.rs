//! Centralized configuration for northwind-data consumers.
//!
//! Loaded from `~/.northwind/config.toml`; `DATABASE_URL` in the environment
//! always wins over the file so CI and ad-hoc runs need no config on disk.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default maximum connections for the pool.
/// Kept low for single-service use.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Join behavior for the employee listing.
///
/// The listing aggregates an order count per employee; whether employees with
/// zero orders appear at all is a schema-level choice (inner vs left join),
/// so it is surfaced here rather than hard-coded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeScope {
    /// Inner join: only employees with at least one order.
    #[default]
    WithOrders,
    /// Left join: every employee, zero-order employees with order_count 0.
    All,
}

/// Configuration for the data layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Default scope for `EmployeeRepo::list` when the caller doesn't pick one.
    #[serde(default)]
    pub employee_listing: EmployeeScope,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl DataConfig {
    /// Load config from ~/.northwind/config.toml, then apply env overrides.
    ///
    /// Fails with an actionable error if neither the file nor `DATABASE_URL`
    /// can supply a connection string.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?
        } else {
            let database_url = env::var("DATABASE_URL").map_err(|_| {
                anyhow::anyhow!(
                    "Config not found at {:?} and DATABASE_URL is not set",
                    config_path
                )
            })?;
            Self {
                database_url,
                max_connections: DEFAULT_MAX_CONNECTIONS,
                employee_listing: EmployeeScope::default(),
            }
        };

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }

        Ok(config)
    }

    /// Get config file path: ~/.northwind/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".northwind/config.toml")
    }
}

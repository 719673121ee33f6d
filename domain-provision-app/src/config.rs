//! TOML configuration for the cron binary.
//!
//! Every external endpoint and tuning knob is explicit here; nothing is read
//! from global state at call sites. The config path comes from `--config`,
//! then the `DOMAIN_PROVISION_CONFIG` environment variable, then the default
//! file name in the working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use domain_provision_core::error::{CoreError, CoreResult};
use domain_provision_core::JobConfig;
use serde::Deserialize;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "DOMAIN_PROVISION_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "domain-provision.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub zone_api: ZoneApiConfig,
    pub proxy_admin: ProxyAdminConfig,
    pub mailer: MailerConfig,
    pub platform: PlatformConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the sqlite database file (created if missing).
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneApiConfig {
    /// Base URL of the DNS/zone provider API.
    pub endpoint: String,
    pub api_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyAdminConfig {
    /// Base URL of the reverse-proxy control API.
    pub endpoint: String,
    #[serde(default)]
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Sender address stamped on every notification.
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the platform's internal API (tenant defaults).
    pub endpoint: String,
    pub internal_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-probe timeout in seconds, capped at 10 by the probe itself.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl ProbeConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Maximum `error`-state records re-entered per availability run.
    pub error_retry_batch: usize,
    /// Wall-clock budget per run, in seconds.
    pub run_budget_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        let defaults = JobConfig::default();
        Self {
            error_retry_batch: defaults.error_retry_batch,
            run_budget_secs: defaults.run_budget.as_secs(),
        }
    }
}

impl JobsConfig {
    #[must_use]
    pub fn job_config(&self) -> JobConfig {
        JobConfig {
            error_retry_batch: self.error_retry_batch,
            run_budget: Duration::from_secs(self.run_budget_secs),
        }
    }
}

impl AppConfig {
    /// Load the config from `path`, the `DOMAIN_PROVISION_CONFIG` env var, or
    /// the default file name, in that order of precedence.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let path = path.map_or_else(
            || {
                std::env::var_os(CONFIG_ENV_VAR)
                    .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
            },
            Path::to_path_buf,
        );
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            CoreError::ValidationError(format!("Cannot read config {}: {e}", path.display()))
        })?;
        Self::parse(&raw)
    }

    /// Parse a TOML document.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        toml::from_str(raw)
            .map_err(|e| CoreError::SerializationError(format!("Invalid config: {e}")))
    }
}

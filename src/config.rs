/// Service configuration loader - parses service.toml
///
/// Keeps upstream URLs, timeouts, and the historical preset list out of the
/// code so they can be changed without recompiling the service. Every key is
/// optional; a missing file means "all defaults".

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ingest::counties::COUNTIES_URL;
use crate::ingest::nws::{build_alerts_url, NWS_ALERTS_URL};
use crate::model::HazmonError;

pub const DEFAULT_CONFIG_PATH: &str = "service.toml";
pub const DEFAULT_PORT: u16 = 3003;

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub port: u16,
    /// Request handler threads.
    pub worker_threads: usize,
    pub upstream: UpstreamConfig,
    #[serde(rename = "preset")]
    pub presets: Vec<PresetConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            worker_threads: 4,
            upstream: UpstreamConfig::default(),
            presets: Vec::new(),
        }
    }
}

/// Upstream endpoints and fetch bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub alerts_url: String,
    /// Optional `?area=` narrowing of the live feed, e.g. "FL".
    pub area: Option<String>,
    pub counties_url: String,
    /// NWS requires an identifying User-Agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// The county file is large; it gets its own bound.
    pub reference_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            alerts_url: NWS_ALERTS_URL.to_string(),
            area: None,
            counties_url: COUNTIES_URL.to_string(),
            user_agent: "(hazmon_service, ops@hazmon.local)".to_string(),
            timeout_secs: 15,
            reference_timeout_secs: 60,
        }
    }
}

impl UpstreamConfig {
    /// Live feed URL with the configured area applied.
    pub fn alerts_request_url(&self) -> String {
        build_alerts_url(&self.alerts_url, self.area.as_deref())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn reference_timeout(&self) -> Duration {
        Duration::from_secs(self.reference_timeout_secs)
    }
}

/// One historical snapshot file.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetConfig {
    pub name: String,
    pub path: PathBuf,
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<ServiceConfig, HazmonError> {
    let config: ServiceConfig =
        toml::from_str(contents).map_err(|e| HazmonError::Config(format!("invalid TOML: {}", e)))?;
    validate(&config)?;
    Ok(config)
}

/// Loads configuration from `path`, falling back to defaults when the file
/// does not exist.
///
/// # Errors
/// `HazmonError::Config` when the file exists but is unreadable, malformed,
/// or fails validation.
pub fn load_config(path: &Path) -> Result<ServiceConfig, HazmonError> {
    if !path.exists() {
        return Ok(ServiceConfig::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| HazmonError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse_config(&contents)
}

fn validate(config: &ServiceConfig) -> Result<(), HazmonError> {
    if config.worker_threads == 0 {
        return Err(HazmonError::Config("worker_threads must be at least 1".to_string()));
    }
    if config.upstream.timeout_secs == 0 || config.upstream.reference_timeout_secs == 0 {
        return Err(HazmonError::Config("upstream timeouts must be non-zero".to_string()));
    }
    if config.upstream.user_agent.trim().is_empty() {
        return Err(HazmonError::Config("upstream.user_agent must not be empty".to_string()));
    }

    let mut names: Vec<&str> = config.presets.iter().map(|p| p.name.as_str()).collect();
    names.sort_unstable();
    if let Some(dup) = names.windows(2).find(|w| w[0] == w[1]) {
        return Err(HazmonError::Config(format!("duplicate preset name: {}", dup[0])));
    }

    Ok(())
}

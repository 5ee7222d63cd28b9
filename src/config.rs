use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mock,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub http_base_url: String,
    pub mock_delay_ms: u64,
    pub mock_jitter_ms: u64,
    pub mock_failure_rate: f64,
    /// No timeout when absent; a hung fetch then holds the load indefinitely.
    pub fetch_timeout_seconds: Option<u64>,
    pub default_period_years: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Mock,
            http_base_url: "http://localhost:8080/api".to_string(),
            mock_delay_ms: 1000,
            mock_jitter_ms: 0,
            mock_failure_rate: 0.0,
            fetch_timeout_seconds: None,
            default_period_years: 1,
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

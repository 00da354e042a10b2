use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const APP_NAME: &str = "Titan Saga Admin";
pub const APP_VERSION: &str = "v1.0.0";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where page queries get their payloads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DataSourceMode {
    Mock,
    Remote,
}

impl DataSourceMode {
    pub fn label(&self) -> &'static str {
        match self {
            DataSourceMode::Mock => "mock",
            DataSourceMode::Remote => "remote",
        }
    }
}

impl FromStr for DataSourceMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(DataSourceMode::Mock),
            "remote" => Ok(DataSourceMode::Remote),
            _ => Err(ConfigError::InvalidValue {
                key: "TITAN_DATA_SOURCE",
                value: value.to_string(),
            }),
        }
    }
}

/// Dashboard configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub api_v1_prefix: String,
    pub environment: String,
    pub debug: bool,
    pub data_source: DataSourceMode,
    pub refresh_interval: Duration,
    pub session_file: PathBuf,
    pub log_file: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_v1_prefix: "/api/v1".to_string(),
            environment: "development".to_string(),
            debug: false,
            data_source: DataSourceMode::Mock,
            refresh_interval: Duration::from_secs(30),
            session_file: PathBuf::from("session.json"),
            log_file: PathBuf::from("titan-admin.log"),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("TITAN_API_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(prefix) = lookup("TITAN_API_V1_PREFIX") {
            config.api_v1_prefix = prefix;
        }
        if let Some(env) = lookup("TITAN_ENV") {
            config.environment = env;
        }
        if let Some(debug) = lookup("TITAN_DEBUG") {
            config.debug = debug.eq_ignore_ascii_case("true");
        }
        if let Some(source) = lookup("TITAN_DATA_SOURCE") {
            config.data_source = source.parse()?;
        }
        if let Some(secs) = lookup("TITAN_REFRESH_SECS") {
            let parsed: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "TITAN_REFRESH_SECS",
                value: secs.clone(),
            })?;
            if parsed == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "TITAN_REFRESH_SECS",
                    value: secs,
                });
            }
            config.refresh_interval = Duration::from_secs(parsed);
        }
        if let Some(path) = lookup("TITAN_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("TITAN_LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// `{base_url}{api_v1_prefix}/{endpoint}` with any leading slash on `endpoint` dropped.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            self.api_v1_prefix,
            endpoint.trim_start_matches('/')
        )
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn log_summary(&self) {
        if !self.debug {
            return;
        }
        tracing::info!(
            base_url = %self.base_url,
            prefix = %self.api_v1_prefix,
            environment = %self.environment,
            source = self.data_source.label(),
            refresh_secs = self.refresh_interval.as_secs(),
            "api config"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(
            config.api_url("/metrics/overview"),
            "http://localhost:8000/api/v1/metrics/overview"
        );
        assert!(config.is_development());
    }

    #[test]
    fn overrides_are_read() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("TITAN_API_BASE_URL", "https://titan.example/"),
            ("TITAN_API_V1_PREFIX", "/api/v2"),
            ("TITAN_DEBUG", "TRUE"),
            ("TITAN_DATA_SOURCE", "Remote"),
            ("TITAN_REFRESH_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.api_url("auth/me"), "https://titan.example/api/v2/auth/me");
        assert!(config.debug);
        assert_eq!(config.data_source, DataSourceMode::Remote);
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = DashboardConfig::from_lookup(lookup(&[("TITAN_DATA_SOURCE", "cloud")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "TITAN_DATA_SOURCE",
                value: "cloud".to_string()
            }
        );
        assert!(DashboardConfig::from_lookup(lookup(&[("TITAN_REFRESH_SECS", "0")])).is_err());
        assert!(DashboardConfig::from_lookup(lookup(&[("TITAN_REFRESH_SECS", "soon")])).is_err());
    }
}

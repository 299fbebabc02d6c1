//! Tracing initialisation.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! `fmt` layer. `RUST_LOG` takes precedence over the configured level.

use crate::{TaskboardError, TaskboardResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to the startup event.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log line format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Whether to enable console output.
    #[serde(default = "default_console_output")]
    pub console_output: bool,
}

fn default_service_name() -> String {
    "taskboard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_console_output() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            console_output: default_console_output(),
        }
    }
}

impl TelemetryConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.configured_filter())
    }

    /// Filter built from `log_level` alone; it applies to every target.
    fn configured_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.log_level)
    }
}

/// Initialize tracing with the given configuration.
///
/// Returns a `Configuration` error if a global subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> TaskboardResult<()> {
    if !config.console_output {
        return Ok(());
    }

    let registry = tracing_subscriber::registry().with(config.env_filter());
    let result = match config.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
    };
    result.map_err(|e| TaskboardError::configuration(format!("Failed to install tracing subscriber: {e}")))?;

    tracing::info!(
        service_name = %config.service_name,
        log_format = ?config.log_format,
        "Tracing initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "taskboard");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.console_output);
    }

    #[test]
    fn test_log_format_is_lowercase() {
        let config: TelemetryConfig = serde_json::from_str(r#"{"log_format":"json"}"#).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.service_name, "taskboard");
    }

    #[test]
    fn test_disabled_console_is_noop() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        assert!(init_tracing(&config).is_ok());
    }

    #[test]
    fn test_configured_level_caps_every_target() {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::default()
        };
        assert_eq!(
            config.configured_filter().max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn test_second_install_is_an_error() {
        let config = TelemetryConfig::default();
        let _ = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(matches!(second, Err(TaskboardError::Configuration(_))));
    }
}

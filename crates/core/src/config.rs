use serde::Deserialize;

use crate::error::{RevlensError, RevlensResult};

/// Root application configuration. Loaded from environment variables
/// with the prefix `REVENUE_LENS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Prefix applied to every rendered currency amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Width of the longest bar in rendered charts, in characters.
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_currency_symbol() -> String {
    "$".to_string()
}
fn default_chart_width() -> usize {
    40
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            chart_width: default_chart_width(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> RevlensResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("REVENUE_LENS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| RevlensError::Config(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| RevlensError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.api.http_port, 8080);
        assert_eq!(config.metrics.port, 9091);
        assert_eq!(config.report.currency_symbol, "$");
        assert_eq!(config.report.chart_width, 40);
    }
}

use serde::Deserialize;

use crate::domain::latency::LatencyProfile;
use crate::domain::semantic_cache::Threshold;
use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub latency: LatencyProfile,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Threshold handling for incoming queries
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Threshold used when a request does not carry one
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
    /// Lower bound of the accepted threshold range
    #[serde(default = "default_min_threshold")]
    pub min_threshold: f64,
    /// Upper bound of the accepted threshold range
    #[serde(default = "default_max_threshold")]
    pub max_threshold: f64,
    /// Maximum number of concurrently tracked sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_threshold() -> f64 {
    0.70
}

fn default_min_threshold() -> f64 {
    0.60
}

fn default_max_threshold() -> f64 {
    0.90
}

fn default_max_sessions() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:8080".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
            min_threshold: default_min_threshold(),
            max_threshold: default_max_threshold(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl CacheSettings {
    /// Resolve a caller-supplied threshold into the configured range
    pub fn resolve_threshold(&self, requested: Option<f64>) -> Threshold {
        Threshold::new(requested.unwrap_or(self.default_threshold))
            .clamp_to(self.min_threshold, self.max_threshold)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let in_unit = |v: f64| (Threshold::MIN..=Threshold::MAX).contains(&v);

        if !in_unit(self.min_threshold) || !in_unit(self.max_threshold) {
            return Err(DomainError::configuration(
                "Threshold bounds must lie within [0, 1]",
            ));
        }

        if self.min_threshold > self.max_threshold {
            return Err(DomainError::configuration(format!(
                "min_threshold ({}) exceeds max_threshold ({})",
                self.min_threshold, self.max_threshold
            )));
        }

        if self.max_sessions == 0 {
            return Err(DomainError::configuration("max_sessions must be positive"));
        }

        Ok(())
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.path.starts_with('/') {
            return Err(DomainError::configuration(format!(
                "metrics.path must start with '/' (got '{}')",
                self.path
            )));
        }

        Ok(())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_metrics_path(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Check cross-field constraints the deserializer cannot express
    pub fn validate(&self) -> Result<(), DomainError> {
        self.cache.validate()?;
        self.metrics.validate()?;
        self.latency.validate()
    }
}

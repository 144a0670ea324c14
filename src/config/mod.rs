//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, CorsConfig, LogFormat, LoggingConfig, MetricsConfig, ServerConfig,
};

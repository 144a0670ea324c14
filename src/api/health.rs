//! Health check endpoints

use axum::{http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Serialize;

use crate::api::types::Json;

pub const SERVICE_NAME: &str = "Vector Semantic Cache API";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// Unix seconds
    pub timestamp: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

/// Reports the service as healthy whenever it can answer at all
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::middleware::{logging_middleware, metrics_middleware, REQUEST_ID_HEADER};
use super::state::AppState;
use super::{ask, cache, health, stats};
use crate::config::CorsConfig;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .allow_credentials(true)
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let cors = build_cors_layer(&state.config.cors);
    let metrics_path = state.config.metrics.path.clone();
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut router = Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/ask", post(ask::ask))
        .route("/stats", get(stats::get_stats).delete(stats::reset_stats))
        .route(
            "/stats/snapshot",
            get(stats::get_snapshot).post(stats::restore_snapshot),
        )
        .route("/sessions", get(stats::list_sessions))
        .route("/cache/entries", get(cache::list_entries))
        .route("/cache/entries/{key}", get(cache::get_entry))
        .with_state(state);

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics, &metrics_path));
    }

    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
}

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, health_check, list_palette, list_statuses, retry_fetch, select_status,
    stream_events,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is handled in the response builders, so no CompressionLayer here.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/statuses", get(list_statuses))
        .route("/palette", get(list_palette))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/status", put(select_status))
        .route("/dashboard/retry", post(retry_fetch))
        .route("/dashboard/events", get(stream_events))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

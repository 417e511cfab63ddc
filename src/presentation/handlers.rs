// HTTP request handlers
use crate::domain::palette::PaletteEntry;
use crate::domain::proposal::Status;
use crate::infrastructure::event_stream::ndjson_stream;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

#[derive(Debug, Deserialize)]
pub struct SelectStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusesResponse {
    pub options: Vec<Status>,
    pub selected: Status,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Filter options, in the order the selection control shows them
pub async fn list_statuses(State(state): State<Arc<AppState>>) -> Json<StatusesResponse> {
    Json(StatusesResponse {
        options: Status::OPTIONS.to_vec(),
        selected: state.dashboard.selected_status(),
    })
}

/// Category colors with their translucent borders, for legends
pub async fn list_palette(State(state): State<Arc<AppState>>) -> Json<Vec<PaletteEntry>> {
    Json(state.dashboard.palette())
}

/// Current dashboard view
pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let view = state.dashboard.view().await;
    tracing::debug!(
        "Serving {} view (generation {})",
        view.status(),
        state.dashboard.readiness().generation
    );
    view_response(&view, &headers).await
}

/// Change the selected status
pub async fn select_status(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectStatusRequest>,
) -> Response {
    let status = match request.status.parse::<Status>() {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("Rejected status selection: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let view = state.dashboard.select_status(status).await;
    view_response(&view, &headers).await
}

/// Re-issue the upstream fetch
pub async fn retry_fetch(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.dashboard.retry().await;
    view_response(&view, &headers).await
}

/// Stream the view every time readiness or data changes
pub async fn stream_events(State(state): State<Arc<AppState>>) -> Response {
    let dashboard = state.dashboard.clone();
    let mut changes = WatchStream::new(dashboard.subscribe());

    // The first item is the current snapshot, so clients start with a view.
    let views = async_stream::stream! {
        while changes.next().await.is_some() {
            yield dashboard.view().await;
        }
    };

    match ndjson_stream(views) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

async fn view_response<T: Serialize>(view: &T, headers: &HeaderMap) -> Response {
    match json_response(view, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

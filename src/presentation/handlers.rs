// HTTP request handlers
use crate::domain::telemetry::ChartGroup;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest assembled dashboard, 503 until the first cycle succeeds
pub async fn latest_dashboard(State(state): State<Arc<AppState>>) -> Response {
    match state.latest() {
        Some(dashboard) => Json(dashboard.as_ref()).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "no reading yet").into_response(),
    }
}

/// A single chart group from the latest dashboard
pub async fn chart_group(
    Path(group): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(group) = ChartGroup::from_key(&group) else {
        return (StatusCode::NOT_FOUND, format!("unknown chart group: {}", group)).into_response();
    };

    let Some(dashboard) = state.latest() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "no reading yet").into_response();
    };

    match dashboard.chart(group) {
        Some(chart) => Json(chart).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

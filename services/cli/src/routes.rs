use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use bademeister::auction::ScheduleStatus;
use bademeister::error::AppError;
use bademeister::portraits::Avatar;
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct PortraitQuery {
    #[serde(default)]
    pub(crate) name: String,
}

pub(crate) fn with_portrait_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/portraits", get(portrait_endpoint))
        .route("/api/v1/schedule", get(schedule_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn portrait_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<PortraitQuery>,
) -> Result<Json<Avatar>, AppError> {
    if query.name.trim().is_empty() {
        return Err(AppError::Usage("query parameter 'name' is required".to_string()));
    }

    let image_url = state.portraits.resolve(&query.name).await;
    Ok(Json(Avatar::for_player(&query.name, image_url)))
}

pub(crate) async fn schedule_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ScheduleStatus> {
    Json(state.calendar.status(Local::now().naive_local()))
}

//! Routes for the Alarms bounded context.
//!
//! Thin translators: each handler builds a command or picks a query and
//! forwards to the `AlarmService`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use klaxon_alarms::domain::alarm::{AlarmItem, AlarmSnapshot};
use klaxon_alarms::domain::commands::CreateAlarm;
use klaxon_alarms::domain::read_model::AlarmReadModel;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/v1/alarms`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlarmRequest {
    /// Alarm display name.
    pub name: String,
    /// Severity level name.
    pub severity: String,
    /// When the alarm condition was observed; defaults to now.
    pub triggered_at: Option<DateTime<Utc>>,
    /// Items attached to the alarm.
    #[serde(default)]
    pub items: Vec<AlarmItemRequest>,
}

/// One item in the create request.
#[derive(Debug, Deserialize)]
pub struct AlarmItemRequest {
    /// Item name.
    pub name: String,
    /// Item type.
    #[serde(rename = "type")]
    pub kind: String,
}

/// POST /api/v1/alarms
async fn create_alarm(
    State(state): State<AppState>,
    Json(request): Json<CreateAlarmRequest>,
) -> Result<(StatusCode, Json<AlarmSnapshot>), ApiError> {
    let command = CreateAlarm {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        severity: request.severity,
        triggered_at: request.triggered_at,
        items: request
            .items
            .into_iter()
            .map(|item| AlarmItem::new(item.name, item.kind))
            .collect(),
    };
    let snapshot = state.service.create(command).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/alarms. Lists alarms from the document read store.
async fn list_alarms(
    State(state): State<AppState>,
) -> Result<Json<Vec<AlarmReadModel>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

/// GET /api/v1/alarms/relational. Lists alarms from the relational read
/// store; kept distinct from the document-backed list because the stores may
/// diverge transiently.
async fn list_alarms_relational(
    State(state): State<AppState>,
) -> Result<Json<Vec<AlarmReadModel>>, ApiError> {
    Ok(Json(state.service.list_relational().await?))
}

/// Returns the router for the alarms context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alarms).post(create_alarm))
        .route("/relational", get(list_alarms_relational))
}

use axum::{extract::State, Json};
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::models::{ControlRequest, ControlResponse, IngestResponse, StatusResponse, SystemHealth};
use crate::device::{ControlAction, SensorPayload};
use crate::error::Result;

/// POST /api/iot/data — ingest one sensor reading from the device.
pub async fn ingest_data(
    State(state): State<AppState>,
    Json(payload): Json<SensorPayload>,
) -> Result<Json<IngestResponse>> {
    let result = state.manager.ingest(&payload).await?;

    info!(
        voltage = result.reading.voltage,
        current = result.reading.current,
        power = result.reading.power,
        ssr = if result.ssr_status { "ON" } else { "OFF" },
        "data received"
    );

    Ok(Json(IngestResponse {
        success: true,
        ssr_status: result.ssr_status,
        received_data: result.reading,
    }))
}

/// GET /api/iot/status — snapshot for the dashboard poll loop.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.manager.status().await;

    Json(StatusResponse {
        ssr_status: snapshot.ssr_status,
        last_update: snapshot.last_update,
        system_health: SystemHealth {
            over_current: snapshot.over_current,
            last_voltage: snapshot.last_voltage,
        },
    })
}

/// POST /api/iot/control — manual relay control from the dashboard.
pub async fn control(
    State(state): State<AppState>,
    Json(request): Json<ControlRequest>,
) -> Result<Json<ControlResponse>> {
    let action: ControlAction = request.action.parse()?;
    let result = state.manager.apply_control(action).await;

    Ok(Json(ControlResponse {
        success: true,
        ssr_status: result.ssr_status,
        over_current_lock: result.over_current_lock,
    }))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::SensorReading;

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub ssr_status: bool,
    pub received_data: SensorReading,
}

#[derive(Debug, Serialize)]
pub struct SystemHealth {
    pub over_current: bool,
    pub last_voltage: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub ssr_status: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub system_health: SystemHealth,
}

#[derive(Debug, Deserialize)]
pub struct ControlRequest {
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub success: bool,
    pub ssr_status: bool,
    pub over_current_lock: bool,
}

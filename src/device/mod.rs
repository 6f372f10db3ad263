use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};

/// One accepted measurement from the power sensor. The timestamp is assigned
/// server-side at ingestion; the device clock is never trusted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub energy: f64,
    pub pf: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Raw sensor payload as submitted by the device, prior to validation.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorPayload {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub power: Option<f64>,
    pub energy: Option<f64>,
    pub pf: Option<f64>,
}

/// Volatile state of the single monitored SSR. Lives for the process
/// lifetime; a restart returns it to `default()`.
#[derive(Debug, Clone)]
pub struct DeviceState {
    pub ssr_status: bool,
    pub over_current_triggered: bool,
    pub last_data: Option<SensorReading>,
    pub last_update: Option<DateTime<Utc>>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            ssr_status: true,
            over_current_triggered: false,
            last_data: None,
            last_update: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Reset,
    On,
    Off,
}

impl FromStr for ControlAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reset" => Ok(ControlAction::Reset),
            "on" => Ok(ControlAction::On),
            "off" => Ok(ControlAction::Off),
            _ => Err(AppError::InvalidAction(
                "Invalid action. Use 'on', 'off', or 'reset'".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestResult {
    pub ssr_status: bool,
    pub reading: SensorReading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub ssr_status: bool,
    pub last_update: Option<DateTime<Utc>>,
    pub over_current: bool,
    pub last_voltage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlResult {
    pub ssr_status: bool,
    pub over_current_lock: bool,
}

/// Owns the shared `DeviceState` and serializes every read and mutation
/// behind one mutex, so the check-then-set in `ingest` is atomic with
/// respect to concurrent control and status calls.
#[derive(Clone)]
pub struct DeviceStateManager {
    state: Arc<Mutex<DeviceState>>,
    over_current_limit: f64,
}

impl DeviceStateManager {
    pub fn new(over_current_limit: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(DeviceState::default())),
            over_current_limit,
        }
    }

    /// Validate and record one sensor reading, applying the over-current
    /// cutoff before the reading replaces `last_data`.
    ///
    /// Required fields follow the upstream "truthy" policy: absent and
    /// literal-zero values are both rejected as missing. A zero `pf` is
    /// likewise stored as absent.
    pub async fn ingest(&self, payload: &SensorPayload) -> Result<IngestResult> {
        let voltage = required(payload.voltage)?;
        let current = required(payload.current)?;
        let power = required(payload.power)?;
        let energy = required(payload.energy)?;

        let mut state = self.state.lock().await;

        if current > self.over_current_limit {
            state.over_current_triggered = true;
            state.ssr_status = false;
            tracing::warn!(
                current,
                limit = self.over_current_limit,
                "over-current detected, SSR tripped off"
            );
        }

        let reading = SensorReading {
            voltage,
            current,
            power,
            energy,
            pf: payload.pf.filter(|pf| *pf != 0.0),
            timestamp: Utc::now(),
        };

        state.last_update = Some(reading.timestamp);
        state.last_data = Some(reading.clone());

        Ok(IngestResult {
            ssr_status: state.ssr_status,
            reading,
        })
    }

    /// Snapshot of the current state. Never fails, never mutates.
    pub async fn status(&self) -> StatusSnapshot {
        let state = self.state.lock().await;

        StatusSnapshot {
            ssr_status: state.ssr_status,
            last_update: state.last_update,
            over_current: state.over_current_triggered,
            last_voltage: state.last_data.as_ref().map(|data| data.voltage),
        }
    }

    /// Apply a manual control action.
    ///
    /// `reset` is the only path that clears the over-current latch, and it
    /// always re-energizes the SSR. `on` deliberately leaves the latch as-is,
    /// matching the upstream behavior.
    pub async fn apply_control(&self, action: ControlAction) -> ControlResult {
        let mut state = self.state.lock().await;

        match action {
            ControlAction::Reset => {
                state.over_current_triggered = false;
                state.ssr_status = true;
                tracing::info!("system reset, latch cleared");
            }
            ControlAction::On => {
                state.ssr_status = true;
                tracing::info!("SSR manually activated");
            }
            ControlAction::Off => {
                state.ssr_status = false;
                tracing::info!("SSR manually deactivated");
            }
        }

        ControlResult {
            ssr_status: state.ssr_status,
            over_current_lock: state.over_current_triggered,
        }
    }
}

fn required(value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) if v != 0.0 => Ok(v),
        _ => Err(AppError::Validation(
            "Missing required sensor data".to_string(),
        )),
    }
}

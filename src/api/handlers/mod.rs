pub mod health;
pub mod iot;

use crate::{config::Config, device::DeviceStateManager};

#[derive(Clone)]
pub struct AppState {
    pub manager: DeviceStateManager,
    pub config: Config,
}

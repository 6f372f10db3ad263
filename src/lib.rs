pub mod api;
pub mod auth;
pub mod config;
pub mod device;
pub mod error;

pub use config::Config;
pub use device::DeviceStateManager;
pub use error::{AppError, Result};

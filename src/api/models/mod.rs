pub mod iot;

pub use iot::*;

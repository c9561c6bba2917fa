pub mod common;
pub mod device;
pub mod display;
mod display_driver;
mod error;

pub use device::{Device, DeviceConfig, EpdResult, Error};

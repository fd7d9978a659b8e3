#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod backoff;
pub mod board;
pub mod config;
pub mod constants;
pub mod fall;
pub mod sensor;
pub mod validation;

#[cfg(test)]
mod cfg_toml;

// Needs the radio driver and the embassy network stack
#[cfg(feature = "embedded")]
pub mod wifi;

pub use config::{DeviceConfig, WifiCredentials};
pub use validation::{ConfigError, Field};

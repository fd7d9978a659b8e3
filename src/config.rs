use core::fmt;
use core::time::Duration;

use crate::constants::{PLACEHOLDER_WIFI_PASSWORD, PLACEHOLDER_WIFI_SSID};
use crate::validation::ConfigError;

/// Settings baked into the firmware image from `cfg.toml`.
///
/// Built once at compile time and shared by reference for the life of the
/// process. Nothing mutates it at runtime.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    // Device ID (used as DHCP hostname)
    pub device_id: &'static str,

    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'static str,

    // Wi-Fi pre-shared key (password)
    pub wifi_password: &'static str,

    // Backend server hostname or IPv4 address
    pub backend_host: &'static str,

    // Backend server port
    pub backend_port: u16,

    // Path that sensor readings are posted to
    pub backend_endpoint: &'static str,

    // GPIO receiving from the radar sensor
    pub sensor_rx_pin: u8,

    // GPIO transmitting to the radar sensor
    pub sensor_tx_pin: u8,

    // Fixed baud rate of the radar sensor
    pub sensor_baud_rate: u32,

    // Installation height in cm
    pub fall_install_height_cm: u16,

    // Fall time threshold in seconds
    pub fall_time_threshold_secs: u32,

    // Unmanned time in seconds
    pub fall_unmanned_time_secs: u32,

    // Residence time in seconds
    pub fall_residence_time_secs: u32,

    // Fall sensitivity (1-5)
    pub fall_sensitivity: u8,

    // Send data every N milliseconds
    pub data_send_interval_ms: u32,

    // Local HTTP server port
    pub http_server_port: u16,
}

impl DeviceConfig {
    /// Value of every key left out of `cfg.toml`
    pub const DEFAULT: DeviceConfig = DeviceConfig {
        device_id: "norn-sensor",
        wifi_ssid: PLACEHOLDER_WIFI_SSID,
        wifi_password: PLACEHOLDER_WIFI_PASSWORD,
        backend_host: "192.168.1.100",
        backend_port: 8000,
        backend_endpoint: "/api/v1/sensor/data",
        sensor_rx_pin: 4,
        sensor_tx_pin: 5,
        sensor_baud_rate: 115_200,
        fall_install_height_cm: 270,
        fall_time_threshold_secs: 5,
        fall_unmanned_time_secs: 1,
        fall_residence_time_secs: 200,
        fall_sensitivity: 3,
        data_send_interval_ms: 1000,
        http_server_port: 80,
    };

    pub fn wifi(&self) -> WifiCredentials {
        WifiCredentials {
            ssid: self.wifi_ssid,
            password: self.wifi_password,
        }
    }

    /// Period between two readings sent to the backend
    pub fn data_send_interval(&self) -> Duration {
        Duration::from_millis(self.data_send_interval_ms.into())
    }

    pub fn http_server_port(&self) -> u16 {
        self.http_server_port
    }

    /// True while either Wi-Fi credential is still the template value
    pub fn has_placeholder_credentials(&self) -> bool {
        self.wifi_ssid == PLACEHOLDER_WIFI_SSID || self.wifi_password == PLACEHOLDER_WIFI_PASSWORD
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// The Wi-Fi password never reaches the logs
impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("device_id", &self.device_id)
            .field("wifi_ssid", &self.wifi_ssid)
            .field("wifi_password", &"<redacted>")
            .field("backend_host", &self.backend_host)
            .field("backend_port", &self.backend_port)
            .field("backend_endpoint", &self.backend_endpoint)
            .field("sensor_rx_pin", &self.sensor_rx_pin)
            .field("sensor_tx_pin", &self.sensor_tx_pin)
            .field("sensor_baud_rate", &self.sensor_baud_rate)
            .field("fall_install_height_cm", &self.fall_install_height_cm)
            .field("fall_time_threshold_secs", &self.fall_time_threshold_secs)
            .field("fall_unmanned_time_secs", &self.fall_unmanned_time_secs)
            .field("fall_residence_time_secs", &self.fall_residence_time_secs)
            .field("fall_sensitivity", &self.fall_sensitivity)
            .field("data_send_interval_ms", &self.data_send_interval_ms)
            .field("http_server_port", &self.http_server_port)
            .finish()
    }
}

/// Station credentials for the network client
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: &'static str,
    pub password: &'static str,
}

impl fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// The configuration baked into this image.
pub fn get() -> &'static DeviceConfig {
    &CONFIG
}

/// Validates the baked configuration. Call once at startup, before any other
/// subsystem reads it.
pub fn init() -> Result<&'static DeviceConfig, ConfigError> {
    let config = get();

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        return Err(e);
    }

    if config.has_placeholder_credentials() {
        log::warn!("Wi-Fi credentials are still the template values, update cfg.toml");
    }

    log::info!("Configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_the_baked_record() {
        assert!(core::ptr::eq(get(), &CONFIG));
        assert_eq!(*get(), CONFIG);
    }

    #[test]
    fn shipped_template_is_valid() {
        let config = init().unwrap();
        assert_eq!(config, get());
    }

    #[test]
    fn debug_redacts_password() {
        let config = DeviceConfig {
            wifi_password: "hunter22",
            ..DeviceConfig::DEFAULT
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("<redacted>"));

        let rendered = format!("{:?}", config.wifi());
        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("YOUR_WIFI_SSID"));
    }

    #[test]
    fn placeholder_detection() {
        assert!(DeviceConfig::DEFAULT.has_placeholder_credentials());

        let config = DeviceConfig {
            wifi_ssid: "Home",
            wifi_password: "correct horse",
            ..DeviceConfig::DEFAULT
        };
        assert!(!config.has_placeholder_credentials());
    }

    #[test]
    fn interval_and_port_accessors() {
        let config = DeviceConfig {
            data_send_interval_ms: 250,
            http_server_port: 8080,
            ..DeviceConfig::DEFAULT
        };
        assert_eq!(config.data_send_interval(), Duration::from_millis(250));
        assert_eq!(config.http_server_port(), 8080);
    }
}

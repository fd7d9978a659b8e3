//! Startup checks on the baked configuration.
//!
//! Nothing downstream re-checks these values: the sensor driver, the network
//! client and the HTTP server all assume a record that passed
//! [`DeviceConfig::validate`].

use core::fmt;

use crate::board;
use crate::config::DeviceConfig;
use crate::constants::{MAX_HOSTNAME_LEN, MAX_PASSWORD_LEN, MAX_SSID_LEN};

/// A `DeviceConfig` field, named after its `cfg.toml` key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DeviceId,
    WifiSsid,
    WifiPassword,
    BackendHost,
    BackendPort,
    BackendEndpoint,
    SensorRxPin,
    SensorTxPin,
    SensorBaudRate,
    FallInstallHeightCm,
    FallTimeThresholdSecs,
    FallUnmannedTimeSecs,
    FallResidenceTimeSecs,
    FallSensitivity,
    DataSendIntervalMs,
    HttpServerPort,
}

impl Field {
    pub const fn key(self) -> &'static str {
        match self {
            Field::DeviceId => "device_id",
            Field::WifiSsid => "wifi_ssid",
            Field::WifiPassword => "wifi_password",
            Field::BackendHost => "backend_host",
            Field::BackendPort => "backend_port",
            Field::BackendEndpoint => "backend_endpoint",
            Field::SensorRxPin => "sensor_rx_pin",
            Field::SensorTxPin => "sensor_tx_pin",
            Field::SensorBaudRate => "sensor_baud_rate",
            Field::FallInstallHeightCm => "fall_install_height_cm",
            Field::FallTimeThresholdSecs => "fall_time_threshold_secs",
            Field::FallUnmannedTimeSecs => "fall_unmanned_time_secs",
            Field::FallResidenceTimeSecs => "fall_residence_time_secs",
            Field::FallSensitivity => "fall_sensitivity",
            Field::DataSendIntervalMs => "data_send_interval_ms",
            Field::HttpServerPort => "http_server_port",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Empty(Field),
    TooLong { field: Field, max: usize, len: usize },
    InvalidHost(Field),
    Whitespace(Field),
    PortZero(Field),
    EndpointMissingSlash(Field),
    InvalidPin { field: Field, pin: u8 },
    PinNotOutputCapable { field: Field, pin: u8 },
    PinConflict { field: Field, pin: u8 },
    Zero(Field),
    SensitivityOutOfRange(u8),
    UrlTooLong(Field),
}

impl ConfigError {
    /// The offending field
    pub fn field(&self) -> Field {
        match *self {
            ConfigError::Empty(field)
            | ConfigError::TooLong { field, .. }
            | ConfigError::InvalidHost(field)
            | ConfigError::Whitespace(field)
            | ConfigError::PortZero(field)
            | ConfigError::EndpointMissingSlash(field)
            | ConfigError::InvalidPin { field, .. }
            | ConfigError::PinNotOutputCapable { field, .. }
            | ConfigError::PinConflict { field, .. }
            | ConfigError::Zero(field)
            | ConfigError::UrlTooLong(field) => field,
            ConfigError::SensitivityOutOfRange(_) => Field::FallSensitivity,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field();
        match *self {
            ConfigError::Empty(_) => write!(f, "{field} must not be empty"),
            ConfigError::TooLong { max, len, .. } => {
                write!(f, "{field} is {len} bytes, at most {max} allowed")
            }
            ConfigError::InvalidHost(_) => {
                write!(f, "{field} must be a bare hostname or IPv4 address")
            }
            ConfigError::Whitespace(_) => write!(f, "{field} must not contain whitespace"),
            ConfigError::PortZero(_) => write!(f, "{field} must be between 1 and 65535"),
            ConfigError::EndpointMissingSlash(_) => write!(f, "{field} must start with '/'"),
            ConfigError::InvalidPin { pin, .. } => {
                write!(f, "{field}: GPIO{pin} does not exist or is reserved for flash")
            }
            ConfigError::PinNotOutputCapable { pin, .. } => {
                write!(f, "{field}: GPIO{pin} is input-only")
            }
            ConfigError::PinConflict { pin, .. } => {
                write!(f, "{field}: GPIO{pin} is already assigned to sensor_rx_pin")
            }
            ConfigError::Zero(_) => write!(f, "{field} must be greater than zero"),
            ConfigError::SensitivityOutOfRange(level) => {
                write!(f, "{field} must be between 1 and 5 (got {level})")
            }
            ConfigError::UrlTooLong(_) => write!(f, "{field} makes the backend URL too long"),
        }
    }
}

fn non_empty(field: Field, value: &str, max: usize) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty(field));
    }
    if value.len() > max {
        return Err(ConfigError::TooLong {
            field,
            max,
            len: value.len(),
        });
    }
    Ok(())
}

fn no_whitespace(field: Field, value: &str) -> Result<(), ConfigError> {
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Whitespace(field));
    }
    Ok(())
}

fn port(field: Field, value: u16) -> Result<(), ConfigError> {
    match value {
        0 => Err(ConfigError::PortZero(field)),
        _ => Ok(()),
    }
}

fn positive(field: Field, value: u32) -> Result<(), ConfigError> {
    match value {
        0 => Err(ConfigError::Zero(field)),
        _ => Ok(()),
    }
}

impl DeviceConfig {
    /// Checks every field in declaration order and reports the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty(Field::DeviceId, self.device_id, MAX_HOSTNAME_LEN)?;
        no_whitespace(Field::DeviceId, self.device_id)?;
        non_empty(Field::WifiSsid, self.wifi_ssid, MAX_SSID_LEN)?;
        non_empty(Field::WifiPassword, self.wifi_password, MAX_PASSWORD_LEN)?;

        if self.backend_host.is_empty() {
            return Err(ConfigError::Empty(Field::BackendHost));
        }
        if self
            .backend_host
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == ':')
        {
            return Err(ConfigError::InvalidHost(Field::BackendHost));
        }
        port(Field::BackendPort, self.backend_port)?;
        if !self.backend_endpoint.starts_with('/') {
            return Err(ConfigError::EndpointMissingSlash(Field::BackendEndpoint));
        }
        no_whitespace(Field::BackendEndpoint, self.backend_endpoint)?;

        if !board::is_usable(self.sensor_rx_pin) {
            return Err(ConfigError::InvalidPin {
                field: Field::SensorRxPin,
                pin: self.sensor_rx_pin,
            });
        }
        if !board::is_usable(self.sensor_tx_pin) {
            return Err(ConfigError::InvalidPin {
                field: Field::SensorTxPin,
                pin: self.sensor_tx_pin,
            });
        }
        if !board::is_output_capable(self.sensor_tx_pin) {
            return Err(ConfigError::PinNotOutputCapable {
                field: Field::SensorTxPin,
                pin: self.sensor_tx_pin,
            });
        }
        if self.sensor_tx_pin == self.sensor_rx_pin {
            return Err(ConfigError::PinConflict {
                field: Field::SensorTxPin,
                pin: self.sensor_tx_pin,
            });
        }
        positive(Field::SensorBaudRate, self.sensor_baud_rate)?;

        self.fall_detection()?;

        positive(Field::DataSendIntervalMs, self.data_send_interval_ms)?;
        port(Field::HttpServerPort, self.http_server_port)?;

        // endpoint must fit the rendered URL buffer
        self.backend().url()?;

        Ok(())
    }
}

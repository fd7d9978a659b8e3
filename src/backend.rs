use core::fmt::Write;

use heapless::String;

use crate::config::DeviceConfig;
use crate::constants::MAX_URL_LEN;
use crate::validation::{ConfigError, Field};

/// Where sensor readings are posted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendConfig {
    /// Hostname or IPv4 literal
    pub host: &'static str,
    pub port: u16,
    /// Path component, always starts with `/`
    pub endpoint: &'static str,
}

impl BackendConfig {
    /// Full URL of the ingestion endpoint, e.g. `http://192.168.1.100:8000/api/v1/sensor/data`
    pub fn url(&self) -> Result<String<MAX_URL_LEN>, ConfigError> {
        let mut url: String<MAX_URL_LEN> = String::new();
        write!(url, "http://{}:{}{}", self.host, self.port, self.endpoint)
            .map_err(|_| ConfigError::UrlTooLong(Field::BackendEndpoint))?;
        Ok(url)
    }
}

impl DeviceConfig {
    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            host: self.backend_host,
            port: self.backend_port,
            endpoint: self.backend_endpoint,
        }
    }
}

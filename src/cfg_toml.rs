//! `cfg.toml` parsing and code generation. Compiled into `build.rs`, and into
//! the library only for its unit tests.

use std::{error::Error, fmt::Write as _};

use serde::Deserialize;

/// Port as written in `cfg.toml`: older configs quote it as a string.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawPort {
    Number(u16),
    Text(String),
}

impl RawPort {
    fn resolve(self, key: &str) -> Result<u16, String> {
        match self {
            RawPort::Number(port) => Ok(port),
            RawPort::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("{key}: {text:?} is not a port number")),
        }
    }
}

// Every key is optional, missing keys keep `DeviceConfig::DEFAULT`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    device_id: Option<String>,
    wifi_ssid: Option<String>,
    wifi_password: Option<String>,
    backend_host: Option<String>,
    backend_port: Option<RawPort>,
    backend_endpoint: Option<String>,
    sensor_rx_pin: Option<u8>,
    sensor_tx_pin: Option<u8>,
    sensor_baud_rate: Option<u32>,
    fall_install_height_cm: Option<u16>,
    fall_time_threshold_secs: Option<u32>,
    fall_unmanned_time_secs: Option<u32>,
    fall_residence_time_secs: Option<u32>,
    fall_sensitivity: Option<u8>,
    data_send_interval_ms: Option<u32>,
    http_server_port: Option<u16>,
}

pub fn parse(toml_str: &str) -> Result<RawConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Rust source for the `CONFIG` static, only the keys present in the file are spelled out.
pub fn render(raw: RawConfig) -> Result<String, Box<dyn Error>> {
    let mut fields = String::new();

    macro_rules! field {
        ($name:ident, str) => {
            if let Some(value) = raw.$name {
                writeln!(fields, "    {}: {:?},", stringify!($name), value)?;
            }
        };
        ($name:ident) => {
            if let Some(value) = raw.$name {
                writeln!(fields, "    {}: {},", stringify!($name), value)?;
            }
        };
    }

    field!(device_id, str);
    field!(wifi_ssid, str);
    field!(wifi_password, str);
    field!(backend_host, str);
    if let Some(port) = raw.backend_port {
        writeln!(fields, "    backend_port: {},", port.resolve("backend_port")?)?;
    }
    field!(backend_endpoint, str);
    field!(sensor_rx_pin);
    field!(sensor_tx_pin);
    field!(sensor_baud_rate);
    field!(fall_install_height_cm);
    field!(fall_time_threshold_secs);
    field!(fall_unmanned_time_secs);
    field!(fall_residence_time_secs);
    field!(fall_sensitivity);
    field!(data_send_interval_ms);
    field!(http_server_port);

    Ok(format!(
        "pub static CONFIG: DeviceConfig = DeviceConfig {{\n{fields}    ..DeviceConfig::DEFAULT\n}};\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(toml_str: &str) -> String {
        render(parse(toml_str).unwrap()).unwrap()
    }

    #[test]
    fn home_network_overrides_three_keys() {
        let code = generate(
            r#"
            wifi_ssid = "Home"
            backend_port = 8000
            fall_sensitivity = 3
            "#,
        );

        assert_eq!(
            code,
            "pub static CONFIG: DeviceConfig = DeviceConfig {\n    \
             wifi_ssid: \"Home\",\n    \
             backend_port: 8000,\n    \
             fall_sensitivity: 3,\n    \
             ..DeviceConfig::DEFAULT\n};\n"
        );
    }

    #[test]
    fn empty_file_keeps_every_default() {
        assert_eq!(
            generate(""),
            "pub static CONFIG: DeviceConfig = DeviceConfig {\n    ..DeviceConfig::DEFAULT\n};\n"
        );
    }

    #[test]
    fn quoted_port_is_accepted() {
        let code = generate(r#"backend_port = " 8000 ""#);
        assert!(code.contains("    backend_port: 8000,\n"), "{code}");
    }

    #[test]
    fn non_numeric_port_names_the_key() {
        let raw = parse(r#"backend_port = "80a0""#).unwrap();
        let err = render(raw).unwrap_err().to_string();
        assert!(err.starts_with("backend_port:"), "{err}");
    }

    #[test]
    fn port_above_u16_is_rejected() {
        assert!(parse("backend_port = 70000").is_err());
        assert!(parse("http_server_port = 70000").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse(r#"wifi_sid = "Home""#).err().unwrap().to_string();
        assert!(err.contains("wifi_sid"), "{err}");
    }

    #[test]
    fn strings_are_escaped_as_rust_literals() {
        let code = generate(r#"wifi_password = "pa\"ss\\word""#);
        assert!(
            code.contains(r#"    wifi_password: "pa\"ss\\word","#),
            "{code}"
        );
    }

    #[test]
    fn shipped_template_renders_every_key() {
        let code = generate(include_str!("../cfg.toml.example"));
        for key in [
            "device_id",
            "wifi_ssid",
            "wifi_password",
            "backend_host",
            "backend_port",
            "backend_endpoint",
            "sensor_rx_pin",
            "sensor_tx_pin",
            "sensor_baud_rate",
            "fall_install_height_cm",
            "fall_time_threshold_secs",
            "fall_unmanned_time_secs",
            "fall_residence_time_secs",
            "fall_sensitivity",
            "data_send_interval_ms",
            "http_server_port",
        ] {
            assert!(code.contains(&format!("\n    {key}: ")), "{key} missing");
        }
    }
}

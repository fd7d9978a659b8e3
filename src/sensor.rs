use crate::config::DeviceConfig;

/// UART wiring of the radar sensor. The link is always 8N1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorUartConfig {
    pub rx_pin: u8,
    pub tx_pin: u8,
    pub baud_rate: u32,
}

impl DeviceConfig {
    pub fn sensor_uart(&self) -> SensorUartConfig {
        SensorUartConfig {
            rx_pin: self.sensor_rx_pin,
            tx_pin: self.sensor_tx_pin,
            baud_rate: self.sensor_baud_rate,
        }
    }
}

#[cfg(feature = "embedded")]
impl SensorUartConfig {
    pub fn hal_config(&self) -> esp_hal::uart::Config {
        use crate::constants::UART_READ_BUFFER_SIZE;
        use esp_hal::uart::{Config, DataBits, Parity, RxConfig, StopBits};

        Config::default()
            .with_rx(RxConfig::default().with_fifo_full_threshold(UART_READ_BUFFER_SIZE as u16))
            .with_baudrate(self.baud_rate)
            .with_stop_bits(StopBits::_1)
            .with_data_bits(DataBits::_8)
            .with_parity(Parity::None)
    }
}

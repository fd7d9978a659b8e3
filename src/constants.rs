/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size of the heap in DRAM (Wi-Fi driver and network stack)
pub const HEAP_SIZE: usize = 72 * 1024;

/// Longest DHCP hostname accepted by the network stack
pub const MAX_HOSTNAME_LEN: usize = 32;
/// Longest SSID allowed by 802.11
pub const MAX_SSID_LEN: usize = 32;
/// Longest WPA2 passphrase
pub const MAX_PASSWORD_LEN: usize = 64;
/// Capacity of the rendered backend URL
pub const MAX_URL_LEN: usize = 128;

/// Buffer size for UART read operations (radar sensor)
pub const UART_READ_BUFFER_SIZE: usize = 64;

/// Give up on a single Wi-Fi association attempt after this long
pub const WIFI_CONNECT_TIMEOUT_SECS: u64 = 30;
/// Back-off before retrying a failed or dropped Wi-Fi association
pub const WIFI_RECONNECT_DELAY_MS: u64 = 5000;
/// Ceiling for the doubling reconnect back-off
pub const WIFI_RECONNECT_MAX_DELAY_MS: u64 = 60_000;
/// Poll period while waiting for link and DHCP lease
pub const NETWORK_POLL_INTERVAL_MS: u64 = 500;

/// Template values shipped in `cfg.toml.example`
pub const PLACEHOLDER_WIFI_SSID: &str = "YOUR_WIFI_SSID";
pub const PLACEHOLDER_WIFI_PASSWORD: &str = "YOUR_WIFI_PASSWORD";

//! Station mode: join the configured network and keep the DHCP lease.

use core::str::FromStr;

use embassy_executor::Spawner;
use embassy_net::{Ipv4Cidr, Runner, Stack, StackResources};
use embassy_time::{with_timeout, Duration, Timer};
use esp_hal::rng::Rng;
use esp_radio::wifi::{
    ClientConfig, Config, ModeConfig, WifiController, WifiDevice, WifiError, WifiEvent,
    WifiStaState,
};
use esp_radio::Controller;
use heapless::String;
use log::{info, warn};
use static_cell::StaticCell;

use crate::backoff::Backoff;
use crate::config::{DeviceConfig, WifiCredentials};
use crate::constants::{
    MAX_HOSTNAME_LEN, NETWORK_POLL_INTERVAL_MS, WIFI_CONNECT_TIMEOUT_SECS,
    WIFI_RECONNECT_DELAY_MS, WIFI_RECONNECT_MAX_DELAY_MS,
};

static RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

#[derive(Debug)]
pub enum Error {
    RadioInit(WifiError),
    HostnameTooLong,
    Spawn,
}

#[derive(Debug)]
enum JoinError {
    Driver(WifiError),
    Timeout,
}

pub struct Wifi {
    pub stack: Stack<'static>,
}

impl Wifi {
    /// Brings up the network stack and spawns the station and stack runner tasks.
    pub fn start(
        radio: &'static Controller<'static>,
        wifi: esp_hal::peripherals::WIFI<'static>,
        rng: Rng,
        spawner: Spawner,
        config: &'static DeviceConfig,
    ) -> Result<Self, Error> {
        let (controller, interfaces) =
            esp_radio::wifi::new(radio, wifi, Config::default()).map_err(Error::RadioInit)?;

        let hostname = String::<MAX_HOSTNAME_LEN>::from_str(config.device_id)
            .map_err(|_| Error::HostnameTooLong)?;
        let mut dhcp = embassy_net::DhcpConfig::default();
        dhcp.hostname = Some(hostname);

        let seed = (rng.random() as u64) << 32 | rng.random() as u64;
        let (stack, runner) = embassy_net::new(
            interfaces.sta,
            embassy_net::Config::dhcpv4(dhcp),
            RESOURCES.init(StackResources::new()),
            seed,
        );

        spawner
            .spawn(station(
                controller,
                config.wifi(),
                config.has_placeholder_credentials(),
            ))
            .map_err(|_| Error::Spawn)?;
        spawner.spawn(stack_runner(runner)).map_err(|_| Error::Spawn)?;

        Ok(Self { stack })
    }

    /// Resolves once DHCP has handed out an address.
    pub async fn wait_for_lease(&self) -> Ipv4Cidr {
        loop {
            if let Some(v4) = self.stack.config_v4() {
                return v4.address;
            }
            Timer::after(Duration::from_millis(NETWORK_POLL_INTERVAL_MS)).await;
        }
    }
}

async fn join(controller: &mut WifiController<'static>, mode: &ModeConfig) -> Result<(), JoinError> {
    if !matches!(controller.is_started(), Ok(true)) {
        controller.set_config(mode).map_err(JoinError::Driver)?;
        controller.start_async().await.map_err(JoinError::Driver)?;
    }

    match with_timeout(
        Duration::from_secs(WIFI_CONNECT_TIMEOUT_SECS),
        controller.connect_async(),
    )
    .await
    {
        Ok(joined) => joined.map_err(JoinError::Driver),
        Err(_) => Err(JoinError::Timeout),
    }
}

#[embassy_executor::task]
async fn station(
    mut controller: WifiController<'static>,
    credentials: WifiCredentials,
    placeholder: bool,
) {
    let mode = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(credentials.ssid.into())
            .with_password(credentials.password.into()),
    );
    let mut backoff = Backoff::new(WIFI_RECONNECT_DELAY_MS, WIFI_RECONNECT_MAX_DELAY_MS);

    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("Lost association with {:?}", credentials.ssid);
        }

        match join(&mut controller, &mode).await {
            Ok(()) => {
                info!("Joined {:?}", credentials.ssid);
                backoff.reset();
            }
            Err(e) => {
                let delay = backoff.next_delay_ms();
                warn!(
                    "Joining {:?} failed ({:?}), retrying in {} ms",
                    credentials.ssid, e, delay
                );
                if placeholder {
                    warn!("Wi-Fi credentials are the cfg.toml.example placeholders");
                }
                Timer::after(Duration::from_millis(delay)).await;
            }
        }
    }
}

#[embassy_executor::task]
async fn stack_runner(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

#![no_std]
#![no_main]

use static_cell::StaticCell;

use embassy_executor::Spawner;
use embassy_net::Stack;
use embassy_time::{Duration, Timer};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    self as hal,
    gpio::AnyPin,
    rng::Rng,
    timer::timg::TimerGroup,
    uart::Uart,
    Async,
};
use esp_println::logger::init_logger;

use norn_sensor::config::{self, DeviceConfig};
use norn_sensor::constants::{HEAP_SIZE, UART_READ_BUFFER_SIZE, VERSION};
use norn_sensor::wifi::Wifi;

esp_bootloader_esp_idf::esp_app_desc!();

static EXECUTOR: StaticCell<esp_rtos::embassy::Executor> = StaticCell::new();
static RADIO_CONTROLLER: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

#[esp_hal::main]
fn main() -> ! {
    init_logger(log::LevelFilter::Info);
    log::info!("Norn sensor firmware v{}", VERSION);

    // Nothing else starts on a bad configuration
    let config = match config::init() {
        Ok(config) => config,
        Err(e) => panic!("invalid configuration: {}", e),
    };

    let peripherals = esp_hal::init(hal::Config::default());

    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let uart_config = config.sensor_uart();
    // SAFETY: both pins passed validation and no other driver claims them
    let (rx, tx) = unsafe {
        (
            AnyPin::steal(uart_config.rx_pin),
            AnyPin::steal(uart_config.tx_pin),
        )
    };
    let uart = match Uart::new(peripherals.UART2, uart_config.hal_config()) {
        Ok(uart) => uart.with_rx(rx).with_tx(tx).into_async(),
        Err(e) => panic!("sensor UART rejected {:?}: {:?}", uart_config, e),
    };
    log::info!(
        "Sensor UART on RX GPIO{} / TX GPIO{} at {} baud",
        uart_config.rx_pin,
        uart_config.tx_pin,
        uart_config.baud_rate
    );

    let radio = match esp_radio::init() {
        Ok(radio) => RADIO_CONTROLLER.init(radio),
        Err(e) => panic!("radio init failed: {:?}", e),
    };

    let executor = EXECUTOR.init(esp_rtos::embassy::Executor::new());
    executor.run(|spawner| {
        spawner.must_spawn(main_task(spawner, radio, peripherals.WIFI, uart, config));
    })
}

#[embassy_executor::task]
async fn main_task(
    spawner: Spawner,
    radio: &'static esp_radio::Controller<'static>,
    wifi: esp_hal::peripherals::WIFI<'static>,
    uart: Uart<'static, Async>,
    config: &'static DeviceConfig,
) {
    // possibly high transient required at init
    // https://github.com/esp-rs/esp-hal/issues/1626
    Timer::after(Duration::from_millis(1000)).await;

    let wifi = match Wifi::start(radio, wifi, Rng::new(), spawner, config) {
        Ok(wifi) => wifi,
        Err(e) => {
            log::error!("Wifi setup failed: {:?}", e);
            return;
        }
    };

    log::info!("Waiting for DHCP lease...");
    let address = wifi.wait_for_lease().await;
    log::info!("Got IP: {}", address);

    match config.backend().url() {
        Ok(url) => log::info!("Backend endpoint: {}", url),
        Err(e) => log::error!("Backend endpoint: {}", e),
    }
    match config.fall_detection() {
        Ok(settings) => log::info!("Fall detection: {:?}", settings),
        Err(e) => log::error!("Fall detection: {}", e),
    }
    log::info!("Local HTTP server port: {}", config.http_server_port());

    spawner.must_spawn(sensor_link(uart));

    status_loop(wifi.stack, config).await
}

/// Drains the radar's UART so its FIFO never overruns.
#[embassy_executor::task]
async fn sensor_link(mut uart: Uart<'static, Async>) {
    let mut buf = [0u8; UART_READ_BUFFER_SIZE];
    loop {
        match uart.read_async(&mut buf).await {
            Ok(n) => log::debug!("Sensor link: {} bytes", n),
            Err(e) => {
                log::warn!("Sensor link read failed: {:?}", e);
                Timer::after(Duration::from_millis(100)).await;
            }
        }
    }
}

async fn status_loop(stack: Stack<'static>, config: &'static DeviceConfig) -> ! {
    let interval = Duration::from_millis(config.data_send_interval_ms.into());

    loop {
        match stack.config_v4() {
            Some(net) => log::debug!("Link up, address {}", net.address),
            None => log::warn!("Link down, waiting for DHCP lease"),
        }
        Timer::after(interval).await;
    }
}

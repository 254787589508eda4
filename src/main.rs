//! Ivy Firmware — Main Entry Point
//!
//! Hexagonal architecture with a cooperative foreground loop and one
//! demand-triggered background upload task.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink    WifiAdapter    TimeAdapter │
//! │  (Sensor+Actuator)  (EventSink)     (Connectivity) (clock)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  activation · cadences · store · alarm                 │    │
//! │  └───────────────────────┬────────────────────────────────┘    │
//! │                          │ trigger (cap 1, coalescing)         │
//! │                          ▼                                     │
//! │              UploadTask (parked thread, Core 0)                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use ivy::activation::ActivationFlag;
use ivy::adapters::hardware::HardwareAdapter;
use ivy::adapters::log_sink::LogEventSink;
use ivy::adapters::time::TimeAdapter;
use ivy::adapters::wifi::{ConnectivityPort, LinkState, WifiAdapter};
use ivy::app::service::AppService;
use ivy::config::SystemConfig;
use ivy::drivers::button::Button;
use ivy::drivers::buzzer::Buzzer;
use ivy::drivers::display::Display;
use ivy::drivers::hw_init;
use ivy::drivers::indicator::Indicator;
use ivy::pins;
use ivy::reading::ReadingStore;
use ivy::sensors::climate::Dht11;
use ivy::sensors::distance::HcSr04;
use ivy::sensors::SensorGateway;
use ivy::upload::transport::EspHttpTransport;
use ivy::upload::{TriggerChannel, UploadSignal, UploadTask};

// Station credentials are baked in at build time; a provisioning surface
// (BLE or serial) can replace this later.
const WIFI_SSID: &str = match option_env!("IVY_WIFI_SSID") {
    Some(s) => s,
    None => "ivy-lab",
};
const WIFI_PASSWORD: &str = match option_env!("IVY_WIFI_PASS") {
    Some(s) => s,
    None => "changeme123",
};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Ivy monitor v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripheral bring-up ────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let config = SystemConfig::default();
    let loop_sleep = Duration::from_millis(u64::from(config.loop_sleep_ms));

    // ── 3. Shared state ───────────────────────────────────────
    let store = Arc::new(ReadingStore::new());
    let activation = Arc::new(ActivationFlag::new());
    let link = Arc::new(LinkState::new());
    let trigger: Arc<TriggerChannel> = Arc::new(TriggerChannel::new());

    // ── 4. WiFi station ───────────────────────────────────────
    let mut wifi = WifiAdapter::new(link.clone());
    match wifi.set_credentials(WIFI_SSID, WIFI_PASSWORD) {
        Ok(()) => {
            if let Err(e) = wifi.connect() {
                warn!("WiFi: initial connect failed ({}), retrying in background", e);
            }
        }
        Err(e) => warn!("WiFi: invalid credentials ({}), running offline", e),
    }

    // ── 5. Hardware adapter ───────────────────────────────────
    let gateway = SensorGateway::new(
        Dht11::new(pins::DHT_DATA_GPIO),
        HcSr04::new(
            pins::SONAR_TRIG_GPIO,
            pins::SONAR_ECHO_GPIO,
            config.echo_timeout_us,
        ),
    );
    let mut display = Display::new();
    display.init();
    let mut hw = HardwareAdapter::new(
        gateway,
        Button::new(),
        Indicator::new(),
        Buzzer::new(),
        display,
    );

    let mut sink = LogEventSink::new();
    let time = TimeAdapter::new();

    // ── 6. Upload task ────────────────────────────────────────
    let transport = EspHttpTransport::new()?;
    let upload = UploadTask::new(
        &config,
        trigger.clone(),
        activation.clone(),
        link.clone(),
        store.clone(),
        transport,
    );
    let _upload_thread = upload.spawn();

    // ── 7. Foreground loop ────────────────────────────────────
    let mut app = AppService::new(
        config,
        activation,
        store,
        UploadSignal::new(trigger),
    );
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering foreground loop.");

    loop {
        std::thread::sleep(loop_sleep);
        let now_ms = time.uptime_ms();
        app.tick(now_ms, &mut hw, &wifi, &mut sink);
        wifi.poll(now_ms);
    }
}

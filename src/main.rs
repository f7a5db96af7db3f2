//! Shower Saver main entry point
//!
//! Hexagonal architecture driven by a fixed-period cooperative loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SysfsInputPin   Peripherals            LogEventSink           │
//! │  (InputPin)      (Display+Audio+Telem)  (EventSink)            │
//! │  JsonConfigFile  MonotonicClock                                │
//! │  (ConfigPort)    (TimePort)                                    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  FSM · Delay scheduler · Progress                      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  PeriodicDriver (edge-executor + async-io-mini timer)          │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{Context, Result};
use log::{info, warn};

use showersaver::adapters::config_file::{self, JsonConfigFile};
use showersaver::adapters::log_sink::LogEventSink;
use showersaver::adapters::peripherals::Peripherals;
use showersaver::adapters::sysfs_gpio::SysfsInputPin;
use showersaver::adapters::time::MonotonicClock;
use showersaver::app::ports::{ConfigError, ConfigPort, TimePort};
use showersaver::app::service::AppService;
use showersaver::config::ShowerConfig;
use showersaver::driver::{self, PeriodicDriver};
use showersaver::drivers::button::ButtonDriver;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt::init();

    info!("╔══════════════════════════════════════╗");
    info!("║  Shower Saver v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let path = config_file::resolve_path(
        std::env::args_os().nth(1),
        std::env::var_os(config_file::CONFIG_ENV),
    );
    let store = JsonConfigFile::new(path);
    let config = match store.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            warn!(
                "Config: {} not found, using defaults",
                store.path().display()
            );
            ShowerConfig::default()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("loading {}", store.path().display()));
        }
    };
    config.validate().context("invalid configuration")?;
    info!(
        "Thresholds: warn {} s, goal {} s, debounce {} ms, tick {} ms",
        config.warn_duration_secs,
        config.goal_duration_secs,
        config.debounce_ms,
        config.tick_interval_ms
    );

    // ── 3. Input ──────────────────────────────────────────────
    let button = open_button(&config)
        .with_context(|| format!("opening button GPIO{}", config.button_gpio))?;

    // ── 4. Core + adapters ────────────────────────────────────
    let clock = MonotonicClock::new();
    let app = AppService::new(&config, clock.now_ms()).context("building session service")?;
    let hw = Peripherals::from_config(&config);

    let mut driver = PeriodicDriver::new(
        app,
        button,
        hw,
        LogEventSink::new(),
        clock,
        config.tick_interval_ms,
    );

    // ── 5. Run ────────────────────────────────────────────────
    info!("Starting Shower Saver");
    driver.start();
    driver::run_blocking(&mut driver, None);

    Ok(())
}

fn open_button(config: &ShowerConfig) -> showersaver::error::Result<ButtonDriver<SysfsInputPin>> {
    let pin = SysfsInputPin::open(config.button_gpio)?;
    Ok(ButtonDriver::new(
        pin,
        config.debounce_ms,
        config.button_active_low,
    ))
}

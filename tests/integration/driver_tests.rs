//! Integration tests for the periodic driver on the cooperative executor.
//!
//! The clock steps 100 ms per read and the timer interval is 1 ms, so a
//! few dozen ticks run in real time in well under a second.

use super::mock_hw::{FakeClock, MockPeripherals, MockPin, PortCall, RecordingSink};

use showersaver::app::service::AppService;
use showersaver::config::ShowerConfig;
use showersaver::driver::{self, PeriodicDriver};
use showersaver::drivers::button::ButtonDriver;
use showersaver::fsm::SessionState;

fn make_driver(
    pin: &MockPin,
) -> PeriodicDriver<MockPin, MockPeripherals, RecordingSink, FakeClock> {
    let config = ShowerConfig::default();
    let app = AppService::new(&config, 0).unwrap();
    let button = ButtonDriver::new(pin.clone(), config.debounce_ms, false);
    PeriodicDriver::new(
        app,
        button,
        MockPeripherals::new(),
        RecordingSink::new(),
        FakeClock::stepping(100),
        1,
    )
}

#[test]
fn runs_requested_number_of_ticks() {
    let pin = MockPin::new();
    let mut driver = make_driver(&pin);
    driver.start();
    driver::run_blocking(&mut driver, Some(25));

    assert_eq!(driver.ticks(), 25);
    assert_eq!(driver.app().tick_count(), 25);
    assert_eq!(driver.app().state(), SessionState::Off);
}

#[test]
fn held_button_toggles_once_per_window() {
    let pin = MockPin::new();
    pin.set_pressed(true);
    let mut driver = make_driver(&pin);

    // start() reads t = 0; tick n runs at t = 100 * n.
    driver.start();
    driver::run_blocking(&mut driver, Some(30));

    // Accepted at 1100 ms (start) and 2200 ms (stop).
    assert_eq!(driver.app().state(), SessionState::Off);
    assert_eq!(driver.app().last_duration_secs(), Some(1));
    assert_eq!(driver.hw().uploads(), [1]);
    assert_eq!(driver.sink().ended(), [1]);
}

#[test]
fn tick_once_uses_clock() {
    let pin = MockPin::new();
    let mut driver = make_driver(&pin);
    driver.start();
    for _ in 0..11 {
        driver.tick_once();
    }
    assert_eq!(driver.app().state(), SessionState::Off);

    driver.button_mut().pin_mut().set_pressed(true);
    driver.tick_once();
    assert_eq!(driver.app().state(), SessionState::Started);
    assert_eq!(driver.app().session_start_ms(), Some(1200));
    assert!(
        driver
            .hw()
            .contains(&PortCall::WriteText("SHOWERING!".into()))
    );
}

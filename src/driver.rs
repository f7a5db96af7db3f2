//! Periodic driver: the fixed-period control loop.
//!
//! Ties the sampler, the state machine and the progress display together.
//! Each iteration runs one [`AppService::tick`] and then sleeps for the
//! tick interval, measured from the end of the tick rather than on a
//! fixed grid, so a slow tick only delays the next one.
//!
//! ```text
//!  ┌───────────────────────────────────────────────────────┐
//!  │  futures_lite::future::block_on                       │
//!  │  ┌─────────────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor                   │  │
//!  │  │                                                 │  │
//!  │  │   loop { tick ── Timer::after(interval) ⏱ }     │  │
//!  │  └─────────────────────────────────────────────────┘  │
//!  └───────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the caller's thread: delay callbacks and ticks never
//! overlap.

use core::time::Duration;

use embedded_hal::digital::InputPin;
use log::info;

use crate::app::ports::{AudioPort, DisplayPort, EventSink, TelemetryPort, TimePort};
use crate::app::service::AppService;
use crate::drivers::button::ButtonDriver;

pub struct PeriodicDriver<P, H, S, C> {
    app: AppService,
    button: ButtonDriver<P>,
    hw: H,
    sink: S,
    clock: C,
    interval: Duration,
    ticks: u64,
}

impl<P, H, S, C> PeriodicDriver<P, H, S, C>
where
    P: InputPin,
    H: DisplayPort + AudioPort + TelemetryPort,
    S: EventSink,
    C: TimePort,
{
    pub fn new(
        app: AppService,
        button: ButtonDriver<P>,
        hw: H,
        sink: S,
        clock: C,
        interval_ms: u32,
    ) -> Self {
        Self {
            app,
            button,
            hw,
            sink,
            clock,
            interval: Duration::from_millis(u64::from(interval_ms)),
            ticks: 0,
        }
    }

    /// Enter the initial state.  Call once before [`run`](Self::run).
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        self.app.start(now, &mut self.hw, &mut self.sink);
    }

    /// Run a single tick at the clock's current time.
    pub fn tick_once(&mut self) {
        let now = self.clock.now_ms();
        self.app
            .tick(now, &mut self.button, &mut self.hw, &mut self.sink);
        self.ticks += 1;
    }

    /// Tick forever, or `max_ticks` times if given.
    pub async fn run(&mut self, max_ticks: Option<u64>) {
        info!("Driver: ticking every {} ms", self.interval.as_millis());
        let mut remaining = max_ticks;
        loop {
            if let Some(n) = remaining.as_mut() {
                if *n == 0 {
                    break;
                }
                *n -= 1;
            }
            self.tick_once();
            async_io_mini::Timer::after(self.interval).await;
        }
        info!("Driver: stopped after {} ticks", self.ticks);
    }

    pub fn app(&self) -> &AppService {
        &self.app
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn button_mut(&mut self) -> &mut ButtonDriver<P> {
        &mut self.button
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Run `driver` on a single-threaded cooperative executor, blocking the
/// calling thread until it stops.
pub fn run_blocking<P, H, S, C>(driver: &mut PeriodicDriver<P, H, S, C>, max_ticks: Option<u64>)
where
    P: InputPin,
    H: DisplayPort + AudioPort + TelemetryPort,
    S: EventSink,
    C: TimePort,
{
    let executor: edge_executor::LocalExecutor<'_, 1> = edge_executor::LocalExecutor::new();
    futures_lite::future::block_on(executor.run(driver.run(max_ticks)));
}

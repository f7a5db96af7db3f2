//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements           | Connects to                 |
//! |----------------|----------------------|-----------------------------|
//! | `config_file`  | ConfigPort           | JSON file on disk           |
//! | `display`      | DisplayPort          | 16x2 RGB LCD (logged frame) |
//! | `log_sink`     | EventSink            | Console log output          |
//! | `peripherals`  | DisplayPort          | display + audio + telemetry |
//! |                | AudioPort            |                             |
//! |                | TelemetryPort        |                             |
//! | `remote_audio` | AudioPort            | Player over `ssh`           |
//! | `sysfs_gpio`   | embedded-hal InputPin| `/sys/class/gpio`           |
//! | `telemetry`    | TelemetryPort        | `iotkit-admin` CLI          |
//! | `time`         | TimePort             | `std::time::Instant`        |

pub mod config_file;
pub mod display;
pub mod log_sink;
pub mod peripherals;
pub mod remote_audio;
pub mod sysfs_gpio;
pub mod telemetry;
pub mod time;
pub(super) mod utils;

//! IoT agent telemetry adapter.
//!
//! Uploads a finished session's duration through the local agent CLI:
//! `<program> observation <metric> <seconds>`.

use log::{info, warn};

use crate::app::ports::TelemetryPort;
use crate::config::TelemetryConfig;

use super::utils::CommandWorker;

pub struct IotkitTelemetry {
    config: TelemetryConfig,
    worker: CommandWorker,
}

impl IotkitTelemetry {
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            config,
            worker: CommandWorker::spawn("telemetry"),
        }
    }

    /// Arguments passed to the agent for one observation.
    pub fn observation_args(&self, duration_secs: u32) -> Vec<String> {
        vec![
            "observation".into(),
            self.config.metric.clone(),
            duration_secs.to_string(),
        ]
    }
}

impl TelemetryPort for IotkitTelemetry {
    fn upload_duration(&mut self, duration_secs: u32) {
        info!(
            "Telemetry: {} = {} s",
            self.config.metric, duration_secs
        );
        let args = self.observation_args(duration_secs);
        if let Err(e) = self
            .worker
            .submit("telemetry", self.config.program.clone(), args)
        {
            warn!("Telemetry: upload not sent: {}", e);
        }
    }
}

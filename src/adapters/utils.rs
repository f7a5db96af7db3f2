//! Shared helpers for adapters that shell out.
//!
//! Audio and telemetry both run an external program whose completion the
//! control loop never waits for.  Each adapter owns one [`CommandWorker`]:
//! a long-lived thread draining a channel, so an adapter's commands run
//! one at a time in the order they were submitted.  stdout and stderr are
//! logged at `debug`, a failure at `warn`.  The worker never touches
//! session state.

use std::process::Command;
use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Sender};
use log::{debug, warn};

use crate::error::CommandError;

struct Job {
    label: &'static str,
    program: String,
    args: Vec<String>,
}

/// Runs queued commands sequentially on a dedicated thread.
pub(super) struct CommandWorker {
    name: &'static str,
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl CommandWorker {
    /// Start the worker thread.  If the thread cannot be spawned the worker
    /// is created anyway and every [`submit`](Self::submit) reports
    /// [`CommandError::WorkerGone`].
    pub(super) fn spawn(name: &'static str) -> Self {
        let (tx, rx) = unbounded::<Job>();
        let handle = std::thread::Builder::new()
            .name(format!("cmd-{name}"))
            .spawn(move || {
                for job in rx {
                    if let Err(e) = run_logged(job.label, &job.program, &job.args) {
                        warn!("{}: `{}` failed: {}", job.label, job.program, e);
                    }
                }
                debug!("cmd-{}: worker stopped", name);
            });

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                warn!("cmd-{}: worker thread not started: {}", name, e);
                None
            }
        };

        Self {
            name,
            tx: Some(tx),
            handle,
        }
    }

    /// Queue `program args..` behind every command submitted before it.
    ///
    /// Returns as soon as the command is queued.
    pub(super) fn submit(
        &self,
        label: &'static str,
        program: String,
        args: Vec<String>,
    ) -> Result<(), CommandError> {
        let tx = self.tx.as_ref().ok_or(CommandError::WorkerGone)?;
        tx.send(Job {
            label,
            program,
            args,
        })
        .map_err(|_| CommandError::WorkerGone)
    }
}

impl Drop for CommandWorker {
    /// Close the queue and wait for the commands already in it.
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("cmd-{}: worker panicked", self.name);
            }
        }
    }
}

/// Run `program args..` to completion on the calling thread and log its
/// output.
pub(super) fn run_logged(label: &str, program: &str, args: &[String]) -> Result<(), CommandError> {
    debug!("{}: exec {} {:?}", label, program, args);
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| {
            debug!("{}: spawn error: {}", label, e);
            CommandError::ExecFailed
        })?;

    log_stream(label, "stdout", &output.stdout);
    log_stream(label, "stderr", &output.stderr);

    if output.status.success() {
        Ok(())
    } else {
        Err(CommandError::NonZeroExit(output.status.code()))
    }
}

fn log_stream(label: &str, stream: &str, bytes: &[u8]) {
    let text = String::from_utf8_lossy(bytes);
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        debug!("{} {}: {}", label, stream, line);
    }
}

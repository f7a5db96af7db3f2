//! Remote audio adapter.
//!
//! Implements [`AudioPort`] by running the player on another machine over
//! `ssh`.  Every play first kills whatever is already playing:
//!
//! ```text
//!   play  → ssh <target> "pkill <pattern>; <player> <track> &"
//!   stop  → ssh <target> "pkill <pattern>"
//! ```
//!
//! Commands are fire-and-forget but ordered: play and stop share one
//! command worker, so a stop can never land after the next play.

use log::{info, warn};

use crate::app::ports::{AudioPort, AudioTrack};
use crate::config::AudioConfig;

use super::utils::CommandWorker;

const SSH: &str = "ssh";

pub struct RemoteAudio {
    config: AudioConfig,
    worker: CommandWorker,
}

impl RemoteAudio {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            worker: CommandWorker::spawn("audio"),
        }
    }

    /// Remote shell script that starts `track`.
    pub fn play_script(&self, track: AudioTrack) -> String {
        format!(
            "pkill {}; {} {} &",
            self.config.kill_pattern,
            self.config.player_command,
            self.track_path(track)
        )
    }

    /// Remote shell script that stops playback.
    pub fn stop_script(&self) -> String {
        format!("pkill {}", self.config.kill_pattern)
    }

    pub fn track_path(&self, track: AudioTrack) -> &str {
        match track {
            AudioTrack::Default => &self.config.default_track,
            AudioTrack::Alternate => &self.config.alternate_track,
        }
    }

    fn send(&self, label: &'static str, script: String) {
        let args = vec![self.config.ssh_target.clone(), script];
        if let Err(e) = self.worker.submit(label, SSH.into(), args) {
            warn!("Audio: {} not sent: {}", label, e);
        }
    }
}

impl AudioPort for RemoteAudio {
    fn play(&mut self, track: AudioTrack) {
        info!("Audio: play {:?} ({})", track, self.track_path(track));
        self.send("audio-play", self.play_script(track));
    }

    fn stop(&mut self) {
        info!("Audio: stop");
        self.send("audio-stop", self.stop_script());
    }
}

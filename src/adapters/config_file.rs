//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over a JSON file on disk.  Any field left out
//! of the file keeps its default; the result is range-checked before it is
//! returned.
//!
//! | Condition                 | Result                          |
//! |---------------------------|---------------------------------|
//! | file missing              | `ConfigError::NotFound`         |
//! | unreadable                | `ConfigError::IoError`          |
//! | not valid JSON / schema   | `ConfigError::Corrupted`        |
//! | out-of-range field        | `ConfigError::ValidationFailed` |

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ShowerConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SHOWERSAVER_CONFIG";
/// Used when neither a CLI argument nor the environment names a file.
pub const DEFAULT_CONFIG_PATH: &str = "showersaver.json";

/// Pick the config path: CLI argument, then environment, then default.
pub fn resolve_path(cli_arg: Option<OsString>, env_var: Option<OsString>) -> PathBuf {
    cli_arg
        .or(env_var)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<ShowerConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => {
                warn!("Config: cannot read {}: {}", self.path.display(), e);
                ConfigError::IoError
            }
        })?;

        let cfg: ShowerConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("Config: {} is not valid: {}", self.path.display(), e);
            ConfigError::Corrupted
        })?;
        cfg.validate()?;

        info!("Config: loaded {}", self.path.display());
        Ok(cfg)
    }
}

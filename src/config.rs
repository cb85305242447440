use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WhackError;

pub const MIN_SLOTS: usize = 2;
// digit keys address slots, so keep them single-digit
pub const MAX_SLOTS: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub slots: usize,
    pub round_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slots: 6,
            round_secs: 15,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), WhackError> {
        if !(MIN_SLOTS..=MAX_SLOTS).contains(&self.slots) {
            return Err(WhackError::InvalidSlots {
                got: self.slots,
                min: MIN_SLOTS,
                max: MAX_SLOTS,
            });
        }
        if self.round_secs == 0 {
            return Err(WhackError::ZeroRoundLength);
        }
        Ok(())
    }

    /// Command line values win over whatever the file said
    pub fn with_overrides(mut self, slots: Option<usize>, round_secs: Option<u32>) -> Self {
        if let Some(slots) = slots {
            self.slots = slots;
        }
        if let Some(secs) = round_secs {
            self.round_secs = secs;
        }
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), WhackError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "whack") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("whack_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), WhackError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

use crate::commands::export::DEFAULT_EXPORT_FILE;
use crate::error::{RolodexError, Result};
use crate::report::DEFAULT_RECENT_DAYS;
use crate::store::fs::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "rolodex.json";

/// Upper bound for `recent_days`, about a century.
pub const MAX_RECENT_DAYS: i64 = 36_500;

/// Configuration for rolodex, read from `rolodex.json` in the working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolodexConfig {
    /// Where the contact book is kept
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Default target for CSV export
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Window, in days, for the "recently updated" statistic
    #[serde(default = "default_recent_days")]
    pub recent_days: i64,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

fn default_recent_days() -> i64 {
    DEFAULT_RECENT_DAYS
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_file: default_export_file(),
            recent_days: default_recent_days(),
        }
    }
}

impl RolodexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RolodexError::Io)?;
        let config: RolodexConfig = serde_json::from_str(&content)
            .map_err(|e| RolodexError::Config(format!("{}: {}", config_path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RolodexError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RolodexError::Serialization)?;
        fs::write(config_path, content).map_err(RolodexError::Io)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_RECENT_DAYS).contains(&self.recent_days) {
            return Err(RolodexError::Config(format!(
                "recent_days must be between 1 and {}, got {}",
                MAX_RECENT_DAYS, self.recent_days
            )));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(RolodexError::Config("data_file cannot be empty".into()));
        }
        Ok(())
    }

    /// Resolves a relative data file against `base`; absolute paths are kept.
    pub fn data_path(&self, base: &Path) -> PathBuf {
        if self.data_file.is_absolute() {
            self.data_file.clone()
        } else {
            base.join(&self.data_file)
        }
    }
}

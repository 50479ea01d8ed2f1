use std::path::PathBuf;

use switchyard_config::settings_path;

/// Runtime options for the `switchyard` binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filter used when `SWITCHYARD_LOG` is not set
    pub log_level: String,
    /// Directory for the rolling JSON log files
    pub log_dir: PathBuf,
    /// Settings file edited by `settings` and the settings command
    pub settings_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_dir: default_log_dir(),
            settings_path: settings_path(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("switchyard")
        .join("logs")
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: defaults.log_level,
            log_dir: std::env::var("SWITCHYARD_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            settings_path: defaults.settings_path,
        }
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(
        self,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
        settings: Option<PathBuf>,
    ) -> Self {
        Self {
            log_level: log_level.unwrap_or(self.log_level),
            log_dir: log_dir.unwrap_or(self.log_dir),
            settings_path: settings.unwrap_or(self.settings_path),
        }
    }
}

use rocket::figment::Figment;
use serde::Deserialize;

use std::path::PathBuf;

use crate::events::data::MAX_WINDOW_SIZE;
use crate::internal_error::{InternalError, InternalResult};

/// Application settings, read from the same figment as Rocket's own
/// (`Rocket.toml` and `ROCKET_*` environment variables).
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Rolling window used when a request doesn't name one.
    #[serde(default = "default_window_size")]
    pub window_size: i64,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("century_tracker.db")
}

fn default_window_size() -> i64 {
    100
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            window_size: default_window_size(),
        }
    }
}

impl TrackerConfig {
    pub fn from_figment(figment: &Figment) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
        let config: TrackerConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> InternalResult<()> {
        if self.window_size <= 0 || self.window_size > MAX_WINDOW_SIZE {
            return Err(InternalError::invalid(format!(
                "window_size must be between 1 and {}, got {}",
                MAX_WINDOW_SIZE, self.window_size
            )));
        }
        Ok(())
    }
}

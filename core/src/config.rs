//! Persisted alarm settings
//!
//! Stored with confy under the `chime` application name. Every field has a
//! default so partial or missing files still load.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::wait::DEFAULT_POLL_INTERVAL;

const APP_NAME: &str = "chime";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfig {
    /// Seconds between clock checks while waiting
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Playback volume in percent (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_volume() -> u8 {
    100
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            volume: default_volume(),
        }
    }
}

impl AlarmConfig {
    /// Load from disk, falling back to defaults when unreadable
    pub fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %crate::sound::error_chain(&e), "using default configuration");
            Self::default()
        })
    }

    pub fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Polling interval, never zero
    pub fn poll_interval(&self) -> Duration {
        match self.poll_interval_secs {
            0 => DEFAULT_POLL_INTERVAL,
            secs => Duration::from_secs(secs),
        }
    }

    /// Volume as a linear scale factor in `0.0..=1.0`
    pub fn volume_scale(&self) -> f32 {
        f32::from(self.volume.min(100)) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlarmConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.volume_scale(), 1.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AlarmConfig = toml::from_str("volume = 40").unwrap();
        assert_eq!(config.poll_interval_secs, 1);
        assert_eq!(config.volume, 40);

        let config: AlarmConfig = toml::from_str("").unwrap();
        assert_eq!(config, AlarmConfig::default());
    }

    #[test]
    fn test_zero_poll_interval_clamped() {
        let config = AlarmConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_volume_scale_clamped() {
        let config = AlarmConfig {
            volume: 250,
            ..Default::default()
        };
        assert_eq!(config.volume_scale(), 1.0);

        let config = AlarmConfig {
            volume: 50,
            ..Default::default()
        };
        assert_eq!(config.volume_scale(), 0.5);
    }
}

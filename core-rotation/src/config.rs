//! Rotation configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for carousel auto-rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Time between automatic advances.
    ///
    /// Default: 5 seconds.
    #[serde(default = "default_interval")]
    pub interval: Duration,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}

impl RotationConfig {
    /// Create a configuration with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Set the rotation interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.interval.is_zero() {
            return Err("interval must be positive".to_string());
        }

        Ok(())
    }
}

fn default_interval() -> Duration {
    Duration::from_millis(5000)
}

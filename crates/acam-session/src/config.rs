//! Session configuration.

use std::time::Duration;

use acam_models::FacingMode;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Facing mode requested at startup
    pub initial_facing: FacingMode,
    /// Target cadence of the detection loop's frame scheduler
    pub frame_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_facing: FacingMode::User,
            frame_interval: Duration::from_millis(16), // ~60 Hz display cadence
        }
    }
}

impl SessionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            initial_facing: std::env::var("ACAM_FACING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            frame_interval: Duration::from_millis(
                std::env::var("ACAM_FRAME_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(16),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_user_camera_at_display_cadence() {
        let config = SessionConfig::default();
        assert_eq!(config.initial_facing, FacingMode::User);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Which physical camera to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Front-facing (selfie) camera.
    #[default]
    User,
    /// Rear-facing camera.
    Environment,
}

impl FacingMode {
    /// The other camera, used for single-shot acquisition fallback.
    pub fn opposite(&self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    /// Get string representation of the facing mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FacingMode {
    type Err = FacingModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" | "front" => Ok(FacingMode::User),
            "environment" | "rear" => Ok(FacingMode::Environment),
            _ => Err(FacingModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown facing mode: {0}")]
pub struct FacingModeParseError(String);

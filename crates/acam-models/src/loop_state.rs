use serde::{Deserialize, Serialize};

/// Detection loop state.
///
/// Transitions:
/// - `Idle -> Running` on start (stream present, models ready)
/// - `Running -> Paused` on visibility loss
/// - `Paused -> Running` on resume while prerequisites still hold
/// - any state `-> Idle` on stop or unrecoverable error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// Not running; a fresh start is required.
    #[default]
    Idle,
    /// Actively cycling.
    Running,
    /// Suspended by a visibility signal; camera and models are preserved.
    Paused,
}

impl LoopState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopState::Idle => "idle",
            LoopState::Running => "running",
            LoopState::Paused => "paused",
        }
    }

    /// Check if the loop is actively cycling.
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running)
    }

    /// Check if resuming without a full restart is allowed.
    pub fn is_paused(&self) -> bool {
        matches!(self, LoopState::Paused)
    }
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

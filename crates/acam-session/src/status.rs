//! Session status channel.
//!
//! The UI surface is presentation-only; it observes the session through this
//! channel instead of being called into. Watch semantics (latest value wins)
//! match a status line: intermediate messages may be skipped by a slow
//! subscriber, the newest one is never lost.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use acam_models::LoopState;

/// A snapshot of session state plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Detection loop state at the time of the update.
    pub state: LoopState,
    /// Human-readable status text for the UI.
    pub message: String,
}

impl SessionStatus {
    fn new(state: LoopState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::new(LoopState::Idle, "Not started")
    }
}

/// Publishing side of the status channel. Cheap to clone.
#[derive(Clone)]
pub struct StatusPublisher {
    tx: std::sync::Arc<watch::Sender<SessionStatus>>,
}

impl StatusPublisher {
    /// Create a publisher and its initial receiver.
    pub fn channel() -> (Self, watch::Receiver<SessionStatus>) {
        let (tx, rx) = watch::channel(SessionStatus::default());
        (
            Self {
                tx: std::sync::Arc::new(tx),
            },
            rx,
        )
    }

    /// Publish a status update.
    pub fn publish(&self, state: LoopState, message: impl Into<String>) {
        let status = SessionStatus::new(state, message);
        debug!(state = %status.state, message = %status.message, "Status");
        // send_replace stores the value even with no receivers alive, so
        // current() stays truthful for late subscribers.
        self.tx.send_replace(status);
    }

    /// Subscribe to status updates.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.tx.subscribe()
    }

    /// The most recently published status.
    pub fn current(&self) -> SessionStatus {
        self.tx.borrow().clone()
    }
}

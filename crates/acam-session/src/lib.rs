//! Detection loop controller and session orchestration for AnnoCam.
//!
//! This crate holds the cancellable, frame-synchronized dual-model inference
//! loop ([`DetectionLoopController`]) and the top-level coordinator wiring
//! user intent to capture, models, rendering, and recovery policy
//! ([`SessionOrchestrator`]).

pub mod config;
pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod scheduler;
pub mod status;

pub use config::SessionConfig;
pub use controller::DetectionLoopController;
pub use error::{SessionError, SessionResult};
pub use orchestrator::SessionOrchestrator;
pub use scheduler::{FrameScheduler, IntervalScheduler};
pub use status::{SessionStatus, StatusPublisher};

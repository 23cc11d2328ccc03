//! Session orchestrator: wires user intent to capture, models, and the loop.

use std::sync::{Arc, Mutex};

use tokio::sync::{watch, Mutex as AsyncMutex};
use tracing::{info, warn};

use acam_capture::{CameraError, CameraProvider, CaptureManager};
use acam_models::{FacingMode, LoopState};
use acam_perception::{LoadFaceDetector, LoadObjectDetector, ModelHost};
use acam_render::{DrawSurface, FrameRenderer};

use crate::config::SessionConfig;
use crate::controller::DetectionLoopController;
use crate::error::{SessionError, SessionResult};
use crate::scheduler::FrameScheduler;
use crate::status::{SessionStatus, StatusPublisher};

/// Top-level coordinator for one annotation session.
///
/// Owns the capture manager, model host, renderer, and loop controller, and
/// implements the recovery policy: a single opposite-facing fallback on
/// recoverable camera errors at startup, full teardown on anything else.
pub struct SessionOrchestrator {
    capture: Arc<AsyncMutex<CaptureManager>>,
    models: Arc<ModelHost>,
    controller: DetectionLoopController,
    status: StatusPublisher,
    facing: Mutex<FacingMode>,
}

impl SessionOrchestrator {
    /// Assemble a session from its collaborators.
    pub fn new(
        camera: Arc<dyn CameraProvider>,
        object_loader: Arc<dyn LoadObjectDetector>,
        face_loader: Arc<dyn LoadFaceDetector>,
        surface: Box<dyn DrawSurface>,
        scheduler: Arc<dyn FrameScheduler>,
        config: SessionConfig,
    ) -> Self {
        let capture = Arc::new(AsyncMutex::new(CaptureManager::new(camera)));
        let models = Arc::new(ModelHost::new(object_loader, face_loader));
        let renderer = Arc::new(Mutex::new(FrameRenderer::new(surface)));
        let (status, _rx) = StatusPublisher::channel();

        let controller = DetectionLoopController::new(
            Arc::clone(&capture),
            Arc::clone(&models),
            renderer,
            scheduler,
            status.clone(),
        );

        Self {
            capture,
            models,
            controller,
            status,
            facing: Mutex::new(config.initial_facing),
        }
    }

    /// Subscribe to status updates for the UI surface.
    pub fn subscribe_status(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// The most recent status.
    pub fn status(&self) -> SessionStatus {
        self.status.current()
    }

    /// Loop state accessor.
    pub fn loop_state(&self) -> LoopState {
        self.controller.state()
    }

    /// The facing mode currently in use (after any fallback).
    pub fn facing(&self) -> FacingMode {
        *self.facing.lock().expect("facing poisoned")
    }

    /// Start the session: camera, models, playback, loop.
    ///
    /// On a recoverable camera error the opposite facing mode is tried once;
    /// if that also fails, the original error is surfaced. Any failure tears
    /// the session down to a retryable not-started state.
    pub async fn start(&self, requested: FacingMode) -> SessionResult<()> {
        self.status
            .publish(LoopState::Idle, format!("Starting {} camera", requested));

        let facing = match self.acquire_with_fallback(requested).await {
            Ok(facing) => facing,
            Err(e) => {
                self.teardown(format!("Camera unavailable: {e}")).await;
                return Err(e.into());
            }
        };
        *self.facing.lock().expect("facing poisoned") = facing;

        self.status
            .publish(LoopState::Idle, "Loading detection models");
        if let Err(e) = self.models.ensure_loaded().await {
            self.teardown(format!("Models failed to load: {e}")).await;
            return Err(e.into());
        }

        if let Err(e) = self.play().await {
            self.teardown(format!("Video playback failed: {e}")).await;
            return Err(e);
        }

        if !self.controller.start().await {
            let reason = self.status.current().message;
            self.teardown("Could not start detection").await;
            return Err(SessionError::start_refused(reason));
        }

        info!(%facing, "Session started");
        Ok(())
    }

    /// Switch to the opposite camera.
    ///
    /// Stops the loop, swaps the stream, restarts playback and the loop. No
    /// fallback here: a failed switch performs full teardown rather than
    /// guessing at a partially-recovered state.
    pub async fn switch_camera(&self) -> SessionResult<()> {
        let target = self.facing().opposite();
        info!(%target, "Switching camera");
        self.controller.stop();
        self.status
            .publish(LoopState::Idle, format!("Switching to {} camera", target));

        let result: SessionResult<()> = async {
            self.capture.lock().await.acquire(target).await?;
            self.play().await?;
            if !self.controller.start().await {
                return Err(SessionError::start_refused(
                    self.status.current().message,
                ));
            }
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                *self.facing.lock().expect("facing poisoned") = target;
                Ok(())
            }
            Err(e) => {
                self.teardown(format!("Camera switch failed: {e}")).await;
                Err(e)
            }
        }
    }

    /// Page-visibility signal. Hiding pauses the loop (camera and models are
    /// preserved); becoming visible resumes it if the stream is still live.
    pub async fn set_visible(&self, visible: bool) {
        if visible {
            self.controller.resume().await;
        } else {
            self.controller.pause();
        }
    }

    /// Stop everything and release the camera.
    pub async fn shutdown(&self) {
        self.teardown("Not started").await;
    }

    async fn acquire_with_fallback(&self, requested: FacingMode) -> Result<FacingMode, CameraError> {
        let mut capture = self.capture.lock().await;
        let original = match capture.acquire(requested).await {
            Ok(_) => return Ok(requested),
            Err(e) => e,
        };

        if !original.is_fallback_eligible() {
            return Err(original);
        }

        let fallback = requested.opposite();
        warn!(%requested, %fallback, error = %original, "Camera acquisition failed, trying fallback");
        match capture.acquire(fallback).await {
            Ok(_) => Ok(fallback),
            // The fallback failure is secondary; report what went wrong with
            // the camera the user actually asked for.
            Err(fallback_err) => {
                warn!(error = %fallback_err, "Fallback camera also failed");
                Err(original)
            }
        }
    }

    async fn play(&self) -> SessionResult<()> {
        let mut capture = self.capture.lock().await;
        let stream = capture
            .active_mut()
            .ok_or_else(|| SessionError::start_refused("no active stream to play"))?;
        stream.play().map_err(SessionError::from)
    }

    async fn teardown(&self, message: impl Into<String>) {
        self.controller.stop();
        self.capture.lock().await.release();
        self.status.publish(LoopState::Idle, message);
    }
}

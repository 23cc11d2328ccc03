//! Detection loop controller: the per-frame cycle state machine.
//!
//! One loop task at a time drives capture-check -> inference -> render,
//! strictly sequentially: cycle N+1's inference never starts before cycle
//! N's render has completed, so slow providers lower the frame rate instead
//! of queuing work.
//!
//! Cancellation is a generation counter. Every stop/pause/start bumps the
//! generation; a loop task re-checks its captured generation after every
//! suspension point, so a scheduled-but-unrun cycle is guaranteed to be
//! dropped, and an in-flight cycle's results are discarded before drawing.

use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use acam_capture::CaptureManager;
use acam_models::{Detection, LoopState, Resolution, VideoFrame};
use acam_perception::ModelHost;
use acam_render::FrameRenderer;

use crate::scheduler::FrameScheduler;
use crate::status::StatusPublisher;

struct LoopInner {
    state: LoopState,
    generation: u64,
}

/// Drives the detection cycle and owns start/stop/pause/resume semantics.
///
/// Cheap to clone; clones share the same loop state.
#[derive(Clone)]
pub struct DetectionLoopController {
    capture: Arc<AsyncMutex<CaptureManager>>,
    models: Arc<ModelHost>,
    renderer: Arc<Mutex<FrameRenderer>>,
    scheduler: Arc<dyn FrameScheduler>,
    status: StatusPublisher,
    inner: Arc<Mutex<LoopInner>>,
}

impl DetectionLoopController {
    /// Create a controller over the session's shared components.
    pub fn new(
        capture: Arc<AsyncMutex<CaptureManager>>,
        models: Arc<ModelHost>,
        renderer: Arc<Mutex<FrameRenderer>>,
        scheduler: Arc<dyn FrameScheduler>,
        status: StatusPublisher,
    ) -> Self {
        Self {
            capture,
            models,
            renderer,
            scheduler,
            status,
            inner: Arc::new(Mutex::new(LoopInner {
                state: LoopState::Idle,
                generation: 0,
            })),
        }
    }

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.lock_inner().state
    }

    /// Start the loop.
    ///
    /// Requires a live stream and ready models; otherwise publishes a status
    /// message, stays `Idle`, and returns `false` (refusal is not an error).
    /// The first cycle runs immediately, then the loop self-schedules on the
    /// frame scheduler.
    pub async fn start(&self) -> bool {
        if self.state().is_running() {
            return true;
        }

        if !self.models.is_ready() {
            self.status
                .publish(LoopState::Idle, "Models are not loaded yet");
            return false;
        }
        if !self.capture.lock().await.has_live_stream() {
            self.status
                .publish(LoopState::Idle, "No live camera stream");
            return false;
        }

        let generation = {
            let mut inner = self.lock_inner();
            inner.state = LoopState::Running;
            inner.generation += 1;
            inner.generation
        };

        info!(generation, "Detection loop starting");
        self.status.publish(LoopState::Running, "Detecting");
        self.spawn_loop(generation);
        true
    }

    /// Stop the loop, cancel any pending cycle, clear the overlay. Idempotent.
    pub fn stop(&self) {
        {
            let mut inner = self.lock_inner();
            inner.generation += 1;
            inner.state = LoopState::Idle;
        }
        self.lock_renderer().clear();
        info!("Detection loop stopped");
        self.status.publish(LoopState::Idle, "Stopped");
    }

    /// Pause on a visibility loss. Like `stop`, but lands in `Paused` so a
    /// later `resume` can restart without re-validating camera and model
    /// setup. No-op unless currently `Running`.
    pub fn pause(&self) {
        {
            let mut inner = self.lock_inner();
            if !inner.state.is_running() {
                return;
            }
            inner.generation += 1;
            inner.state = LoopState::Paused;
        }
        self.lock_renderer().clear();
        info!("Detection loop paused");
        self.status.publish(LoopState::Paused, "Paused");
    }

    /// Resume after a pause, re-checking only liveness. Returns `false` if
    /// the loop was not paused or the stream died while hidden (in which
    /// case the state falls back to `Idle`).
    pub async fn resume(&self) -> bool {
        if !self.state().is_paused() {
            return false;
        }

        if !self.capture.lock().await.has_live_stream() {
            let mut inner = self.lock_inner();
            inner.state = LoopState::Idle;
            drop(inner);
            self.status
                .publish(LoopState::Idle, "Camera stream ended while paused");
            return false;
        }

        let generation = {
            let mut inner = self.lock_inner();
            if !inner.state.is_paused() {
                return false;
            }
            inner.state = LoopState::Running;
            inner.generation += 1;
            inner.generation
        };

        info!(generation, "Detection loop resumed");
        self.status.publish(LoopState::Running, "Detecting");
        self.spawn_loop(generation);
        true
    }

    fn spawn_loop(&self, generation: u64) {
        let controller = self.clone();
        tokio::spawn(async move {
            // First cycle immediately, then throttle on the scheduler.
            while controller.cycle(generation).await {
                controller.scheduler.next_frame().await;
            }
        });
    }

    /// Run one cycle. Returns whether the loop should reschedule.
    async fn cycle(&self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }

        // Capture readiness check and frame grab, under the capture lock.
        let (frame, source) = {
            let mut capture = self.capture.lock().await;
            let stream = match capture.active_mut() {
                Some(stream) if stream.is_live() => stream,
                _ => {
                    self.fail_stop(generation, "Camera stream ended");
                    return false;
                }
            };
            let source = stream.resolution();
            match stream.grab_frame() {
                Ok(frame) => (frame, source),
                Err(e) => {
                    self.fail_stop(generation, format!("Frame capture failed: {e}"));
                    return false;
                }
            }
        };

        // Reconcile the overlay surface with the stream's current intrinsic
        // resolution; cameras can renegotiate mid-session.
        self.lock_renderer().fit_to(source);

        match self.infer(&frame).await {
            Ok(detections) => {
                // The controller may have left Running while inference was
                // in flight; discard the results rather than drawing stale
                // boxes onto a stopped session. Re-checked under the
                // renderer lock so a concurrent stop/pause clear cannot be
                // painted over.
                let mut renderer = self.lock_renderer();
                if !self.is_current(generation) {
                    return false;
                }
                renderer.draw(&detections, source);
                true
            }
            Err(message) => {
                self.fail_stop(generation, message);
                false
            }
        }
    }

    /// Invoke both providers concurrently against the same frame and
    /// normalize their results.
    async fn infer(&self, frame: &VideoFrame) -> Result<Vec<Detection>, String> {
        let object_detector = self.models.object_detector();
        let face_detector = self.models.face_detector();

        // Independent reads of the same frame; no ordering between them.
        // Detection runs on the unmirrored raw frame, so flip_horizontal is
        // always false.
        let (objects, faces) = tokio::join!(
            object_detector.detect(frame),
            face_detector.estimate_faces(frame, false),
        );

        let objects = objects.map_err(|e| format!("Object detection failed: {e}"))?;
        let faces = faces.map_err(|e| format!("Face detection failed: {e}"))?;

        Ok(objects
            .into_iter()
            .map(Detection::from_object)
            .chain(faces.into_iter().map(Detection::from_face))
            .collect())
    }

    /// Fail-stop: halt the loop without rescheduling. The operator must
    /// restart; repeated cycle failures indicate a persistent condition.
    fn fail_stop(&self, generation: u64, message: impl Into<String>) {
        let message = message.into();
        {
            let mut inner = self.lock_inner();
            // Only the active loop may fail-stop; a cancelled cycle's late
            // error must not clobber a newer run's state.
            if inner.generation != generation {
                return;
            }
            inner.generation += 1;
            inner.state = LoopState::Idle;
        }
        warn!("Detection loop halted: {}", message);
        self.status.publish(LoopState::Idle, message);
    }

    fn is_current(&self, generation: u64) -> bool {
        let inner = self.lock_inner();
        inner.generation == generation && inner.state.is_running()
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, LoopInner> {
        self.inner.lock().expect("loop state poisoned")
    }

    fn lock_renderer(&self) -> std::sync::MutexGuard<'_, FrameRenderer> {
        self.renderer.lock().expect("renderer poisoned")
    }

    /// Current source resolution, if a live stream is held. Used by UI
    /// layers that size their chrome to the video.
    pub async fn source_resolution(&self) -> Option<Resolution> {
        self.capture
            .lock()
            .await
            .active()
            .map(|stream| stream.resolution())
    }
}

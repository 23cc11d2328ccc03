//! Shared test doubles for session integration tests: a scripted camera
//! provider, counting detectors with configurable latency and failure, a
//! recording draw surface, and polling helpers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use acam_capture::{
    CameraError, CameraProvider, CameraStream, CaptureResult, MediaTrack, PlaybackError,
    TrackHandle,
};
use acam_models::{
    FaceObservation, FacingMode, ObjectObservation, PixelRect, Resolution, VideoFrame,
};
use acam_perception::{
    FaceDetector, LoadFaceDetector, LoadObjectDetector, ModelLoadError, ObjectDetector,
    PerceptionError, PerceptionResult,
};
use acam_render::{Color, DrawSurface};

// ---------------------------------------------------------------------------
// Camera provider
// ---------------------------------------------------------------------------

pub struct TestTrack {
    stopped: Arc<AtomicBool>,
}

impl MediaTrack for TestTrack {
    fn kind(&self) -> &'static str {
        "video"
    }

    fn is_live(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

pub struct TestStream {
    facing: FacingMode,
    resolution: Arc<Mutex<Resolution>>,
    stopped: Arc<AtomicBool>,
    ended: Arc<AtomicBool>,
    play_failure: Option<PlaybackError>,
}

impl CameraStream for TestStream {
    fn facing(&self) -> FacingMode {
        self.facing
    }

    fn resolution(&self) -> Resolution {
        *self.resolution.lock().unwrap()
    }

    fn is_live(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst) && !self.ended.load(Ordering::SeqCst)
    }

    fn grab_frame(&mut self) -> CaptureResult<VideoFrame> {
        if !self.is_live() {
            return Err(CameraError::other("stream ended"));
        }
        Ok(VideoFrame::empty(self.resolution()))
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        match &self.play_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn tracks(&self) -> Vec<TrackHandle> {
        vec![Arc::new(TestTrack {
            stopped: Arc::clone(&self.stopped),
        }) as TrackHandle]
    }
}

/// Camera provider whose per-facing outcomes are scripted by the test.
pub struct ScriptedCamera {
    resolution: Arc<Mutex<Resolution>>,
    failures: Mutex<HashMap<FacingMode, CameraError>>,
    play_failure: Mutex<Option<PlaybackError>>,
    /// Facing mode of every open attempt, in order.
    pub open_log: Mutex<Vec<FacingMode>>,
    /// Per-stream stopped flags, in acquisition order.
    pub track_flags: Mutex<Vec<Arc<AtomicBool>>>,
    /// Per-stream ended flags, for simulating stream loss.
    pub ended_flags: Mutex<Vec<Arc<AtomicBool>>>,
}

impl ScriptedCamera {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            resolution: Arc::new(Mutex::new(Resolution::new(640, 480))),
            failures: Mutex::new(HashMap::new()),
            play_failure: Mutex::new(None),
            open_log: Mutex::new(Vec::new()),
            track_flags: Mutex::new(Vec::new()),
            ended_flags: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_facing(&self, facing: FacingMode, err: CameraError) {
        self.failures.lock().unwrap().insert(facing, err);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    pub fn fail_playback(&self, err: PlaybackError) {
        *self.play_failure.lock().unwrap() = Some(err);
    }

    /// Renegotiate the intrinsic resolution of the active stream.
    pub fn set_resolution(&self, resolution: Resolution) {
        *self.resolution.lock().unwrap() = resolution;
    }

    /// Simulate the most recent stream ending (device unplugged).
    pub fn end_current_stream(&self) {
        if let Some(flag) = self.ended_flags.lock().unwrap().last() {
            flag.store(true, Ordering::SeqCst);
        }
    }

    pub fn open_count(&self) -> usize {
        self.open_log.lock().unwrap().len()
    }

    pub fn track_stopped(&self, index: usize) -> bool {
        self.track_flags.lock().unwrap()[index].load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraProvider for ScriptedCamera {
    async fn open(&self, facing: FacingMode) -> CaptureResult<Box<dyn CameraStream>> {
        self.open_log.lock().unwrap().push(facing);
        if let Some(err) = self.failures.lock().unwrap().get(&facing) {
            return Err(err.clone());
        }

        let stopped = Arc::new(AtomicBool::new(false));
        let ended = Arc::new(AtomicBool::new(false));
        self.track_flags.lock().unwrap().push(Arc::clone(&stopped));
        self.ended_flags.lock().unwrap().push(Arc::clone(&ended));

        Ok(Box::new(TestStream {
            facing,
            resolution: Arc::clone(&self.resolution),
            stopped,
            ended,
            play_failure: self.play_failure.lock().unwrap().clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Perception providers
// ---------------------------------------------------------------------------

/// Object detector returning a fixed observation list, with configurable
/// latency, failure injection, and overlapping-call detection.
pub struct TestObjectDetector {
    pub results: Vec<ObjectObservation>,
    pub delay: Duration,
    pub calls: Arc<AtomicUsize>,
    /// Call index (1-based) at which detection starts failing; 0 = never.
    pub fail_from_call: usize,
    in_flight: AtomicBool,
    pub overlap_detected: Arc<AtomicBool>,
}

impl TestObjectDetector {
    pub fn returning(results: Vec<ObjectObservation>) -> Self {
        Self {
            results,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            fail_from_call: 0,
            in_flight: AtomicBool::new(false),
            overlap_detected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn person() -> Self {
        Self::returning(vec![ObjectObservation {
            class: "person".into(),
            score: 0.92,
            rect: PixelRect::new(100.0, 50.0, 200.0, 300.0),
        }])
    }
}

#[async_trait]
impl ObjectDetector for TestObjectDetector {
    async fn detect(&self, _frame: &VideoFrame) -> PerceptionResult<Vec<ObjectObservation>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.overlap_detected.store(true, Ordering::SeqCst);
        }
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.store(false, Ordering::SeqCst);

        if self.fail_from_call != 0 && call >= self.fail_from_call {
            return Err(PerceptionError::inference("backend wedged"));
        }
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        "test-object"
    }
}

/// Face detector analogue of [`TestObjectDetector`].
pub struct TestFaceDetector {
    pub results: Vec<FaceObservation>,
    pub delay: Duration,
    pub calls: Arc<AtomicUsize>,
    in_flight: AtomicBool,
    pub overlap_detected: Arc<AtomicBool>,
    /// `flip_horizontal` values observed, for asserting the raw-frame rule.
    pub flips_seen: Arc<Mutex<Vec<bool>>>,
}

impl TestFaceDetector {
    pub fn returning(results: Vec<FaceObservation>) -> Self {
        Self {
            results,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            in_flight: AtomicBool::new(false),
            overlap_detected: Arc::new(AtomicBool::new(false)),
            flips_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }
}

#[async_trait]
impl FaceDetector for TestFaceDetector {
    async fn estimate_faces(
        &self,
        _frame: &VideoFrame,
        flip_horizontal: bool,
    ) -> PerceptionResult<Vec<FaceObservation>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.overlap_detected.store(true, Ordering::SeqCst);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.flips_seen.lock().unwrap().push(flip_horizontal);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(self.results.clone())
    }

    fn name(&self) -> &'static str {
        "test-face"
    }
}

/// Loader handing out a pre-built detector, counting loads.
pub struct TestObjectLoader {
    detector: Mutex<Option<Arc<dyn ObjectDetector>>>,
    pub loads: Arc<AtomicUsize>,
    pub fail_first: AtomicUsize,
}

impl TestObjectLoader {
    pub fn new(detector: TestObjectDetector) -> Arc<Self> {
        Arc::new(Self {
            detector: Mutex::new(Some(Arc::new(detector))),
            loads: Arc::new(AtomicUsize::new(0)),
            fail_first: AtomicUsize::new(0),
        })
    }

    pub fn failing_first(detector: TestObjectDetector, failures: usize) -> Arc<Self> {
        let loader = Self::new(detector);
        loader.fail_first.store(failures, Ordering::SeqCst);
        loader
    }
}

#[async_trait]
impl LoadObjectDetector for TestObjectLoader {
    async fn load(&self) -> Result<Arc<dyn ObjectDetector>, ModelLoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self
            .fail_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(ModelLoadError::load_failed("weights unavailable"));
        }
        let detector = self.detector.lock().unwrap().clone();
        detector.ok_or_else(|| ModelLoadError::not_found("object detector consumed"))
    }
}

pub struct TestFaceLoader {
    detector: Mutex<Option<Arc<dyn FaceDetector>>>,
    pub loads: Arc<AtomicUsize>,
}

impl TestFaceLoader {
    pub fn new(detector: TestFaceDetector) -> Arc<Self> {
        Arc::new(Self {
            detector: Mutex::new(Some(Arc::new(detector))),
            loads: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[async_trait]
impl LoadFaceDetector for TestFaceLoader {
    async fn load(&self) -> Result<Arc<dyn FaceDetector>, ModelLoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let detector = self.detector.lock().unwrap().clone();
        detector.ok_or_else(|| ModelLoadError::not_found("face detector consumed"))
    }
}

// ---------------------------------------------------------------------------
// Draw surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    SetSize(Resolution),
    Clear,
    Stroke(PixelRect, Color),
    Fill(PixelRect, Color),
    Text(String),
}

#[derive(Clone)]
pub struct SurfaceLog(Arc<Mutex<(Vec<SurfaceOp>, Resolution)>>);

impl SurfaceLog {
    pub fn new(size: Resolution) -> Self {
        Self(Arc::new(Mutex::new((Vec::new(), size))))
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.0.lock().unwrap().0.clone()
    }

    pub fn strokes(&self) -> Vec<(PixelRect, Color)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Stroke(rect, color) => Some((rect, color)),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }
}

pub struct LoggingSurface(pub SurfaceLog);

impl DrawSurface for LoggingSurface {
    fn set_size(&mut self, size: Resolution) {
        let mut inner = self.0 .0.lock().unwrap();
        inner.1 = size;
        inner.0.push(SurfaceOp::SetSize(size));
    }

    fn size(&self) -> Resolution {
        self.0 .0.lock().unwrap().1
    }

    fn clear(&mut self) {
        self.0 .0.lock().unwrap().0.push(SurfaceOp::Clear);
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Color) {
        self.0 .0.lock().unwrap().0.push(SurfaceOp::Stroke(rect, color));
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.0 .0.lock().unwrap().0.push(SurfaceOp::Fill(rect, color));
    }

    fn draw_text(&mut self, text: &str, _x: f64, _y: f64, _color: Color) {
        self.0 .0.lock().unwrap().0.push(SurfaceOp::Text(text.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Polling helper
// ---------------------------------------------------------------------------

/// Poll a condition until it holds or the timeout elapses.
pub async fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    cond()
}

//! Synthetic collaborators: a fake camera and wandering-box detectors.
//!
//! Lets the session run end to end on machines with no camera or models
//! attached, at realistic inference latency.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use acam_capture::{
    CameraProvider, CameraStream, CaptureResult, MediaTrack, PlaybackError, TrackHandle,
};
use acam_models::{
    FaceObservation, FacingMode, ObjectObservation, PixelRect, Resolution, VideoFrame,
};
use acam_perception::{
    FaceDetector, LoadFaceDetector, LoadObjectDetector, ModelLoadError, ObjectDetector,
    PerceptionResult,
};

struct SyntheticTrack {
    stopped: Arc<AtomicBool>,
}

impl MediaTrack for SyntheticTrack {
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

struct SyntheticStream {
    facing: FacingMode,
    resolution: Resolution,
    stopped: Arc<AtomicBool>,
}

impl CameraStream for SyntheticStream {
    fn facing(&self) -> FacingMode {
        self.facing
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn is_live(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }

    fn grab_frame(&mut self) -> CaptureResult<VideoFrame> {
        Ok(VideoFrame::empty(self.resolution))
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn tracks(&self) -> Vec<TrackHandle> {
        vec![Arc::new(SyntheticTrack {
            stopped: Arc::clone(&self.stopped),
        }) as TrackHandle]
    }
}

/// Camera provider that always grants a 640x480 stream.
pub struct SyntheticCamera;

#[async_trait]
impl CameraProvider for SyntheticCamera {
    async fn open(&self, facing: FacingMode) -> CaptureResult<Box<dyn CameraStream>> {
        // Stand-in for device negotiation latency.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Box::new(SyntheticStream {
            facing,
            resolution: Resolution::new(640, 480),
            stopped: Arc::new(AtomicBool::new(false)),
        }))
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}

fn jitter(value: f64, spread: f64, min: f64, max: f64) -> f64 {
    (value + rand::random_range(-spread..spread)).clamp(min, max)
}

/// Object detector reporting one person box that drifts around the frame.
pub struct WanderingObjectDetector {
    rect: Mutex<PixelRect>,
    latency: Duration,
}

impl WanderingObjectDetector {
    pub fn new(latency: Duration) -> Self {
        Self {
            rect: Mutex::new(PixelRect::new(220.0, 90.0, 200.0, 300.0)),
            latency,
        }
    }
}

#[async_trait]
impl ObjectDetector for WanderingObjectDetector {
    async fn detect(&self, frame: &VideoFrame) -> PerceptionResult<Vec<ObjectObservation>> {
        tokio::time::sleep(self.latency).await;

        let res = frame.resolution();
        let rect = {
            let mut rect = self.rect.lock().expect("wander state poisoned");
            rect.x = jitter(rect.x, 6.0, 0.0, f64::from(res.width) - rect.width);
            rect.y = jitter(rect.y, 6.0, 0.0, f64::from(res.height) - rect.height);
            *rect
        };

        Ok(vec![ObjectObservation {
            class: "person".into(),
            score: rand::random_range(0.75..0.97),
            rect,
        }])
    }

    fn name(&self) -> &'static str {
        "wandering-object"
    }
}

/// Face detector reporting a face in the upper third of the person box.
pub struct WanderingFaceDetector {
    latency: Duration,
}

impl WanderingFaceDetector {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl FaceDetector for WanderingFaceDetector {
    async fn estimate_faces(
        &self,
        frame: &VideoFrame,
        _flip_horizontal: bool,
    ) -> PerceptionResult<Vec<FaceObservation>> {
        tokio::time::sleep(self.latency).await;

        let res = frame.resolution();
        let width = 80.0 + rand::random_range(-4.0..4.0);
        let height = 80.0 + rand::random_range(-4.0..4.0);
        let x_min = (f64::from(res.width) - width) / 2.0;
        let y_min = f64::from(res.height) / 5.0;

        Ok(vec![FaceObservation {
            x_min,
            y_min,
            width,
            height,
            x_max: x_min + width,
            y_max: y_min + height,
        }])
    }

    fn name(&self) -> &'static str {
        "wandering-face"
    }
}

/// Loader pair that "downloads" the synthetic models with a short delay.
pub struct SyntheticObjectLoader {
    pub latency: Duration,
}

#[async_trait]
impl LoadObjectDetector for SyntheticObjectLoader {
    async fn load(&self) -> Result<Arc<dyn ObjectDetector>, ModelLoadError> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(Arc::new(WanderingObjectDetector::new(self.latency)))
    }
}

pub struct SyntheticFaceLoader {
    pub latency: Duration,
}

#[async_trait]
impl LoadFaceDetector for SyntheticFaceLoader {
    async fn load(&self) -> Result<Arc<dyn FaceDetector>, ModelLoadError> {
        tokio::time::sleep(Duration::from_millis(150)).await;
        Ok(Arc::new(WanderingFaceDetector::new(self.latency)))
    }
}

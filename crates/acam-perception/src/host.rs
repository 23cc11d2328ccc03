//! Model host: lazily loads both perception providers exactly once.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{error, info};

use crate::error::ModelLoadError;
use crate::provider::{FaceDetector, LoadFaceDetector, LoadObjectDetector, ObjectDetector};

/// Both providers, once loaded.
#[derive(Clone)]
struct Loaded {
    object: Arc<dyn ObjectDetector>,
    face: Arc<dyn FaceDetector>,
}

type LoadOutcome = Result<Loaded, ModelLoadError>;

enum LoadState {
    /// Nothing loaded yet, or the last load failed.
    NotLoaded,
    /// A load is in flight; waiters subscribe to its outcome.
    Loading(watch::Receiver<Option<LoadOutcome>>),
    /// Both providers ready. Never leaves this state.
    Ready(Loaded),
}

/// Owns the lazily-loaded handles to the two perception providers.
///
/// `ensure_loaded` is idempotent: concurrent callers during a load all await
/// the same in-flight outcome, a completed load is never repeated, and a
/// failed load resets the host so the next call retries from scratch.
pub struct ModelHost {
    object_loader: Arc<dyn LoadObjectDetector>,
    face_loader: Arc<dyn LoadFaceDetector>,
    state: Arc<Mutex<LoadState>>,
}

impl ModelHost {
    /// Create a host over the two model loaders.
    pub fn new(
        object_loader: Arc<dyn LoadObjectDetector>,
        face_loader: Arc<dyn LoadFaceDetector>,
    ) -> Self {
        Self {
            object_loader,
            face_loader,
            state: Arc::new(Mutex::new(LoadState::NotLoaded)),
        }
    }

    /// Load both providers in parallel, once.
    ///
    /// Returns when both are ready or the load failed. Model loading is
    /// shared across camera switches within a session; readiness never
    /// resets once reached.
    pub async fn ensure_loaded(&self) -> Result<(), ModelLoadError> {
        let mut rx = {
            let mut state = self.state.lock().expect("model host state poisoned");
            match &*state {
                LoadState::Ready(_) => return Ok(()),
                LoadState::Loading(rx) => rx.clone(),
                LoadState::NotLoaded => {
                    let (tx, rx) = watch::channel(None);
                    *state = LoadState::Loading(rx.clone());
                    self.spawn_load(tx);
                    rx
                }
            }
        };

        let outcome = rx
            .wait_for(|o| o.is_some())
            .await
            .map_err(|_| ModelLoadError::load_failed("model load task dropped"))?
            .clone()
            .expect("waited for a completed outcome");

        outcome.map(|_| ())
    }

    fn spawn_load(&self, tx: watch::Sender<Option<LoadOutcome>>) {
        let object_loader = Arc::clone(&self.object_loader);
        let face_loader = Arc::clone(&self.face_loader);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            info!("Loading perception models");
            let outcome = async {
                let (object, face) =
                    tokio::try_join!(object_loader.load(), face_loader.load())?;
                Ok(Loaded { object, face })
            }
            .await;

            {
                let mut state = state.lock().expect("model host state poisoned");
                *state = match &outcome {
                    Ok(loaded) => {
                        info!(
                            object = loaded.object.name(),
                            face = loaded.face.name(),
                            "Perception models ready"
                        );
                        LoadState::Ready(loaded.clone())
                    }
                    Err(e) => {
                        error!("Model load failed: {}", e);
                        LoadState::NotLoaded
                    }
                };
            }

            // Waiters may all have given up; that's fine.
            let _ = tx.send(Some(outcome));
        });
    }

    /// Whether both providers are loaded.
    pub fn is_ready(&self) -> bool {
        matches!(
            &*self.state.lock().expect("model host state poisoned"),
            LoadState::Ready(_)
        )
    }

    /// The object detector.
    ///
    /// # Panics
    /// Panics if called before `ensure_loaded` has completed successfully;
    /// that is a caller bug, not a runtime condition.
    pub fn object_detector(&self) -> Arc<dyn ObjectDetector> {
        match &*self.state.lock().expect("model host state poisoned") {
            LoadState::Ready(loaded) => Arc::clone(&loaded.object),
            _ => panic!("object_detector() called before models were loaded"),
        }
    }

    /// The face detector.
    ///
    /// # Panics
    /// Panics if called before `ensure_loaded` has completed successfully.
    pub fn face_detector(&self) -> Arc<dyn FaceDetector> {
        match &*self.state.lock().expect("model host state poisoned") {
            LoadState::Ready(loaded) => Arc::clone(&loaded.face),
            _ => panic!("face_detector() called before models were loaded"),
        }
    }
}

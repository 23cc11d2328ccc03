//! Provider observations and the normalized detection union.
//!
//! The two perception providers report boxes in different shapes: the object
//! detector uses `{x, y, width, height}`, the face detector uses
//! `{x_min, y_min, width, height, x_max, y_max}`. Both are normalized into a
//! single [`PixelRect`] immediately on receipt so the renderer operates on
//! one uniform representation.

use serde::{Deserialize, Serialize};

use crate::rect::PixelRect;

/// Raw output of the object detector provider, in source-pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectObservation {
    /// Class name, e.g. "person".
    pub class: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
    /// Bounding box.
    pub rect: PixelRect,
}

/// Raw output of the face detector provider, in source-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub x_min: f64,
    pub y_min: f64,
    pub width: f64,
    pub height: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl FaceObservation {
    /// Normalize into the uniform box representation.
    pub fn to_rect(&self) -> PixelRect {
        PixelRect::new(self.x_min, self.y_min, self.width, self.height)
    }
}

/// A single annotated region for one frame cycle.
///
/// Produced fresh each cycle and consumed solely by the renderer for that
/// frame; never persisted across cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detection {
    /// A general object detection with class and confidence.
    Object {
        class: String,
        score: f32,
        rect: PixelRect,
    },
    /// A detected face. No score is reported by the provider contract.
    Face { rect: PixelRect },
}

impl Detection {
    /// Normalize an object observation.
    pub fn from_object(obs: ObjectObservation) -> Self {
        Detection::Object {
            class: obs.class,
            score: obs.score,
            rect: obs.rect,
        }
    }

    /// Normalize a face observation.
    pub fn from_face(obs: FaceObservation) -> Self {
        Detection::Face {
            rect: obs.to_rect(),
        }
    }

    /// The bounding box, regardless of variant.
    pub fn rect(&self) -> PixelRect {
        match self {
            Detection::Object { rect, .. } => *rect,
            Detection::Face { rect } => *rect,
        }
    }

    /// Check if this is a face detection.
    pub fn is_face(&self) -> bool {
        matches!(self, Detection::Face { .. })
    }
}

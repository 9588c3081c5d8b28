//! Landmark provider trait and the fixed-set implementation.

use crate::source::ImageSource;
use async_trait::async_trait;
use facefit_core::LandmarkSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("bad image: {0}")]
    BadImage(String),
    #[error("no face detected")]
    NoFaceDetected,
    #[error("multiple faces detected ({0})")]
    MultipleFacesDetected(usize),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("landmark file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// External vision service that locates facial landmarks in an image.
///
/// Implementations must report exactly one face; zero or several faces are
/// errors, not partial results.
#[async_trait]
pub trait LandmarkProvider: Send + Sync {
    async fn detect_landmarks(&self, source: &ImageSource) -> Result<LandmarkSet, ProviderError>;
}

/// Provider that ignores the image and returns a fixed landmark set.
///
/// Used for offline runs where landmarks were captured earlier, and in tests.
#[derive(Debug, Clone)]
pub struct StaticLandmarkProvider {
    landmarks: LandmarkSet,
}

impl StaticLandmarkProvider {
    pub fn new(landmarks: LandmarkSet) -> Self {
        Self { landmarks }
    }

    /// Load a landmark set saved as JSON (`{ "chin": { "x": .., "y": .. }, .. }`).
    pub fn from_json_file(path: &Path) -> Result<Self, ProviderError> {
        let raw = std::fs::read_to_string(path)?;
        let landmarks: LandmarkSet = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), points = landmarks.len(), "landmarks loaded from file");
        Ok(Self::new(landmarks))
    }
}

#[async_trait]
impl LandmarkProvider for StaticLandmarkProvider {
    async fn detect_landmarks(&self, _source: &ImageSource) -> Result<LandmarkSet, ProviderError> {
        Ok(self.landmarks.clone())
    }
}

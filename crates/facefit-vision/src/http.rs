//! HTTP landmark provider.
//!
//! Request: `POST <endpoint>` with either
//! `{ "image": { "content": "<base64>" } }` or `{ "image": { "url": "..." } }`.
//!
//! Response: `{ "faces": [ { "landmarks": { "chin": { "x": .., "y": .. }, .. } } ] }`.
//! Services report more points than classification needs; names outside
//! [`LandmarkName`] are dropped.

use crate::prepare::{prepare_image, DEFAULT_MAX_IMAGE_DIM};
use crate::provider::{LandmarkProvider, ProviderError};
use crate::source::ImageSource;
use async_trait::async_trait;
use base64::Engine;
use facefit_core::{LandmarkName, LandmarkSet, Point};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize)]
struct DetectRequest {
    image: ImagePayload,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum ImagePayload {
    Content(String),
    Url(String),
}

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    faces: Vec<DetectedFace>,
}

#[derive(Deserialize)]
struct DetectedFace {
    landmarks: BTreeMap<String, Point>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Landmark provider backed by a JSON-over-HTTP detection service.
pub struct HttpLandmarkProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    max_image_dim: u32,
}

impl HttpLandmarkProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
            max_image_dim: DEFAULT_MAX_IMAGE_DIM,
        }
    }

    /// Send `Authorization: Bearer <key>` with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_max_image_dim(mut self, max_image_dim: u32) -> Self {
        self.max_image_dim = max_image_dim;
        self
    }

    async fn request_body(&self, source: &ImageSource) -> Result<DetectRequest, ProviderError> {
        let image = match source {
            ImageSource::Url(url) => ImagePayload::Url(url.clone()),
            ImageSource::Bytes(bytes) => {
                let bytes = bytes.clone();
                let max_dim = self.max_image_dim;
                let prepared = tokio::task::spawn_blocking(move || prepare_image(&bytes, max_dim))
                    .await
                    .map_err(|e| ProviderError::BadImage(format!("image preparation aborted: {e}")))??;
                ImagePayload::Content(base64::engine::general_purpose::STANDARD.encode(prepared))
            }
        };
        Ok(DetectRequest { image })
    }
}

/// Keep the landmarks the geometry extractor knows by name.
fn known_landmarks(raw: BTreeMap<String, Point>) -> LandmarkSet {
    let reported = raw.len();
    let set: LandmarkSet = raw
        .into_iter()
        .filter_map(|(name, point)| name.parse::<LandmarkName>().ok().map(|n| (n, point)))
        .collect();
    if set.len() < reported {
        tracing::debug!(reported, kept = set.len(), "ignoring unrecognised landmarks");
    }
    set
}

/// Non-2xx reply; a body that cannot be read is reported in its place.
fn status_error(status: u16, body: reqwest::Result<String>) -> ProviderError {
    let body = body.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
    ProviderError::Status { status, body }
}

/// Exactly one face or an error.
fn single_face(mut faces: Vec<DetectedFace>) -> Result<DetectedFace, ProviderError> {
    match faces.len() {
        0 => Err(ProviderError::NoFaceDetected),
        1 => Ok(faces.remove(0)),
        n => Err(ProviderError::MultipleFacesDetected(n)),
    }
}

#[async_trait]
impl LandmarkProvider for HttpLandmarkProvider {
    async fn detect_landmarks(&self, source: &ImageSource) -> Result<LandmarkSet, ProviderError> {
        let body = self.request_body(source).await?;

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(endpoint = %self.endpoint, source = %source.describe(), "requesting landmarks");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), response.text().await));
        }

        let parsed: DetectResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let face = single_face(parsed.faces)?;
        let landmarks = known_landmarks(face.landmarks);
        tracing::info!(
            points = landmarks.len(),
            confidence = face.confidence,
            "landmarks received"
        );
        Ok(landmarks)
    }
}

use facefit_core::{
    analyze, match_catalog, CoreError, FaceAnalysis, FilterCriteria, LandmarkSet, Product,
    RecommendationResult, Tuning,
};
use facefit_vision::{ImageSource, LandmarkProvider};
use std::future::Future;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

/// Stateless recommendation engine.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent requests. The catalog snapshot is borrowed per call.
pub struct Engine<P> {
    provider: P,
    tuning: Tuning,
    detect_timeout: Duration,
}

impl<P: LandmarkProvider> Engine<P> {
    pub fn new(provider: P, tuning: Tuning, detect_timeout: Duration) -> Self {
        Self {
            provider,
            tuning,
            detect_timeout,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Photo in, ranked recommendations out.
    pub async fn recommend<'c>(
        &self,
        source: &ImageSource,
        criteria: &FilterCriteria,
        catalog: &'c [Product],
    ) -> Result<RecommendationResult<'c>, CoreError> {
        self.recommend_until(source, criteria, catalog, std::future::pending())
            .await
    }

    /// Like [`recommend`](Self::recommend), abandoned with
    /// [`CoreError::Cancelled`] if `cancel` resolves before landmarks arrive.
    ///
    /// Once landmarks are in hand the remaining CPU-only stages always run
    /// to completion.
    pub async fn recommend_until<'c, F>(
        &self,
        source: &ImageSource,
        criteria: &FilterCriteria,
        catalog: &'c [Product],
        cancel: F,
    ) -> Result<RecommendationResult<'c>, CoreError>
    where
        F: Future<Output = ()>,
    {
        let span = tracing::info_span!("recommend", request_id = %Uuid::new_v4());
        async move {
            criteria
                .validate()
                .map_err(CoreError::InvalidFilterCriteria)?;

            let landmarks = self.detect(source, cancel).await?;
            let result = match_catalog(&landmarks, catalog, criteria, &self.tuning);

            match &result {
                Ok(r) => tracing::info!(
                    face_shape = %r.face_shape,
                    catalog = catalog.len(),
                    matches = r.len(),
                    "recommendation complete"
                ),
                Err(e) => tracing::warn!(error = %e, "recommendation failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Detect and classify only; no catalog involved.
    pub async fn classify(&self, source: &ImageSource) -> Result<FaceAnalysis, CoreError> {
        let span = tracing::info_span!("classify", request_id = %Uuid::new_v4());
        async move {
            let landmarks = self.detect(source, std::future::pending()).await?;
            let analysis = analyze(&landmarks, &self.tuning)?;
            tracing::info!(face_shape = %analysis.face_shape, "face classified");
            Ok(analysis)
        }
        .instrument(span)
        .await
    }

    /// Single awaited provider call under the detection timeout. No retries.
    async fn detect<F>(&self, source: &ImageSource, cancel: F) -> Result<LandmarkSet, CoreError>
    where
        F: Future<Output = ()>,
    {
        tracing::debug!(source = %source.describe(), timeout = ?self.detect_timeout, "detecting landmarks");

        let detection = tokio::time::timeout(self.detect_timeout, self.provider.detect_landmarks(source));
        tokio::pin!(cancel);

        // Biased so an already-fired cancel wins before the provider is polled.
        let outcome = tokio::select! {
            biased;
            _ = &mut cancel => {
                tracing::info!("request cancelled before landmarks arrived");
                return Err(CoreError::Cancelled);
            }
            outcome = detection => outcome,
        };

        match outcome {
            Ok(Ok(landmarks)) => Ok(landmarks),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "landmark provider failed");
                Err(CoreError::DetectionFailed(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.detect_timeout, "landmark provider timed out");
                Err(CoreError::DetectionFailed(format!(
                    "landmark provider timed out after {:?}",
                    self.detect_timeout
                )))
            }
        }
    }
}

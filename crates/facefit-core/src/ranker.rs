//! Ordering of scored products into the final recommendation list.

use crate::scorer::ScoredProduct;
use crate::types::FaceShape;
use serde::Serialize;
use std::cmp::Ordering;

/// Ranked recommendations for one request, best match first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult<'a> {
    pub face_shape: FaceShape,
    pub recommendations: Vec<ScoredProduct<'a>>,
}

impl<'a> RecommendationResult<'a> {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    /// True when the face was classified but nothing survived the filters.
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Bounded view over the best `n` entries.
    pub fn top(&self, n: usize) -> &[ScoredProduct<'a>] {
        &self.recommendations[..n.min(self.recommendations.len())]
    }
}

/// Score descending, then product id ascending.
fn compare(a: &ScoredProduct<'_>, b: &ScoredProduct<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.product.id.cmp(&b.product.id))
}

/// Sort scored products best-first. Never truncates.
///
/// Ties are broken on product id, so any permutation of the same input
/// yields the same order.
pub fn rank<'a>(face_shape: FaceShape, mut scored: Vec<ScoredProduct<'a>>) -> RecommendationResult<'a> {
    scored.sort_by(compare);
    tracing::debug!(face_shape = %face_shape, count = scored.len(), "recommendations ranked");
    RecommendationResult {
        face_shape,
        recommendations: scored,
    }
}

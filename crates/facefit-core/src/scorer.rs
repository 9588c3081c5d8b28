//! Compatibility scoring of frames against a classified face shape.

use crate::catalog::Product;
use crate::tuning::Tuning;
use crate::types::FaceShape;
use serde::Serialize;

const MAX_RATING: f64 = 5.0;

/// Coarse reading of a base affinity, reported alongside the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Fit {
    pub fn from_affinity(affinity: f64) -> Self {
        if affinity >= 0.85 {
            Fit::Excellent
        } else if affinity >= 0.70 {
            Fit::Good
        } else if affinity >= 0.50 {
            Fit::Fair
        } else {
            Fit::Poor
        }
    }
}

/// A product paired with its compatibility score for one face shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    /// Final score in [0, 1].
    pub score: f64,
    /// Table affinity before secondary adjustments.
    pub base_affinity: f64,
    pub fit: Fit,
    pub face_shape: FaceShape,
}

/// Strategy for scoring a product against a face shape.
pub trait Scorer {
    fn score(&self, product: &Product, face: FaceShape) -> f64;
}

/// Affinity-table scorer with a rating tie-break inside each affinity tier.
///
/// `score = affinity − w · (1 − rating / 5)`, where `w` is capped below half
/// the narrowest affinity gap so tiers never cross. Unrated products take the
/// full penalty.
pub struct AffinityScorer<'t> {
    tuning: &'t Tuning,
}

impl<'t> AffinityScorer<'t> {
    pub fn new(tuning: &'t Tuning) -> Self {
        Self { tuning }
    }

    /// Score every product, preserving input order.
    pub fn score_all<'a>(&self, products: &[&'a Product], face: FaceShape) -> Vec<ScoredProduct<'a>> {
        products
            .iter()
            .map(|&product| {
                let base_affinity = self.tuning.affinity.get(face, product.frame_shape);
                ScoredProduct {
                    product,
                    score: self.score(product, face),
                    base_affinity,
                    fit: Fit::from_affinity(base_affinity),
                    face_shape: face,
                }
            })
            .collect()
    }
}

impl Scorer for AffinityScorer<'_> {
    fn score(&self, product: &Product, face: FaceShape) -> f64 {
        let base = self.tuning.affinity.get(face, product.frame_shape);
        let weight = self.tuning.effective_rating_weight(face);
        let rating = product
            .rating
            .filter(|r| r.is_finite())
            .map_or(0.0, |r| r.clamp(0.0, MAX_RATING) / MAX_RATING);
        (base - weight * (1.0 - rating)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FrameShape;
    use crate::fixtures::product;

    fn rated(id: &str, shape: FrameShape, rating: Option<f64>) -> Product {
        let mut p = product(id, shape, "black", 100.0);
        p.rating = rating;
        p
    }

    #[test]
    fn test_round_face_prefers_square_over_round_frames() {
        let tuning = Tuning::default();
        let scorer = AffinityScorer::new(&tuning);
        let square = rated("sq", FrameShape::Square, None);
        let round = rated("rd", FrameShape::Round, Some(5.0));
        assert!(scorer.score(&square, FaceShape::Round) > scorer.score(&round, FaceShape::Round));
    }

    #[test]
    fn test_angular_face_prefers_round_frames() {
        let tuning = Tuning::default();
        let scorer = AffinityScorer::new(&tuning);
        let square = rated("sq", FrameShape::Square, Some(5.0));
        let round = rated("rd", FrameShape::Round, None);
        assert!(scorer.score(&round, FaceShape::Square) > scorer.score(&square, FaceShape::Square));
    }

    #[test]
    fn test_oval_face_tolerates_every_frame() {
        let tuning = Tuning::default();
        let scorer = AffinityScorer::new(&tuning);
        for shape in FrameShape::ALL {
            let p = rated("p", shape, None);
            assert!(scorer.score(&p, FaceShape::Oval) >= 0.6, "{shape} scored too low");
        }
    }

    #[test]
    fn test_rating_only_breaks_ties_within_tier() {
        let tuning = Tuning::default();
        let scorer = AffinityScorer::new(&tuning);
        for face in FaceShape::ALL {
            for a in FrameShape::ALL {
                for b in FrameShape::ALL {
                    let base_a = tuning.affinity.get(face, a);
                    let base_b = tuning.affinity.get(face, b);
                    if base_a <= base_b {
                        continue;
                    }
                    // Worst case for a, best case for b.
                    let pa = rated("a", a, None);
                    let pb = rated("b", b, Some(5.0));
                    assert!(
                        scorer.score(&pa, face) > scorer.score(&pb, face),
                        "{face}: {a} ({base_a}) should stay above {b} ({base_b})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_higher_rating_wins_within_tier() {
        let tuning = Tuning::default();
        let scorer = AffinityScorer::new(&tuning);
        let good = rated("g", FrameShape::Square, Some(4.8));
        let meh = rated("m", FrameShape::Square, Some(2.0));
        assert!(scorer.score(&good, FaceShape::Round) > scorer.score(&meh, FaceShape::Round));
    }

    #[test]
    fn test_score_in_unit_range() {
        let tuning = Tuning::default();
        let scorer = AffinityScorer::new(&tuning);
        for face in FaceShape::ALL {
            for shape in FrameShape::ALL {
                for rating in [None, Some(0.0), Some(5.0), Some(99.0), Some(f64::NAN)] {
                    let s = scorer.score(&rated("p", shape, rating), face);
                    assert!((0.0..=1.0).contains(&s), "{face}/{shape}/{rating:?} → {s}");
                }
            }
        }
    }

    #[test]
    fn test_score_all_reports_rationale() {
        let tuning = Tuning::default();
        let scorer = AffinityScorer::new(&tuning);
        let catalog = [rated("sq", FrameShape::Square, None), rated("rd", FrameShape::Round, None)];
        let refs: Vec<&Product> = catalog.iter().collect();
        let scored = scorer.score_all(&refs, FaceShape::Round);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].product.id, "sq");
        assert_eq!(scored[0].fit, Fit::Excellent);
        assert_eq!(scored[1].fit, Fit::Poor);
        assert!(scored.iter().all(|s| s.face_shape == FaceShape::Round));
    }

    #[test]
    fn test_fit_tiers() {
        assert_eq!(Fit::from_affinity(0.95), Fit::Excellent);
        assert_eq!(Fit::from_affinity(0.75), Fit::Good);
        assert_eq!(Fit::from_affinity(0.55), Fit::Fair);
        assert_eq!(Fit::from_affinity(0.2), Fit::Poor);
    }
}

//! The CPU-only half of a recommendation: landmarks in, ranked list out.

use crate::catalog::Product;
use crate::classifier::classify;
use crate::error::CoreError;
use crate::filter::{filter, FilterCriteria};
use crate::geometry::extract_measurements;
use crate::ranker::{rank, RecommendationResult};
use crate::scorer::AffinityScorer;
use crate::tuning::Tuning;
use crate::types::{FaceMeasurements, FaceShape, LandmarkSet};

/// Measurements and the face shape they classify to.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FaceAnalysis {
    pub face_shape: FaceShape,
    pub measurements: FaceMeasurements,
}

pub fn analyze(landmarks: &LandmarkSet, tuning: &Tuning) -> Result<FaceAnalysis, CoreError> {
    let measurements = extract_measurements(landmarks)?;
    let face_shape = classify(&measurements, &tuning.classifier);
    Ok(FaceAnalysis {
        face_shape,
        measurements,
    })
}

/// Classify, filter, score and rank. Pure; borrows the catalog snapshot.
///
/// Fails only on invalid criteria or unusable landmarks. An empty result is
/// a successful outcome that still carries the face shape.
///
/// Criteria are validated here for direct callers; the engine checks them
/// again earlier, before any landmark detection is attempted.
pub fn match_catalog<'a>(
    landmarks: &LandmarkSet,
    catalog: &'a [Product],
    criteria: &FilterCriteria,
    tuning: &Tuning,
) -> Result<RecommendationResult<'a>, CoreError> {
    criteria.validate().map_err(CoreError::InvalidFilterCriteria)?;

    let analysis = analyze(landmarks, tuning)?;
    let survivors = filter(catalog, criteria);
    let scored = AffinityScorer::new(tuning).score_all(&survivors, analysis.face_shape);
    Ok(rank(analysis.face_shape, scored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FrameShape;
    use crate::fixtures::{self, product};
    use crate::types::LandmarkName;

    #[test]
    fn test_oval_face_prefers_angular_frames() {
        let catalog = vec![
            product("round-1", FrameShape::Round, "black", 90.0),
            product("square-1", FrameShape::Square, "black", 90.0),
            product("oval-1", FrameShape::Oval, "black", 90.0),
        ];
        let result = match_catalog(
            &fixtures::oval_face(),
            &catalog,
            &FilterCriteria::default(),
            &Tuning::default(),
        )
        .unwrap();

        assert_eq!(result.face_shape, FaceShape::Oval);
        assert_eq!(result.len(), 3);
        let ids: Vec<&str> = result.recommendations.iter().map(|s| s.product.id.as_str()).collect();
        assert_eq!(ids, vec!["square-1", "round-1", "oval-1"]);
    }

    #[test]
    fn test_shape_filter_limits_result() {
        let catalog = vec![
            product("1", FrameShape::Square, "black", 90.0),
            product("2", FrameShape::Round, "black", 90.0),
            product("3", FrameShape::Aviator, "black", 90.0),
            product("4", FrameShape::Round, "red", 90.0),
            product("5", FrameShape::Rectangle, "black", 90.0),
        ];
        let criteria = FilterCriteria {
            shapes: [FrameShape::Round].into(),
            ..Default::default()
        };
        let result =
            match_catalog(&fixtures::round_face(), &catalog, &criteria, &Tuning::default()).unwrap();
        assert_eq!(result.len(), 2);
        let mut ids: Vec<&str> = result.recommendations.iter().map(|s| s.product.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[test]
    fn test_invalid_criteria_checked_first() {
        let mut landmarks = fixtures::oval_face();
        landmarks.remove(LandmarkName::Chin);
        let criteria = FilterCriteria {
            price_min: Some(10.0),
            price_max: Some(5.0),
            ..Default::default()
        };
        assert!(matches!(
            match_catalog(&landmarks, &[], &criteria, &Tuning::default()),
            Err(CoreError::InvalidFilterCriteria(_))
        ));
    }

    #[test]
    fn test_missing_chin_yields_incomplete() {
        let mut landmarks = fixtures::oval_face();
        landmarks.remove(LandmarkName::Chin);
        let catalog = vec![product("1", FrameShape::Square, "black", 90.0)];
        assert_eq!(
            match_catalog(&landmarks, &catalog, &FilterCriteria::default(), &Tuning::default()),
            Err(CoreError::IncompleteLandmarks(vec![LandmarkName::Chin]))
        );
    }

    #[test]
    fn test_degenerate_geometry_maps_to_core_error() {
        let mut landmarks = fixtures::oval_face();
        let left = landmarks.get(LandmarkName::CheekboneLeft).unwrap();
        landmarks.insert(LandmarkName::CheekboneRight, left);
        match analyze(&landmarks, &Tuning::default()) {
            Err(CoreError::DegenerateGeometry(msg)) => assert!(msg.contains("cheekbone width")),
            other => panic!("expected DegenerateGeometry, got {other:?}"),
        }
    }

    #[test]
    fn test_no_survivors_still_reports_shape() {
        let catalog = vec![product("1", FrameShape::Square, "black", 900.0)];
        let criteria = FilterCriteria {
            price_max: Some(100.0),
            ..Default::default()
        };
        let result =
            match_catalog(&fixtures::heart_face(), &catalog, &criteria, &Tuning::default()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.face_shape, FaceShape::Heart);
    }
}

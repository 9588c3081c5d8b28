//! Face-shape classification over normalized measurements.
//!
//! The decision procedure is a fixed three-way split:
//!
//! ```text
//! tapered   (jaw/cheek ≤ narrow_jaw_max or forehead/jaw ≥ wide_forehead_min)
//!             chin ≥ pointed_chin_min → diamond, else heart
//! balanced  (width/height ≥ balanced_width_min)
//!             chin < round_chin_max → round, else oval
//! elongated (everything else)
//!             jaw/cheek ≥ square_jaw_min → square
//!             jaw/cheek ≥ angular_jaw_min → rectangle
//!             else oval
//! ```
//!
//! Every branch ends in a shape, so classification is total.
//!
//! Heart and diamond faces taper from the cheekbones down: the jaw is the
//! narrow end. A forehead that is narrower than the jaw therefore does not
//! enter the tapered branch; such faces fall through to the width/height
//! and jaw-angularity checks (a long face with a wide jaw is a rectangle).

use crate::tuning::ClassifierThresholds;
use crate::types::{FaceMeasurements, FaceShape};

pub fn classify(m: &FaceMeasurements, t: &ClassifierThresholds) -> FaceShape {
    let tapered = m.jaw_to_cheekbone <= t.narrow_jaw_max || m.forehead_to_jaw >= t.wide_forehead_min;

    let shape = if tapered {
        if m.chin_sharpness >= t.pointed_chin_min {
            FaceShape::Diamond
        } else {
            FaceShape::Heart
        }
    } else if m.width_to_height >= t.balanced_width_min {
        if m.chin_sharpness < t.round_chin_max {
            FaceShape::Round
        } else {
            FaceShape::Oval
        }
    } else if m.jaw_to_cheekbone >= t.square_jaw_min {
        FaceShape::Square
    } else if m.jaw_to_cheekbone >= t.angular_jaw_min {
        FaceShape::Rectangle
    } else {
        FaceShape::Oval
    };

    tracing::debug!(shape = %shape, tapered, "face shape classified");
    shape
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::geometry::extract_measurements;

    fn classify_default(set: &crate::types::LandmarkSet) -> FaceShape {
        let m = extract_measurements(set).unwrap();
        classify(&m, &ClassifierThresholds::default())
    }

    #[test]
    fn test_narrow_forehead_is_not_tapered() {
        let m = FaceMeasurements {
            width_to_height: 0.8,
            jaw_to_cheekbone: 0.95,
            forehead_to_jaw: 0.6,
            chin_sharpness: 1.5,
            eye_line_tilt_degrees: 0.0,
        };
        assert_eq!(classify(&m, &ClassifierThresholds::default()), FaceShape::Rectangle);
    }

    #[test]
    fn test_oval() {
        assert_eq!(classify_default(&fixtures::oval_face()), FaceShape::Oval);
    }

    #[test]
    fn test_round() {
        assert_eq!(classify_default(&fixtures::round_face()), FaceShape::Round);
    }

    #[test]
    fn test_square() {
        assert_eq!(classify_default(&fixtures::square_face()), FaceShape::Square);
    }

    #[test]
    fn test_rectangle() {
        assert_eq!(classify_default(&fixtures::rectangle_face()), FaceShape::Rectangle);
    }

    #[test]
    fn test_heart() {
        assert_eq!(classify_default(&fixtures::heart_face()), FaceShape::Heart);
    }

    #[test]
    fn test_diamond() {
        assert_eq!(classify_default(&fixtures::diamond_face()), FaceShape::Diamond);
    }

    #[test]
    fn test_elongated_soft_jaw_is_oval() {
        let set = fixtures::face(200.0, 170.0, 170.0, 260.0, 80.0);
        assert_eq!(classify_default(&set), FaceShape::Oval);
    }

    #[test]
    fn test_thresholds_are_tunable() {
        let m = extract_measurements(&fixtures::oval_face()).unwrap();
        let t = ClassifierThresholds {
            round_chin_max: 1.5,
            ..ClassifierThresholds::default()
        };
        assert_eq!(classify(&m, &t), FaceShape::Round);
    }

    #[test]
    fn test_total_over_measurement_grid() {
        let t = ClassifierThresholds::default();
        let steps = [0.1, 0.5, 0.79, 0.8, 0.85, 0.9, 0.97, 1.0, 1.25, 1.3, 2.0, 5.0];
        for &w in &steps {
            for &j in &steps {
                for &f in &steps {
                    for &c in &steps {
                        let m = FaceMeasurements {
                            width_to_height: w,
                            jaw_to_cheekbone: j,
                            forehead_to_jaw: f,
                            chin_sharpness: c,
                            eye_line_tilt_degrees: 0.0,
                        };
                        assert!(FaceShape::ALL.contains(&classify(&m, &t)));
                    }
                }
            }
        }
    }
}

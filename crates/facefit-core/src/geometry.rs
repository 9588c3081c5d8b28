//! Landmark geometry → normalized face measurements.
//!
//! Every measurement is a ratio of two Euclidean distances, so the result
//! does not depend on the resolution of the analysed image.

use crate::types::{FaceMeasurements, LandmarkName, LandmarkSet, Point};
use thiserror::Error;

/// Distances shorter than this (in pixels) cannot serve as a ratio denominator.
pub const MIN_PIXEL_DISTANCE: f64 = 1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("incomplete landmarks: missing {}", join_names(.missing))]
    IncompleteLandmarks { missing: Vec<LandmarkName> },
    #[error("landmark {landmark} has invalid coordinate ({x}, {y})")]
    InvalidCoordinate { landmark: LandmarkName, x: f64, y: f64 },
    #[error("{measurement} is {distance:.3}px, below the {min}px minimum", min = MIN_PIXEL_DISTANCE)]
    DegenerateGeometry { measurement: &'static str, distance: f64 },
}

fn join_names(names: &[LandmarkName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolved landmark coordinates, one field per required point.
struct Resolved {
    left_eye_outer: Point,
    right_eye_outer: Point,
    jaw_left: Point,
    jaw_right: Point,
    chin: Point,
    forehead_left: Point,
    forehead_right: Point,
    cheekbone_left: Point,
    cheekbone_right: Point,
}

fn resolve(landmarks: &LandmarkSet) -> Result<Resolved, GeometryError> {
    let missing = landmarks.missing();
    if !missing.is_empty() {
        return Err(GeometryError::IncompleteLandmarks { missing });
    }

    // Inner eye corners carry no ratio of their own but are still validated.
    for name in LandmarkName::ALL {
        let point = landmarks
            .get(name)
            .ok_or_else(|| GeometryError::IncompleteLandmarks { missing: vec![name] })?;
        if !point.is_valid() {
            return Err(GeometryError::InvalidCoordinate {
                landmark: name,
                x: point.x,
                y: point.y,
            });
        }
    }

    let at = |name: LandmarkName| {
        landmarks
            .get(name)
            .ok_or_else(|| GeometryError::IncompleteLandmarks { missing: vec![name] })
    };

    Ok(Resolved {
        left_eye_outer: at(LandmarkName::LeftEyeOuter)?,
        right_eye_outer: at(LandmarkName::RightEyeOuter)?,
        jaw_left: at(LandmarkName::JawLeft)?,
        jaw_right: at(LandmarkName::JawRight)?,
        chin: at(LandmarkName::Chin)?,
        forehead_left: at(LandmarkName::ForeheadLeft)?,
        forehead_right: at(LandmarkName::ForeheadRight)?,
        cheekbone_left: at(LandmarkName::CheekboneLeft)?,
        cheekbone_right: at(LandmarkName::CheekboneRight)?,
    })
}

/// Reject a distance that is too short to divide by.
fn denominator(measurement: &'static str, distance: f64) -> Result<f64, GeometryError> {
    if distance < MIN_PIXEL_DISTANCE {
        return Err(GeometryError::DegenerateGeometry {
            measurement,
            distance,
        });
    }
    Ok(distance)
}

/// Roll of the line through both outer eye corners, folded into (-90°, 90°].
fn eye_line_tilt(left: &Point, right: &Point) -> f64 {
    let mut deg = (right.y - left.y).atan2(right.x - left.x).to_degrees();
    if deg > 90.0 {
        deg -= 180.0;
    } else if deg <= -90.0 {
        deg += 180.0;
    }
    deg
}

/// Derive the four classification ratios from a complete landmark set.
pub fn extract_measurements(landmarks: &LandmarkSet) -> Result<FaceMeasurements, GeometryError> {
    let p = resolve(landmarks)?;

    let cheekbone_width = denominator(
        "cheekbone width",
        p.cheekbone_left.distance(&p.cheekbone_right),
    )?;
    let jaw_width = denominator("jaw width", p.jaw_left.distance(&p.jaw_right))?;
    let forehead_mid = p.forehead_left.midpoint(&p.forehead_right);
    let face_height = denominator("face height", forehead_mid.distance(&p.chin))?;
    denominator(
        "outer eye span",
        p.left_eye_outer.distance(&p.right_eye_outer),
    )?;

    let forehead_width = p.forehead_left.distance(&p.forehead_right);
    let jaw_mid = p.jaw_left.midpoint(&p.jaw_right);
    let chin_drop = jaw_mid.distance(&p.chin);

    let measurements = FaceMeasurements {
        width_to_height: cheekbone_width / face_height,
        jaw_to_cheekbone: jaw_width / cheekbone_width,
        forehead_to_jaw: forehead_width / jaw_width,
        chin_sharpness: chin_drop / (jaw_width / 2.0),
        eye_line_tilt_degrees: eye_line_tilt(&p.left_eye_outer, &p.right_eye_outer),
    };

    tracing::debug!(
        width_to_height = measurements.width_to_height,
        jaw_to_cheekbone = measurements.jaw_to_cheekbone,
        forehead_to_jaw = measurements.forehead_to_jaw,
        chin_sharpness = measurements.chin_sharpness,
        tilt = measurements.eye_line_tilt_degrees,
        "face measurements extracted"
    );

    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_oval_fixture_ratios() {
        let m = extract_measurements(&fixtures::oval_face()).unwrap();
        assert!((m.width_to_height - 1.0).abs() < 1e-9, "w/h = {}", m.width_to_height);
        assert!((m.jaw_to_cheekbone - 0.9).abs() < 1e-9);
        assert!((m.forehead_to_jaw - 1.0).abs() < 1e-9);
        assert!((m.chin_sharpness - 1.0).abs() < 1e-9);
        assert!(m.eye_line_tilt_degrees.abs() < 1e-9);
    }

    #[test]
    fn test_ratios_are_resolution_independent() {
        let base = extract_measurements(&fixtures::oval_face()).unwrap();
        let scaled = extract_measurements(&fixtures::scaled(&fixtures::oval_face(), 3.5)).unwrap();
        assert!((base.width_to_height - scaled.width_to_height).abs() < 1e-9);
        assert!((base.jaw_to_cheekbone - scaled.jaw_to_cheekbone).abs() < 1e-9);
        assert!((base.forehead_to_jaw - scaled.forehead_to_jaw).abs() < 1e-9);
        assert!((base.chin_sharpness - scaled.chin_sharpness).abs() < 1e-9);
    }

    #[test]
    fn test_missing_chin_is_incomplete() {
        let mut set = fixtures::oval_face();
        set.remove(LandmarkName::Chin);
        let err = extract_measurements(&set).unwrap_err();
        assert_eq!(
            err,
            GeometryError::IncompleteLandmarks {
                missing: vec![LandmarkName::Chin]
            }
        );
        assert!(err.to_string().contains("chin"));
    }

    #[test]
    fn test_zero_cheekbone_width_is_degenerate() {
        let mut set = fixtures::oval_face();
        let left = set.get(LandmarkName::CheekboneLeft).unwrap();
        set.insert(LandmarkName::CheekboneRight, left);
        match extract_measurements(&set) {
            Err(GeometryError::DegenerateGeometry { measurement, distance }) => {
                assert_eq!(measurement, "cheekbone width");
                assert_eq!(distance, 0.0);
            }
            other => panic!("expected DegenerateGeometry, got {other:?}"),
        }
    }

    #[test]
    fn test_sub_pixel_jaw_is_degenerate() {
        let mut set = fixtures::oval_face();
        let left = set.get(LandmarkName::JawLeft).unwrap();
        set.insert(LandmarkName::JawRight, Point::new(left.x + 0.5, left.y));
        assert!(matches!(
            extract_measurements(&set),
            Err(GeometryError::DegenerateGeometry { measurement: "jaw width", .. })
        ));
    }

    #[test]
    fn test_negative_coordinate_rejected() {
        let mut set = fixtures::oval_face();
        set.insert(LandmarkName::ForeheadLeft, Point::new(-3.0, 100.0));
        assert!(matches!(
            extract_measurements(&set),
            Err(GeometryError::InvalidCoordinate { landmark: LandmarkName::ForeheadLeft, .. })
        ));
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let mut set = fixtures::oval_face();
        set.insert(LandmarkName::Chin, Point::new(200.0, f64::NAN));
        assert!(matches!(
            extract_measurements(&set),
            Err(GeometryError::InvalidCoordinate { landmark: LandmarkName::Chin, .. })
        ));
    }

    #[test]
    fn test_eye_line_tilt() {
        let left = Point::new(100.0, 100.0);
        let right = Point::new(200.0, 200.0);
        assert!((eye_line_tilt(&left, &right) - 45.0).abs() < 1e-9);
        // Mirrored naming folds back into range.
        assert!((eye_line_tilt(&right, &left) - 45.0).abs() < 1e-9);
        let flat_mirrored = eye_line_tilt(&Point::new(200.0, 50.0), &Point::new(100.0, 50.0));
        assert!(flat_mirrored.abs() < 1e-9);
    }
}

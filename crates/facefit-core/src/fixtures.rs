//! Synthetic landmark sets and products for tests.

use crate::catalog::{FrameColor, FrameShape, Product};
use crate::types::{LandmarkName, LandmarkSet, Point};

const CENTER_X: f64 = 200.0;
const FOREHEAD_Y: f64 = 100.0;
const CHEEKBONE_Y: f64 = 180.0;
const EYE_Y: f64 = 160.0;

/// Frontal face centred on x = 200 with the forehead line at y = 100.
///
/// `chin_drop` is the distance from the jaw line down to the chin.
pub fn face(
    cheekbone_width: f64,
    jaw_width: f64,
    forehead_width: f64,
    height: f64,
    chin_drop: f64,
) -> LandmarkSet {
    let chin_y = FOREHEAD_Y + height;
    let jaw_y = chin_y - chin_drop;
    let eye_span = cheekbone_width * 0.7;

    [
        (LandmarkName::ForeheadLeft, Point::new(CENTER_X - forehead_width / 2.0, FOREHEAD_Y)),
        (LandmarkName::ForeheadRight, Point::new(CENTER_X + forehead_width / 2.0, FOREHEAD_Y)),
        (LandmarkName::CheekboneLeft, Point::new(CENTER_X - cheekbone_width / 2.0, CHEEKBONE_Y)),
        (LandmarkName::CheekboneRight, Point::new(CENTER_X + cheekbone_width / 2.0, CHEEKBONE_Y)),
        (LandmarkName::JawLeft, Point::new(CENTER_X - jaw_width / 2.0, jaw_y)),
        (LandmarkName::JawRight, Point::new(CENTER_X + jaw_width / 2.0, jaw_y)),
        (LandmarkName::Chin, Point::new(CENTER_X, chin_y)),
        (LandmarkName::LeftEyeOuter, Point::new(CENTER_X - eye_span / 2.0, EYE_Y)),
        (LandmarkName::LeftEyeInner, Point::new(CENTER_X - eye_span / 8.0, EYE_Y)),
        (LandmarkName::RightEyeInner, Point::new(CENTER_X + eye_span / 8.0, EYE_Y)),
        (LandmarkName::RightEyeOuter, Point::new(CENTER_X + eye_span / 2.0, EYE_Y)),
    ]
    .into_iter()
    .collect()
}

/// Width ≈ height, soft tapering chin.
pub fn oval_face() -> LandmarkSet {
    face(200.0, 180.0, 180.0, 200.0, 90.0)
}

/// Width ≈ height, blunt chin.
pub fn round_face() -> LandmarkSet {
    face(200.0, 180.0, 180.0, 200.0, 50.0)
}

pub fn square_face() -> LandmarkSet {
    face(200.0, 196.0, 196.0, 240.0, 60.0)
}

pub fn rectangle_face() -> LandmarkSet {
    face(200.0, 186.0, 186.0, 300.0, 60.0)
}

/// Wide forehead over a narrow jaw.
pub fn heart_face() -> LandmarkSet {
    face(200.0, 150.0, 200.0, 220.0, 80.0)
}

/// Narrow forehead and jaw, pointed chin.
pub fn diamond_face() -> LandmarkSet {
    face(200.0, 150.0, 150.0, 240.0, 120.0)
}

/// Every coordinate multiplied by `factor`.
pub fn scaled(set: &LandmarkSet, factor: f64) -> LandmarkSet {
    set.iter()
        .map(|(name, p)| (name, Point::new(p.x * factor, p.y * factor)))
        .collect()
}

/// Available, non-prescription, unrated product.
pub fn product(id: &str, shape: FrameShape, color: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("{shape} frame {id}"),
        frame_shape: shape,
        frame_color: FrameColor::new(color),
        price,
        prescription_capable: false,
        available: true,
        rating: None,
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named anatomical reference points the geometry extractor needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LandmarkName {
    LeftEyeOuter,
    LeftEyeInner,
    RightEyeOuter,
    RightEyeInner,
    JawLeft,
    JawRight,
    Chin,
    ForeheadLeft,
    ForeheadRight,
    CheekboneLeft,
    CheekboneRight,
}

impl LandmarkName {
    /// Every landmark required for classification.
    pub const ALL: [LandmarkName; 11] = [
        LandmarkName::LeftEyeOuter,
        LandmarkName::LeftEyeInner,
        LandmarkName::RightEyeOuter,
        LandmarkName::RightEyeInner,
        LandmarkName::JawLeft,
        LandmarkName::JawRight,
        LandmarkName::Chin,
        LandmarkName::ForeheadLeft,
        LandmarkName::ForeheadRight,
        LandmarkName::CheekboneLeft,
        LandmarkName::CheekboneRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LandmarkName::LeftEyeOuter => "left-eye-outer",
            LandmarkName::LeftEyeInner => "left-eye-inner",
            LandmarkName::RightEyeOuter => "right-eye-outer",
            LandmarkName::RightEyeInner => "right-eye-inner",
            LandmarkName::JawLeft => "jaw-left",
            LandmarkName::JawRight => "jaw-right",
            LandmarkName::Chin => "chin",
            LandmarkName::ForeheadLeft => "forehead-left",
            LandmarkName::ForeheadRight => "forehead-right",
            LandmarkName::CheekboneLeft => "cheekbone-left",
            LandmarkName::CheekboneRight => "cheekbone-right",
        }
    }
}

impl FromStr for LandmarkName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LandmarkName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown landmark '{s}'"))
    }
}

impl fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 2D coordinate in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Finite and non-negative on both axes.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x >= 0.0 && self.y >= 0.0
    }
}

/// Landmarks reported by the vision provider for a single face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: BTreeMap<LandmarkName, Point>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: LandmarkName, point: Point) -> Option<Point> {
        self.points.insert(name, point)
    }

    pub fn remove(&mut self, name: LandmarkName) -> Option<Point> {
        self.points.remove(&name)
    }

    pub fn get(&self, name: LandmarkName) -> Option<Point> {
        self.points.get(&name).copied()
    }

    /// Required landmarks absent from this set, in declaration order.
    pub fn missing(&self) -> Vec<LandmarkName> {
        LandmarkName::ALL
            .iter()
            .copied()
            .filter(|name| !self.points.contains_key(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LandmarkName, Point)> + '_ {
        self.points.iter().map(|(name, point)| (*name, *point))
    }
}

impl FromIterator<(LandmarkName, Point)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (LandmarkName, Point)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Resolution-independent ratios derived from a [`LandmarkSet`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceMeasurements {
    /// Cheekbone width over face height (forehead midpoint to chin).
    pub width_to_height: f64,
    /// Jaw width over cheekbone width.
    pub jaw_to_cheekbone: f64,
    /// Forehead width over jaw width.
    pub forehead_to_jaw: f64,
    /// Chin drop below the jaw line over half the jaw width. Higher = more pointed.
    pub chin_sharpness: f64,
    /// Roll of the outer-eye line in degrees. Diagnostic only.
    pub eye_line_tilt_degrees: f64,
}

/// Coarse face-shape category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Rectangle,
    Heart,
    Diamond,
}

impl FaceShape {
    pub const ALL: [FaceShape; 6] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Rectangle,
        FaceShape::Heart,
        FaceShape::Diamond,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FaceShape::Oval => "oval",
            FaceShape::Round => "round",
            FaceShape::Square => "square",
            FaceShape::Rectangle => "rectangle",
            FaceShape::Heart => "heart",
            FaceShape::Diamond => "diamond",
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

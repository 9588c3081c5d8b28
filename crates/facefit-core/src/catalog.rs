//! Catalog product attributes consumed by the matching engine.
//!
//! Products are owned by the storefront catalog; the engine only ever
//! borrows them for the duration of one request.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Frame silhouette offered by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameShape {
    Aviator,
    Square,
    Rectangle,
    Oval,
    Round,
}

impl FrameShape {
    pub const ALL: [FrameShape; 5] = [
        FrameShape::Aviator,
        FrameShape::Square,
        FrameShape::Rectangle,
        FrameShape::Oval,
        FrameShape::Round,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FrameShape::Aviator => "aviator",
            FrameShape::Square => "square",
            FrameShape::Rectangle => "rectangle",
            FrameShape::Oval => "oval",
            FrameShape::Round => "round",
        }
    }
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FrameShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FrameShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == wanted)
            .ok_or_else(|| format!("unknown frame shape: {s}"))
    }
}

/// Catalog frame colour, compared case-insensitively.
///
/// Colours come from the catalog itself rather than a fixed list, so this is
/// a normalised string rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FrameColor(String);

impl FrameColor {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for FrameColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FrameColor::new(&raw))
    }
}

impl From<&str> for FrameColor {
    fn from(name: &str) -> Self {
        FrameColor::new(name)
    }
}

impl fmt::Display for FrameColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A purchasable frame as exposed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identity. Used as the ranking tie-break key.
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub frame_shape: FrameShape,
    pub frame_color: FrameColor,
    pub price: f64,
    #[serde(default)]
    pub prescription_capable: bool,
    #[serde(default = "default_available")]
    pub available: bool,
    /// Average shopper rating in [0, 5], if any.
    #[serde(default)]
    pub rating: Option<f64>,
}

fn default_available() -> bool {
    true
}

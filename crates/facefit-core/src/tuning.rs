//! Classifier thresholds, frame affinity table, and scoring weights.
//!
//! The built-in values are placeholders meant to be tuned against labelled
//! data. `contrib/tuning.toml` mirrors them and can be copied as a starting
//! point for an override file.

use crate::catalog::FrameShape;
use crate::types::FaceShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("tuning file parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid tuning value for {field}: {value}")]
    InvalidValue { field: String, value: f64 },
}

/// Decision thresholds for the face-shape classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierThresholds {
    /// Jaw/cheekbone at or below this marks a tapered (heart/diamond) face.
    pub narrow_jaw_max: f64,
    /// Forehead/jaw at or above this also marks a tapered face.
    pub wide_forehead_min: f64,
    /// Tapered faces with chin sharpness at or above this are diamond, otherwise heart.
    pub pointed_chin_min: f64,
    /// Width/height at or above this counts as balanced (width ≈ height).
    pub balanced_width_min: f64,
    /// Balanced faces with chin sharpness below this are round, otherwise oval.
    pub round_chin_max: f64,
    /// Elongated faces with jaw/cheekbone at or above this have an angular jaw.
    pub angular_jaw_min: f64,
    /// Angular elongated faces with jaw/cheekbone at or above this are square, otherwise rectangle.
    pub square_jaw_min: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            narrow_jaw_max: 0.80,
            wide_forehead_min: 1.25,
            pointed_chin_min: 1.30,
            balanced_width_min: 0.90,
            round_chin_max: 0.70,
            angular_jaw_min: 0.90,
            square_jaw_min: 0.97,
        }
    }
}

impl ClassifierThresholds {
    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("classifier.narrow_jaw_max", self.narrow_jaw_max),
            ("classifier.wide_forehead_min", self.wide_forehead_min),
            ("classifier.pointed_chin_min", self.pointed_chin_min),
            ("classifier.balanced_width_min", self.balanced_width_min),
            ("classifier.round_chin_max", self.round_chin_max),
            ("classifier.angular_jaw_min", self.angular_jaw_min),
            ("classifier.square_jaw_min", self.square_jaw_min),
        ]
    }
}

/// Secondary scoring factors layered under the affinity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    /// Maximum score penalty for an unrated or zero-rated product.
    /// Capped per face shape so it never crosses an affinity tier.
    pub rating_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { rating_weight: 0.04 }
    }
}

/// Face shape × frame shape → base affinity in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AffinityTable {
    rows: BTreeMap<FaceShape, BTreeMap<FrameShape, f64>>,
}

// Columns: aviator, square, rectangle, oval, round.
const DEFAULT_AFFINITY: [(FaceShape, [f64; 5]); 6] = [
    // Balanced proportions tolerate everything; angular slightly favoured.
    (FaceShape::Oval, [0.80, 0.85, 0.85, 0.70, 0.75]),
    // Soft faces want contrast from angular frames.
    (FaceShape::Round, [0.60, 0.95, 0.90, 0.35, 0.20]),
    (FaceShape::Square, [0.70, 0.20, 0.30, 0.90, 0.95]),
    (FaceShape::Rectangle, [0.75, 0.40, 0.25, 0.90, 0.85]),
    (FaceShape::Heart, [0.60, 0.45, 0.55, 0.85, 0.80]),
    (FaceShape::Diamond, [0.65, 0.55, 0.60, 0.90, 0.80]),
];

impl Default for AffinityTable {
    fn default() -> Self {
        let rows = DEFAULT_AFFINITY
            .iter()
            .map(|(face, values)| {
                let row = FrameShape::ALL.iter().copied().zip(values.iter().copied()).collect();
                (*face, row)
            })
            .collect();
        Self { rows }
    }
}

impl AffinityTable {
    /// Base affinity for a pairing. The table is always complete.
    pub fn get(&self, face: FaceShape, frame: FrameShape) -> f64 {
        self.rows
            .get(&face)
            .and_then(|row| row.get(&frame))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, face: FaceShape, frame: FrameShape, value: f64) {
        self.rows.entry(face).or_default().insert(frame, value);
    }

    /// Smallest positive difference between two affinities in one face row.
    /// `None` when every frame shape scores the same.
    pub fn min_tier_gap(&self, face: FaceShape) -> Option<f64> {
        let mut values: Vec<f64> = FrameShape::ALL.iter().map(|&f| self.get(face, f)).collect();
        values.sort_by(f64::total_cmp);
        values
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|gap| *gap > f64::EPSILON)
            .min_by(f64::total_cmp)
    }
}

/// Everything tunable about classification and scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tuning {
    pub classifier: ClassifierThresholds,
    pub scoring: ScoringWeights,
    pub affinity: AffinityTable,
}

/// On-disk shape of a tuning override file; every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TuningFile {
    classifier: ClassifierThresholds,
    scoring: ScoringWeights,
    affinity: BTreeMap<FaceShape, BTreeMap<FrameShape, f64>>,
}

impl Tuning {
    /// Parse a TOML override. Missing keys keep their built-in defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, TuningError> {
        let file: TuningFile = toml::from_str(src)?;
        let mut affinity = AffinityTable::default();
        for (face, row) in file.affinity {
            for (frame, value) in row {
                affinity.set(face, frame, value);
            }
        }
        let tuning = Self {
            classifier: file.classifier,
            scoring: file.scoring,
            affinity,
        };
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in self.classifier.fields() {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::InvalidValue {
                    field: field.to_string(),
                    value,
                });
            }
        }

        let weight = self.scoring.rating_weight;
        if !weight.is_finite() || weight < 0.0 {
            return Err(TuningError::InvalidValue {
                field: "scoring.rating_weight".into(),
                value: weight,
            });
        }

        for face in FaceShape::ALL {
            for frame in FrameShape::ALL {
                let value = self.affinity.get(face, frame);
                if !(0.0..=1.0).contains(&value) {
                    return Err(TuningError::InvalidValue {
                        field: format!("affinity.{face}.{frame}"),
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Rating weight actually applied for `face`, capped at half the
    /// narrowest affinity gap in that row.
    pub fn effective_rating_weight(&self, face: FaceShape) -> f64 {
        let configured = self.scoring.rating_weight;
        match self.affinity.min_tier_gap(face) {
            Some(gap) => configured.min(gap / 2.0),
            None => configured,
        }
    }
}

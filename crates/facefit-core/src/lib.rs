//! facefit-core — Face-shape classification and frame compatibility ranking.
//!
//! Turns a set of facial landmarks into normalized measurements, classifies
//! the face shape, filters a borrowed catalog snapshot by the shopper's hard
//! constraints, and ranks the survivors by frame affinity.

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod matching;
pub mod ranker;
pub mod scorer;
pub mod tuning;
pub mod types;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use catalog::{FrameColor, FrameShape, Product};
pub use error::CoreError;
pub use filter::{FilterCriteria, Prescription};
pub use matching::{analyze, match_catalog, FaceAnalysis};
pub use ranker::RecommendationResult;
pub use scorer::{AffinityScorer, Fit, ScoredProduct, Scorer};
pub use tuning::Tuning;
pub use types::{FaceMeasurements, FaceShape, LandmarkName, LandmarkSet, Point};

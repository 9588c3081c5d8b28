use crate::geometry::GeometryError;
use crate::types::LandmarkName;
use thiserror::Error;

/// Recoverable outcomes reported to the caller of the matching engine.
///
/// None of these is fatal; the caller decides whether to ask for a new photo
/// or fall back to filter-only results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("landmark detection failed: {0}")]
    DetectionFailed(String),
    #[error("incomplete landmarks: missing {}", join_names(.0))]
    IncompleteLandmarks(Vec<LandmarkName>),
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("invalid filter criteria: {0}")]
    InvalidFilterCriteria(String),
    #[error("request cancelled before landmarks were received")]
    Cancelled,
}

fn join_names(names: &[LandmarkName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<GeometryError> for CoreError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::IncompleteLandmarks { missing } => CoreError::IncompleteLandmarks(missing),
            other @ (GeometryError::InvalidCoordinate { .. }
            | GeometryError::DegenerateGeometry { .. }) => {
                CoreError::DegenerateGeometry(other.to_string())
            }
        }
    }
}

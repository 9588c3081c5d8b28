//! Read-only catalog snapshots loaded from JSON exports.

use facefit_core::Product;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a JSON array of products.
///
/// Duplicate ids are kept but logged, since ranking ties are broken on id.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;

    let mut seen = HashSet::new();
    for p in &products {
        if !seen.insert(p.id.as_str()) {
            tracing::warn!(id = %p.id, "duplicate product id in catalog");
        }
    }

    tracing::info!(path = %path.display(), products = products.len(), "catalog loaded");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facefit_core::FrameShape;
    use std::io::Write;

    #[test]
    fn test_load_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "a1", "name": "Aviator Classic", "frame_shape": "aviator", "frame_color": "Black", "price": 129.0, "rating": 4.6}},
                {{"id": "r2", "frame_shape": "round", "frame_color": "brown", "price": 59.5, "available": false}}
            ]"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].frame_shape, FrameShape::Aviator);
        assert_eq!(catalog[0].rating, Some(4.6));
        assert!(!catalog[1].available);
    }

    #[test]
    fn test_load_catalog_invalid_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "x", "frame_shape": "hexagon", "frame_color": "red", "price": 1.0}}]"#
        )
        .unwrap();
        assert!(matches!(load_catalog(file.path()), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        assert!(matches!(
            load_catalog(Path::new("/nonexistent/catalog.json")),
            Err(CatalogError::Io(_))
        ));
    }
}

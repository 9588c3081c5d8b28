//! Shopper filter criteria and the hard include/exclude pass over the catalog.

use crate::catalog::{FrameColor, FrameShape, Product};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const MAX_RATING: f64 = 5.0;

/// Whether the shopper needs prescription lenses fitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Prescription {
    Required,
    #[default]
    NotRequired,
}

/// Immutable snapshot of the shopper's filter selections.
///
/// Empty shape/colour sets and absent bounds mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterCriteria {
    pub prescription: Prescription,
    pub shapes: BTreeSet<FrameShape>,
    pub colors: BTreeSet<FrameColor>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    /// Check the criteria are internally consistent.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        for (label, bound) in [("price_min", self.price_min), ("price_max", self.price_max)] {
            if let Some(v) = bound {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{label} must be a non-negative number, got {v}"));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(format!("price_min {min} is greater than price_max {max}"));
            }
        }
        if let Some(r) = self.min_rating {
            if !(0.0..=MAX_RATING).contains(&r) {
                return Err(format!("min_rating must be within [0, {MAX_RATING}], got {r}"));
            }
        }
        Ok(())
    }

    /// Conjunction of every predicate; evaluation order does not matter.
    pub fn accepts(&self, product: &Product) -> bool {
        let prescription_ok =
            self.prescription == Prescription::NotRequired || product.prescription_capable;
        let shape_ok = self.shapes.is_empty() || self.shapes.contains(&product.frame_shape);
        let color_ok = self.colors.is_empty() || self.colors.contains(&product.frame_color);
        let min_ok = self.price_min.map_or(true, |min| product.price >= min);
        let max_ok = self.price_max.map_or(true, |max| product.price <= max);
        let rating_ok = match self.min_rating {
            None => true,
            Some(min) => product.rating.is_some_and(|r| r >= min),
        };

        product.available && prescription_ok && shape_ok && color_ok && min_ok && max_ok && rating_ok
    }
}

/// Stable filter: survivors keep their relative catalog order.
pub fn filter<'a>(catalog: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let survivors: Vec<&Product> = catalog.iter().filter(|p| criteria.accepts(p)).collect();
    tracing::debug!(
        catalog = catalog.len(),
        survivors = survivors.len(),
        "catalog filtered"
    );
    survivors
}

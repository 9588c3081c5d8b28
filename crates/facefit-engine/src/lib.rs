//! facefit-engine — Caller-facing recommendation entry point.
//!
//! Wires the landmark provider to the pure matching core: validates the
//! shopper's filters, awaits landmark detection under a timeout, then runs
//! classification, filtering, scoring and ranking to completion.

pub mod catalog;
pub mod config;
pub mod engine;

pub use catalog::{load_catalog, CatalogError};
pub use config::{Config, ConfigError};
pub use engine::Engine;

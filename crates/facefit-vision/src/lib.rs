//! facefit-vision — Boundary to the external landmark detection service.
//!
//! Provides the image source type, image preparation before upload, the
//! `LandmarkProvider` trait, and HTTP and fixed-set provider implementations.

pub mod http;
pub mod prepare;
pub mod provider;
pub mod source;

pub use http::HttpLandmarkProvider;
pub use prepare::{prepare_image, DEFAULT_MAX_IMAGE_DIM};
pub use provider::{LandmarkProvider, ProviderError, StaticLandmarkProvider};
pub use source::ImageSource;

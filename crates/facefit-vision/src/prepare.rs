//! Image preparation before upload to the landmark provider.
//!
//! Large photos are shrunk so neither side exceeds the configured maximum.
//! Smaller images pass through untouched; images are never enlarged.

use crate::provider::ProviderError;
use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat};
use std::io::Cursor;

pub const DEFAULT_MAX_IMAGE_DIM: u32 = 900;

/// Downscale `bytes` to fit within `max_dim` × `max_dim`, preserving aspect.
///
/// Returns the original bytes when the image already fits; otherwise the
/// resized image re-encoded as PNG.
pub fn prepare_image(bytes: &[u8], max_dim: u32) -> Result<Vec<u8>, ProviderError> {
    let img = image::load_from_memory(bytes).map_err(|e| ProviderError::BadImage(e.to_string()))?;
    let (width, height) = img.dimensions();

    if width <= max_dim && height <= max_dim {
        tracing::debug!(width, height, "image within size limit");
        return Ok(bytes.to_vec());
    }

    let resized = img.resize(max_dim, max_dim, FilterType::Triangle);
    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ProviderError::BadImage(e.to_string()))?;

    tracing::debug!(
        from_width = width,
        from_height = height,
        to_width = resized.width(),
        to_height = resized.height(),
        "image downscaled"
    );
    Ok(out.into_inner())
}

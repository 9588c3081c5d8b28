use crate::provider::ProviderError;
use base64::Engine;
use std::path::Path;

/// Where the shopper's photo comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes (JPEG, PNG, ...).
    Bytes(Vec<u8>),
    /// Publicly reachable image URL, fetched by the provider.
    Url(String),
}

impl ImageSource {
    pub fn from_path(path: &Path) -> Result<Self, ProviderError> {
        Ok(ImageSource::Bytes(std::fs::read(path)?))
    }

    /// Decode a `data:image/<type>;base64,<payload>` webcam capture.
    pub fn from_data_url(data_url: &str) -> Result<Self, ProviderError> {
        let rest = data_url
            .trim()
            .strip_prefix("data:image/")
            .ok_or_else(|| ProviderError::BadImage("not an image data URL".into()))?;
        let (_, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| ProviderError::BadImage("data URL is not base64-encoded".into()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ProviderError::BadImage(format!("invalid base64 payload: {e}")))?;
        if bytes.is_empty() {
            return Err(ProviderError::BadImage("empty image payload".into()));
        }
        Ok(ImageSource::Bytes(bytes))
    }

    /// Short description for log fields; never includes image content.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Bytes(b) => format!("{} bytes", b.len()),
            ImageSource::Url(u) => u.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_decoded() {
        let source = ImageSource::from_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(source, ImageSource::Bytes(b"hello".to_vec()));
    }

    #[test]
    fn test_data_url_jpeg_prefix_accepted() {
        let source = ImageSource::from_data_url("data:image/jpeg;base64,aGk=").unwrap();
        assert_eq!(source, ImageSource::Bytes(b"hi".to_vec()));
    }

    #[test]
    fn test_data_url_rejects_non_image() {
        assert!(matches!(
            ImageSource::from_data_url("data:text/plain;base64,aGk="),
            Err(ProviderError::BadImage(_))
        ));
    }

    #[test]
    fn test_data_url_rejects_bad_base64() {
        assert!(matches!(
            ImageSource::from_data_url("data:image/png;base64,***"),
            Err(ProviderError::BadImage(_))
        ));
    }

    #[test]
    fn test_describe_hides_bytes() {
        assert_eq!(ImageSource::Bytes(vec![0; 42]).describe(), "42 bytes");
        assert_eq!(
            ImageSource::Url("https://x/y.png".into()).describe(),
            "https://x/y.png"
        );
    }
}

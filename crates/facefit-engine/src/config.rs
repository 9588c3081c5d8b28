use facefit_core::tuning::TuningError;
use facefit_core::Tuning;
use facefit_vision::{HttpLandmarkProvider, DEFAULT_MAX_IMAGE_DIM};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::engine::Engine;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("FACEFIT_PROVIDER_URL is not set")]
    MissingProviderUrl,
    #[error("failed to read tuning file {path}: {source}")]
    TuningIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid tuning file {path}: {source}")]
    Tuning { path: PathBuf, source: TuningError },
}

/// Engine configuration, loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Landmark detection endpoint (required for photo analysis).
    pub provider_url: Option<String>,
    /// Bearer token sent to the detection endpoint.
    pub provider_api_key: Option<String>,
    /// Timeout in seconds for one landmark detection call.
    pub detect_timeout_secs: u64,
    /// Longest image side sent to the provider; larger photos are downscaled.
    pub max_image_dim: u32,
    /// Optional TOML file overriding classifier thresholds and affinities.
    pub tuning_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: None,
            provider_api_key: None,
            detect_timeout_secs: 10,
            max_image_dim: DEFAULT_MAX_IMAGE_DIM,
            tuning_path: None,
        }
    }
}

impl Config {
    /// Load configuration from `FACEFIT_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unparsable or zero numeric values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            provider_url: non_empty("FACEFIT_PROVIDER_URL"),
            provider_api_key: non_empty("FACEFIT_PROVIDER_API_KEY"),
            detect_timeout_secs: parse_or(
                lookup("FACEFIT_DETECT_TIMEOUT_SECS"),
                defaults.detect_timeout_secs,
            ),
            max_image_dim: parse_or(lookup("FACEFIT_MAX_IMAGE_DIM"), defaults.max_image_dim),
            tuning_path: non_empty("FACEFIT_TUNING_PATH").map(PathBuf::from),
        }
    }

    pub fn detect_timeout(&self) -> Duration {
        Duration::from_secs(self.detect_timeout_secs)
    }

    /// Built-in tuning, or the override file if one is configured.
    pub fn load_tuning(&self) -> Result<Tuning, ConfigError> {
        let Some(path) = &self.tuning_path else {
            return Ok(Tuning::default());
        };
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::TuningIo {
            path: path.clone(),
            source,
        })?;
        let tuning = Tuning::from_toml_str(&src).map_err(|source| ConfigError::Tuning {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "tuning override loaded");
        Ok(tuning)
    }

    /// Engine backed by the configured HTTP landmark provider.
    pub fn http_engine(&self) -> Result<Engine<HttpLandmarkProvider>, ConfigError> {
        let url = self
            .provider_url
            .as_deref()
            .ok_or(ConfigError::MissingProviderUrl)?;
        let mut provider = HttpLandmarkProvider::new(url).with_max_image_dim(self.max_image_dim);
        if let Some(key) = &self.provider_api_key {
            provider = provider.with_api_key(key.clone());
        }
        Ok(Engine::new(provider, self.load_tuning()?, self.detect_timeout()))
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Default + PartialEq,
{
    value
        .and_then(|v| v.trim().parse().ok())
        .filter(|v: &T| *v != T::default())
        .unwrap_or(default)
}

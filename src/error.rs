//! Error type shared by every face-overlay operation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("image not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported image format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("failed to load label font: {0}")]
    FontLoad(String),

    #[error("invalid json in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl OverlayError {
    /// Classify an `std::io::Error` raised while touching `path`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            OverlayError::NotFound { path }
        } else {
            OverlayError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;

/// Typed errors for qrkit encode, decode and export operations
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for qrkit operations
pub type QrKitResult<T> = Result<T, QrKitError>;

/// Errors that can occur while producing or reading QR codes
#[derive(Error, Debug)]
pub enum QrKitError {
    #[error("Failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Invalid image buffer: expected {expected} bytes, got {actual}")]
    InvalidImage { expected: usize, actual: usize },

    #[error("Failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image: {0}")]
    ImageWrite(#[from] image::ImageError),

    #[error("Failed to decode QR code: {0}")]
    Decode(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid colour {0:?} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QrKitError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QrKitError::Io {
            path: path.into(),
            source,
        }
    }
}

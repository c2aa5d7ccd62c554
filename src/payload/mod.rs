//! Payload construction, validation and classification
//!
//! Everything in here is pure string handling: building the Wi-Fi payload,
//! validating generator inputs and classifying decoded text. The actual QR
//! encoding and decoding live in [`crate::qr`].

pub mod classify;
pub mod content;
pub mod types;
pub mod wifi;

// Re-export public API
pub use classify::{Category, ClassifiedPayload, ReaderAction, WifiFields, classify};
pub use content::{normalize_url, validate_content, validate_url};
pub use types::{Security, ValidationReport, WifiConfig};

//! QR encoder/decoder collaborators
//!
//! Matrix encoding is done by `qrcode`, detection and decoding by `rqrr` and
//! raster I/O by `image`. This module only adapts them to qrkit's options and
//! error type.

pub mod export;
pub mod render;
pub mod scan;
pub mod types;

// Re-export public API
pub use export::{ExportFormat, save, timestamped_filename, write_to_path};
pub use render::{QrMatrix, encode};
pub use scan::{decode_file, decode_rgba};
pub use types::{EcLevel, QrOptions, Rgb};

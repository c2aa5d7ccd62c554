use std::path::Path;

use tracing::{debug, warn};

use crate::error::{QrKitError, QrKitResult};

/// Decode the first readable QR code in an RGBA buffer.
///
/// Returns `Ok(None)` when no symbol is found at all. When symbols are found
/// but none of them decode, the last decoder error is returned.
pub fn decode_rgba(width: u32, height: u32, rgba: &[u8]) -> QrKitResult<Option<String>> {
    let (w, h) = (width as usize, height as usize);
    let expected = w.checked_mul(h).and_then(|n| n.checked_mul(4));
    let Some(expected) = expected.filter(|n| *n == rgba.len()) else {
        return Err(QrKitError::InvalidImage {
            expected: expected.unwrap_or(usize::MAX),
            actual: rgba.len(),
        });
    };

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| {
        let i = (y * w + x) * 4;
        luma(rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3])
    });

    let grids = prepared.detect_grids();
    debug!(grids = grids.len(), width, height, "detected QR grids");

    let mut last_err = None;
    for grid in grids {
        match grid.decode() {
            Ok((_meta, content)) => {
                debug!(bytes = content.len(), "decoded QR grid");
                return Ok(Some(content));
            }
            Err(e) => {
                warn!(error = %e, "failed to decode detected QR grid");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(e) => Err(QrKitError::Decode(e.to_string())),
        None => Ok(None),
    }
}

pub fn decode_file(path: &Path) -> QrKitResult<Option<String>> {
    let img = image::open(path)
        .map_err(|source| QrKitError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    decode_rgba(img.width(), img.height(), img.as_raw())
}

/// Greyscale over a white backdrop so transparent pixels read as light
fn luma(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let y = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
    let a = a as u32;
    ((y * a + 255 * (255 - a)) / 255) as u8
}

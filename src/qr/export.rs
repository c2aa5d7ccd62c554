use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::error::{QrKitError, QrKitResult};
use crate::qr::render::QrMatrix;
use crate::qr::types::QrOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> QrKitResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            _ => Err(QrKitError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn render(&self, matrix: &QrMatrix, options: &QrOptions) -> QrKitResult<Vec<u8>> {
        match self {
            ExportFormat::Png => matrix.to_png(options),
            ExportFormat::Svg => Ok(matrix.to_svg(options).into_bytes()),
        }
    }
}

/// Write `bytes` to `dir/filename`, creating `dir` when needed
pub fn save(dir: &Path, filename: &str, bytes: &[u8]) -> QrKitResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| QrKitError::io(dir, e))?;
    let path = dir.join(filename);
    fs::write(&path, bytes).map_err(|e| QrKitError::io(&path, e))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved file");
    Ok(path)
}

/// Render and write a QR code, picking the format from the file extension
pub fn write_to_path(matrix: &QrMatrix, options: &QrOptions, path: &Path) -> QrKitResult<()> {
    let format = ExportFormat::from_path(path)?;
    let bytes = format.render(matrix, options)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| QrKitError::UnsupportedFormat(path.display().to_string()))?;
    save(dir, filename, &bytes)?;
    Ok(())
}

/// `<prefix>-<unix seconds>.<ext>`
pub fn timestamped_filename(prefix: &str, extension: &str) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{prefix}-{secs}.{extension}")
}

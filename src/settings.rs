//! User settings loaded from `<config_dir>/qrkit/config.toml`
//!
//! Every key is optional. A missing file gives the defaults; a file that can
//! not be read or parsed is logged and ignored. Out-of-range values are
//! clamped with a warning.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config;
use crate::qr::{EcLevel, QrOptions, Rgb};

pub const MIN_SIZE: u32 = 64;
pub const MAX_SIZE: u32 = 4096;
pub const MAX_MARGIN: u32 = 16;
pub const MAX_DEBOUNCE_MS: u64 = 5000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorSettings,
    pub export: ExportSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub size: u32,
    pub margin: u32,
    pub foreground: String,
    pub background: String,
    pub ec_level: String,
    pub debounce_ms: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let options = QrOptions::default();
        Self {
            size: options.size,
            margin: options.margin,
            foreground: options.foreground.to_hex(),
            background: options.background.to_hex(),
            ec_level: options.ec_level.to_string(),
            debounce_ms: config::DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub ascii: bool,
}

impl Settings {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(config::SETTINGS_FILENAME);
        path
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read settings, using defaults");
                return Self::default();
            }
        };

        match Self::from_toml_str(&contents) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let mut settings: Settings = toml::from_str(contents)?;
        settings.validate_and_clamp();
        Ok(settings)
    }

    fn validate_and_clamp(&mut self) {
        let defaults = GeneratorSettings::default();
        let generator = &mut self.generator;

        if generator.size < MIN_SIZE || generator.size > MAX_SIZE {
            let clamped = generator.size.clamp(MIN_SIZE, MAX_SIZE);
            warn!(size = generator.size, using = clamped, "size out of range, clamping");
            generator.size = clamped;
        }

        if generator.margin > MAX_MARGIN {
            warn!(margin = generator.margin, max = MAX_MARGIN, "margin exceeds maximum, clamping");
            generator.margin = MAX_MARGIN;
        }

        if generator.debounce_ms > MAX_DEBOUNCE_MS {
            warn!(debounce_ms = generator.debounce_ms, max = MAX_DEBOUNCE_MS, "debounce_ms exceeds maximum, clamping");
            generator.debounce_ms = MAX_DEBOUNCE_MS;
        }

        if Rgb::parse_hex(&generator.foreground).is_err() {
            warn!(foreground = %generator.foreground, "invalid foreground colour, using default");
            generator.foreground = defaults.foreground;
        }

        if Rgb::parse_hex(&generator.background).is_err() {
            warn!(background = %generator.background, "invalid background colour, using default");
            generator.background = defaults.background;
        }

        if generator.ec_level.parse::<EcLevel>().is_err() {
            warn!(ec_level = %generator.ec_level, "invalid error-correction level, using default");
            generator.ec_level = defaults.ec_level;
        }
    }

    pub fn qr_options(&self) -> QrOptions {
        let defaults = QrOptions::default();
        let generator = &self.generator;
        QrOptions {
            size: generator.size,
            margin: generator.margin,
            foreground: Rgb::parse_hex(&generator.foreground).unwrap_or(defaults.foreground),
            background: Rgb::parse_hex(&generator.background).unwrap_or(defaults.background),
            ec_level: generator.ec_level.parse().unwrap_or(defaults.ec_level),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.generator.debounce_ms)
    }

    /// Configured export directory, else the pictures dir, else the working dir
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .or_else(dirs::picture_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.qr_options(), QrOptions::default());
        assert_eq!(settings.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let settings = Settings::from_toml_str(
            r##"
            [generator]
            foreground = "#112233"
            ec_level = "h"

            [ui]
            ascii = true
            "##,
        )
        .unwrap();

        let options = settings.qr_options();
        assert_eq!(options.foreground, Rgb([0x11, 0x22, 0x33]));
        assert_eq!(options.background, Rgb::WHITE);
        assert_eq!(options.ec_level, EcLevel::H);
        assert_eq!(options.size, 300);
        assert!(settings.ui.ascii);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let settings = Settings::from_toml_str(
            r#"
            [generator]
            size = 10
            margin = 99
            debounce_ms = 60000
            "#,
        )
        .unwrap();
        assert_eq!(settings.generator.size, MIN_SIZE);
        assert_eq!(settings.generator.margin, MAX_MARGIN);
        assert_eq!(settings.generator.debounce_ms, MAX_DEBOUNCE_MS);
    }

    #[test]
    fn bad_colours_and_levels_fall_back() {
        let settings = Settings::from_toml_str(
            r#"
            [generator]
            background = "white"
            ec_level = "Z"
            "#,
        )
        .unwrap();
        assert_eq!(settings.generator.background, "#ffffff");
        assert_eq!(settings.generator.ec_level, "M");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Settings::from_toml_str("[generator\nsize = ").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/qrkit/config.toml")));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn explicit_export_directory_wins() {
        let settings = Settings::from_toml_str("[export]\ndirectory = \"/tmp/qr\"").unwrap();
        assert_eq!(settings.export_dir(), PathBuf::from("/tmp/qr"));
    }
}

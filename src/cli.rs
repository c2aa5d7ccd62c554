//! Command-line surface: argument parsing and the non-interactive commands
//!
//! Without a subcommand qrkit starts the terminal UI. Each subcommand runs
//! once and returns an [`Outcome`] that `main` turns into output and an exit
//! code.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::app::{GeneratorMode, GeneratorState, GeneratorUpdate};
use crate::error::QrKitResult;
use crate::payload::{ClassifiedPayload, Security, WifiConfig, classify, wifi};
use crate::qr::{self, EcLevel, QrOptions, Rgb};
use crate::settings::{MAX_MARGIN, MAX_SIZE, MIN_SIZE, Settings};

/// A keyboard-driven terminal app for generating and reading QR codes
#[derive(Parser, Debug)]
#[command(
    name = "qrkit",
    about = "A keyboard-driven terminal app for generating and reading QR codes, with Wi-Fi payload support.",
    long_about = None,
    version = env!("CARGO_PKG_VERSION"),
    disable_version_flag = true
)]
pub struct Args {
    /// Print version information
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Use ASCII icons (no Nerd Fonts required)
    #[arg(long)]
    pub ascii: bool,

    /// Show key logger for debugging
    #[arg(long = "show-keys")]
    pub show_keys: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode text, a URL or a Wi-Fi network into a PNG or SVG file
    Generate(GenerateArgs),
    /// Decode the QR code in an image and describe its content
    Read {
        /// PNG or JPEG image to scan
        image: PathBuf,
    },
    /// Describe what kind of content a decoded string is
    Classify {
        text: String,
    },
    /// Print the Wi-Fi payload for a network
    Wifi(WifiArgs),
}

#[derive(clap::Args, Debug)]
pub struct WifiArgs {
    /// Network name
    #[arg(long)]
    pub ssid: String,

    #[arg(long, default_value = "")]
    pub password: String,

    /// wpa, wep or nopass
    #[arg(long, default_value_t = Security::Wpa)]
    pub security: Security,

    #[arg(long)]
    pub hidden: bool,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Plain text content
    #[arg(long, conflicts_with_all = ["url", "ssid"], required_unless_present_any = ["url", "ssid"])]
    pub text: Option<String>,

    /// URL content; bare www. addresses get https://
    #[arg(long, conflicts_with = "ssid")]
    pub url: Option<String>,

    /// Wi-Fi network name
    #[arg(long)]
    pub ssid: Option<String>,

    /// Wi-Fi password, empty when omitted
    #[arg(long, conflicts_with_all = ["text", "url"])]
    pub password: Option<String>,

    /// wpa, wep or nopass; WPA when omitted
    #[arg(long, conflicts_with_all = ["text", "url"])]
    pub security: Option<Security>,

    #[arg(long, conflicts_with_all = ["text", "url"])]
    pub hidden: bool,

    /// Destination file; the extension picks PNG or SVG
    #[arg(short, long)]
    pub output: PathBuf,

    /// Image size in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Quiet zone in modules
    #[arg(long)]
    pub margin: Option<u32>,

    /// Error-correction level: L, M, Q or H
    #[arg(long)]
    pub ec: Option<EcLevel>,

    /// Foreground colour as #rrggbb
    #[arg(long)]
    pub fg: Option<Rgb>,

    /// Background colour as #rrggbb
    #[arg(long)]
    pub bg: Option<Rgb>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Printed to stdout, exit code 0
    Success(String),
    /// Printed to stderr one per line, non-zero exit code
    Invalid(Vec<String>),
}

pub fn execute(command: Command, settings: &Settings) -> QrKitResult<Outcome> {
    match command {
        Command::Generate(args) => generate(args, settings),
        Command::Read { image } => {
            info!(path = %image.display(), "reading image");
            Ok(match qr::decode_file(&image)? {
                Some(text) => Outcome::Success(describe(&classify(&text))),
                None => Outcome::Invalid(vec!["No QR code found in the image".to_string()]),
            })
        }
        Command::Classify { text } => Ok(Outcome::Success(describe(&classify(&text)))),
        Command::Wifi(args) => {
            let config = WifiConfig::new(args.ssid, args.password, args.security, args.hidden);
            let report = wifi::validate(&config);
            Ok(if report.is_valid() {
                Outcome::Success(wifi::encode(&config))
            } else {
                Outcome::Invalid(report.errors)
            })
        }
    }
}

fn generate(args: GenerateArgs, settings: &Settings) -> QrKitResult<Outcome> {
    let options = generate_options(&args, settings.qr_options());

    let updates = match (args.text, args.url, args.ssid) {
        (Some(text), _, _) => vec![GeneratorUpdate::SetText(text)],
        (_, Some(url), _) => vec![
            GeneratorUpdate::SetMode(GeneratorMode::Url),
            GeneratorUpdate::SetUrl(url),
        ],
        (_, _, Some(ssid)) => vec![GeneratorUpdate::LoadWifi(WifiConfig::new(
            ssid,
            args.password.unwrap_or_default(),
            args.security.unwrap_or_default(),
            args.hidden,
        ))],
        (None, None, None) => Vec::new(),
    };
    let state = updates
        .into_iter()
        .fold(GeneratorState::new(options), GeneratorState::reduce);

    let Some(payload) = state.payload.as_deref() else {
        return Ok(Outcome::Invalid(state.validation.errors));
    };

    let matrix = qr::encode(payload, options.ec_level)?;
    qr::write_to_path(&matrix, &options, &args.output)?;
    Ok(Outcome::Success(format!("Saved {}", args.output.display())))
}

fn generate_options(args: &GenerateArgs, defaults: QrOptions) -> QrOptions {
    let mut options = defaults;
    if let Some(size) = args.size {
        options.size = size.clamp(MIN_SIZE, MAX_SIZE);
    }
    if let Some(margin) = args.margin {
        options.margin = margin.min(MAX_MARGIN);
    }
    if let Some(ec) = args.ec {
        options.ec_level = ec;
    }
    if let Some(fg) = args.fg {
        options.foreground = fg;
    }
    if let Some(bg) = args.bg {
        options.background = bg;
    }
    options
}

/// Human-readable summary of a classified payload
pub fn describe(classified: &ClassifiedPayload) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Type: {}", classified.category);
    if let Some(fields) = &classified.fields {
        let _ = writeln!(out, "SSID: {}", fields.ssid);
        let _ = writeln!(out, "Security: {}", fields.security().label());
        let _ = writeln!(out, "Hidden: {}", if fields.hidden { "yes" } else { "no" });
    }
    let _ = write!(out, "Content: {}", classified.raw);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("qrkit").chain(args.iter().copied()))
    }

    fn run(args: &[&str]) -> Outcome {
        let command = parse(args).unwrap().command.unwrap();
        execute(command, &Settings::default()).unwrap()
    }

    #[test]
    fn no_subcommand_starts_tui() {
        let args = parse(&["--ascii", "--show-keys"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.ascii);
        assert!(args.show_keys);
    }

    #[test]
    fn generate_content_sources_are_exclusive() {
        assert!(parse(&["generate", "--text", "a", "--url", "b", "-o", "x.png"]).is_err());
        assert!(parse(&["generate", "-o", "x.png"]).is_err());
        assert!(parse(&["generate", "--text", "a", "--hidden", "-o", "x.png"]).is_err());
    }

    #[test]
    fn wifi_options_need_an_ssid() {
        assert!(parse(&["generate", "--url", "www.a.io", "--password", "pw", "-o", "x.png"]).is_err());
        assert!(parse(&["generate", "--text", "a", "--security", "wep", "-o", "x.png"]).is_err());
        assert!(parse(&["generate", "--text", "a", "-o", "x.png"]).is_ok());

        let args = parse(&["generate", "--ssid", "Home", "--hidden", "-o", "x.png"]).unwrap();
        let Some(Command::Generate(generate)) = args.command else {
            panic!("expected generate");
        };
        assert!(generate.hidden);
        assert_eq!(generate.password, None);
        assert_eq!(generate.security, None);
    }

    #[test]
    fn wifi_command_prints_payload() {
        assert_eq!(
            run(&["wifi", "--ssid", "My:Net", "--password", "p,w", "--security", "wep"]),
            Outcome::Success(r"WIFI:T:WEP;S:My\:Net;P:p\,w;H:false;;".to_string())
        );
    }

    #[test]
    fn wifi_command_reports_every_error() {
        let long_ssid = "s".repeat(33);
        assert_eq!(
            run(&["wifi", "--ssid", &long_ssid]),
            Outcome::Invalid(vec![
                "SSID cannot exceed 32 characters".to_string(),
                "Password is required for secured networks".to_string(),
            ])
        );
    }

    #[test]
    fn classify_describes_wifi() {
        let Outcome::Success(out) = run(&["classify", "WIFI:T:nopass;S:Cafe;P:;H:true;;"]) else {
            panic!("expected success");
        };
        assert!(out.starts_with("Type: Wi-Fi\nSSID: Cafe\nSecurity: Open\nHidden: yes\n"));
    }

    #[test]
    fn classify_plain_text() {
        assert_eq!(
            run(&["classify", "hello"]),
            Outcome::Success("Type: Text\nContent: hello".to_string())
        );
    }

    #[test]
    fn generate_invalid_url_writes_nothing() {
        let output = env::temp_dir().join("qrkit-cli-invalid.png");
        let _ = fs::remove_file(&output);
        let outcome = run(&["generate", "--url", "not a url", "-o", output.to_str().unwrap()]);
        assert_eq!(
            outcome,
            Outcome::Invalid(vec!["Please enter a valid URL".to_string()])
        );
        assert!(!output.exists());
    }

    #[test]
    fn generate_then_read_round_trips() {
        let dir = env::temp_dir().join("qrkit-cli-roundtrip");
        let output = dir.join("net.png");
        let outcome = run(&[
            "generate",
            "--ssid",
            "Home",
            "--password",
            "secret12",
            "--size",
            "256",
            "-o",
            output.to_str().unwrap(),
        ]);
        assert!(matches!(outcome, Outcome::Success(_)));

        let Outcome::Success(out) = run(&["read", output.to_str().unwrap()]) else {
            panic!("expected a decoded image");
        };
        assert!(out.contains("Type: Wi-Fi"));
        assert!(out.ends_with("Content: WIFI:T:WPA;S:Home;P:secret12;H:false;;"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn generate_rejects_bad_colour() {
        assert!(parse(&["generate", "--text", "a", "--fg", "red", "-o", "x.svg"]).is_err());
    }

    #[test]
    fn colour_flags_override_settings() {
        let args = parse(&["generate", "--text", "a", "--fg", "#112233", "--bg", "fafafa", "-o", "x.svg"])
            .unwrap();
        let Some(Command::Generate(generate)) = args.command else {
            panic!("expected generate");
        };
        let options = generate_options(&generate, QrOptions::default());
        assert_eq!(options.foreground, Rgb([0x11, 0x22, 0x33]));
        assert_eq!(options.background, Rgb([0xfa, 0xfa, 0xfa]));
        assert_eq!(options.size, 300);
    }
}

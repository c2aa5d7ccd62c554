use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use qrkit::{
    app::AppState,
    cli::{self, Args, Outcome},
    config::{self, IconSet},
    event::run,
    settings::Settings,
};

/// Level from `LOG_LEVEL`, falling back to `default`
fn log_level(default: Level) -> Level {
    match std::env::var("LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => default,
    }
}

/// The TUI owns the terminal, so it logs to a file; commands log to stderr
fn init_logging(tui: bool) -> Result<()> {
    if tui {
        let mut dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push(config::APP_DIR);
        fs::create_dir_all(&dir)?;
        let file = File::create(dir.join(config::LOG_FILENAME))?;

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level(Level::INFO))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level(Level::WARN))
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.command.is_none())?;

    let settings = Settings::load(args.config.as_deref());

    if let Some(command) = args.command {
        return Ok(match cli::execute(command, &settings)? {
            Outcome::Success(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            }
            Outcome::Invalid(errors) => {
                for error in errors {
                    eprintln!("{error}");
                }
                ExitCode::FAILURE
            }
        });
    }

    let icons = if args.ascii || settings.ui.ascii {
        IconSet::Ascii
    } else {
        IconSet::Nerd
    };
    let mut state = AppState::new(settings, args.show_keys, icons);
    info!(?icons, "starting terminal ui");

    let terminal = ratatui::init();
    enable_raw_mode()?;
    let result = run(terminal, &mut state).await;
    disable_raw_mode()?;

    ratatui::restore();
    result.map(|()| ExitCode::SUCCESS)
}

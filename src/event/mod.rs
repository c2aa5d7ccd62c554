//! Event handling for qrkit
//!
//! Drives the draw/poll loop, applies settled preview requests and collects
//! background decode results.

mod handlers;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, info};

use crate::{
    app::{AppState, ReaderUpdate, Tab},
    config,
    error::QrKitError,
    payload::classify,
    qr,
    ui::render,
};
use handlers::{handle_generator, handle_reader};

pub async fn run(mut terminal: DefaultTerminal, state: &mut AppState) -> Result<()> {
    crossterm::execute!(std::io::stdout(), SetCursorStyle::BlinkingBlock)?;

    loop {
        terminal.draw(|frame| render(frame, state))?;

        // Settled generator input
        while let Ok(request) = state.regenerate_rx.try_recv() {
            state.regenerate_now(&request);
        }

        // Background decode result
        poll_scan(state);

        if let Some((_, at)) = &state.ui.status
            && at.elapsed() > Duration::from_secs(config::STATUS_TTL_SECS)
        {
            state.ui.status = None;
        }

        if event::poll(Duration::from_millis(config::EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()?
                && key.kind == event::KeyEventKind::Press
            {
                if state.ui.show_key_logger {
                    state.ui.last_key_press = Some((describe_key(&key), Instant::now()));
                }

                // Clear error message on any key press
                state.ui.error_message = None;

                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }

                let should_quit = match state.ui.tab {
                    Tab::Generator => handle_generator(key, state),
                    Tab::Reader => handle_reader(key, state),
                };

                if should_quit {
                    break;
                }
            }
        } else if state.scan_rx.is_some() || state.generator.pending {
            state.ui.loading_frame = (state.ui.loading_frame + 1) % config::LOADING_CHARS.len();
        }
    }
    info!("exiting");
    Ok(())
}

/// Decode `path` on the blocking pool and hand the result back through `scan_rx`
pub fn start_scan(state: &mut AppState) {
    let path = PathBuf::from(state.inputs.reader_path.value.trim());
    if path.as_os_str().is_empty() {
        state.ui.error_message = Some("Enter the path of an image to scan".to_string());
        return;
    }

    state.dispatch_reader(ReaderUpdate::SetPath(path.display().to_string()));
    state.dispatch_reader(ReaderUpdate::ScanStarted);
    info!(path = %path.display(), "scanning image");

    let (tx, rx) = mpsc::channel(1);
    state.scan_rx = Some(rx);
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || qr::decode_file(&path))
            .await
            .unwrap_or_else(|e| Err(QrKitError::Internal(e.to_string())));
        let _ = tx.send(result).await;
    });
}

fn poll_scan(state: &mut AppState) {
    let Some(rx) = &mut state.scan_rx else {
        return;
    };
    match rx.try_recv() {
        Ok(outcome) => {
            state.scan_rx = None;
            apply_scan_outcome(state, outcome);
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            state.scan_rx = None;
            apply_scan_outcome(
                state,
                Err(QrKitError::Internal("scan task ended without a result".to_string())),
            );
        }
    }
}

fn apply_scan_outcome(state: &mut AppState, outcome: crate::app::ScanOutcome) {
    match outcome {
        Ok(Some(text)) => {
            let classified = classify(&text);
            debug!(category = %classified.category, "decoded image");
            state.dispatch_reader(ReaderUpdate::Decoded(classified));
            state.ui.reader_focus = crate::app::ReaderField::Actions;
        }
        Ok(None) => state.dispatch_reader(ReaderUpdate::NotFound),
        Err(e) => {
            state.ui.error_message = Some(e.to_string());
            state.dispatch_reader(ReaderUpdate::Failed(e.to_string()));
        }
    }
}

fn describe_key(key: &KeyEvent) -> String {
    let mut key_str = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        key_str.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        key_str.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key.code, KeyCode::Char(_)) {
        key_str.push_str("Shift+");
    }

    let code_str = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::BackTab => "Tab".to_string(),
        code => format!("{:?}", code),
    };
    key_str.push_str(&code_str);
    key_str
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use super::start_scan;
use crate::app::{AppState, GeneratorField, GeneratorUpdate, ReaderField, ReaderUpdate, Tab};
use crate::qr::ExportFormat;

/// Keys shared by both tabs. Returns `Some(quit)` when the key was consumed.
fn handle_global(key: &KeyEvent, state: &mut AppState) -> Option<bool> {
    match key.code {
        KeyCode::Esc => Some(true),
        KeyCode::Char('[') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(true),
        KeyCode::F(1) => {
            state.ui.tab = Tab::Generator;
            Some(false)
        }
        KeyCode::F(2) => {
            state.ui.tab = Tab::Reader;
            Some(false)
        }
        _ => None,
    }
}

/// Handle keyboard events for the generator form
pub fn handle_generator(key: KeyEvent, state: &mut AppState) -> bool {
    if let Some(quit) = handle_global(&key, state) {
        return quit;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => {
            export(state, ExportFormat::Png);
            return false;
        }
        KeyCode::Char('g') if ctrl => {
            export(state, ExportFormat::Svg);
            return false;
        }
        KeyCode::Tab | KeyCode::Down => {
            state.focus_next();
            return false;
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus_prev();
            return false;
        }
        _ => {}
    }

    let field = state.focused_field();
    match field {
        GeneratorField::Mode => match key.code {
            KeyCode::Left | KeyCode::Char('h') => state.set_mode(state.generator.mode.prev()),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                state.set_mode(state.generator.mode.next())
            }
            KeyCode::Enter => state.focus_next(),
            _ => {}
        },
        GeneratorField::Security => {
            let security = state.generator.wifi.security;
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    state.dispatch(GeneratorUpdate::SetSecurity(security.prev()))
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    state.dispatch(GeneratorUpdate::SetSecurity(security.next()))
                }
                KeyCode::Enter => state.focus_next(),
                _ => {}
            }
        }
        GeneratorField::Hidden => {
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                let hidden = !state.generator.wifi.hidden;
                state.dispatch(GeneratorUpdate::SetHidden(hidden));
            }
        }
        GeneratorField::EcLevel => {
            let level = state.generator.options.ec_level;
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    state.dispatch(GeneratorUpdate::SetEcLevel(level.prev()))
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    state.dispatch(GeneratorUpdate::SetEcLevel(level.next()))
                }
                _ => {}
            }
        }
        GeneratorField::Text | GeneratorField::Url | GeneratorField::Ssid | GeneratorField::Password => {
            if key.code == KeyCode::Enter {
                state.focus_next();
            } else if let Some(input) = state.input_for(field)
                && input.handle_key(&key)
            {
                state.commit_input(field);
            }
        }
    }
    false
}

fn export(state: &mut AppState, format: ExportFormat) {
    match state.export(format) {
        Ok(Some(path)) => state.set_status(format!("Saved {}", path.display())),
        Ok(None) => {
            let reason = state
                .generator
                .validation
                .first()
                .unwrap_or("Nothing to export")
                .to_string();
            state.ui.error_message = Some(reason);
        }
        Err(e) => {
            warn!(error = %e, "export failed");
            state.ui.error_message = Some(format!("Export failed: {}", e));
        }
    }
}

/// Handle keyboard events for the reader tab
pub fn handle_reader(key: KeyEvent, state: &mut AppState) -> bool {
    if let Some(quit) = handle_global(&key, state) {
        return quit;
    }

    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        state.ui.reader_focus = match state.ui.reader_focus {
            ReaderField::Path if state.reader.decoded().is_some() => ReaderField::Actions,
            _ => ReaderField::Path,
        };
        return false;
    }

    match state.ui.reader_focus {
        ReaderField::Path => match key.code {
            KeyCode::Enter if state.scan_rx.is_none() => start_scan(state),
            _ => {
                state.inputs.reader_path.handle_key(&key);
            }
        },
        ReaderField::Actions => match key.code {
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                state.dispatch_reader(ReaderUpdate::NextAction)
            }
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
                state.dispatch_reader(ReaderUpdate::PrevAction)
            }
            KeyCode::Enter => {
                if let Err(e) = state.run_reader_action() {
                    warn!(error = %e, "reader action failed");
                    state.ui.error_message = Some(e.to_string());
                }
            }
            _ => {}
        },
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::GeneratorMode;
    use crate::config::IconSet;
    use crate::payload::{Security, classify};
    use crate::settings::Settings;

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_generator(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn typing_in_text_field_updates_payload() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        assert_eq!(state.focused_field(), GeneratorField::Text);
        type_text(&mut state, "hello");
        assert_eq!(state.generator.payload.as_deref(), Some("hello"));
        assert!(state.regenerate.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn wifi_form_walkthrough() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        press(&mut state, KeyCode::Up);
        assert_eq!(state.focused_field(), GeneratorField::Mode);
        press(&mut state, KeyCode::Left);
        assert_eq!(state.generator.mode, GeneratorMode::Wifi);

        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "Cafe;Bar");
        press(&mut state, KeyCode::Tab);
        type_text(&mut state, "pass");
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.generator.wifi.security, Security::Wep);
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Char(' '));

        assert_eq!(
            state.generator.payload.as_deref(),
            Some(r"WIFI:T:WEP;S:Cafe\;Bar;P:pass;H:true;;")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn exporting_invalid_input_shows_first_error() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        handle_generator(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            &mut state,
        );
        assert_eq!(state.ui.error_message.as_deref(), Some("Content is required"));
    }

    #[tokio::test(start_paused = true)]
    async fn function_keys_switch_tabs_and_esc_quits() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        assert!(!press(&mut state, KeyCode::F(2)));
        assert_eq!(state.ui.tab, Tab::Reader);
        assert!(!handle_reader(
            KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE),
            &mut state
        ));
        assert_eq!(state.ui.tab, Tab::Generator);
        assert!(press(&mut state, KeyCode::Esc));
    }

    #[tokio::test(start_paused = true)]
    async fn reader_tab_only_reaches_actions_after_decode() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        state.ui.tab = Tab::Reader;
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);

        handle_reader(tab, &mut state);
        assert_eq!(state.ui.reader_focus, ReaderField::Path);

        state.dispatch_reader(ReaderUpdate::Decoded(classify("mailto:a@b.co")));
        handle_reader(tab, &mut state);
        assert_eq!(state.ui.reader_focus, ReaderField::Actions);

        handle_reader(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut state);
        assert_eq!(state.ui.tab, Tab::Generator);
        assert_eq!(state.generator.payload.as_deref(), Some("mailto:a@b.co"));
    }
}

use std::time::Duration;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::{AppState, GeneratorField, Preview, ReaderField, ScanResult, Tab};
use crate::config;
use crate::input::InputState;
use crate::theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND).fg(theme::FOREGROUND)),
        area,
    );

    // Match the parity of the terminal so the window sits exactly centered
    let height = with_parity(config::MAIN_WINDOW_HEIGHT, area.height);
    let width = with_parity(config::MAIN_WINDOW_WIDTH, area.width);

    let vertical_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);
    let horizontal_layout = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical_layout[1]);
    let main_area = horizontal_layout[1];

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIMMED))
        .title(format!(" QRKIT v{} ", env!("CARGO_PKG_VERSION")))
        .title_alignment(Alignment::Center)
        .title_style(
            Style::default()
                .fg(theme::CYAN)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(main_block, main_area);

    let inner_area = main_area.inner(Margin {
        vertical: 1,
        horizontal: 2,
    });
    let content_layout = Layout::vertical([
        Constraint::Length(1), // Tabs
        Constraint::Min(10),   // Tab content
        Constraint::Length(2), // Help
    ])
    .split(inner_area);

    render_tabs(frame, state, content_layout[0]);
    match state.ui.tab {
        Tab::Generator => render_generator(frame, state, content_layout[1]),
        Tab::Reader => render_reader(frame, state, content_layout[1]),
    }
    render_help(frame, state, content_layout[2]);

    if let Some(error) = &state.ui.error_message {
        let error_area = Rect::new(
            main_area.x + 2,
            (main_area.y + main_area.height).saturating_sub(5),
            main_area.width.saturating_sub(4),
            3,
        )
        .intersection(area);
        let error_paragraph = Paragraph::new(error.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::RED))
                    .title(" ERROR "),
            )
            .style(Style::default().fg(theme::RED).bg(theme::BACKGROUND))
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, error_area);
        frame.render_widget(error_paragraph, error_area);
    } else if let Some((status, _)) = &state.ui.status {
        let status_area = Rect::new(
            main_area.x + 2,
            (main_area.y + main_area.height).saturating_sub(5),
            main_area.width.saturating_sub(4),
            3,
        )
        .intersection(area);
        let status_paragraph = Paragraph::new(status.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::GREEN)),
            )
            .style(Style::default().fg(theme::GREEN).bg(theme::BACKGROUND));
        frame.render_widget(Clear, status_area);
        frame.render_widget(status_paragraph, status_area);
    }

    if state.ui.show_key_logger
        && let Some((key, time)) = &state.ui.last_key_press
        && time.elapsed() < Duration::from_secs(config::KEY_LOGGER_TTL_SECS)
    {
        let key_text = format!(" {} ", key);
        let width = key_text.chars().count() as u16 + 2;

        // Just below the bottom right corner of the main window
        let key_area = Rect::new(
            (main_area.x + main_area.width).saturating_sub(width),
            main_area.y + main_area.height,
            width,
            3,
        )
        .intersection(area);

        let paragraph = Paragraph::new(key_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::BRIGHT_PURPLE))
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .style(
                Style::default()
                    .fg(theme::BRIGHT_PURPLE)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);

        frame.render_widget(Clear, key_area);
        frame.render_widget(paragraph, key_area);
    }
}

fn with_parity(target: u16, available: u16) -> u16 {
    if target % 2 == available % 2 {
        target
    } else {
        target + 1
    }
}

fn render_tabs(frame: &mut Frame, state: &AppState, area: Rect) {
    let tab_span = |label: &'static str, key: &'static str, active: bool| {
        let style = if active {
            Style::default()
                .fg(theme::BACKGROUND)
                .bg(theme::CYAN)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIMMED)
        };
        Span::styled(format!(" {} {} ", key, label), style)
    };

    let line = Line::from(vec![
        tab_span("Generate", "F1", state.ui.tab == Tab::Generator),
        Span::raw(" "),
        tab_span("Read", "F2", state.ui.tab == Tab::Reader),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(theme::YELLOW)
    } else {
        Style::default().fg(theme::FOREGROUND)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", title))
        .border_style(border_style)
        .style(Style::default().bg(theme::BACKGROUND))
}

/// Input text with a block cursor drawn when focused
fn input_line(input: &InputState, width: u16, focused: bool) -> Line<'static> {
    let (display_text, cursor_x) = input.visible_window(width as usize);
    let cursor_style = Style::default().bg(theme::FOREGROUND).fg(theme::BACKGROUND);

    let mut spans = Vec::new();
    let chars: Vec<char> = display_text.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i == cursor_x && focused {
            spans.push(Span::styled(c.to_string(), cursor_style));
        } else {
            spans.push(Span::raw(c.to_string()));
        }
    }
    if cursor_x == chars.len() && focused {
        spans.push(Span::styled(" ", cursor_style));
    }
    Line::from(spans)
}

fn selector(value: &str, focused: bool) -> Paragraph<'static> {
    let style = if focused {
        Style::default().fg(theme::YELLOW)
    } else {
        Style::default()
    };
    Paragraph::new(format!("< {} >", value))
        .style(style)
        .alignment(Alignment::Center)
}

fn field_height(field: GeneratorField) -> u16 {
    match field {
        GeneratorField::Hidden => 1,
        _ => 3,
    }
}

fn render_generator(frame: &mut Frame, state: &AppState, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Length(config::FORM_PANEL_WIDTH),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let fields = state.generator.mode.fields();
    let focused = state.focused_field();

    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|f| Constraint::Length(field_height(*f)))
        .collect();
    constraints.push(Constraint::Min(2)); // Validation
    let rows = Layout::vertical(constraints).split(columns[0]);

    for (field, row) in fields.iter().zip(rows.iter()) {
        render_field(frame, state, *field, *field == focused, *row);
    }

    let validation: Vec<Line> = state
        .generator
        .validation
        .errors
        .iter()
        .map(|e| Line::styled(format!("• {}", e), Style::default().fg(theme::RED)))
        .collect();
    frame.render_widget(
        Paragraph::new(validation)
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::new(1, 1, 1, 0))),
        rows[fields.len()],
    );

    render_preview(frame, state, columns[2]);
}

fn render_field(frame: &mut Frame, state: &AppState, field: GeneratorField, focused: bool, area: Rect) {
    let icons = state.ui.icons;
    let inner_width = area.width.saturating_sub(2);
    let generator = &state.generator;

    match field {
        GeneratorField::Mode => {
            frame.render_widget(
                selector(generator.mode.label(), focused).block(field_block("Mode", focused)),
                area,
            );
        }
        GeneratorField::Text | GeneratorField::Url | GeneratorField::Ssid | GeneratorField::Password => {
            let (title, input) = match field {
                GeneratorField::Text => ("Content", &state.inputs.text),
                GeneratorField::Url => ("URL", &state.inputs.url),
                GeneratorField::Ssid => ("SSID", &state.inputs.ssid),
                _ => ("Password", &state.inputs.password),
            };
            frame.render_widget(
                Paragraph::new(input_line(input, inner_width, focused))
                    .block(field_block(title, focused)),
                area,
            );
        }
        GeneratorField::Security => {
            frame.render_widget(
                selector(generator.wifi.security.label(), focused)
                    .block(field_block("Security", focused)),
                area,
            );
        }
        GeneratorField::Hidden => {
            let style = if focused {
                Style::default().fg(theme::YELLOW)
            } else {
                Style::default().fg(theme::FOREGROUND)
            };
            let text = format!(" {} Hidden Network", icons.checkbox(generator.wifi.hidden));
            frame.render_widget(Paragraph::new(text).style(style), area);
        }
        GeneratorField::EcLevel => {
            frame.render_widget(
                selector(&generator.options.ec_level.to_string(), focused)
                    .block(field_block("Error correction", focused)),
                area,
            );
        }
    }
}

fn render_preview(frame: &mut Frame, state: &AppState, area: Rect) {
    let generator = &state.generator;
    let title = if generator.pending {
        let spinner = config::LOADING_CHARS[state.ui.loading_frame % config::LOADING_CHARS.len()];
        format!(" Preview {} ", spinner)
    } else {
        " Preview ".to_string()
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(theme::BLUE)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BLUE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &generator.preview {
        Preview::Ready(lines) => {
            let qr_height = lines.len() as u16;
            let qr_width = lines.first().map(|l| l.chars().count()).unwrap_or(0) as u16;
            if qr_height > inner.height || qr_width > inner.width {
                frame.render_widget(
                    Paragraph::new("Enlarge the terminal to see the preview")
                        .style(Style::default().fg(theme::DIMMED))
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    inner,
                );
                return;
            }

            let x = inner.x + (inner.width - qr_width) / 2;
            let y = inner.y + (inner.height - qr_height) / 2;
            let qr_area = Rect::new(x, y, qr_width, qr_height);
            let text: Vec<Line> = lines.iter().map(|l| Line::raw(l.as_str())).collect();
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(theme::QR_DARK).bg(theme::QR_LIGHT)),
                qr_area,
            );

            if let Some(payload) = &generator.payload
                && y + qr_height < inner.y + inner.height
            {
                let caption_area = Rect::new(inner.x, y + qr_height, inner.width, 1);
                frame.render_widget(
                    Paragraph::new(format!("{} bytes", payload.len()))
                        .style(Style::default().fg(theme::DIMMED))
                        .alignment(Alignment::Center),
                    caption_area,
                );
            }
        }
        Preview::Failed(message) => {
            frame.render_widget(
                Paragraph::new(message.as_str())
                    .style(Style::default().fg(theme::RED))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
        Preview::Empty => {
            frame.render_widget(
                Paragraph::new("Fill in the form to generate a QR code")
                    .style(Style::default().fg(theme::DIMMED))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
    }
}

fn render_reader(frame: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(3), // Path
        Constraint::Min(5),    // Result
        Constraint::Length(5), // Actions
    ])
    .split(area);

    let path_focused = state.ui.reader_focus == ReaderField::Path;
    frame.render_widget(
        Paragraph::new(input_line(
            &state.inputs.reader_path,
            rows[0].width.saturating_sub(2),
            path_focused,
        ))
        .block(field_block("Image path", path_focused)),
        rows[0],
    );

    let result_block = Block::default()
        .title(" Result ")
        .title_style(
            Style::default()
                .fg(theme::PURPLE)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::PURPLE))
        .padding(Padding::new(1, 1, 0, 0));

    let label_style = Style::default().fg(theme::CYAN);
    let result: Vec<Line> = match &state.reader.result {
        ScanResult::Idle => vec![Line::styled(
            "Enter the path of a PNG or JPEG image and press Enter",
            Style::default().fg(theme::DIMMED),
        )],
        ScanResult::Scanning => {
            let spinner =
                config::LOADING_CHARS[state.ui.loading_frame % config::LOADING_CHARS.len()];
            vec![Line::from(format!("{} Scanning {}", spinner, state.reader.path))]
        }
        ScanResult::NotFound => vec![Line::styled(
            "No QR code found in the image",
            Style::default().fg(theme::YELLOW),
        )],
        ScanResult::Failed(message) => {
            vec![Line::styled(message.clone(), Style::default().fg(theme::RED))]
        }
        ScanResult::Decoded(classified) => {
            let color = theme::category_color(classified.category);
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Type: ", label_style),
                    Span::styled(
                        format!(
                            "{}{}",
                            state.ui.icons.category(classified.category),
                            classified.category
                        ),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ];
            if let Some(fields) = &classified.fields {
                lines.push(Line::from(vec![
                    Span::styled("SSID: ", label_style),
                    Span::raw(fields.ssid.clone()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Security: ", label_style),
                    Span::raw(fields.security().label()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Hidden: ", label_style),
                    Span::raw(if fields.hidden { "Yes" } else { "No" }),
                ]));
            }
            lines.push(Line::styled("Content:", label_style));
            lines.extend(classified.raw.lines().map(|l| Line::raw(l.to_string())));
            lines
        }
    };
    frame.render_widget(
        Paragraph::new(result)
            .block(result_block)
            .wrap(Wrap { trim: false }),
        rows[1],
    );

    let actions_focused = state.ui.reader_focus == ReaderField::Actions;
    let actions: Vec<Line> = state
        .reader
        .actions()
        .iter()
        .enumerate()
        .map(|(i, action)| {
            if i == state.reader.selected_action && actions_focused {
                Line::from(vec![
                    Span::raw(state.ui.icons.highlight()),
                    Span::raw(action.label()),
                ])
                .style(
                    Style::default()
                        .bg(theme::SELECTION_BG)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!("  {}", action.label()))
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(actions).block(field_block("Actions", actions_focused)),
        rows[2],
    );
}

fn render_help(frame: &mut Frame, state: &AppState, area: Rect) {
    let icons = state.ui.icons;
    let key = |k: &str| Span::styled(k.to_string(), Style::default().fg(theme::FOREGROUND));
    let desc = |d: &str| Span::styled(d.to_string(), Style::default().fg(theme::DIMMED));

    let help_text = match state.ui.tab {
        Tab::Generator => vec![
            Line::from(vec![
                key(icons.tab_next()),
                desc(" next • "),
                key(icons.tab_prev()),
                desc(" prev • "),
                key("h/l"),
                desc(" change • "),
                key(icons.space()),
                desc(" toggle"),
            ]),
            Line::from(vec![
                key("^s"),
                desc(" save png • "),
                key("^g"),
                desc(" save svg • "),
                key("F2"),
                desc(" reader • "),
                key("esc"),
                desc(" quit"),
            ]),
        ],
        Tab::Reader => vec![
            Line::from(vec![
                key(icons.enter()),
                desc(match state.ui.reader_focus {
                    ReaderField::Path => " scan • ",
                    ReaderField::Actions => " run action • ",
                }),
                key("⇥"),
                desc(" path/actions • "),
                key("j/k"),
                desc(" select"),
            ]),
            Line::from(vec![key("F1"), desc(" generator • "), key("esc"), desc(" quit")]),
        ],
    };

    frame.render_widget(
        Paragraph::new(help_text)
            .style(Style::default().fg(theme::DIMMED))
            .alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::GeneratorUpdate;
    use crate::config::IconSet;
    use crate::payload::classify;
    use crate::settings::Settings;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn parity_matches_terminal() {
        assert_eq!(with_parity(36, 40), 36);
        assert_eq!(with_parity(36, 41), 37);
        assert_eq!(with_parity(95, 120), 96);
    }

    #[tokio::test(start_paused = true)]
    async fn renders_generator_with_validation_errors() {
        let state = AppState::new(Settings::default(), false, IconSet::Ascii);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("QRKIT"));
        assert!(text.contains("Content is required"));
    }

    #[tokio::test(start_paused = true)]
    async fn renders_ready_preview() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        state.dispatch(GeneratorUpdate::SetText("hi".to_string()));
        let request = state.generator.request().unwrap();
        state.regenerate_now(&request);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();
        assert!(buffer_text(&terminal).contains("2 bytes"));
    }

    #[tokio::test(start_paused = true)]
    async fn renders_decoded_wifi_result() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        state.ui.tab = Tab::Reader;
        state.dispatch_reader(crate::app::ReaderUpdate::Decoded(classify(
            "WIFI:T:WPA;S:Home;P:pw;H:false;;",
        )));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("[WIFI] Wi-Fi"));
        assert!(text.contains("Edit network"));
    }

    #[tokio::test(start_paused = true)]
    async fn tiny_terminal_does_not_panic() {
        let state = AppState::new(Settings::default(), true, IconSet::Nerd);
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();
    }
}

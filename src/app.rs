use std::mem;
use std::path::PathBuf;
use std::time::Instant;

use secrecy::ExposeSecret;
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::config::IconSet;
use crate::debounce::Debouncer;
use crate::error::QrKitResult;
use crate::input::InputState;
use crate::payload::{
    self, Category, ClassifiedPayload, ReaderAction, Security, ValidationReport, WifiConfig, wifi,
};
use crate::qr::{self, EcLevel, ExportFormat, QrOptions};
use crate::settings::Settings;

// Generator state
//------------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorMode {
    #[default]
    Text,
    Url,
    Wifi,
}

impl GeneratorMode {
    pub const ALL: [GeneratorMode; 3] = [GeneratorMode::Text, GeneratorMode::Url, GeneratorMode::Wifi];

    pub fn label(&self) -> &'static str {
        match self {
            GeneratorMode::Text => "Text",
            GeneratorMode::Url => "URL",
            GeneratorMode::Wifi => "Wi-Fi",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn fields(&self) -> &'static [GeneratorField] {
        match self {
            GeneratorMode::Text => &[
                GeneratorField::Mode,
                GeneratorField::Text,
                GeneratorField::EcLevel,
            ],
            GeneratorMode::Url => &[
                GeneratorField::Mode,
                GeneratorField::Url,
                GeneratorField::EcLevel,
            ],
            GeneratorMode::Wifi => &[
                GeneratorField::Mode,
                GeneratorField::Ssid,
                GeneratorField::Password,
                GeneratorField::Security,
                GeneratorField::Hidden,
                GeneratorField::EcLevel,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorField {
    Mode,
    Text,
    Url,
    Ssid,
    Password,
    Security,
    Hidden,
    EcLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Empty,
    Ready(Vec<String>),
    Failed(String),
}

/// Work handed to the debouncer: render `payload` once input settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerateRequest {
    pub revision: u64,
    pub payload: String,
    pub ec_level: EcLevel,
}

#[derive(Debug)]
pub enum GeneratorUpdate {
    SetMode(GeneratorMode),
    SetText(String),
    SetUrl(String),
    SetSsid(String),
    SetPassword(String),
    SetSecurity(Security),
    SetHidden(bool),
    SetEcLevel(EcLevel),
    SetSize(u32),
    SetMargin(u32),
    LoadWifi(WifiConfig),
    PreviewReady { revision: u64, lines: Vec<String> },
    PreviewFailed { revision: u64, message: String },
}

impl GeneratorUpdate {
    /// Whether the update changes what gets encoded
    pub fn changes_input(&self) -> bool {
        !matches!(
            self,
            GeneratorUpdate::PreviewReady { .. } | GeneratorUpdate::PreviewFailed { .. }
        )
    }
}

#[derive(Debug)]
pub struct GeneratorState {
    pub mode: GeneratorMode,
    pub text: String,
    pub url: String,
    pub wifi: WifiConfig,
    pub options: QrOptions,
    pub validation: ValidationReport,
    /// Current payload, `None` while the input is invalid
    pub payload: Option<String>,
    pub preview: Preview,
    pub pending: bool,
    pub revision: u64,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self::new(QrOptions::default())
    }
}

impl GeneratorState {
    pub fn new(options: QrOptions) -> Self {
        Self {
            mode: GeneratorMode::default(),
            text: String::new(),
            url: String::new(),
            wifi: WifiConfig::default(),
            options,
            validation: ValidationReport::default(),
            payload: None,
            preview: Preview::Empty,
            pending: false,
            revision: 0,
        }
        .refresh()
    }

    /// Pure state transition: the previous state goes in, the next comes out
    pub fn reduce(self, update: GeneratorUpdate) -> Self {
        let mut next = self;
        match update {
            GeneratorUpdate::SetMode(mode) => next.mode = mode,
            GeneratorUpdate::SetText(text) => next.text = text,
            GeneratorUpdate::SetUrl(url) => next.url = url,
            GeneratorUpdate::SetSsid(ssid) => next.wifi.ssid = ssid,
            GeneratorUpdate::SetPassword(password) => next.wifi = next.wifi.with_password(password),
            GeneratorUpdate::SetSecurity(security) => next.wifi.security = security,
            GeneratorUpdate::SetHidden(hidden) => next.wifi.hidden = hidden,
            GeneratorUpdate::SetEcLevel(level) => next.options.ec_level = level,
            GeneratorUpdate::SetSize(size) => next.options.size = size,
            GeneratorUpdate::SetMargin(margin) => next.options.margin = margin,
            GeneratorUpdate::LoadWifi(config) => {
                next.mode = GeneratorMode::Wifi;
                next.wifi = config;
            }
            GeneratorUpdate::PreviewReady { revision, lines } => {
                if revision == next.revision {
                    next.preview = Preview::Ready(lines);
                    next.pending = false;
                }
                return next;
            }
            GeneratorUpdate::PreviewFailed { revision, message } => {
                if revision == next.revision {
                    next.preview = Preview::Failed(message);
                    next.pending = false;
                }
                return next;
            }
        }
        next.revision += 1;
        next.refresh()
    }

    fn refresh(mut self) -> Self {
        let (validation, payload) = match self.mode {
            GeneratorMode::Text => (payload::validate_content(&self.text), self.text.clone()),
            GeneratorMode::Url => (payload::validate_url(&self.url), payload::normalize_url(&self.url)),
            GeneratorMode::Wifi => (wifi::validate(&self.wifi), wifi::encode(&self.wifi)),
        };

        if validation.is_valid() {
            self.payload = Some(payload);
            self.pending = true;
        } else {
            self.payload = None;
            self.pending = false;
            self.preview = Preview::Empty;
        }
        self.validation = validation;
        self
    }

    pub fn request(&self) -> Option<RegenerateRequest> {
        self.payload.as_ref().map(|payload| RegenerateRequest {
            revision: self.revision,
            payload: payload.clone(),
            ec_level: self.options.ec_level,
        })
    }
}

/// Render the terminal preview for a settled request
pub fn render_preview(request: &RegenerateRequest) -> GeneratorUpdate {
    match qr::encode(&request.payload, request.ec_level) {
        Ok(matrix) => GeneratorUpdate::PreviewReady {
            revision: request.revision,
            lines: matrix.to_terminal_lines(),
        },
        Err(e) => GeneratorUpdate::PreviewFailed {
            revision: request.revision,
            message: e.to_string(),
        },
    }
}

// Reader state
//------------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ScanResult {
    #[default]
    Idle,
    Scanning,
    NotFound,
    Failed(String),
    Decoded(ClassifiedPayload),
}

#[derive(Debug)]
pub enum ReaderUpdate {
    SetPath(String),
    ScanStarted,
    Decoded(ClassifiedPayload),
    NotFound,
    Failed(String),
    NextAction,
    PrevAction,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReaderState {
    pub path: String,
    pub result: ScanResult,
    pub selected_action: usize,
}

impl ReaderState {
    pub fn reduce(self, update: ReaderUpdate) -> Self {
        let mut next = self;
        match update {
            ReaderUpdate::SetPath(path) => next.path = path,
            ReaderUpdate::ScanStarted => {
                next.result = ScanResult::Scanning;
                next.selected_action = 0;
            }
            ReaderUpdate::Decoded(classified) => {
                next.result = ScanResult::Decoded(classified);
                next.selected_action = 0;
            }
            ReaderUpdate::NotFound => next.result = ScanResult::NotFound,
            ReaderUpdate::Failed(message) => next.result = ScanResult::Failed(message),
            ReaderUpdate::NextAction => {
                let count = next.actions().len();
                if count > 0 {
                    next.selected_action = (next.selected_action + 1) % count;
                }
            }
            ReaderUpdate::PrevAction => {
                let count = next.actions().len();
                if count > 0 {
                    next.selected_action = (next.selected_action + count - 1) % count;
                }
            }
        }
        next
    }

    pub fn decoded(&self) -> Option<&ClassifiedPayload> {
        match &self.result {
            ScanResult::Decoded(classified) => Some(classified),
            _ => None,
        }
    }

    pub fn actions(&self) -> &'static [ReaderAction] {
        self.decoded()
            .map(|c| c.category.actions())
            .unwrap_or_default()
    }

    pub fn selected(&self) -> Option<ReaderAction> {
        self.actions().get(self.selected_action).copied()
    }
}

// Application state
//------------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Generator,
    Reader,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReaderField {
    #[default]
    Path,
    Actions,
}

#[derive(Debug)]
pub struct UiState {
    pub tab: Tab,
    pub generator_focus: usize,
    pub reader_focus: ReaderField,
    pub icons: IconSet,
    pub error_message: Option<String>,
    pub status: Option<(String, Instant)>,
    pub loading_frame: usize,
    pub show_key_logger: bool,
    pub last_key_press: Option<(String, Instant)>,
}

#[derive(Debug)]
pub struct Inputs {
    pub text: InputState,
    pub url: InputState,
    pub ssid: InputState,
    pub password: InputState,
    pub reader_path: InputState,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            text: InputState::default(),
            url: InputState::default(),
            ssid: InputState::default(),
            password: InputState::masked(),
            reader_path: InputState::default(),
        }
    }
}

/// Result of a background image decode
pub type ScanOutcome = QrKitResult<Option<String>>;

/// The single mutable owner of everything the UI shows
#[derive(Debug)]
pub struct AppState {
    pub ui: UiState,
    pub inputs: Inputs,
    pub generator: GeneratorState,
    pub reader: ReaderState,
    pub settings: Settings,
    pub regenerate: Debouncer<RegenerateRequest>,
    pub regenerate_rx: UnboundedReceiver<RegenerateRequest>,
    pub scan_rx: Option<Receiver<ScanOutcome>>,
}

impl AppState {
    pub fn new(settings: Settings, show_key_logger: bool, icons: IconSet) -> AppState {
        let (regenerate, regenerate_rx) = Debouncer::new(settings.debounce());
        AppState {
            ui: UiState {
                tab: Tab::Generator,
                generator_focus: 1,
                reader_focus: ReaderField::Path,
                icons,
                error_message: None,
                status: None,
                loading_frame: 0,
                show_key_logger,
                last_key_press: None,
            },
            inputs: Inputs::default(),
            generator: GeneratorState::new(settings.qr_options()),
            reader: ReaderState::default(),
            settings,
            regenerate,
            regenerate_rx,
            scan_rx: None,
        }
    }

    pub fn dispatch(&mut self, update: GeneratorUpdate) {
        let schedule = update.changes_input();
        debug!(?update, "generator update");
        self.generator = mem::take(&mut self.generator).reduce(update);

        if !schedule {
            return;
        }
        match self.generator.request() {
            Some(request) => self.regenerate.schedule(request),
            None => self.regenerate.cancel(),
        }
    }

    pub fn dispatch_reader(&mut self, update: ReaderUpdate) {
        self.reader = mem::take(&mut self.reader).reduce(update);
    }

    pub fn focused_field(&self) -> GeneratorField {
        let fields = self.generator.mode.fields();
        fields[self.ui.generator_focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        let len = self.generator.mode.fields().len();
        self.ui.generator_focus = (self.ui.generator_focus + 1) % len;
    }

    pub fn focus_prev(&mut self) {
        let len = self.generator.mode.fields().len();
        self.ui.generator_focus = (self.ui.generator_focus + len - 1) % len;
    }

    pub fn set_mode(&mut self, mode: GeneratorMode) {
        self.dispatch(GeneratorUpdate::SetMode(mode));
        let len = mode.fields().len();
        self.ui.generator_focus = self.ui.generator_focus.min(len - 1);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.ui.status = Some((message.into(), Instant::now()));
    }

    /// Sync the text field for `field` into the generator state
    pub fn commit_input(&mut self, field: GeneratorField) {
        let update = match field {
            GeneratorField::Text => GeneratorUpdate::SetText(self.inputs.text.value.clone()),
            GeneratorField::Url => GeneratorUpdate::SetUrl(self.inputs.url.value.clone()),
            GeneratorField::Ssid => GeneratorUpdate::SetSsid(self.inputs.ssid.value.clone()),
            GeneratorField::Password => {
                GeneratorUpdate::SetPassword(self.inputs.password.value.clone())
            }
            _ => return,
        };
        self.dispatch(update);
    }

    pub fn input_for(&mut self, field: GeneratorField) -> Option<&mut InputState> {
        match field {
            GeneratorField::Text => Some(&mut self.inputs.text),
            GeneratorField::Url => Some(&mut self.inputs.url),
            GeneratorField::Ssid => Some(&mut self.inputs.ssid),
            GeneratorField::Password => Some(&mut self.inputs.password),
            _ => None,
        }
    }

    /// Apply a settled regeneration request
    pub fn regenerate_now(&mut self, request: &RegenerateRequest) {
        let update = render_preview(request);
        if let GeneratorUpdate::PreviewFailed { message, .. } = &update {
            warn!(error = %message, "failed to render preview");
        }
        self.dispatch(update);
    }

    /// Render the current payload at the configured size and save it
    pub fn export(&mut self, format: ExportFormat) -> QrKitResult<Option<PathBuf>> {
        let Some(payload) = self.generator.payload.as_deref() else {
            return Ok(None);
        };
        let matrix = qr::encode(payload, self.generator.options.ec_level)?;
        let bytes = format.render(&matrix, &self.generator.options)?;
        let filename = qr::timestamped_filename("qrcode", format.extension());
        let path = qr::save(&self.settings.export_dir(), &filename, &bytes)?;
        Ok(Some(path))
    }

    /// Load a Wi-Fi configuration into both the form fields and the state
    pub fn load_wifi(&mut self, config: WifiConfig) {
        self.inputs.ssid.set(config.ssid.clone());
        self.inputs.password.set(config.password.expose_secret());
        self.ui.tab = Tab::Generator;
        self.dispatch(GeneratorUpdate::LoadWifi(config));
        self.ui.generator_focus = 1;
    }

    /// Load raw decoded text into the generator, as a URL when it is one
    pub fn load_payload(&mut self, classified: &ClassifiedPayload) {
        self.ui.tab = Tab::Generator;
        if classified.category == Category::Url {
            self.inputs.url.set(classified.raw.clone());
            self.dispatch(GeneratorUpdate::SetUrl(classified.raw.clone()));
            self.set_mode(GeneratorMode::Url);
        } else {
            self.inputs.text.set(classified.raw.clone());
            self.dispatch(GeneratorUpdate::SetText(classified.raw.clone()));
            self.set_mode(GeneratorMode::Text);
        }
        self.ui.generator_focus = 1;
    }

    pub fn run_reader_action(&mut self) -> QrKitResult<()> {
        let (Some(action), Some(classified)) =
            (self.reader.selected(), self.reader.decoded().cloned())
        else {
            return Ok(());
        };
        info!(action = action.label(), category = %classified.category, "running reader action");

        match action {
            ReaderAction::CopyToGenerator => {
                self.load_payload(&classified);
                self.set_status("Payload copied to generator");
            }
            ReaderAction::EditNetwork => {
                if let Some(fields) = &classified.fields {
                    self.load_wifi(fields.to_config());
                    self.set_status(format!("Editing network {}", fields.ssid));
                }
            }
            ReaderAction::SaveAsText => {
                let filename = qr::timestamped_filename("qrtext", "txt");
                let path = qr::save(
                    &self.settings.export_dir(),
                    &filename,
                    classified.raw.as_bytes(),
                )?;
                self.set_status(format!("Saved {}", path.display()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::classify;

    fn wifi_state() -> GeneratorState {
        GeneratorState::default()
            .reduce(GeneratorUpdate::SetMode(GeneratorMode::Wifi))
            .reduce(GeneratorUpdate::SetSsid("Home".to_string()))
            .reduce(GeneratorUpdate::SetPassword("hunter22".to_string()))
    }

    #[test]
    fn initial_state_is_invalid_without_payload() {
        let state = GeneratorState::default();
        assert!(state.payload.is_none());
        assert!(!state.pending);
        assert_eq!(state.validation.errors, vec!["Content is required"]);
    }

    #[test]
    fn text_update_produces_payload_and_pending_preview() {
        let state = GeneratorState::default().reduce(GeneratorUpdate::SetText("hi".to_string()));
        assert_eq!(state.payload.as_deref(), Some("hi"));
        assert!(state.pending);
        assert!(state.validation.is_valid());
        assert_eq!(state.revision, 1);
    }

    #[test]
    fn wifi_mode_encodes_config() {
        let state = wifi_state();
        assert_eq!(
            state.payload.as_deref(),
            Some("WIFI:T:WPA;S:Home;P:hunter22;H:false;;")
        );
        let state = state.reduce(GeneratorUpdate::SetHidden(true));
        assert_eq!(
            state.payload.as_deref(),
            Some("WIFI:T:WPA;S:Home;P:hunter22;H:true;;")
        );
    }

    #[test]
    fn invalid_wifi_clears_payload_and_preview() {
        let state = wifi_state()
            .reduce(GeneratorUpdate::PreviewReady {
                revision: 3,
                lines: vec!["██".to_string()],
            })
            .reduce(GeneratorUpdate::SetPassword(String::new()));
        assert!(state.payload.is_none());
        assert_eq!(state.preview, Preview::Empty);
        assert_eq!(
            state.validation.errors,
            vec!["Password is required for secured networks"]
        );
    }

    #[test]
    fn open_security_drops_password_requirement() {
        let state = GeneratorState::default()
            .reduce(GeneratorUpdate::SetMode(GeneratorMode::Wifi))
            .reduce(GeneratorUpdate::SetSsid("Guest".to_string()))
            .reduce(GeneratorUpdate::SetSecurity(Security::Open));
        assert_eq!(
            state.payload.as_deref(),
            Some("WIFI:T:nopass;S:Guest;P:;H:false;;")
        );
    }

    #[test]
    fn url_mode_normalizes_bare_www() {
        let state = GeneratorState::default()
            .reduce(GeneratorUpdate::SetMode(GeneratorMode::Url))
            .reduce(GeneratorUpdate::SetUrl("www.example.com".to_string()));
        assert_eq!(state.payload.as_deref(), Some("https://www.example.com"));
    }

    #[test]
    fn preview_for_current_revision_clears_pending() {
        let state = GeneratorState::default().reduce(GeneratorUpdate::SetText("hi".to_string()));
        let request = state.request().unwrap();
        let state = state.reduce(render_preview(&request));
        assert!(!state.pending);
        assert!(matches!(state.preview, Preview::Ready(ref lines) if !lines.is_empty()));
    }

    #[test]
    fn stale_preview_is_ignored() {
        let state = GeneratorState::default().reduce(GeneratorUpdate::SetText("h".to_string()));
        let stale = state.request().unwrap();
        let state = state.reduce(GeneratorUpdate::SetText("hi".to_string()));
        let state = state.reduce(render_preview(&stale));
        assert!(state.pending);
        assert_eq!(state.preview, Preview::Empty);
    }

    #[test]
    fn encoder_failure_becomes_failed_preview() {
        let state = GeneratorState::default()
            .reduce(GeneratorUpdate::SetEcLevel(EcLevel::H))
            .reduce(GeneratorUpdate::SetText("x".repeat(2000)));
        let request = state.request().unwrap();
        let state = state.reduce(render_preview(&request));
        assert!(matches!(state.preview, Preview::Failed(_)));
        assert!(!state.pending);
    }

    #[test]
    fn size_and_margin_only_touch_options() {
        let state = GeneratorState::default()
            .reduce(GeneratorUpdate::SetText("hi".to_string()))
            .reduce(GeneratorUpdate::SetSize(512))
            .reduce(GeneratorUpdate::SetMargin(2));
        assert_eq!(state.options.size, 512);
        assert_eq!(state.options.margin, 2);
        assert_eq!(state.payload.as_deref(), Some("hi"));
    }

    #[tokio::test(start_paused = true)]
    async fn export_writes_into_configured_directory() {
        let dir = std::env::temp_dir().join("qrkit-app-export");
        let settings = Settings::from_toml_str(&format!(
            "[export]\ndirectory = {:?}",
            dir.display().to_string()
        ))
        .unwrap();
        let mut state = AppState::new(settings, false, IconSet::Ascii);

        assert!(state.export(ExportFormat::Svg).unwrap().is_none());

        state.dispatch(GeneratorUpdate::SetText("hello".to_string()));
        let path = state.export(ExportFormat::Svg).unwrap().unwrap();
        assert!(path.starts_with(&dir));
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn reader_actions_cycle_for_wifi() {
        let reader = ReaderState::default().reduce(ReaderUpdate::Decoded(classify(
            "WIFI:T:WPA;S:Home;P:pw;H:false;;",
        )));
        assert_eq!(reader.selected(), Some(ReaderAction::EditNetwork));
        let reader = reader.reduce(ReaderUpdate::PrevAction);
        assert_eq!(reader.selected(), Some(ReaderAction::SaveAsText));
        let reader = reader.reduce(ReaderUpdate::NextAction);
        assert_eq!(reader.selected(), Some(ReaderAction::EditNetwork));
    }

    #[test]
    fn reader_without_result_has_no_actions() {
        let reader = ReaderState::default()
            .reduce(ReaderUpdate::ScanStarted)
            .reduce(ReaderUpdate::NextAction);
        assert_eq!(reader.result, ScanResult::Scanning);
        assert_eq!(reader.selected(), None);
        let reader = reader.reduce(ReaderUpdate::NotFound);
        assert_eq!(reader.result, ScanResult::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_schedules_one_regeneration() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        for text in ["h", "he", "hel"] {
            state.dispatch(GeneratorUpdate::SetText(text.to_string()));
        }
        let request = state.regenerate_rx.recv().await.unwrap();
        assert_eq!(request.payload, "hel");
        assert_eq!(request.revision, state.generator.revision);

        state.regenerate_now(&request);
        assert!(!state.generator.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_network_action_loads_wifi_form() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        state.ui.tab = Tab::Reader;
        state.dispatch_reader(ReaderUpdate::Decoded(classify(
            "WIFI:T:WEP;S:Office;P:abc;H:true;;",
        )));
        state.run_reader_action().unwrap();

        assert_eq!(state.ui.tab, Tab::Generator);
        assert_eq!(state.generator.mode, GeneratorMode::Wifi);
        assert_eq!(state.inputs.ssid.value, "Office");
        assert_eq!(state.inputs.password.value, "abc");
        assert_eq!(
            state.generator.payload.as_deref(),
            Some("WIFI:T:WEP;S:Office;P:abc;H:true;;")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn copy_action_loads_url_mode() {
        let mut state = AppState::new(Settings::default(), false, IconSet::Ascii);
        state.dispatch_reader(ReaderUpdate::Decoded(classify("https://example.com")));
        state.run_reader_action().unwrap();
        assert_eq!(state.generator.mode, GeneratorMode::Url);
        assert_eq!(state.focused_field(), GeneratorField::Url);
        assert_eq!(
            state.generator.payload.as_deref(),
            Some("https://example.com")
        );
    }
}

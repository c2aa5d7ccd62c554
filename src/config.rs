/// Centralized configuration constants for qrkit
use crate::payload::Category;

// UI Dimensions
pub const MAIN_WINDOW_HEIGHT: u16 = 36;
pub const MAIN_WINDOW_WIDTH: u16 = 96;
pub const FORM_PANEL_WIDTH: u16 = 44;

// Timing
pub const EVENT_POLL_MS: u64 = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const STATUS_TTL_SECS: u64 = 4;
pub const KEY_LOGGER_TTL_SECS: u64 = 2;

// Settings file location under the platform config dir
pub const APP_DIR: &str = "qrkit";
pub const SETTINGS_FILENAME: &str = "config.toml";
pub const LOG_FILENAME: &str = "qrkit.log";

// Loading animation frames
pub const LOADING_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// Icons - Nerd Fonts
pub mod icons {
    pub mod nerd {
        pub const URL: &str = "󰖟 "; // nf-md-web
        pub const WIFI: &str = "󰖩 "; // nf-md-wifi
        pub const EMAIL: &str = "󰇮 "; // nf-md-email
        pub const PHONE: &str = "󰏲 "; // nf-md-phone
        pub const SMS: &str = "󰍦 "; // nf-md-message_text
        pub const GEO: &str = "󰍎 "; // nf-md-map_marker
        pub const VCARD: &str = "󰀓 "; // nf-md-account_box
        pub const EVENT: &str = "󰃭 "; // nf-md-calendar
        pub const TEXT: &str = "󰦨 "; // nf-md-text_long
        // UI symbols for help bar and form
        pub const ENTER: &str = "󰌑"; // nf-md-keyboard_return
        pub const TAB_NEXT: &str = "⇥ / ↓";
        pub const TAB_PREV: &str = "⇤ / ↑";
        pub const SPACE: &str = "󱁐"; // nf-md-keyboard_space
        pub const CHECKBOX_ON: &str = " "; // nf-fa-check_square_o
        pub const CHECKBOX_OFF: &str = " "; // nf-fa-square_o
        pub const HIGHLIGHT: &str = "  ";
    }

    pub mod ascii {
        pub const URL: &str = "[URL] ";
        pub const WIFI: &str = "[WIFI] ";
        pub const EMAIL: &str = "[MAIL] ";
        pub const PHONE: &str = "[TEL] ";
        pub const SMS: &str = "[SMS] ";
        pub const GEO: &str = "[GEO] ";
        pub const VCARD: &str = "[CARD] ";
        pub const EVENT: &str = "[CAL] ";
        pub const TEXT: &str = "[TXT] ";
        // UI symbols for help bar and form
        pub const ENTER: &str = "Enter";
        pub const TAB_NEXT: &str = "Tab/Down";
        pub const TAB_PREV: &str = "S-Tab/Up";
        pub const SPACE: &str = "Space";
        pub const CHECKBOX_ON: &str = "[x]";
        pub const CHECKBOX_OFF: &str = "[ ]";
        pub const HIGHLIGHT: &str = "> ";
    }
}

/// Icon set to use based on configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IconSet {
    #[default]
    Nerd,
    Ascii,
}

impl IconSet {
    pub fn category(&self, category: Category) -> &'static str {
        use icons::{ascii, nerd};
        let (n, a) = match category {
            Category::Url => (nerd::URL, ascii::URL),
            Category::Wifi => (nerd::WIFI, ascii::WIFI),
            Category::Email => (nerd::EMAIL, ascii::EMAIL),
            Category::Phone => (nerd::PHONE, ascii::PHONE),
            Category::Sms => (nerd::SMS, ascii::SMS),
            Category::Geo => (nerd::GEO, ascii::GEO),
            Category::VCard => (nerd::VCARD, ascii::VCARD),
            Category::Event => (nerd::EVENT, ascii::EVENT),
            Category::Text => (nerd::TEXT, ascii::TEXT),
        };
        self.pick(n, a)
    }

    pub fn enter(&self) -> &'static str {
        self.pick(icons::nerd::ENTER, icons::ascii::ENTER)
    }

    pub fn tab_next(&self) -> &'static str {
        self.pick(icons::nerd::TAB_NEXT, icons::ascii::TAB_NEXT)
    }

    pub fn tab_prev(&self) -> &'static str {
        self.pick(icons::nerd::TAB_PREV, icons::ascii::TAB_PREV)
    }

    pub fn space(&self) -> &'static str {
        self.pick(icons::nerd::SPACE, icons::ascii::SPACE)
    }

    pub fn highlight(&self) -> &'static str {
        self.pick(icons::nerd::HIGHLIGHT, icons::ascii::HIGHLIGHT)
    }

    pub fn checkbox(&self, checked: bool) -> &'static str {
        match (self, checked) {
            (IconSet::Nerd, true) => icons::nerd::CHECKBOX_ON,
            (IconSet::Nerd, false) => icons::nerd::CHECKBOX_OFF,
            (IconSet::Ascii, true) => icons::ascii::CHECKBOX_ON,
            (IconSet::Ascii, false) => icons::ascii::CHECKBOX_OFF,
        }
    }

    fn pick(&self, nerd: &'static str, ascii: &'static str) -> &'static str {
        match self {
            IconSet::Nerd => nerd,
            IconSet::Ascii => ascii,
        }
    }
}

//! Classification of decoded QR payloads.
//!
//! Rules are evaluated in a fixed order and the first one that matches wins.
//! Categories are not mutually exclusive by shape (`WIFI:` text could also be
//! plain text), only by evaluation order.

use std::fmt;

use crate::payload::types::{Security, WifiConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Url,
    Wifi,
    Email,
    Phone,
    Sms,
    Geo,
    VCard,
    Event,
    Text,
}

/// What the reader offers to do with a decoded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderAction {
    CopyToGenerator,
    EditNetwork,
    SaveAsText,
}

impl ReaderAction {
    pub fn label(&self) -> &'static str {
        match self {
            ReaderAction::CopyToGenerator => "Copy to generator",
            ReaderAction::EditNetwork => "Edit network",
            ReaderAction::SaveAsText => "Save as text",
        }
    }
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Url => "URL",
            Category::Wifi => "Wi-Fi",
            Category::Email => "Email",
            Category::Phone => "Phone",
            Category::Sms => "SMS",
            Category::Geo => "Location",
            Category::VCard => "Contact",
            Category::Event => "Event",
            Category::Text => "Text",
        }
    }

    pub fn actions(&self) -> &'static [ReaderAction] {
        match self {
            Category::Wifi => &[
                ReaderAction::EditNetwork,
                ReaderAction::CopyToGenerator,
                ReaderAction::SaveAsText,
            ],
            _ => &[ReaderAction::CopyToGenerator, ReaderAction::SaveAsText],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wi-Fi fields exactly as captured from the payload (escapes are kept)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiFields {
    pub security: String,
    pub ssid: String,
    pub password: String,
    pub hidden: bool,
}

impl WifiFields {
    /// Captured `T:` token mapped onto a known security type
    pub fn security(&self) -> Security {
        Security::from_captured(&self.security)
    }

    pub fn to_config(&self) -> WifiConfig {
        WifiConfig::new(
            self.ssid.clone(),
            self.password.clone(),
            self.security(),
            self.hidden,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPayload {
    pub raw: String,
    pub category: Category,
    pub fields: Option<WifiFields>,
}

struct Rule {
    category: Category,
    predicate: fn(&str) -> bool,
    extract: Option<fn(&str) -> Option<WifiFields>>,
}

const RULES: &[Rule] = &[
    Rule {
        category: Category::Url,
        predicate: is_url,
        extract: None,
    },
    Rule {
        category: Category::Wifi,
        predicate: is_wifi_prefixed,
        extract: Some(capture_wifi),
    },
    Rule {
        category: Category::Email,
        predicate: is_email,
        extract: None,
    },
    Rule {
        category: Category::Phone,
        predicate: is_phone,
        extract: None,
    },
    Rule {
        category: Category::Sms,
        predicate: is_sms,
        extract: None,
    },
    Rule {
        category: Category::Geo,
        predicate: is_geo,
        extract: None,
    },
    Rule {
        category: Category::VCard,
        predicate: is_vcard,
        extract: None,
    },
    Rule {
        category: Category::Event,
        predicate: is_event,
        extract: None,
    },
];

/// Classify decoded text. Never fails: anything unrecognised is plain text.
pub fn classify(raw: &str) -> ClassifiedPayload {
    for rule in RULES {
        if !(rule.predicate)(raw) {
            continue;
        }
        let fields = match rule.extract {
            Some(extract) => match extract(raw) {
                Some(fields) => Some(fields),
                // prefix matched but the fields did not, keep looking
                None => continue,
            },
            None => None,
        };
        return ClassifiedPayload {
            raw: raw.to_string(),
            category: rule.category,
            fields,
        };
    }

    ClassifiedPayload {
        raw: raw.to_string(),
        category: Category::Text,
        fields: None,
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn is_url(s: &str) -> bool {
    starts_with_ignore_case(s, "http://")
        || starts_with_ignore_case(s, "https://")
        || starts_with_ignore_case(s, "www.")
}

fn is_wifi_prefixed(s: &str) -> bool {
    s.starts_with("WIFI:")
}

fn is_email(s: &str) -> bool {
    s.starts_with("mailto:") || is_email_shape(s)
}

fn is_phone(s: &str) -> bool {
    s.starts_with("tel:") || is_phone_shape(s)
}

fn is_sms(s: &str) -> bool {
    s.starts_with("sms:") || s.starts_with("smsto:")
}

fn is_geo(s: &str) -> bool {
    s.starts_with("geo:")
}

fn is_vcard(s: &str) -> bool {
    s.starts_with("BEGIN:VCARD")
}

fn is_event(s: &str) -> bool {
    s.starts_with("BEGIN:VEVENT")
}

/// `local@domain.tld` with no whitespace and exactly one `@`
fn is_email_shape(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // needs a dot with at least one character on each side
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn is_phone_shape(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')')
        })
}

/// Finds `WIFI:T:..;S:..;P:..;H:..;` anywhere in the text, leftmost first.
fn capture_wifi(s: &str) -> Option<WifiFields> {
    s.match_indices("WIFI:T:")
        .find_map(|(start, _)| capture_wifi_at(&s[start + "WIFI:T:".len()..]))
}

fn capture_wifi_at(rest: &str) -> Option<WifiFields> {
    let (security, rest) = rest.split_once(';')?;
    let (ssid, rest) = rest.strip_prefix("S:")?.split_once(';')?;
    let (password, rest) = rest.strip_prefix("P:")?.split_once(';')?;
    let (hidden, _) = rest.strip_prefix("H:")?.split_once(';')?;

    Some(WifiFields {
        security: if security.is_empty() {
            "nopass".to_string()
        } else {
            security.to_string()
        },
        ssid: ssid.to_string(),
        password: password.to_string(),
        hidden: hidden == "true",
    })
}

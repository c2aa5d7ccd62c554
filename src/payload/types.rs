use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};

/// Wi-Fi network security as carried in the `T:` field of a Wi-Fi payload
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Security {
    #[default]
    Wpa,
    Wep,
    Open,
}

impl Security {
    pub const ALL: [Security; 3] = [Security::Wpa, Security::Wep, Security::Open];

    /// Token written into the payload
    pub fn as_payload_str(&self) -> &'static str {
        match self {
            Security::Wpa => "WPA",
            Security::Wep => "WEP",
            Security::Open => "nopass",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Security::Wpa => "WPA/WPA2",
            Security::Wep => "WEP",
            Security::Open => "Open",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        if idx == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[idx - 1]
        }
    }

    /// Lenient mapping used for captured payload fields; unknown tokens fall back to WPA
    pub fn from_captured(token: &str) -> Self {
        token.parse().unwrap_or(Security::Wpa)
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_payload_str())
    }
}

impl FromStr for Security {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wpa" | "wpa2" | "wpa3" => Ok(Security::Wpa),
            "wep" => Ok(Security::Wep),
            "nopass" | "open" | "none" => Ok(Security::Open),
            other => Err(format!(
                "unknown security type '{other}' (expected WPA, WEP or nopass)"
            )),
        }
    }
}

/// Structured Wi-Fi network description, built fresh from user input
#[derive(Debug)]
pub struct WifiConfig {
    pub ssid: String,
    pub password: SecretString,
    pub security: Security,
    pub hidden: bool,
}

impl WifiConfig {
    pub fn new(
        ssid: impl Into<String>,
        password: impl Into<String>,
        security: Security,
        hidden: bool,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            password: SecretString::from(password.into()),
            security,
            hidden,
        }
    }

    pub fn password_len(&self) -> usize {
        self.password.expose_secret().chars().count()
    }

    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }

    pub fn with_password(self, password: impl Into<String>) -> Self {
        Self {
            password: SecretString::from(password.into()),
            ..self
        }
    }
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self::new(String::new(), String::new(), Security::default(), false)
    }
}

/// Outcome of a validation pass. Every failing check contributes one message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn first(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

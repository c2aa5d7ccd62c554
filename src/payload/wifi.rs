//! Wi-Fi network payload: `WIFI:T:<security>;S:<ssid>;P:<password>;H:<true|false>;;`

use secrecy::ExposeSecret;

use crate::payload::types::{Security, ValidationReport, WifiConfig};

pub const MAX_SSID_LEN: usize = 32;
pub const MAX_PASSWORD_LEN: usize = 63;

/// Build the payload string for a Wi-Fi network.
pub fn encode(config: &WifiConfig) -> String {
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        config.security.as_payload_str(),
        escape(&config.ssid),
        escape(config.password.expose_secret()),
        if config.hidden { "true" } else { "false" }
    )
}

/// Escape special characters for the Wi-Fi payload format.
///
/// Backslash goes first, otherwise the backslashes inserted by the later
/// replacements would be doubled.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('"', "\\\"")
        .replace(':', "\\:")
}

pub fn validate(config: &WifiConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.ssid.trim().is_empty() {
        report.push("SSID is required");
    }
    if config.ssid.chars().count() > MAX_SSID_LEN {
        report.push(format!("SSID cannot exceed {MAX_SSID_LEN} characters"));
    }
    if config.security != Security::Open && !config.has_password() {
        report.push("Password is required for secured networks");
    }
    if config.password_len() > MAX_PASSWORD_LEN {
        report.push(format!(
            "Password cannot exceed {MAX_PASSWORD_LEN} characters"
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn encodes_escaped_fields() {
        let config = WifiConfig::new("a;b", "p\\q", Security::Wpa, true);
        assert_eq!(encode(&config), "WIFI:T:WPA;S:a\\;b;P:p\\\\q;H:true;;");
    }

    #[test]
    fn open_network_emits_nopass_and_empty_password() {
        let config = WifiConfig::new("Cafe", "", Security::Open, false);
        assert_eq!(encode(&config), "WIFI:T:nopass;S:Cafe;P:;H:false;;");
    }

    #[test_case("plain", "plain")]
    #[test_case("a,b", "a\\,b")]
    #[test_case("say \"hi\"", "say \\\"hi\\\"")]
    #[test_case("k:v", "k\\:v")]
    #[test_case("\\;", "\\\\\\;")]
    fn escapes_special_characters(input: &str, expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn escape_does_not_double_inserted_backslashes() {
        // ";" becomes "\;" and must not then turn into "\\;"
        assert_eq!(escape(";"), "\\;");
        assert_eq!(escape(":,"), "\\:\\,");
    }

    #[test]
    fn empty_secured_config_reports_both_required_fields() {
        let config = WifiConfig::new("", "", Security::Wpa, false);
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(
            report.errors,
            vec![
                "SSID is required".to_string(),
                "Password is required for secured networks".to_string()
            ]
        );
    }

    #[test]
    fn long_ssid_on_open_network_reports_length_only() {
        let config = WifiConfig::new("x".repeat(33), "ok", Security::Open, false);
        let report = validate(&config);
        assert_eq!(
            report.errors,
            vec!["SSID cannot exceed 32 characters".to_string()]
        );
    }

    #[test]
    fn whitespace_ssid_is_treated_as_missing() {
        let config = WifiConfig::new("   ", "secret", Security::Wep, false);
        assert_eq!(report_errors(&config), vec!["SSID is required"]);
    }

    #[test]
    fn long_password_is_rejected() {
        let config = WifiConfig::new("net", "p".repeat(64), Security::Wpa, false);
        assert_eq!(
            report_errors(&config),
            vec!["Password cannot exceed 63 characters"]
        );
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        let config = WifiConfig::new("s".repeat(32), "p".repeat(63), Security::Wpa, true);
        assert!(validate(&config).is_valid());
    }

    #[test]
    fn open_network_without_password_is_valid() {
        let config = WifiConfig::new("Guest", "", Security::Open, false);
        assert!(validate(&config).is_valid());
    }

    fn report_errors(config: &WifiConfig) -> Vec<String> {
        validate(config).errors
    }
}

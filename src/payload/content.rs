use crate::payload::types::ValidationReport;

/// Byte-mode capacity of a version 40 symbol at error-correction level L
pub const MAX_CONTENT_BYTES: usize = 2953;

pub fn validate_content(text: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    if text.trim().is_empty() {
        report.push("Content is required");
    }
    check_capacity(text, &mut report);
    report
}

pub fn validate_url(url: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    let url = url.trim();
    if url.is_empty() {
        report.push("URL is required");
        return report;
    }
    if !is_valid_url(url) {
        report.push("Please enter a valid URL");
    }
    check_capacity(url, &mut report);
    report
}

/// Trim and add an `https://` scheme to bare `www.` addresses
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if strip_scheme(url).is_none() && has_prefix_ignore_case(url, "www.") {
        format!("https://{url}")
    } else {
        url.to_string()
    }
}

fn check_capacity(text: &str, report: &mut ValidationReport) {
    if text.len() > MAX_CONTENT_BYTES {
        report.push(format!(
            "Content exceeds the maximum QR capacity of {MAX_CONTENT_BYTES} bytes"
        ));
    }
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn strip_scheme(url: &str) -> Option<&str> {
    ["https://", "http://"]
        .iter()
        .find(|scheme| has_prefix_ignore_case(url, scheme))
        .map(|scheme| &url[scheme.len()..])
}

fn is_valid_url(url: &str) -> bool {
    if url.chars().any(char::is_whitespace) {
        return false;
    }
    let rest = match strip_scheme(url) {
        Some(rest) => rest,
        None if has_prefix_ignore_case(url, "www.") => url,
        None => return false,
    };
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    // drop userinfo and port
    let host = host.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();

    host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn blank_content_is_required() {
        assert_eq!(validate_content("  \n").errors, vec!["Content is required"]);
    }

    #[test]
    fn oversized_content_is_rejected() {
        let text = "a".repeat(MAX_CONTENT_BYTES + 1);
        assert_eq!(
            validate_content(&text).errors,
            vec!["Content exceeds the maximum QR capacity of 2953 bytes"]
        );
        assert!(validate_content(&"a".repeat(MAX_CONTENT_BYTES)).is_valid());
    }

    #[test_case("https://example.com")]
    #[test_case("http://example.com/path?q=1#top")]
    #[test_case("HTTPS://Example.COM")]
    #[test_case("www.example.com")]
    #[test_case("https://user@example.com:8443/")]
    fn accepts_urls(url: &str) {
        assert!(validate_url(url).is_valid(), "{url} should be valid");
    }

    #[test_case("example.com"; "missing scheme")]
    #[test_case("ftp://example.com"; "other scheme")]
    #[test_case("https://localhost"; "host without dot")]
    #[test_case("https://exa mple.com"; "whitespace")]
    #[test_case("https://.com"; "leading dot")]
    fn rejects_urls(url: &str) {
        assert_eq!(validate_url(url).errors, vec!["Please enter a valid URL"]);
    }

    #[test]
    fn empty_url_is_required() {
        assert_eq!(validate_url("").errors, vec!["URL is required"]);
    }

    #[test]
    fn bare_www_gets_https_scheme() {
        assert_eq!(normalize_url(" www.example.com "), "https://www.example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
    }
}

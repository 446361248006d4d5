//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a URL.
///
/// Adds https:// prefix if missing, then validates that the URL is
/// syntactically valid and uses http/https scheme. Rejects URLs longer than
/// `MAX_URL_LENGTH`. Logs a warning and returns None if the URL is invalid,
/// too long, or uses an unsupported scheme.
///
/// # Arguments
///
/// * `url` - The URL string to validate and normalize
///
/// # Returns
///
/// `Some(normalized_url)` if the URL is valid and should be audited, `None`
/// otherwise.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            &url[..50.min(url.len())]
        );
        return None;
    }

    // Normalize: add https:// prefix if missing
    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    // The https:// prefix could push the URL over the limit
    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting normalized URL exceeding maximum length ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            &normalized[..50.min(normalized.len())]
        );
        return None;
    }

    // Validate: check syntax and scheme
    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Some(normalized),
            _ => {
                warn!("Rejecting unsupported scheme for URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Rejecting invalid URL: {url}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;

    #[test]
    fn test_validate_and_normalize_url_adds_https() {
        let result = validate_and_normalize_url("example.com");
        assert_eq!(result, Some("https://example.com".to_string()));
    }

    #[test]
    fn test_validate_and_normalize_url_preserves_https() {
        let result = validate_and_normalize_url("https://example.com");
        assert_eq!(result, Some("https://example.com".to_string()));
    }

    #[test]
    fn test_validate_and_normalize_url_preserves_http() {
        let result = validate_and_normalize_url("http://example.com");
        assert_eq!(result, Some("http://example.com".to_string()));
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_invalid_url() {
        let result = validate_and_normalize_url("not a valid url!!!");
        assert_eq!(result, None);
    }

    #[test]
    fn test_validate_and_normalize_url_with_path() {
        let result = validate_and_normalize_url("example.com/path?query=value");
        assert_eq!(
            result,
            Some("https://example.com/path?query=value".to_string())
        );
    }

    #[test]
    fn test_validate_and_normalize_url_with_port() {
        let result = validate_and_normalize_url("example.com:8080");
        assert_eq!(result, Some("https://example.com:8080".to_string()));
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_too_long_url() {
        let long_path = "a".repeat(2100);
        let long_url = format!("https://example.com/{}", long_path);
        let result = validate_and_normalize_url(&long_url);
        assert_eq!(result, None, "Should reject URL exceeding maximum length");
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_too_long_after_normalization() {
        // Under limit before normalization but over it after adding https://
        let path = "a".repeat(2045);
        let url = format!("example.com/{}", path);
        let result = validate_and_normalize_url(&url);
        assert_eq!(result, None);
    }

    #[test]
    fn test_validate_and_normalize_url_edge_cases() {
        assert_eq!(validate_and_normalize_url(""), None);
        assert_eq!(validate_and_normalize_url("   "), None);
    }
}

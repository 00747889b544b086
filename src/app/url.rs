//! Target URL validation and normalization.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a target URL.
///
/// Adds an `https://` prefix when the target carries no scheme, then checks
/// that the result parses and uses http or https. Targets longer than
/// `MAX_URL_LENGTH` (before or after normalization) are rejected.
///
/// Returns `None` (after logging a warning) when the target cannot be probed.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping target exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            truncate_for_log(url)
        );
        return None;
    }

    let normalized = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping target exceeding maximum length after normalization ({} > {}): {}...",
            normalized.len(),
            MAX_URL_LENGTH,
            truncate_for_log(&normalized)
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            Some(normalized)
        }
        Ok(_) => {
            warn!("Skipping unsupported target: {url}");
            None
        }
        Err(e) => {
            warn!("Skipping invalid target {url}: {e}");
            None
        }
    }
}

fn truncate_for_log(url: &str) -> &str {
    let mut end = 50.min(url.len());
    while !url.is_char_boundary(end) {
        end -= 1;
    }
    &url[..end]
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;
    use proptest::prelude::*;

    #[test]
    fn test_adds_https_when_scheme_missing() {
        assert_eq!(
            validate_and_normalize_url("example.com"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_preserves_http_and_https() {
        assert_eq!(
            validate_and_normalize_url("http://example.com"),
            Some("http://example.com".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("https://example.com/blog/"),
            Some("https://example.com/blog/".to_string())
        );
    }

    #[test]
    fn test_keeps_port_and_path() {
        assert_eq!(
            validate_and_normalize_url("example.com:8080/shop"),
            Some("https://example.com:8080/shop".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("http://127.0.0.1:3000"),
            Some("http://127.0.0.1:3000".to_string())
        );
    }

    #[test]
    fn test_ipv6_host() {
        assert_eq!(
            validate_and_normalize_url("[2001:db8::1]"),
            Some("https://[2001:db8::1]".to_string())
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(validate_and_normalize_url(""), None);
        assert_eq!(validate_and_normalize_url("   "), None);
        assert_eq!(validate_and_normalize_url("not a url at all!!!"), None);
        assert_eq!(validate_and_normalize_url("://example.com"), None);
    }

    #[test]
    fn test_rejects_too_long() {
        let long_url = format!("https://example.com/{}", "a".repeat(2100));
        assert_eq!(validate_and_normalize_url(&long_url), None);

        // Under the cap before the prefix is added, over it afterwards.
        let url = format!("example.com/{}", "a".repeat(2030));
        assert!(url.len() <= 2048);
        assert_eq!(validate_and_normalize_url(&url), None);
    }

    #[test]
    fn test_accepts_url_at_limit() {
        let url = format!("https://example.com/{}", "a".repeat(2028));
        assert_eq!(url.len(), 2048);
        assert!(validate_and_normalize_url(&url).is_some());
    }

    #[test]
    fn test_long_multibyte_url_does_not_panic() {
        let url = "é".repeat(1500);
        assert_eq!(validate_and_normalize_url(&url), None);
    }

    proptest! {
        #[test]
        fn test_normalization_idempotent(domain in "[a-z]{3,20}\\.[a-z]{2,5}") {
            let once = validate_and_normalize_url(&domain);
            prop_assert!(once.is_some());
            let once = once.unwrap();
            prop_assert_eq!(validate_and_normalize_url(&once), Some(once.clone()));
        }

        #[test]
        fn test_length_cap(
            domain in "[a-z]{3,20}\\.[a-z]{2,5}",
            segments in prop::collection::vec("[a-z]{1,10}", 0..200)
        ) {
            let url = format!("https://{}/{}", domain, segments.join("/"));
            let result = validate_and_normalize_url(&url);
            if url.len() <= 2048 {
                prop_assert!(result.is_some());
            } else {
                prop_assert!(result.is_none());
            }
        }

        #[test]
        fn test_port_preserved(
            domain in "[a-z]{3,20}\\.[a-z]{2,5}",
            port in 1u16..=65535
        ) {
            let result = validate_and_normalize_url(&format!("{domain}:{port}"));
            prop_assert!(result.is_some());
            prop_assert!(result.unwrap().contains(&port.to_string()));
        }
    }
}

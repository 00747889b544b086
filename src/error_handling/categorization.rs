//! Error classification and categorization.
//!
//! Turns transport errors into [`FetchError`] values and maps those onto the
//! [`ErrorType`] buckets used for run statistics.

use std::error::Error as StdError;

use super::stats::ProcessingStats;
use super::types::{ErrorType, FetchError};

const TIMEOUT_DETAIL: &str = "timeout";
const DNS_PREFIX: &str = "dns: ";
const TLS_PREFIX: &str = "tls: ";
const CONNECT_PREFIX: &str = "connect: ";

/// Returns the innermost message of an error chain.
fn root_cause_message(error: &(dyn StdError + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// Returns `true` if any error in the chain mentions one of `needles`.
fn chain_mentions(error: &(dyn StdError + 'static), needles: &[&str]) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        let text = err.to_string().to_ascii_lowercase();
        if needles.iter().any(|needle| text.contains(needle)) {
            return true;
        }
        current = err.source();
    }
    false
}

/// Classifies a `reqwest::Error` into a [`FetchError`].
///
/// Timeouts, DNS failures, TLS failures and refused connections all become
/// `FetchError::Network`, with a short prefix identifying the kind so that
/// statistics can still tell them apart. Status errors (only produced when
/// `error_for_status` is used) become `FetchError::HttpStatus`.
pub fn classify_reqwest_error(error: &reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        return FetchError::HttpStatus(status.as_u16());
    }

    if error.is_timeout() {
        return FetchError::Network(TIMEOUT_DETAIL.to_string());
    }

    let root = root_cause_message(error);
    if chain_mentions(error, &["dns error", "failed to lookup address", "name or service not known"]) {
        FetchError::Network(format!("{DNS_PREFIX}{root}"))
    } else if chain_mentions(error, &["certificate", "tls", "ssl", "handshake"]) {
        FetchError::Network(format!("{TLS_PREFIX}{root}"))
    } else if error.is_connect() {
        FetchError::Network(format!("{CONNECT_PREFIX}{root}"))
    } else {
        FetchError::Network(root)
    }
}

/// Categorizes a [`FetchError`] into an [`ErrorType`].
pub fn categorize_fetch_error(error: &FetchError) -> ErrorType {
    match error {
        FetchError::HttpStatus(code) => match code {
            400 => ErrorType::HttpRequestBadRequest,
            401 => ErrorType::HttpRequestUnauthorized,
            403 => ErrorType::HttpRequestBotDetectionError,
            404 => ErrorType::HttpRequestNotFound,
            429 => ErrorType::HttpRequestTooManyRequests,
            500 => ErrorType::HttpRequestInternalServerError,
            502 => ErrorType::HttpRequestBadGateway,
            503 => ErrorType::HttpRequestServiceUnavailable,
            504 => ErrorType::HttpRequestGatewayTimeout,
            _ => ErrorType::HttpRequestOtherStatus,
        },
        FetchError::Network(detail) => {
            if detail == TIMEOUT_DETAIL {
                ErrorType::HttpRequestTimeoutError
            } else if detail.starts_with(DNS_PREFIX) {
                ErrorType::HttpRequestDnsError
            } else if detail.starts_with(TLS_PREFIX) {
                ErrorType::HttpRequestTlsError
            } else if detail.starts_with(CONNECT_PREFIX) {
                ErrorType::HttpRequestConnectError
            } else {
                ErrorType::HttpRequestOtherError
            }
        }
    }
}

/// Records a fetch failure in the processing statistics.
pub fn update_error_stats(stats: &ProcessingStats, error: &FetchError) {
    stats.increment_error(categorize_fetch_error(error));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_status_codes() {
        assert_eq!(
            categorize_fetch_error(&FetchError::HttpStatus(403)),
            ErrorType::HttpRequestBotDetectionError
        );
        assert_eq!(
            categorize_fetch_error(&FetchError::HttpStatus(500)),
            ErrorType::HttpRequestInternalServerError
        );
        assert_eq!(
            categorize_fetch_error(&FetchError::HttpStatus(418)),
            ErrorType::HttpRequestOtherStatus
        );
    }

    #[test]
    fn test_categorize_network_details() {
        assert_eq!(
            categorize_fetch_error(&FetchError::Network("timeout".to_string())),
            ErrorType::HttpRequestTimeoutError
        );
        assert_eq!(
            categorize_fetch_error(&FetchError::Network(
                "dns: failed to lookup address information".to_string()
            )),
            ErrorType::HttpRequestDnsError
        );
        assert_eq!(
            categorize_fetch_error(&FetchError::Network("tls: invalid peer certificate".to_string())),
            ErrorType::HttpRequestTlsError
        );
        assert_eq!(
            categorize_fetch_error(&FetchError::Network("connect: Connection refused".to_string())),
            ErrorType::HttpRequestConnectError
        );
        assert_eq!(
            categorize_fetch_error(&FetchError::Network("body closed early".to_string())),
            ErrorType::HttpRequestOtherError
        );
    }

    #[test]
    fn test_update_error_stats_increments_bucket() {
        let stats = ProcessingStats::new();
        update_error_stats(&stats, &FetchError::HttpStatus(404));
        update_error_stats(&stats, &FetchError::HttpStatus(404));
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestNotFound), 2);
    }

    #[tokio::test]
    async fn test_classify_connection_refused() {
        // Bind then drop a listener so the port is very likely closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::new();
        let err = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .expect_err("request to a closed port should fail");

        match classify_reqwest_error(&err) {
            FetchError::Network(detail) => assert!(!detail.is_empty()),
            other => panic!("expected network error, got {other:?}"),
        }
    }
}

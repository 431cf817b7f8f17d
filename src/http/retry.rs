//! Retry policy and transport error classification.
//!
//! poeprices.info answers 403 when it is briefly overloaded; that is the only
//! status worth retrying. Everything else fails on the first attempt.

use reqwest::StatusCode;
use std::time::Duration;

/// Retries after the first attempt, so at most `MAX_RETRIES + 1` requests.
pub const MAX_RETRIES: usize = 5;

/// Constant delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// How many times to retry a transient failure and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: usize, delay: Duration) -> Self {
        Self { max_retries, delay }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES, Duration::from_millis(RETRY_DELAY_MS))
    }
}

/// Outcome of a failed HTTP attempt.
#[derive(Debug)]
pub enum TransportError {
    /// HTTP 403, expected to clear on its own
    Transient(StatusCode),
    /// Any other non-success status
    Status(StatusCode),
    /// No status at all: connection refused, DNS, TLS, broken body, ...
    Network(String),
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Transient(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Transient(status) | TransportError::Status(status) => Some(*status),
            TransportError::Network(_) => None,
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Transient(status) => {
                write!(f, "HTTP {} (transient)", status.as_u16())
            }
            TransportError::Status(status) => {
                write!(f, "HTTP {}", status.as_u16())
            }
            TransportError::Network(msg) => {
                write!(f, "Network error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Classifies a non-success HTTP status.
pub fn classify_status(status: StatusCode) -> TransportError {
    if status == StatusCode::FORBIDDEN {
        TransportError::Transient(status)
    } else {
        TransportError::Status(status)
    }
}

/// Classifies a reqwest error by its status, if it carries one.
pub fn classify_error(error: &reqwest::Error) -> TransportError {
    match error.status() {
        Some(status) => classify_status(status),
        None => TransportError::Network(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_error(status: usize) -> reqwest::Error {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(status)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let response = client.get(server.url()).send().await.unwrap();
        response.error_for_status().unwrap_err()
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_classify_status() {
        assert!(classify_status(StatusCode::FORBIDDEN).is_retryable());
        assert!(!classify_status(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(!classify_status(StatusCode::SERVICE_UNAVAILABLE).is_retryable());
        assert!(!classify_status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!classify_status(StatusCode::NOT_FOUND).is_retryable());
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Transient(StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("403"));

        let err = TransportError::Status(StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "HTTP 502");

        let err = TransportError::Network("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_classify_error_forbidden_is_transient() {
        let err = status_error(403).await;
        let result = classify_error(&err);
        assert!(matches!(result, TransportError::Transient(StatusCode::FORBIDDEN)));
        assert!(result.is_retryable());
    }

    #[tokio::test]
    async fn test_classify_error_server_error_is_permanent() {
        let err = status_error(500).await;
        let result = classify_error(&err);
        assert!(matches!(
            result,
            TransportError::Status(StatusCode::INTERNAL_SERVER_ERROR)
        ));
        assert!(!result.is_retryable());
    }

    #[tokio::test]
    async fn test_classify_error_client_error_is_permanent() {
        let err = status_error(404).await;
        let result = classify_error(&err);
        assert_eq!(result.status(), Some(StatusCode::NOT_FOUND));
        assert!(!result.is_retryable());
    }

    #[tokio::test]
    async fn test_classify_error_connection_refused() {
        // Bind then drop a listener so the port is very likely closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();

        let result = classify_error(&err);
        assert!(matches!(result, TransportError::Network(_)));
        assert!(!result.is_retryable());
    }
}

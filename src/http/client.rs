//! HTTP client with a sequential, fixed-delay retry loop.

use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

use super::retry::{RetryPolicy, TransportError, classify_error, classify_status};

/// Thin wrapper over `reqwest::Client` that knows how to retry.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request with query parameters and returns the body as JSON.
    ///
    /// A successful response whose body is not JSON comes back as
    /// `Value::String` holding the raw text, so the caller's shape check can
    /// reject it. Transient statuses are retried per `policy`.
    #[tracing::instrument(skip(self, query, policy))]
    pub async fn get_json_with_query(
        &self,
        url: &str,
        query: &[(&str, &str)],
        policy: &RetryPolicy,
    ) -> Result<Value, TransportError> {
        debug!("GET JSON from {} with query {:?}...", url, query);

        let operation_name = describe_request(url, query);
        self.with_retry(&operation_name, policy, || async {
            let response = self
                .client
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| classify_error(&e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(classify_status(status));
            }

            let body = response.text().await.map_err(|e| classify_error(&e))?;

            Ok(match serde_json::from_str::<Value>(&body) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Response body is not JSON ({}), keeping raw text", e);
                    Value::String(body)
                }
            })
        })
        .await
    }

    /// Runs `operation` until it succeeds, fails permanently, or runs out of retries.
    ///
    /// Attempts are strictly sequential; the sleep is the only suspension
    /// point between them. When retries run out the last error is returned.
    async fn with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        policy: &RetryPolicy,
        operation: F,
    ) -> Result<T, TransportError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, TransportError>>,
    {
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && retries < policy.max_retries => {
                    retries += 1;
                    warn!(
                        "{}: request failed with {}, retry {}/{} in {}ms...",
                        operation_name,
                        e,
                        retries,
                        policy.max_retries,
                        policy.delay.as_millis()
                    );
                    tokio::time::sleep(policy.delay).await;
                }
                Err(e) => {
                    debug!(
                        "{}: giving up after {} retries: {}",
                        operation_name, retries, e
                    );
                    return Err(e);
                }
            }
        }
    }
}

/// Label for log lines, carrying the parameters the request was sent with.
fn describe_request(url: &str, query: &[(&str, &str)]) -> String {
    format!("GET {} with query {:?}", url, query)
}

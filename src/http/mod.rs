//! HTTP client module with retry logic and error classification.

mod client;
mod retry;

pub use client::HttpClient;
pub use retry::{
    MAX_RETRIES, RETRY_DELAY_MS, RetryPolicy, TransportError, classify_error, classify_status,
};

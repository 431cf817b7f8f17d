//! poeprices.info price prediction client.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{Value, json};

use crate::{
    http::{HttpClient, RetryPolicy, TransportError},
    item::sanitize_item_text,
    prediction::{ClientResult, PredictionResponse, QueryParameters},
};

/// Prediction endpoint.
pub const API_URL: &str = "https://www.poeprices.info/api";

/// Value of the `s` parameter identifying this client to the service.
pub const CLIENT_ID: &str = "xenontrade";

/// Why a prediction could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// Nothing to price: the item text was empty or whitespace
    EmptyItemText,
    /// The service answered, but without the required fields or with a non-zero error code
    InvalidResponse,
    /// Transport failure; `status` is absent for network-level errors
    RequestFailed { status: Option<u16> },
}

impl std::fmt::Display for PredictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionError::EmptyItemText => write!(f, "Item text is empty."),
            PredictionError::InvalidResponse => write!(
                f,
                "Request to poeprices.info failed. Received an empty or invalid response."
            ),
            PredictionError::RequestFailed { status: Some(code) } => {
                write!(f, "Request to poeprices.info failed (code {}).", code)
            }
            PredictionError::RequestFailed { status: None } => {
                write!(f, "Request to poeprices.info failed (no status code).")
            }
        }
    }
}

impl std::error::Error for PredictionError {}

impl From<&TransportError> for PredictionError {
    fn from(error: &TransportError) -> Self {
        PredictionError::RequestFailed {
            status: error.status().map(|s| s.as_u16()),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricePredictor: Send + Sync {
    async fn request_price_prediction(
        &self,
        item_text: &str,
        league: &str,
    ) -> Result<ClientResult, PredictionError>;
}

pub struct PricePredictionClient {
    http: HttpClient,
    api_url: String,
    retry_policy: RetryPolicy,
}

impl PricePredictionClient {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| API_URL.to_string());
        Self {
            http: HttpClient::new(client),
            api_url,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Sanitizes `item_text`, asks the service for a price and validates the answer.
    ///
    /// HTTP 403 is retried per the configured [`RetryPolicy`]; every other
    /// failure is returned after the first attempt.
    #[tracing::instrument(skip(self, item_text))]
    pub async fn request_price_prediction(
        &self,
        item_text: &str,
        league: &str,
    ) -> Result<ClientResult, PredictionError> {
        if item_text.trim().is_empty() {
            return Err(PredictionError::EmptyItemText);
        }

        let item_text = sanitize_item_text(item_text);
        let query = QueryParameters::new(&item_text, league, CLIENT_ID);
        debug!("Requesting price prediction in league {}", league);

        let body = match self
            .http
            .get_json_with_query(&self.api_url, &query.as_pairs(), &self.retry_policy)
            .await
        {
            Ok(body) => body,
            Err(e) => {
                let details = json!({
                    "status": e.status().map(|s| s.as_u16()),
                    "error": e.to_string(),
                });
                warn!(
                    "Request to poeprices.info failed.\n{}",
                    diagnostics(&query, &item_text, &details)
                );
                return Err(PredictionError::from(&e));
            }
        };

        let diagnostic_body = body.clone();
        match PredictionResponse::from_body(body) {
            Some(price) => Ok(ClientResult {
                encoded_item_text: query.encoded_item_text,
                price,
            }),
            None => {
                warn!(
                    "Request to poeprices.info failed. Received an empty or invalid response.\n{}",
                    diagnostics(&query, &item_text, &diagnostic_body)
                );
                Err(PredictionError::InvalidResponse)
            }
        }
    }
}

#[async_trait]
impl PricePredictor for PricePredictionClient {
    async fn request_price_prediction(
        &self,
        item_text: &str,
        league: &str,
    ) -> Result<ClientResult, PredictionError> {
        PricePredictionClient::request_price_prediction(self, item_text, league).await
    }
}

/// Request/response pair pretty-printed for the warning log.
fn diagnostics(query: &QueryParameters, item_text: &str, response: &Value) -> String {
    let record = json!({
        "request": { "parameters": query, "itemText": item_text },
        "response": response,
    });
    serde_json::to_string_pretty(&record).unwrap_or_else(|_| record.to_string())
}

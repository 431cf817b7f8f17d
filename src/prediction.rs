//! Wire types for the poeprices.info API and the response-shape validator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::item::encode_item_text;

/// Keys every usable prediction response carries.
pub const REQUIRED_KEYS: [&str; 5] = ["currency", "min", "max", "pred_explanation", "error"];

/// Query string sent to the pricing service.
///
/// Built once per logical request and reused verbatim for every retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    /// Base64 of the sanitized item text.
    #[serde(rename = "i")]
    pub encoded_item_text: String,
    #[serde(rename = "l")]
    pub league: String,
    #[serde(rename = "s")]
    pub client_id: String,
}

impl QueryParameters {
    pub fn new(sanitized_item_text: &str, league: &str, client_id: &str) -> Self {
        Self {
            encoded_item_text: encode_item_text(sanitized_item_text),
            league: league.to_string(),
            client_id: client_id.to_string(),
        }
    }

    /// Key/value pairs in wire order, ready for `RequestBuilder::query`.
    pub fn as_pairs(&self) -> [(&str, &str); 3] {
        [
            ("i", self.encoded_item_text.as_str()),
            ("l", self.league.as_str()),
            ("s", self.client_id.as_str()),
        ]
    }
}

/// A validated response from the pricing service.
///
/// The full JSON object is kept as-is; the service adds fields over time and
/// callers may want more than the required ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResponse(Map<String, Value>);

impl PredictionResponse {
    /// Accepts `body` only if it has every required key and a zero error code.
    pub fn from_body(body: Value) -> Option<Self> {
        if !is_usable(&body) {
            return None;
        }
        match body {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn currency(&self) -> Option<&str> {
        self.0.get("currency").and_then(Value::as_str)
    }

    pub fn min(&self) -> Option<f64> {
        self.0.get("min").and_then(Value::as_f64)
    }

    pub fn max(&self) -> Option<f64> {
        self.0.get("max").and_then(Value::as_f64)
    }

    pub fn pred_explanation(&self) -> Option<&Value> {
        self.0.get("pred_explanation")
    }

    pub fn error_code(&self) -> Option<i64> {
        self.0.get("error").and_then(Value::as_i64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// One-line rendering such as `5-10 chaos`.
    pub fn summary(&self) -> String {
        let bound = |key: &str| match self.0.get(key) {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => "?".to_string(),
        };
        format!(
            "{}-{} {}",
            bound("min"),
            bound("max"),
            self.currency().unwrap_or("?")
        )
    }
}

/// What a successful prediction call hands back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResult {
    /// The `i` parameter exactly as it was sent.
    pub encoded_item_text: String,
    pub price: PredictionResponse,
}

/// True iff `candidate` has every key in `keys`, whatever the values are.
pub fn contains_keys(keys: &[&str], candidate: &Map<String, Value>) -> bool {
    keys.iter().all(|key| candidate.contains_key(*key))
}

/// True iff `response` is an object carrying all of [`REQUIRED_KEYS`].
pub fn has_all_keys(response: &Value) -> bool {
    response
        .as_object()
        .is_some_and(|map| contains_keys(&REQUIRED_KEYS, map))
}

/// Full success check: shape is complete and `error` is numerically zero.
pub fn is_usable(response: &Value) -> bool {
    has_all_keys(response) && response.get("error").and_then(Value::as_f64) == Some(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body(error: Value) -> Value {
        json!({
            "currency": "chaos",
            "min": 5,
            "max": 10,
            "pred_explanation": [["(pseudo) +# total maximum Life", 0.6]],
            "error": error,
        })
    }

    #[test]
    fn test_has_all_keys_complete() {
        assert!(has_all_keys(&full_body(json!(0))));
    }

    #[test]
    fn test_has_all_keys_ignores_values() {
        assert!(has_all_keys(&full_body(json!(2))));
        assert!(has_all_keys(&json!({
            "currency": null,
            "min": null,
            "max": null,
            "pred_explanation": null,
            "error": null,
        })));
    }

    #[test]
    fn test_has_all_keys_missing_each_key() {
        for key in REQUIRED_KEYS {
            let mut body = full_body(json!(0));
            body.as_object_mut().unwrap().remove(key);
            assert!(!has_all_keys(&body), "missing {} should fail", key);
        }
    }

    #[test]
    fn test_has_all_keys_non_object() {
        assert!(!has_all_keys(&json!([])));
        assert!(!has_all_keys(&json!("")));
        assert!(!has_all_keys(&Value::Null));
    }

    #[test]
    fn test_contains_keys_custom_schema() {
        let map = json!({"a": 1, "b": null}).as_object().unwrap().clone();
        assert!(contains_keys(&["a", "b"], &map));
        assert!(!contains_keys(&["a", "c"], &map));
        assert!(contains_keys(&[], &map));
    }

    #[test]
    fn test_is_usable_requires_zero_error() {
        assert!(is_usable(&full_body(json!(0))));
        assert!(is_usable(&full_body(json!(0.0))));
        assert!(!is_usable(&full_body(json!(1))));
        assert!(!is_usable(&full_body(json!(-1))));
        assert!(!is_usable(&full_body(json!("0"))));
        assert!(!is_usable(&full_body(Value::Null)));
    }

    #[test]
    fn test_from_body_keeps_extra_fields() {
        let mut body = full_body(json!(0));
        body["warning_msg"] = json!("");
        let response = PredictionResponse::from_body(body).unwrap();
        assert_eq!(response.currency(), Some("chaos"));
        assert_eq!(response.min(), Some(5.0));
        assert_eq!(response.max(), Some(10.0));
        assert_eq!(response.error_code(), Some(0));
        assert!(response.pred_explanation().unwrap().is_array());
        assert_eq!(response.get("warning_msg"), Some(&json!("")));
    }

    #[test]
    fn test_from_body_rejects_unusable() {
        assert!(PredictionResponse::from_body(full_body(json!(3))).is_none());
        assert!(PredictionResponse::from_body(json!({"error": 0})).is_none());
    }

    #[test]
    fn test_summary() {
        let response = PredictionResponse::from_body(full_body(json!(0))).unwrap();
        assert_eq!(response.summary(), "5-10 chaos");

        let mut body = full_body(json!(0));
        body["min"] = json!(0.5);
        body["currency"] = json!("exalt");
        let response = PredictionResponse::from_body(body).unwrap();
        assert_eq!(response.summary(), "0.5-10 exalt");
    }

    #[test]
    fn test_query_parameters() {
        let query = QueryParameters::new("Tabula Rasa", "Standard", "xenontrade");
        assert_eq!(query.encoded_item_text, "VGFidWxhIFJhc2E=");
        assert_eq!(
            query.as_pairs(),
            [("i", "VGFidWxhIFJhc2E="), ("l", "Standard"), ("s", "xenontrade")]
        );
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"i": "VGFidWxhIFJhc2E=", "l": "Standard", "s": "xenontrade"})
        );
    }

    #[test]
    fn test_client_result_serializes_camel_case() {
        let result = ClientResult {
            encoded_item_text: "VGFidWxhIFJhc2E=".to_string(),
            price: PredictionResponse::from_body(full_body(json!(0))).unwrap(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["encodedItemText"], "VGFidWxhIFJhc2E=");
        assert_eq!(value["price"]["currency"], "chaos");
    }
}

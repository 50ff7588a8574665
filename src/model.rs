/// Core data types for the rainfall prediction client.
///
/// This module defines the shared domain model imported by all other modules:
/// the outgoing payload, the backend's prediction record, and the error type
/// every submission failure is funnelled into. It contains no I/O.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Endpoint and messages
// ---------------------------------------------------------------------------

/// Default prediction endpoint of the local backend.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// Shown when a failure carries no message of its own.
pub const GENERIC_CONNECT_ERROR: &str = "Could not connect to the prediction server.";

/// Verdict value the backend uses for "rain expected".
pub const VERDICT_RAIN: &str = "Yes";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of the POST request: one numeric value per feature name.
///
/// Always built from the full Feature Set, so it carries exactly those keys.
/// Key order is not meaningful to the backend.
pub type Payload = BTreeMap<String, f64>;

/// Prediction record returned by the backend on success.
///
/// Stored as received, without type checks. Missing or null text fields
/// become empty strings and other JSON values keep their text form; the
/// renderer copes with whatever arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// "Yes" or "No".
    #[serde(default, deserialize_with = "lenient_text")]
    pub will_rain: String,
    /// Percentage string, e.g. "62.20%".
    #[serde(default, deserialize_with = "lenient_text")]
    pub probability_of_rain: String,
    /// Raw class label (1 = rain), when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<serde_json::Value>,
    /// Any fields this client does not know about.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads any JSON value as text: null is empty, strings are kept as-is.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}

impl PredictionResult {
    pub fn is_rain(&self) -> bool {
        self.will_rain == VERDICT_RAIN
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can end a prediction submission.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The request could not be sent or no response arrived. The message is
    /// transport detail for the log; users get the generic message.
    Network(String),
    /// Non-2xx response. `message` is the backend's `error` field when it
    /// sent one, otherwise derived from the status code.
    Backend { status: u16, message: String },
    /// A response body could not be decoded as JSON.
    ParseError(String),
}

impl PredictError {
    /// Builds the failure for a non-2xx status, preferring the backend's message.
    pub fn backend(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("HTTP Error: {}", status));
        PredictError::Backend { status, message }
    }

    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        let message = match self {
            PredictError::Network(_) => return GENERIC_CONNECT_ERROR.to_string(),
            PredictError::Backend { message, .. } => message,
            PredictError::ParseError(msg) => msg,
        };
        if message.trim().is_empty() {
            GENERIC_CONNECT_ERROR.to_string()
        } else {
            message.clone()
        }
    }
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::Network(msg) => write!(f, "Request failed: {}", msg),
            PredictError::Backend { message, .. } => write!(f, "{}", message),
            PredictError::ParseError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PredictError {}

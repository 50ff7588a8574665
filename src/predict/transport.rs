/// Prediction endpoint client.
///
/// Sends the feature payload to the prediction backend and turns whatever
/// comes back into either a `PredictionResult` or a `PredictError`.
///
/// Backend contract:
///   POST <endpoint>   Content-Type: application/json
///   200  {"will_rain": "Yes", "probability_of_rain": "62.20%", "prediction": 1}
///   4xx/5xx  {"error": "...", "details": "..."}   (body optional)

use crate::model::{Payload, PredictError, PredictionResult};

// ============================================================================
// Transport seam
// ============================================================================

/// Status and body of an HTTP reply, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can deliver a JSON body to the prediction endpoint.
///
/// Returns `Err(PredictError::Network)` only when no reply was received;
/// any HTTP status, including errors, comes back as a `RawReply`.
pub trait Transport: Send + Sync {
    fn post_json(&self, body: &str) -> Result<RawReply, PredictError>;
}

// ============================================================================
// HTTP transport
// ============================================================================

/// Blocking HTTP transport backed by `reqwest`.
///
/// No request timeout is configured: a backend that never answers keeps
/// the submission in flight. System proxies are bypassed since the
/// backend runs next to the client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, PredictError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .no_proxy()
            .build()
            .map_err(|e| PredictError::Network(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, body: &str) -> Result<RawReply, PredictError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| PredictError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| PredictError::Network(format!("reading response body: {}", e)))?;

        Ok(RawReply { status, body })
    }
}

// ============================================================================
// Reply interpretation
// ============================================================================

/// Interprets a reply from the prediction endpoint.
///
/// Non-2xx: the body must be JSON; its `error` string becomes the message,
/// else "HTTP Error: <status>". A body that is not JSON fails with the
/// decoder's message. 2xx: the body is decoded as the prediction record.
pub fn interpret_reply(reply: &RawReply) -> Result<PredictionResult, PredictError> {
    if !reply.is_success() {
        let value: serde_json::Value = serde_json::from_str(&reply.body)
            .map_err(|e| PredictError::ParseError(e.to_string()))?;

        let message = value
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|msg| !msg.is_empty())
            .map(String::from);

        return Err(PredictError::backend(reply.status, message));
    }

    serde_json::from_str(&reply.body).map_err(|e| PredictError::ParseError(e.to_string()))
}

/// Encodes the payload, sends it, and interprets the reply.
pub fn request_prediction(
    transport: &dyn Transport,
    payload: &Payload,
) -> Result<PredictionResult, PredictError> {
    let body = serde_json::to_string(payload)
        .map_err(|e| PredictError::ParseError(format!("encoding payload: {}", e)))?;

    let reply = transport.post_json(&body)?;
    interpret_reply(&reply)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays a canned reply and remembers the body it was given.
    struct CannedTransport {
        reply: Result<RawReply, PredictError>,
        sent: Mutex<Vec<String>>,
    }

    impl Transport for CannedTransport {
        fn post_json(&self, body: &str) -> Result<RawReply, PredictError> {
            self.sent.lock().expect("lock").push(body.to_string());
            self.reply.clone()
        }
    }

    #[test]
    fn test_error_field_becomes_message() {
        let reply = RawReply::new(500, r#"{"error": "model unavailable"}"#);
        let err = interpret_reply(&reply).expect_err("500 is a failure");
        assert_eq!(err.user_message(), "model unavailable");
        assert_eq!(
            err,
            PredictError::Backend {
                status: 500,
                message: "model unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_missing_error_field_uses_status() {
        let reply = RawReply::new(503, "{}");
        let err = interpret_reply(&reply).expect_err("503 is a failure");
        assert_eq!(err.user_message(), "HTTP Error: 503");
    }

    #[test]
    fn test_empty_error_field_uses_status() {
        let reply = RawReply::new(400, r#"{"error": "", "details": "bad row"}"#);
        let err = interpret_reply(&reply).expect_err("400 is a failure");
        assert_eq!(err.user_message(), "HTTP Error: 400");
    }

    #[test]
    fn test_non_json_error_body_is_parse_error() {
        let reply = RawReply::new(404, "<html>Not Found</html>");
        let err = interpret_reply(&reply).expect_err("404 is a failure");
        assert!(matches!(err, PredictError::ParseError(_)), "got {:?}", err);
    }

    #[test]
    fn test_success_body_is_decoded() {
        let reply = RawReply::new(
            200,
            r#"{"will_rain": "Yes", "probability_of_rain": "80.00%", "prediction": 1}"#,
        );
        let result = interpret_reply(&reply).expect("200 is a success");
        assert_eq!(result.will_rain, "Yes");
        assert_eq!(result.probability_of_rain, "80.00%");
        assert_eq!(result.prediction, Some(serde_json::json!(1)));
    }

    #[test]
    fn test_wrong_typed_success_fields_reach_the_renderer() {
        let reply = RawReply::new(
            200,
            r#"{"will_rain": "Yes", "probability_of_rain": 62.2, "prediction": 1}"#,
        );
        let result = interpret_reply(&reply).expect("field types are not validated");
        assert_eq!(result.probability_of_rain, "62.2");
        assert!(result.is_rain());

        let gauge = crate::render::Gauge::from_probability(&result.probability_of_rain);
        assert!((gauge.angle_deg - 111.96).abs() < 1e-9, "got {}", gauge.angle_deg);

        let reply = RawReply::new(200, r#"{"will_rain": null, "probability_of_rain": true}"#);
        let result = interpret_reply(&reply).expect("field types are not validated");
        assert_eq!(result.will_rain, "");
        assert!(!result.is_rain());
        assert!(crate::render::Gauge::from_probability(&result.probability_of_rain)
            .angle_deg
            .is_nan());
    }

    #[test]
    fn test_malformed_success_body_is_parse_error() {
        let reply = RawReply::new(200, "not json");
        assert!(matches!(
            interpret_reply(&reply),
            Err(PredictError::ParseError(_))
        ));
    }

    #[test]
    fn test_request_sends_json_payload() {
        let transport = CannedTransport {
            reply: Ok(RawReply::new(
                200,
                r#"{"will_rain": "No", "probability_of_rain": "10.00%"}"#,
            )),
            sent: Mutex::new(Vec::new()),
        };
        let mut payload = Payload::new();
        payload.insert("humidity".to_string(), 71.5);
        payload.insert("cloud".to_string(), 0.0);

        let result = request_prediction(&transport, &payload).expect("success");
        assert_eq!(result.will_rain, "No");

        let sent = transport.sent.lock().expect("lock");
        assert_eq!(sent.len(), 1);
        let decoded: serde_json::Value = serde_json::from_str(&sent[0]).expect("json body");
        assert_eq!(decoded, serde_json::json!({"humidity": 71.5, "cloud": 0.0}));
    }

    #[test]
    fn test_network_failure_is_passed_through() {
        let transport = CannedTransport {
            reply: Err(PredictError::Network("connection refused".to_string())),
            sent: Mutex::new(Vec::new()),
        };
        let err = request_prediction(&transport, &Payload::new()).expect_err("no reply");
        assert_eq!(err, PredictError::Network("connection refused".to_string()));
    }

    #[test]
    fn test_http_transport_keeps_configured_endpoint() {
        let transport =
            HttpTransport::new("http://127.0.0.1:5000/predict").expect("client builds");
        assert_eq!(transport.endpoint(), "http://127.0.0.1:5000/predict");
    }
}

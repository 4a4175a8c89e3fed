// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Build notification payload model and decoding.

use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;

/// Pub/Sub push envelope delivered to the HTTP endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PushEnvelope {
    pub message: Option<PushMessage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Base64-encoded JSON build notification
    pub data: Option<String>,
    pub message_id: Option<String>,
    pub publish_time: Option<String>,
}

/// Decoded Cloud Build completion notification
#[derive(Debug, Clone, Deserialize)]
pub struct BuildNotification {
    pub status: Option<String>,
    pub results: Option<BuildResults>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildResults {
    pub images: Option<Vec<BuiltImage>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuiltImage {
    pub name: String,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a base64-encoded UTF-8 JSON build notification
pub fn decode_notification(data: &str) -> std::result::Result<BuildNotification, DecodeError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(data)?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &serde_json::Value) -> String {
        base64::engine::general_purpose::STANDARD.encode(value.to_string())
    }

    #[test]
    fn test_decode_successful_notification() {
        let data = encode(&serde_json::json!({
            "status": "SUCCESS",
            "results": { "images": [ { "name": "gcr.io/proj/app:v2" } ] }
        }));

        let notification = decode_notification(&data).unwrap();

        assert_eq!(notification.status.as_deref(), Some("SUCCESS"));
        let images = notification.results.unwrap().images.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].name, "gcr.io/proj/app:v2");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let data = encode(&serde_json::json!({
            "status": "FAILURE",
            "id": "b1234",
            "logUrl": "https://console.cloud.google.com/build/b1234"
        }));

        let notification = decode_notification(&data).unwrap();

        assert_eq!(notification.status.as_deref(), Some("FAILURE"));
        assert!(notification.results.is_none());
    }

    #[test]
    fn test_decode_missing_status() {
        let data = encode(&serde_json::json!({ "results": { "images": [] } }));

        let notification = decode_notification(&data).unwrap();

        assert!(notification.status.is_none());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let result = decode_notification("%%%not-base64%%%");
        assert!(matches!(result, Err(DecodeError::Base64(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let data = base64::engine::general_purpose::STANDARD.encode("not json at all");
        let result = decode_notification(&data);
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let data = base64::engine::general_purpose::STANDARD.encode([0xff, 0xfe, 0x7b]);
        let result = decode_notification(&data);
        assert!(matches!(result, Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn test_push_envelope_deserializes_pubsub_shape() {
        let envelope: PushEnvelope = serde_json::from_value(serde_json::json!({
            "message": {
                "data": "eyJzdGF0dXMiOiJTVUNDRVNTIn0=",
                "messageId": "12345",
                "publishTime": "2026-01-01T00:00:00Z"
            },
            "subscription": "projects/p/subscriptions/s"
        }))
        .unwrap();

        let message = envelope.message.unwrap();
        assert_eq!(message.message_id.as_deref(), Some("12345"));
        assert!(message.data.is_some());
    }
}

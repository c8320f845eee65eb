mod common;

use std::net::TcpListener;

use common::{CannedServer, EDITED_PAYLOAD};
use lookstudio_core::capability::gemini::{parse_error_response, parse_response};
use lookstudio_core::capability::{EditCapability, GeminiClient};
use lookstudio_core::config::ServiceConfig;
use lookstudio_core::error::CapabilityError;
use serde_json::json;

// ---------------------------------------------------------------------------
// Successful responses
// ---------------------------------------------------------------------------

#[test]
fn test_parse_image_part() {
    let body = json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "text": "Here is your edited image." },
                    { "inlineData": { "mimeType": "image/png", "data": "ZWRpdGVk" } }
                ]
            },
            "finishReason": "STOP"
        }]
    });

    let edited = parse_response(&body.to_string()).unwrap();
    assert_eq!(edited.data, "ZWRpdGVk");
    assert_eq!(edited.mime_type.as_deref(), Some("image/png"));
    assert_eq!(edited.text.as_deref(), Some("Here is your edited image."));
}

#[test]
fn test_parse_snake_case_inline_data() {
    let body = json!({
        "candidates": [{
            "content": { "parts": [{ "inline_data": { "mime_type": "image/jpeg", "data": "QUJD" } }] }
        }]
    });

    let edited = parse_response(&body.to_string()).unwrap();
    assert_eq!(edited.mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(edited.text, None);
}

#[test]
fn test_parse_image_without_mime_type() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "QUJD" } }] } }]
    });
    assert_eq!(parse_response(&body.to_string()).unwrap().mime_type, None);
}

#[test]
fn test_parse_skips_empty_inline_data() {
    let body = json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "" } },
                    { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                ]
            }
        }]
    });
    assert_eq!(parse_response(&body.to_string()).unwrap().data, "QUJD");
}

// ---------------------------------------------------------------------------
// Responses without an image
// ---------------------------------------------------------------------------

#[test]
fn test_text_only_response_is_no_image() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": "I can't edit that photo." }] } }]
    });
    assert_eq!(
        parse_response(&body.to_string()),
        Err(CapabilityError::NoImage("I can't edit that photo.".into()))
    );
}

#[test]
fn test_empty_candidates_is_no_image() {
    let err = parse_response("{}").unwrap_err();
    assert_eq!(
        err,
        CapabilityError::NoImage("no image data in the response".into())
    );
}

#[test]
fn test_prompt_block_reason() {
    let body = json!({
        "promptFeedback": { "blockReason": "SAFETY", "blockReasonMessage": "unsafe content" }
    });
    assert_eq!(
        parse_response(&body.to_string()),
        Err(CapabilityError::Blocked("SAFETY (unsafe content)".into()))
    );
}

#[test]
fn test_blocking_finish_reason() {
    let body = json!({
        "candidates": [{ "content": { "parts": [] }, "finishReason": "IMAGE_SAFETY" }]
    });
    let err = parse_response(&body.to_string()).unwrap_err();
    assert_eq!(err, CapabilityError::Blocked("finish reason IMAGE_SAFETY".into()));
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_invalid_json_is_malformed() {
    assert!(matches!(
        parse_response("<html>bad gateway</html>"),
        Err(CapabilityError::MalformedResponse(_))
    ));
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

#[test]
fn test_error_envelope_message() {
    let body = json!({
        "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
    });
    let err = parse_error_response(400, &body.to_string());
    assert_eq!(
        err,
        CapabilityError::Api {
            status: 400,
            message: "API key not valid.".into()
        }
    );
    assert_eq!(err.to_string(), "Gemini API error (400): API key not valid.");
}

#[test]
fn test_error_envelope_without_message_uses_status() {
    let body = json!({ "error": { "status": "RESOURCE_EXHAUSTED" } });
    assert_eq!(
        parse_error_response(429, &body.to_string()),
        CapabilityError::Api {
            status: 429,
            message: "RESOURCE_EXHAUSTED".into()
        }
    );
}

#[test]
fn test_non_json_error_body() {
    assert_eq!(
        parse_error_response(502, "  Bad Gateway \n"),
        CapabilityError::Api {
            status: 502,
            message: "Bad Gateway".into()
        }
    );
    assert_eq!(
        parse_error_response(503, ""),
        CapabilityError::Api {
            status: 503,
            message: "HTTP 503".into()
        }
    );
}

// ---------------------------------------------------------------------------
// Client construction
// ---------------------------------------------------------------------------

#[test]
fn test_client_with_configured_key() {
    let config = ServiceConfig {
        api_key: Some("test-key".into()),
        model: "gemini-test".into(),
        ..ServiceConfig::default()
    };
    let client = GeminiClient::new(&config).unwrap();
    assert_eq!(client.model(), "gemini-test");
    assert!(!format!("{client:?}").contains("test-key"));
}

// ---------------------------------------------------------------------------
// HTTP round trip against a loopback server
// ---------------------------------------------------------------------------

fn client_for(endpoint: &str) -> GeminiClient {
    let config = ServiceConfig {
        endpoint: endpoint.to_string(),
        model: "gemini-test".into(),
        api_key: Some("test-key".into()),
        timeout_secs: 10,
        ..ServiceConfig::default()
    };
    GeminiClient::new(&config).unwrap()
}

#[test]
fn test_edit_posts_to_generate_content_with_key_header() {
    let body = json!({
        "candidates": [{
            "content": {
                "parts": [{ "inlineData": { "mimeType": "image/png", "data": EDITED_PAYLOAD } }]
            }
        }]
    });
    let server = CannedServer::start("200 OK", body.to_string());
    let client = client_for(&server.base_url);

    let edited = client.edit("QUJD", "image/jpeg", "make it blue").unwrap();
    assert_eq!(edited.data, EDITED_PAYLOAD);
    assert_eq!(edited.mime_type.as_deref(), Some("image/png"));

    let request = server.request();
    let lowered = request.to_ascii_lowercase();
    assert!(lowered.starts_with("post /v1beta/models/gemini-test:generatecontent http/1.1"));
    assert!(lowered.contains("x-goog-api-key: test-key"));
    assert!(request.contains("\"inlineData\""));
    assert!(request.contains("\"QUJD\""));
    assert!(request.contains("\"make it blue\""));
}

#[test]
fn test_edit_maps_error_status_to_api_error() {
    let body = json!({
        "error": {
            "code": 429,
            "message": "Quota exceeded.",
            "status": "RESOURCE_EXHAUSTED"
        }
    });
    let server = CannedServer::start("429 Too Many Requests", body.to_string());
    let client = client_for(&server.base_url);

    let err = client.edit("QUJD", "image/jpeg", "make it blue").unwrap_err();
    assert_eq!(
        err,
        CapabilityError::Api {
            status: 429,
            message: "Quota exceeded.".into()
        }
    );
    server.request();
}

#[test]
fn test_edit_success_without_image_is_no_image() {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": "I can't edit that." }] } }]
    });
    let server = CannedServer::start("200 OK", body.to_string());
    let client = client_for(&server.base_url);

    let err = client.edit("QUJD", "image/jpeg", "make it blue").unwrap_err();
    assert!(matches!(err, CapabilityError::NoImage(_)));
    server.request();
}

#[test]
fn test_edit_unreachable_endpoint_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}/v1beta"));
    let err = client.edit("QUJD", "image/jpeg", "make it blue").unwrap_err();
    assert!(matches!(err, CapabilityError::Transport(_)));
}

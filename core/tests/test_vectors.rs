//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Parsed results are compared as JSON values;
//! the chat request body is compared byte for byte since its exact shape is
//! part of the wire contract.

use chat_core::{ApiError, ChatClient, ChatMessage, ClientConfig, HttpMethod, HttpResponse};

const BASE_URL: &str = "http://localhost:5000";

fn client() -> ChatClient {
    ChatClient::new(ClientConfig::new(BASE_URL))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(name: &str, value: &serde_json::Value) -> HttpMethod {
    match value.as_str() {
        Some("GET") => HttpMethod::Get,
        Some("POST") => HttpMethod::Post,
        other => panic!("{name}: unknown method {other:?}"),
    }
}

fn parse_headers(name: &str, value: &serde_json::Value) -> Vec<(String, String)> {
    let headers = value
        .as_array()
        .unwrap_or_else(|| panic!("{name}: headers must be an array"));
    headers
        .iter()
        .map(|h| match h.as_array().map(Vec::as_slice) {
            Some([key, value]) => match (key.as_str(), value.as_str()) {
                (Some(key), Some(value)) => (key.to_string(), value.to_string()),
                _ => panic!("{name}: header entries must be strings, got {h}"),
            },
            _ => panic!("{name}: header must be a [name, value] pair, got {h}"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Send chat message
// ---------------------------------------------------------------------------

#[test]
fn send_chat_message_test_vectors() {
    let raw = include_str!("../../test-vectors/send_chat_message.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: ChatMessage = serde_json::from_value(case["input"].clone())
            .unwrap_or_else(|e| panic!("{name}: bad input: {e}"));
        let expected_req = &case["expected_request"];

        let req = c.build_send_chat_message(&input).unwrap();
        assert_eq!(req.method, parse_method(name, &expected_req["method"]), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap_or_default()), "{name}: path");
        assert_eq!(req.headers, parse_headers(name, &expected_req["headers"]), "{name}: headers");

        let body = req.body.unwrap_or_else(|| panic!("{name}: request has no body"));
        let body = String::from_utf8(body).unwrap_or_else(|e| panic!("{name}: body is not UTF-8: {e}"));
        assert_eq!(Some(body.as_str()), expected_req["body"].as_str(), "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["response"]["status"]
                .as_u64()
                .unwrap_or_else(|| panic!("{name}: missing response status")) as u16,
            headers: Vec::new(),
            body: case["response"]["body"].as_str().unwrap_or_default().to_string(),
        };

        let result = match case["operation"].as_str().unwrap_or_default() {
            "create_new_chat" => c.parse_create_new_chat(response),
            "send_chat_message" => c.parse_send_chat_message(response),
            "get_tables" => c.parse_get_tables(response),
            other => panic!("{name}: unknown operation {other:?}"),
        };

        let expected = &case["expected"];
        if let Some(ok) = expected.get("ok") {
            let value = result.unwrap_or_else(|e| panic!("{name}: expected a value, got {e:?}"));
            assert_eq!(&value, ok, "{name}: value");
        } else if let Some(message) = expected.get("error") {
            let err = result.expect_err(name);
            assert!(matches!(err, ApiError::RequestFailed(_)), "{name}: {err:?}");
            assert_eq!(Some(err.to_string().as_str()), message.as_str(), "{name}: message");
        } else {
            let err = result.expect_err(name);
            assert!(matches!(err, ApiError::Deserialization(_)), "{name}: {err:?}");
        }
    }
}

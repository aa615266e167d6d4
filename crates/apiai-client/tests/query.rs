//! Integration tests for the query API against a mock server.

use apiai_client::{ApiAiClient, Error, QueryRequest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiAiClient {
    ApiAiClient::builder()
        .access_token("test-token")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn query_response_body() -> serde_json::Value {
    json!({
        "id": "b340a1f7-abee-4e13-9bdd-5e8938a48b7d",
        "timestamp": "2016-09-14T14:10:07.64Z",
        "lang": "en",
        "result": {
            "source": "agent",
            "resolvedQuery": "turn on the lights",
            "action": "lights.on",
            "actionIncomplete": false,
            "parameters": { "room": "kitchen" },
            "contexts": [],
            "metadata": { "intentId": "abc", "intentName": "lights", "webhookUsed": "false" },
            "fulfillment": { "speech": "Turning on the lights.", "messages": [] },
            "score": 0.95
        },
        "status": { "code": 200, "errorType": "success" },
        "sessionId": "session-1"
    })
}

#[tokio::test]
async fn text_query_sends_token_version_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(query_param("v", "20150910"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "query": ["turn on the lights"],
            "sessionId": "session-1",
            "lang": "en"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_response_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .query()
        .text_message("turn on the lights", "session-1")
        .await
        .unwrap();

    assert!(response.status.is_success());
    assert_eq!(response.result.action, "lights.on");
    assert_eq!(response.result.params["room"], "kitchen");
    assert_eq!(response.result.fulfillment.speech, "Turning on the lights.");
}

#[tokio::test]
async fn voice_query_uploads_wav_file() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(query_param("v", "20150910"))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_response_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let wav_path = dir.path().join("hello.wav");
    std::fs::write(&wav_path, b"RIFF....WAVEfmt ").unwrap();

    let client = client_for(&server);
    let request = QueryRequest::default().with_session("session-1");
    let response = client.query().voice(request, &wav_path).await.unwrap();

    assert_eq!(response.result.resolved_query, "turn on the lights");
}

#[tokio::test]
async fn voice_query_with_missing_file_fails_before_sending() {
    let server = MockServer::start().await;
    // No mocks mounted: any request reaching the server would 404.

    let client = client_for(&server);
    let request = QueryRequest::default().with_session("session-1");
    let err = client
        .query()
        .voice(request, "/nonexistent/voice.wav")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": {
                "code": 401,
                "errorType": "unauthorized",
                "errorDetails": "Authentication parameters missing"
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query()
        .text_message("hello", "session-1")
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(
        err.to_string(),
        "Authentication failed: Authentication parameters missing"
    );
}

#[tokio::test]
async fn malformed_success_body_maps_to_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query()
        .text_message("hello", "session-1")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn unparseable_error_body_still_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .query()
        .text_message("hello", "session-1")
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "HTTP 500");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tabwatch_protocols::{CollaboratorError, ScreenshotAnalyzer, StockResearcher};

use super::{RemoteCollaborators, ResearchConfig};

fn client_for(server: &MockServer) -> RemoteCollaborators {
    RemoteCollaborators::new(&ResearchConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn research_url_posts_url_and_returns_analysis() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stock-research"))
        .and(body_json(json!({ "url": "https://www.nvidia.com/" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analysis": "Stock Ticker Symbol: NVDA"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let analysis = client.research_url("https://www.nvidia.com/").await.unwrap();
    assert_eq!(analysis, "Stock Ticker Symbol: NVDA");
}

#[tokio::test]
async fn analyze_screenshot_posts_data_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-screenshot"))
        .and(body_json(json!({ "screenshot": "data:image/png;base64,AAA" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analysis": "A dashboard with stock charts"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let analysis = client
        .analyze_screenshot("data:image/png;base64,AAA")
        .await
        .unwrap();
    assert_eq!(analysis, "A dashboard with stock charts");
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stock-research"))
        .respond_with(ResponseTemplate::new(500).set_body_string("analysis backend down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.research_url("https://example.com/").await {
        Err(CollaboratorError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "analysis backend down");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn missing_analysis_field_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stock-research"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.research_url("https://example.com/").await,
        Err(CollaboratorError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-screenshot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.analyze_screenshot("data:image/png;base64,AAA").await,
        Err(CollaboratorError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = RemoteCollaborators::new(&ResearchConfig {
        // Reserved port with nothing listening.
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 1,
    })
    .unwrap();

    assert!(matches!(
        client.research_url("https://example.com/").await,
        Err(CollaboratorError::Network(_))
    ));
}

#[tokio::test]
async fn empty_inputs_are_rejected_without_a_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    assert!(matches!(
        client.research_url("").await,
        Err(CollaboratorError::InvalidInput(_))
    ));
    assert!(matches!(
        client.analyze_screenshot("").await,
        Err(CollaboratorError::InvalidInput(_))
    ));
}

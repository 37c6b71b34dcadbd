//! Integration tests for the liveness probe and published rules.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_up() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], json!("UP"));
    assert!(response.body.get("timestamp").is_some());
}

#[tokio::test]
async fn test_validation_rules_published() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/documents/validation/rules", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));

    let rules = &response.body["data"];
    let types = rules["supported_types"]
        .as_array()
        .expect("supported_types array");
    assert!(types.iter().any(|t| t == "application/pdf"));
    assert_eq!(rules["min_size_bytes"], json!(1024));

    let keys = rules["metadata_keys"].as_array().expect("metadata_keys");
    assert!(keys.iter().any(|k| k == "author"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/nonexistent", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

//! Integration tests for document input validation at the API boundary.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TestApp, multipart_file_field, multipart_text_field};

const BOUNDARY: &str = "loresmith-test-boundary";

#[tokio::test]
async fn test_get_document_invalid_id_is_client_error() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/documents/not-a-uuid", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_with_no_fields_rejected() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let response = app
        .request("PATCH", &format!("/api/documents/{id}"), Some(json!({})))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], json!(false));
    assert_eq!(response.body["error"]["code"], json!("VALIDATION_ERROR"));
    assert_eq!(response.body["error"]["status_code"], json!(400));
}

#[tokio::test]
async fn test_update_with_invalid_status_rejected() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let response = app
        .request(
            "PATCH",
            &format!("/api/documents/{id}"),
            Some(json!({"status": "archived"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["error"]["message"].as_str().unwrap();
    assert!(message.contains("archived"));
}

#[tokio::test]
async fn test_batch_delete_requires_ids() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/documents/batch/delete",
            Some(json!({"ids": []})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_batch_favorite_requires_ids() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/documents/batch/favorite",
            Some(json!({"ids": [], "is_favorite": true})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_without_file_rejected() {
    let app = TestApp::new().await;
    let body = multipart_text_field(BOUNDARY, "category", "guides");

    let response = app
        .request_multipart("POST", "/api/documents", BOUNDARY, body)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["error"]["message"].as_str().unwrap();
    assert!(message.contains("file"));
}

#[tokio::test]
async fn test_upload_too_small_rejected() {
    let app = TestApp::new().await;
    // Content far below the 1 KiB minimum fails validation before any
    // record is created.
    let body = multipart_file_field(BOUNDARY, "tiny.txt", "text/plain", "too small");

    let response = app
        .request_multipart("POST", "/api/documents", BOUNDARY, body)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["error"]["message"].as_str().unwrap();
    assert!(message.contains("too small"));
}

#[tokio::test]
async fn test_upload_unsupported_type_rejected() {
    let app = TestApp::new().await;
    let content = "x".repeat(2048);
    let body = multipart_file_field(BOUNDARY, "binary.exe", "application/x-msdownload", &content);

    let response = app
        .request_multipart("POST", "/api/documents", BOUNDARY, body)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["error"]["message"].as_str().unwrap();
    assert!(message.contains("Unsupported"));
}

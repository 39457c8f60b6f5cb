mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use legalease::http::router;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "legalease-test-boundary";

fn multipart_upload(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn query_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Arc<legalease::LegalEase>, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router(app.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_on_empty_store() {
    let dir = TempDir::new().unwrap();
    let app = Arc::new(setup(&dir));

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["index_size"], 0);
    assert_eq!(body["chunks_stored"], 0);
}

#[tokio::test]
async fn test_query_before_upload() {
    let dir = TempDir::new().unwrap();
    let app = Arc::new(setup(&dir));

    let (status, body) = send(&app, query_request(serde_json::json!({ "messages": ["hi"] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "No documents indexed yet. Upload a file first.");
}

#[tokio::test]
async fn test_upload_then_query() {
    let dir = TempDir::new().unwrap();
    let app = Arc::new(setup(&dir));

    let text = "a".repeat(1120);
    let (status, body) = send(&app, multipart_upload("file", "lease.pdf", text.as_bytes())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["chunks_added"], 3);
    assert_eq!(body["index_size"], 3);
    assert_eq!(body["persisted"], true);
    assert!(dir.path().join("docs").join("lease.pdf").exists());

    let (status, body) = send(
        &app,
        query_request(serde_json::json!({ "messages": ["aaaa"], "top_k": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"], serde_json::json!(["aaaa"]));
    assert_eq!(body["context_used"].as_array().unwrap().len(), 2);
    assert_eq!(body["reply"], "stub answer");
}

#[tokio::test]
async fn test_non_pdf_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = Arc::new(setup(&dir));

    let (status, body) = send(&app, multipart_upload("file", "notes.txt", b"some text")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Only PDF uploads are supported");
    assert!(!dir.path().join("docs").join("notes.txt").exists());
    assert_eq!(app.health().await.index_size, 0);
}

#[tokio::test]
async fn test_pdf_without_text_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = Arc::new(setup(&dir));

    let (status, body) = send(&app, multipart_upload("file", "scan.pdf", b"   \n  ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("scan.pdf"));
    assert_eq!(app.health().await.index_size, 0);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let dir = TempDir::new().unwrap();
    let app = Arc::new(setup(&dir));

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );
    let req = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing file field");
}

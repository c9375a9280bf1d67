//! Router-level tests: requests go through the full axum stack via `oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use crate::router::build_router;
use crate::state::AppState;

const BOUNDARY: &str = "doctext-test-boundary";

struct Harness {
    app: axum::Router,
    temp: tempfile::TempDir,
}

fn harness() -> Harness {
    let temp = tempfile::tempdir().unwrap();
    let state = Arc::new(AppState {
        extractor: Arc::new(doctext_ingest::default_extractor(Some(
            temp.path().to_path_buf(),
        ))),
    });
    Harness {
        app: build_router(state, 1024 * 1024),
        temp,
    }
}

fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload(uri: &str, field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, filename, data)))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn temp_is_empty(h: &Harness) -> bool {
    std::fs::read_dir(h.temp.path()).unwrap().next().is_none()
}

#[tokio::test]
async fn index_page_restricts_picker_to_accepted_types() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("File Text Extractor"));
    assert!(html.contains(r#"accept=".pdf,.docx,.txt""#));
    assert!(html.contains("Please upload a file to continue."));
    assert!(!html.contains("{{ accept }}"));
}

#[tokio::test]
async fn health_is_ok() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
}

#[tokio::test]
async fn extract_notes_txt() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/extract", "file", "notes.txt", b"hello\nworld"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["text"], "hello\nworld");
    assert_eq!(json["filename"], "notes_TextLoader.txt");
    assert_eq!(json["mime"], "text/plain");
    assert_eq!(json["strategy"], "text");
    assert_eq!(json["segments"], 1);
    assert_eq!(json["notices"], serde_json::json!([]));
    assert!(temp_is_empty(&h));
}

#[tokio::test]
async fn fallback_notice_is_reported() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/extract", "file", "dump.txt", b"a\0b"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["text"], "a\u{0}b");
    let notice = json["notices"][0].as_str().unwrap();
    assert!(notice.starts_with("TextLoader encountered an issue:"), "{notice}");
}

#[tokio::test]
async fn csv_is_unsupported_media_type() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/extract", "file", "data.csv", b"a,b\n1,2\n"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let json = body_json(response).await;
    assert_eq!(json["error"], "unsupported file format: .csv");
    assert!(json.get("filename").is_none());
    assert!(temp_is_empty(&h));
}

#[tokio::test]
async fn empty_upload_is_bad_request() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/extract", "file", "notes.txt", b""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_file_field_is_bad_request() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/extract", "attachment", "notes.txt", b"hi"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No file uploaded");
}

#[tokio::test]
async fn corrupt_document_is_unprocessable() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/extract", "file", "letter.docx", b"not a zip archive"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("error processing file:"), "{error}");
    assert!(temp_is_empty(&h));
}

#[tokio::test]
async fn download_returns_plain_text_attachment() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/download", "file", "notes.txt", b"hello\nworld"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"notes_TextLoader.txt\""));
    assert_eq!(body_bytes(response).await, b"hello\nworld");
}

#[tokio::test]
async fn download_of_unsupported_file_has_no_attachment() {
    let h = harness();
    let response = h
        .app
        .clone()
        .oneshot(upload("/download", "file", "data.csv", b"a,b"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let h = harness();
    let big = vec![b'a'; 2 * 1024 * 1024];
    let response = h
        .app
        .clone()
        .oneshot(upload("/extract", "file", "big.txt", &big))
        .await
        .unwrap();
    assert!(
        response.status() == StatusCode::PAYLOAD_TOO_LARGE
            || response.status() == StatusCode::BAD_REQUEST,
        "unexpected status {}",
        response.status()
    );
    assert!(temp_is_empty(&h));
}

//! Integration tests for upload, download, listing, search and deletion.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn test_upload_download_round_trip() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    let upload = app.upload(&token, "blob.bin", &data, None).await;
    assert_eq!(upload.status, StatusCode::OK);
    assert_eq!(upload.body["filename"], "blob.bin");
    assert_eq!(upload.body["version_number"], 1);

    let download = app.download(&token, upload.uuid("file_id"), None).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.bytes.as_ref(), data.as_slice());
    assert_eq!(download.header("content-type"), "application/octet-stream");
    assert_eq!(
        download.header("content-disposition"),
        "attachment; filename=\"blob.bin\""
    );
    assert_eq!(download.header("content-length"), "4096");
    assert_eq!(download.header("x-file-version"), "1");
}

#[tokio::test]
async fn test_empty_file_round_trip() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let (file_id, version) = app.upload_ok(&token, "empty.txt", b"").await;
    assert_eq!(version, 1);

    let download = app.download(&token, file_id, None).await;
    assert_eq!(download.status, StatusCode::OK);
    assert!(download.bytes.is_empty());
    assert_eq!(download.header("content-type"), "text/plain");
}

#[tokio::test]
async fn test_upload_rejects_bad_input() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let bad_base64 = app
        .request(
            "POST",
            "/files/upload",
            Some(json!({ "file_name": "a.txt", "file": "***not base64***" })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_base64.status, StatusCode::BAD_REQUEST);

    let empty_name = app.upload(&token, "", b"hi", None).await;
    assert_eq!(empty_name.status, StatusCode::BAD_REQUEST);

    let missing_field = app
        .request(
            "POST",
            "/files/upload",
            Some(json!({ "file_name": "a.txt" })),
            Some(&token),
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_base64_whitespace_is_trimmed() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/files/upload",
            Some(json!({ "file_name": "a.txt", "file": "  aGk=\n" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let download = app.download(&token, response.uuid("file_id"), None).await;
    assert_eq!(download.bytes.as_ref(), b"hi");
}

#[tokio::test]
async fn test_list_files_shape() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let (file_id, _) = app.upload_ok(&token, "a.txt", b"hi").await;
    app.upload_ok(&token, "a.txt", b"hello").await;

    let response = app.request("GET", "/files", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let files = response.body.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["file_id"], file_id.to_string());
    assert_eq!(files[0]["filename"], "a.txt");
    assert_eq!(files[0]["current_version"], 2);
    assert_eq!(files[0]["size"], 5);
    assert_eq!(files[0]["content_type"], "text/plain");
    assert_eq!(files[0]["shared"], false);
}

#[tokio::test]
async fn test_search_by_keyword() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    for name in ["a.txt", "data.csv", "report.pdf"] {
        app.upload_ok(&token, name, b"content").await;
    }

    let response = app
        .request("GET", "/files/search?keyword=a", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let mut names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["filename"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a.txt", "data.csv"]);
}

#[tokio::test]
async fn test_search_filters_and_empty_result() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    for name in ["a.txt", "data.csv", "report.pdf"] {
        app.upload_ok(&token, name, b"content").await;
    }

    let by_type = app
        .request(
            "GET",
            "/files/search?file_type=application/pdf",
            None,
            Some(&token),
        )
        .await;
    let files = by_type.body.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], "report.pdf");

    let future = app
        .request(
            "GET",
            "/files/search?created_after=2999-01-01T00:00:00Z",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(future.status, StatusCode::OK);
    assert!(future.body.as_array().unwrap().is_empty());

    let past = app
        .request(
            "GET",
            "/files/search?created_after=2000-01-01T00:00:00Z&keyword=REPORT",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(past.body.as_array().unwrap().len(), 1);

    let bad_date = app
        .request("GET", "/files/search?created_after=yesterday", None, Some(&token))
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let (file_id, _) = app.upload_ok(&token, "a.txt", b"hi").await;
    app.upload_ok(&token, "a.txt", b"hello").await;

    let response = app
        .request("DELETE", &format!("/files/{file_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["detail"], "File deleted");

    let download = app.download(&token, file_id, None).await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
    let versions = app
        .request("GET", &format!("/files/{file_id}/versions"), None, Some(&token))
        .await;
    assert_eq!(versions.status, StatusCode::NOT_FOUND);

    let again = app
        .request("DELETE", &format!("/files/{file_id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    // The name is free again and starts a fresh history.
    let (new_id, version) = app.upload_ok(&token, "a.txt", b"again").await;
    assert_ne!(new_id, file_id);
    assert_eq!(version, 1);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let unknown = app.download(&token, Uuid::new_v4(), None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["error"], "NOT_FOUND");

    let malformed = app
        .request("GET", "/files/download/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metadata_lifecycle() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let (file_id, _) = app.upload_ok(&token, "a.txt", b"hi").await;
    let path = format!("/files/{file_id}/metadata");

    let set = app
        .request(
            "PUT",
            &path,
            Some(json!({ "key": "project", "value": "apollo" })),
            Some(&token),
        )
        .await;
    assert_eq!(set.status, StatusCode::OK);
    assert_eq!(set.body["key"], "project");

    app.request(
        "PUT",
        &path,
        Some(json!({ "key": "project", "value": "gemini" })),
        Some(&token),
    )
    .await;

    let listed = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(
        listed.body,
        json!([{ "key": "project", "value": "gemini" }])
    );

    let long_key = app
        .request(
            "PUT",
            &path,
            Some(json!({ "key": "k".repeat(51), "value": "v" })),
            Some(&token),
        )
        .await;
    assert_eq!(long_key.status, StatusCode::BAD_REQUEST);

    let deleted = app
        .request("DELETE", &format!("{path}/project"), None, Some(&token))
        .await;
    assert_eq!(deleted.body["detail"], "Metadata deleted");

    let missing = app
        .request("DELETE", &format!("{path}/project"), None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

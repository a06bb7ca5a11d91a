//! Integration tests for version history and rollback.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

async fn rollback(app: &TestApp, token: &str, file_id: Uuid, version: i64) -> helpers::TestResponse {
    app.request(
        "POST",
        "/files/rollback",
        Some(json!({ "file_id": file_id, "version_number": version })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_reupload_rollback_scenario() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let (file_id, v1) = app.upload_ok(&token, "a.txt", b"hi").await;
    assert_eq!(v1, 1);
    let (same_id, v2) = app.upload_ok(&token, "a.txt", b"hello").await;
    assert_eq!(same_id, file_id);
    assert_eq!(v2, 2);

    let latest = app.download(&token, file_id, None).await;
    assert_eq!(latest.bytes.as_ref(), b"hello");
    assert_eq!(latest.header("x-file-version"), "2");

    let response = rollback(&app, &token, file_id, 1).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "File rolled back successfully");
    assert_eq!(response.body["current_version"], 1);
    assert_eq!(response.body["size"], 2);

    let current = app.download(&token, file_id, None).await;
    assert_eq!(current.bytes.as_ref(), b"hi");
    assert_eq!(current.header("x-file-version"), "1");

    let versions = app
        .request("GET", &format!("/files/{file_id}/versions"), None, Some(&token))
        .await;
    let list = versions.body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["version_number"], 1);
    assert_eq!(list[0]["size"], 2);
    assert_eq!(list[0]["is_current"], true);
    assert_eq!(list[1]["version_number"], 2);
    assert_eq!(list[1]["size"], 5);
    assert_eq!(list[1]["is_current"], false);
}

#[tokio::test]
async fn test_download_specific_version() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let (file_id, _) = app.upload_ok(&token, "a.txt", b"first").await;
    app.upload_ok(&token, "a.txt", b"second").await;

    let old = app.download(&token, file_id, Some(1)).await;
    assert_eq!(old.status, StatusCode::OK);
    assert_eq!(old.bytes.as_ref(), b"first");
    assert_eq!(old.header("x-file-version"), "1");

    let missing = app.download(&token, file_id, Some(7)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rollback_leaves_history_identical() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let (file_id, _) = app.upload_ok(&token, "a.txt", b"one").await;
    app.upload_ok(&token, "a.txt", b"two").await;
    app.upload_ok(&token, "a.txt", b"three").await;

    let path = format!("/files/{file_id}/versions");
    let strip_current = |body: &serde_json::Value| -> Vec<serde_json::Value> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|v| {
                let mut v = v.clone();
                v.as_object_mut().unwrap().remove("is_current");
                v
            })
            .collect()
    };

    let before = app.request("GET", &path, None, Some(&token)).await;
    rollback(&app, &token, file_id, 1).await;
    let after_back = app.request("GET", &path, None, Some(&token)).await;
    rollback(&app, &token, file_id, 3).await;
    let after_forward = app.request("GET", &path, None, Some(&token)).await;

    assert_eq!(strip_current(&before.body), strip_current(&after_back.body));
    assert_eq!(strip_current(&before.body), strip_current(&after_forward.body));
    assert_eq!(after_forward.body[2]["is_current"], true);
}

#[tokio::test]
async fn test_rollback_to_missing_version_is_not_found() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let (file_id, _) = app.upload_ok(&token, "a.txt", b"hi").await;

    let beyond = rollback(&app, &token, file_id, 5).await;
    assert_eq!(beyond.status, StatusCode::NOT_FOUND);

    let zero = rollback(&app, &token, file_id, 0).await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);

    let unknown_file = rollback(&app, &token, Uuid::new_v4(), 1).await;
    assert_eq!(unknown_file.status, StatusCode::NOT_FOUND);

    let current = app.download(&token, file_id, None).await;
    assert_eq!(current.header("x-file-version"), "1");
}

#[tokio::test]
async fn test_upload_after_rollback_appends() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;
    let (file_id, _) = app.upload_ok(&token, "a.txt", b"one").await;
    app.upload_ok(&token, "a.txt", b"two").await;
    rollback(&app, &token, file_id, 1).await;

    let (_, version) = app.upload_ok(&token, "a.txt", b"three").await;
    assert_eq!(version, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uploads_get_distinct_versions() {
    const N: i64 = 12;
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let tasks: Vec<_> = (0..N)
        .map(|i| {
            let app = app.clone();
            let token = token.clone();
            tokio::spawn(async move {
                app.upload_ok(&token, "race.txt", format!("payload {i}").as_bytes())
                    .await
            })
        })
        .collect();

    let results: Vec<(Uuid, i64)> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let file_id = results[0].0;
    assert!(results.iter().all(|(id, _)| *id == file_id));

    let mut numbers: Vec<i64> = results.iter().map(|(_, v)| *v).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=N).collect::<Vec<_>>());

    let versions = app
        .request("GET", &format!("/files/{file_id}/versions"), None, Some(&token))
        .await;
    let listed: Vec<i64> = versions
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version_number"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, (1..=N).collect::<Vec<_>>());

    let files = app.request("GET", "/files", None, Some(&token)).await;
    assert_eq!(files.body[0]["current_version"], N);
}

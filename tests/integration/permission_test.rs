//! Integration tests for access control: strangers see nothing, grantees
//! read but never write.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_stranger_gets_not_found_everywhere() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let mallory = app.register("mallory").await;
    let (file_id, _) = app.upload_ok(&alice, "secret.txt", b"classified").await;

    let download = app.download(&mallory, file_id, None).await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
    assert_eq!(download.body["error"], "NOT_FOUND");

    let versions = app
        .request("GET", &format!("/files/{file_id}/versions"), None, Some(&mallory))
        .await;
    assert_eq!(versions.status, StatusCode::NOT_FOUND);

    let metadata = app
        .request("GET", &format!("/files/{file_id}/metadata"), None, Some(&mallory))
        .await;
    assert_eq!(metadata.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/files/{file_id}"), None, Some(&mallory))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let search = app
        .request("GET", "/files/search?keyword=secret", None, Some(&mallory))
        .await;
    assert!(search.body.as_array().unwrap().is_empty());

    // Nothing was changed on the way.
    let owner_view = app.download(&alice, file_id, None).await;
    assert_eq!(owner_view.bytes.as_ref(), b"classified");
}

#[tokio::test]
async fn test_grantee_reads_but_cannot_write() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let (file_id, _) = app.upload_ok(&alice, "a.txt", b"v1").await;
    app.upload_ok(&alice, "a.txt", b"v2").await;
    app.share_file(&alice, file_id, "bob").await;

    let versions = app
        .request("GET", &format!("/files/{file_id}/versions"), None, Some(&bob))
        .await;
    assert_eq!(versions.status, StatusCode::OK);
    assert_eq!(versions.body.as_array().unwrap().len(), 2);

    let old = app.download(&bob, file_id, Some(1)).await;
    assert_eq!(old.bytes.as_ref(), b"v1");

    let rollback = app
        .request(
            "POST",
            "/files/rollback",
            Some(json!({ "file_id": file_id, "version_number": 1 })),
            Some(&bob),
        )
        .await;
    assert_eq!(rollback.status, StatusCode::NOT_FOUND);

    let metadata = app
        .request(
            "PUT",
            &format!("/files/{file_id}/metadata"),
            Some(json!({ "key": "k", "value": "v" })),
            Some(&bob),
        )
        .await;
    assert_eq!(metadata.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/files/{file_id}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let current = app.download(&alice, file_id, None).await;
    assert_eq!(current.bytes.as_ref(), b"v2");
}

#[tokio::test]
async fn test_same_name_is_separate_per_owner() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let (alice_file, alice_version) = app.upload_ok(&alice, "notes.txt", b"alice").await;
    let (bob_file, bob_version) = app.upload_ok(&bob, "notes.txt", b"bob").await;

    assert_ne!(alice_file, bob_file);
    assert_eq!(alice_version, 1);
    assert_eq!(bob_version, 1);
    assert_eq!(app.download(&bob, bob_file, None).await.bytes.as_ref(), b"bob");
}

//! Integration tests for folders and the hierarchical listing.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn test_create_folder_is_idempotent_by_name() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let first = app
        .request("POST", "/folders", Some(json!({ "name": "docs" })), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["folder_name"], "docs");
    assert!(first.body["parent_folder_id"].is_null());

    let second = app
        .request("POST", "/folders", Some(json!({ "name": "docs" })), Some(&token))
        .await;
    assert_eq!(second.uuid("folder_id"), first.uuid("folder_id"));

    let listed = app.request("GET", "/folders", None, Some(&token)).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_reuses_folder_by_name() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let folder = app
        .request("POST", "/folders", Some(json!({ "name": "docs" })), Some(&token))
        .await;
    app.upload(&token, "a.txt", b"hi", Some("docs")).await;
    app.upload(&token, "b.txt", b"yo", Some("docs")).await;

    let listed = app.request("GET", "/folders", None, Some(&token)).await;
    let folders = listed.body.as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["folder_id"], folder.body["folder_id"]);
}

#[tokio::test]
async fn test_child_folder_needs_owned_parent() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let parent = app
        .request("POST", "/folders", Some(json!({ "name": "root" })), Some(&alice))
        .await;
    let parent_id = parent.uuid("folder_id");

    let child = app
        .request(
            "POST",
            "/folders",
            Some(json!({ "name": "child", "parent_folder_id": parent_id })),
            Some(&alice),
        )
        .await;
    assert_eq!(child.status, StatusCode::OK);
    assert_eq!(child.body["parent_folder_id"], parent_id.to_string());

    let foreign = app
        .request(
            "POST",
            "/folders",
            Some(json!({ "name": "sneaky", "parent_folder_id": parent_id })),
            Some(&bob),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let unknown = app
        .request(
            "POST",
            "/folders",
            Some(json!({ "name": "orphan", "parent_folder_id": Uuid::new_v4() })),
            Some(&alice),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_folder_name_is_required() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let response = app
        .request("POST", "/folders", Some(json!({ "name": "" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_files_and_folders_listing() {
    let app = TestApp::new().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    app.upload(&alice, "a.txt", b"hi", Some("docs")).await;
    app.upload(&alice, "b.txt", b"yo", Some("docs")).await;
    app.upload(&alice, "loose.txt", b"free", None).await;
    app.request("POST", "/folders", Some(json!({ "name": "empty" })), Some(&alice))
        .await;
    app.upload(&bob, "bobs.txt", b"mine", Some("docs")).await;

    let response = app
        .request("GET", "/files-and-folders", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let folders = response.body["folders"].as_array().unwrap();
    assert_eq!(folders.len(), 2);
    let docs = folders
        .iter()
        .find(|f| f["folder_name"] == "docs")
        .unwrap();
    let mut names: Vec<&str> = docs["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["filename"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a.txt", "b.txt"]);

    let empty = folders
        .iter()
        .find(|f| f["folder_name"] == "empty")
        .unwrap();
    assert!(empty["files"].as_array().unwrap().is_empty());

    let loose = response.body["independent_files"].as_array().unwrap();
    assert_eq!(loose.len(), 1);
    assert_eq!(loose[0]["filename"], "loose.txt");
}

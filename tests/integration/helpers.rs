//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use docvault_api::{AppState, build_app};
use docvault_core::config::AppConfig;
use docvault_core::traits::BlobStore;
use docvault_database::DatabasePool;
use docvault_database::migration::run_migrations;
use docvault_storage::LocalBlobStore;

pub const PASSWORD: &str = "password123";

/// Test application context over a throwaway database and blob root.
#[derive(Clone)]
pub struct TestApp {
    /// The full application router, middleware included
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    _dir: Arc<TempDir>,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}", dir.path().join("docvault.db").display());
        config.storage.data_root = dir.path().display().to_string();
        config.storage.blob_root = dir.path().join("blobs").display().to_string();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let blob_store: Arc<dyn BlobStore> = Arc::new(
            LocalBlobStore::new(&config.storage.blob_root)
                .await
                .expect("Failed to init blob store"),
        );

        let state = AppState::build(config.clone(), db, blob_store);
        Self {
            router: build_app(state),
            config,
            _dir: Arc::new(dir),
        }
    }

    /// Prefixes `path` with the API prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.server.api_prefix, path)
    }

    /// Registers a user and returns their access token.
    pub async fn register(&self, username: &str) -> String {
        let body = json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": PASSWORD,
        });
        let response = self
            .request("POST", "/auth/register", Some(body), None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Registration failed: {:?}",
            response.body
        );
        response.token()
    }

    /// Uploads `data` as `name`, optionally into `folder`.
    pub async fn upload(
        &self,
        token: &str,
        name: &str,
        data: &[u8],
        folder: Option<&str>,
    ) -> TestResponse {
        let mut body = json!({
            "file_name": name,
            "file": STANDARD.encode(data),
        });
        if let Some(folder) = folder {
            body["folder_name"] = json!(folder);
        }
        self.request("POST", "/files/upload", Some(body), Some(token))
            .await
    }

    /// Uploads and returns `(file_id, version_number)`, asserting success.
    pub async fn upload_ok(&self, token: &str, name: &str, data: &[u8]) -> (Uuid, i64) {
        let response = self.upload(token, name, data, None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload failed: {:?}",
            response.body
        );
        (response.uuid("file_id"), response.body["version_number"].as_i64().unwrap())
    }

    /// Downloads a file, optionally at a given version.
    pub async fn download(&self, token: &str, file_id: Uuid, version: Option<i64>) -> TestResponse {
        let path = match version {
            Some(v) => format!("/files/download/{file_id}?version={v}"),
            None => format!("/files/download/{file_id}"),
        };
        self.request("GET", &path, None, Some(token)).await
    }

    /// Shares a file with `grantee`.
    pub async fn share_file(&self, token: &str, file_id: Uuid, grantee: &str) -> TestResponse {
        self.request(
            "POST",
            &format!("/share_file/{file_id}"),
            Some(json!({ "grantee_username": grantee, "access_type": "shared" })),
            Some(token),
        )
        .await
    }

    /// Make a JSON request to the test app. `path` excludes the API prefix.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, "application/json", body_str, token)
            .await
    }

    /// Make a form-encoded request to the test app.
    pub async fn request_form(&self, path: &str, form: &str) -> TestResponse {
        self.send(
            "POST",
            path,
            "application/x-www-form-urlencoded",
            form.to_string(),
            None,
        )
        .await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(self.url(path))
            .header("Content-Type", content_type);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `access_token` of a token response.
    pub fn token(&self) -> String {
        self.body["access_token"]
            .as_str()
            .expect("No access_token in response")
            .to_string()
    }

    /// A UUID field of the JSON body.
    pub fn uuid(&self, field: &str) -> Uuid {
        self.body[field]
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| panic!("No UUID field '{field}' in {:?}", self.body))
    }

    /// A response header as a string.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_else(|| panic!("Missing header '{name}'"))
    }
}

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use drive_auth::JwtEncoder;
use drive_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig, StorageConfig,
    StorageProviderKind,
};
use drive_database::repositories::{MemoryFileRepository, MemoryFolderRepository, MemoryStore};
use drive_service::DriveService;
use drive_storage::{MemoryStorageProvider, UrlSigner};

const BOUNDARY: &str = "drive-test-boundary";

/// Test application over in-memory repositories and blob store.
pub struct TestApp {
    /// The Axum app, middleware included.
    pub router: Router,
    /// Rows behind the repositories.
    pub store: Arc<MemoryStore>,
    /// Blobs behind the provider.
    pub blobs: MemoryStorageProvider,
    /// Issues bearer tokens accepted by the app.
    pub encoder: JwtEncoder,
    /// Application config.
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        Self::with_max_upload(1024 * 1024)
    }

    /// Create a test application with a custom upload limit.
    pub fn with_max_upload(max_upload_size_bytes: u64) -> Self {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig::new("postgres://unused@localhost/unused"),
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                ..AuthConfig::default()
            },
            storage: StorageConfig {
                provider: StorageProviderKind::Memory,
                public_base_url: "http://drive.test".to_string(),
                max_upload_size_bytes,
                ..StorageConfig::default()
            },
            logging: LoggingConfig::default(),
        };

        let store = MemoryStore::new();
        let signer = UrlSigner::new(&config.auth.jwt_secret, &config.storage.public_base_url);
        let blobs = MemoryStorageProvider::new(signer.clone());
        let drive = DriveService::new(
            Arc::new(MemoryFileRepository::new(Arc::clone(&store))),
            Arc::new(MemoryFolderRepository::new(Arc::clone(&store))),
            Arc::new(blobs.clone()),
            signer,
            &config.storage,
        );

        let encoder = JwtEncoder::new(&config.auth);
        let router = drive_api::build_app(drive_api::AppState::new(config.clone(), drive));

        Self {
            router,
            store,
            blobs,
            encoder,
            config,
        }
    }

    /// A fresh user and a valid bearer token for them.
    pub fn user_token(&self) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let (token, _) = self
            .encoder
            .issue(user_id, 60)
            .expect("Failed to issue token");
        (user_id, token)
    }

    /// Make a JSON request to the test app.
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

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload one file through the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        file_name: &str,
        content: &[u8],
        folder_id: Option<Uuid>,
    ) -> TestResponse {
        let mut body = Vec::new();
        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folderId\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Create a folder and return its ID.
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<Uuid>) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id_at("/folder/id")
    }

    /// GET an absolute signed URL against the test app.
    pub async fn fetch_url(&self, url: &str) -> (StatusCode, Bytes) {
        let path = url
            .strip_prefix(&self.config.storage.public_base_url)
            .expect("URL outside the test app");
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, bytes)
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestResponse {
    /// UUID at a JSON pointer.
    pub fn id_at(&self, pointer: &str) -> Uuid {
        self.body
            .pointer(pointer)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| panic!("No UUID at {pointer} in {:?}", self.body))
    }

    /// String at a JSON pointer.
    pub fn str_at(&self, pointer: &str) -> &str {
        self.body
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("No string at {pointer} in {:?}", self.body))
    }

    /// Length of the array at a JSON pointer.
    pub fn len_at(&self, pointer: &str) -> usize {
        self.body
            .pointer(pointer)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or_else(|| panic!("No array at {pointer} in {:?}", self.body))
    }
}

//! Storage-zone uploader speaking the Bunny storage HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use linkhub_core::config::StorageConfig;
use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::traits::storage::ObjectUploader;

use crate::paths::normalize_object_path;

const ACCESS_KEY_HEADER: &str = "AccessKey";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Uploads objects with `PUT {endpoint}/{zone}/{path}`.
#[derive(Clone)]
pub struct BunnyStorageProvider {
    client: Client,
    endpoint: String,
    zone: String,
    password: String,
}

impl std::fmt::Debug for BunnyStorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BunnyStorageProvider")
            .field("endpoint", &self.endpoint)
            .field("zone", &self.zone)
            .field("password_set", &!self.password.is_empty())
            .finish()
    }
}

impl BunnyStorageProvider {
    /// Build an uploader from the storage section of the configuration.
    ///
    /// Missing zone or password is reported when [`put`](ObjectUploader::put)
    /// is called, not here.
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to build storage HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self::with_client(
            client,
            &config.endpoint,
            &config.zone,
            &config.password,
        ))
    }

    pub fn with_client(client: Client, endpoint: &str, zone: &str, password: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            zone: zone.trim().trim_matches('/').to_string(),
            password: password.trim().to_string(),
        }
    }

    /// Whether zone, password and endpoint are all present.
    pub fn is_configured(&self) -> bool {
        self.check_config().is_ok()
    }

    fn check_config(&self) -> AppResult<()> {
        if self.endpoint.is_empty() {
            return Err(AppError::configuration("Storage endpoint is not configured"));
        }
        if self.zone.is_empty() {
            return Err(AppError::configuration("Storage zone is not configured"));
        }
        if self.password.is_empty() {
            return Err(AppError::configuration(
                "Storage zone password is not configured",
            ));
        }
        Ok(())
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.zone, path)
    }
}

#[async_trait]
impl ObjectUploader for BunnyStorageProvider {
    fn provider_type(&self) -> &str {
        "bunny"
    }

    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.check_config()?;
        let path = normalize_object_path(path)
            .ok_or_else(|| AppError::validation("Upload path is required"))?;
        let content_type = if content_type.is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            content_type
        };

        let size = data.len();
        let response = self
            .client
            .put(self.object_url(path))
            .header(ACCESS_KEY_HEADER, &self.password)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Storage upload request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT
        ) {
            debug!(path, size, status = status.as_u16(), "Uploaded object");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            path,
            status = status.as_u16(),
            body = %body.chars().take(200).collect::<String>(),
            "Storage upload rejected"
        );
        Err(AppError::external_service(format!(
            "bunny_upload_{}",
            status.as_u16()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Bytes as AxumBytes;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::put;

    #[derive(Debug, Default, Clone)]
    struct Seen {
        path: String,
        access_key: Option<String>,
        content_type: Option<String>,
        body: Vec<u8>,
    }

    async fn spawn_backend(status: AxumStatus) -> (String, Arc<Mutex<Option<Seen>>>) {
        let seen: Arc<Mutex<Option<Seen>>> = Arc::default();
        let app = Router::new()
            .route(
                "/{*path}",
                put(
                    move |State(seen): State<Arc<Mutex<Option<Seen>>>>,
                          Path(path): Path<String>,
                          headers: HeaderMap,
                          body: AxumBytes| async move {
                        let header = |name: &str| {
                            headers
                                .get(name)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string)
                        };
                        *seen.lock().unwrap() = Some(Seen {
                            path,
                            access_key: header("accesskey"),
                            content_type: header("content-type"),
                            body: body.to_vec(),
                        });
                        (status, "backend says no")
                    },
                ),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), seen)
    }

    fn provider(endpoint: &str, zone: &str, password: &str) -> BunnyStorageProvider {
        BunnyStorageProvider::with_client(Client::new(), endpoint, zone, password)
    }

    #[tokio::test]
    async fn puts_with_access_key() {
        let (endpoint, seen) = spawn_backend(AxumStatus::CREATED).await;
        let uploader = provider(&endpoint, "my-zone", "zone-pass");

        uploader
            .put("/jobs/out.txt", Bytes::from_static(b"hello"), "text/plain")
            .await
            .unwrap();

        let seen = seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.path, "my-zone/jobs/out.txt");
        assert_eq!(seen.access_key.as_deref(), Some("zone-pass"));
        assert_eq!(seen.content_type.as_deref(), Some("text/plain"));
        assert_eq!(seen.body, b"hello");
    }

    #[tokio::test]
    async fn defaults_content_type() {
        let (endpoint, seen) = spawn_backend(AxumStatus::OK).await;
        let uploader = provider(&endpoint, "z", "p");
        uploader.put("a.bin", Bytes::new(), "").await.unwrap();
        let seen = seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.content_type.as_deref(), Some(DEFAULT_CONTENT_TYPE));
    }

    #[tokio::test]
    async fn non_success_status_is_external_service_error() {
        let (endpoint, _) = spawn_backend(AxumStatus::UNAUTHORIZED).await;
        let uploader = provider(&endpoint, "z", "wrong");
        let err = uploader
            .put("a.bin", Bytes::from_static(b"x"), "")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert_eq!(err.message, "bunny_upload_401");
    }

    #[tokio::test]
    async fn missing_zone_or_password_is_configuration_error() {
        for (zone, password) in [("", "p"), ("z", ""), (" ", " ")] {
            let uploader = provider("http://127.0.0.1:9", zone, password);
            assert!(!uploader.is_configured());
            let err = uploader
                .put("a.bin", Bytes::new(), "")
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration);
        }
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let uploader = provider("http://127.0.0.1:9", "z", "p");
        let err = uploader.put("///", Bytes::new(), "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn debug_hides_password() {
        let uploader = provider("https://storage.example.com/", "z", "hunter2");
        let rendered = format!("{uploader:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("https://storage.example.com\""));
        assert_eq!(uploader.provider_type(), "bunny");
    }
}

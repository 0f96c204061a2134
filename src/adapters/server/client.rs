//! Config server HTTP client
//!
//! Implements the [`ConfigServer`] trait against a Spring Cloud Config
//! server's REST surface: `GET /{name}/{profiles}/{label}` for the
//! environment document and `GET /{name}/{profiles}/{label}/{file}` for
//! plain-text files. Handles basic authentication, request timeouts, and
//! bounded exponential-backoff retry for transient failures.

use crate::config::{RequestConfig, ServerConfig};
use crate::domain::{CloudEnvError, Environment, Result, ServerError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// The fetch collaborator the engine's callers depend on
///
/// Implementations supply parsed [`Environment`] documents and raw file
/// bytes; the pure resolution pipeline never sees the transport.
#[async_trait]
pub trait ConfigServer: Send + Sync {
    /// Fetches and decodes the environment document
    async fn fetch_environment(&self) -> Result<Environment>;

    /// Fetches one plain-text file's raw bytes
    async fn fetch_file(&self, file_name: &str) -> Result<Vec<u8>>;

    /// Base URL of the config server
    fn base_url(&self) -> &str;
}

/// HTTP implementation of [`ConfigServer`]
///
/// # Example
///
/// ```no_run
/// use cloudenv::adapters::server::{ConfigServer, HttpConfigServer};
/// use cloudenv::config::{RequestConfig, ServerConfig};
///
/// # async fn example() -> cloudenv::domain::Result<()> {
/// let client = HttpConfigServer::new(ServerConfig::default(), RequestConfig::default())?;
/// let environment = client.fetch_environment().await?;
/// println!("profiles: {:?}", environment.profiles);
/// # Ok(())
/// # }
/// ```
pub struct HttpConfigServer {
    base_url: String,
    client: Client,
    server: ServerConfig,
    request: RequestConfig,
}

impl HttpConfigServer {
    /// Creates a new client from the server and request configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the underlying HTTP client can't
    /// be constructed.
    pub fn new(server: ServerConfig, request: RequestConfig) -> Result<Self> {
        let base_url = server.base_url();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(server.timeout_seconds))
            .connect_timeout(Duration::from_secs(server.timeout_seconds.min(30)))
            .build()
            .map_err(|e| {
                CloudEnvError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            server,
            request,
        })
    }

    /// URL of the environment document for the configured request
    pub fn environment_url(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            self.request.name,
            self.request.profiles.join(","),
            self.request.label
        )
    }

    /// URL of one plain-text file for the configured request
    pub fn file_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.environment_url(), file_name)
    }

    /// Build authorization header value for basic auth
    fn auth_header_value(&self) -> Option<String> {
        match (&self.server.username, &self.server.password) {
            (Some(username), Some(password)) => {
                let credentials = format!("{username}:{}", password.expose_secret().as_ref());
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                Some(format!("Basic {encoded}"))
            }
            _ => None,
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(auth) = self.auth_header_value() {
            request = request.header("Authorization", auth);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ServerError::Timeout(e.to_string())
            } else {
                ServerError::ConnectionFailed(e.to_string())
            }
        })?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ServerError::Unauthorized(format!("GET {url}")).into())
            }
            StatusCode::NOT_FOUND => Err(ServerError::NotFound(url.to_string()).into()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ServerError::Status {
                    status: status.as_u16(),
                    message: body,
                }
                .into())
            }
        }
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transient failures are retried: transport errors, timeouts,
    /// and 5xx statuses. Authentication failures and missing documents
    /// surface immediately.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.server.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !is_retryable(&e) {
                        return Err(e);
                    }

                    let delay_ms = self.server.retry.initial_delay_ms
                        * (self
                            .server
                            .retry
                            .backoff_multiplier
                            .powf((attempt - 1) as f64) as u64);
                    let delay_ms = delay_ms.min(self.server.retry.max_delay_ms);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

fn is_retryable(error: &CloudEnvError) -> bool {
    matches!(
        error,
        CloudEnvError::Server(
            ServerError::ConnectionFailed(_)
                | ServerError::Timeout(_)
                | ServerError::Status { status: 500..=599, .. }
        )
    )
}

#[async_trait]
impl ConfigServer for HttpConfigServer {
    async fn fetch_environment(&self) -> Result<Environment> {
        let url = self.environment_url();
        tracing::info!(url = %url, "Fetching config from server");

        let environment = self
            .retry_request(|| async {
                let response = self.get(&url).await?;
                response.json::<Environment>().await.map_err(|e| {
                    CloudEnvError::Server(ServerError::InvalidResponse(e.to_string()))
                })
            })
            .await?;

        tracing::info!(
            name = %environment.name,
            profiles = ?environment.profiles,
            label = environment.label.as_deref().unwrap_or(""),
            version = environment.version.as_deref().unwrap_or(""),
            state = environment.state.as_deref().unwrap_or(""),
            "Located environment"
        );

        Ok(environment)
    }

    async fn fetch_file(&self, file_name: &str) -> Result<Vec<u8>> {
        let url = self.file_url(file_name);
        tracing::info!(file = %file_name, url = %url, "Fetching file from server");

        self.retry_request(|| async {
            let response = self.get(&url).await?;
            let bytes = response.bytes().await.map_err(|e| {
                CloudEnvError::Server(ServerError::InvalidResponse(e.to_string()))
            })?;
            Ok(bytes.to_vec())
        })
        .await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config_for(server: &mockito::ServerGuard) -> (ServerConfig, RequestConfig) {
        let address = server.host_with_port();
        let (host, port) = address
            .rsplit_once(':')
            .expect("mockito address has a port");

        let server_config = ServerConfig {
            host: host.to_string(),
            port: port.parse().expect("mockito port parses"),
            retry: crate::config::RetryConfig {
                max_retries: 2,
                initial_delay_ms: 1,
                max_delay_ms: 2,
                backoff_multiplier: 1.0,
            },
            ..Default::default()
        };

        let request_config = RequestConfig {
            name: "app".to_string(),
            profiles: vec!["dev".to_string()],
            label: "main".to_string(),
        };

        (server_config, request_config)
    }

    const ENVIRONMENT_BODY: &str = r#"{
        "name": "app",
        "profiles": ["dev"],
        "label": "main",
        "propertySources": [
            {"name": "file://app.yml", "source": {"greeting": "hello"}}
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_environment_decodes_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/app/dev/main")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ENVIRONMENT_BODY)
            .create_async()
            .await;

        let (server_config, request_config) = config_for(&server);
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        let environment = client.fetch_environment().await.unwrap();
        assert_eq!(environment.name, "app");
        assert_eq!(environment.property_sources.len(), 1);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_environment_sends_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        // "svc:hunter2" base64-encoded
        let mock = server
            .mock("GET", "/app/dev/main")
            .match_header("authorization", "Basic c3ZjOmh1bnRlcjI=")
            .with_status(200)
            .with_body(ENVIRONMENT_BODY)
            .create_async()
            .await;

        let (mut server_config, request_config) = config_for(&server);
        server_config.username = Some("svc".to_string());
        server_config.password = Some(secret_string("hunter2".to_string()));

        let client = HttpConfigServer::new(server_config, request_config).unwrap();
        client.fetch_environment().await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_environment_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/app/dev/main")
            .with_status(404)
            .create_async()
            .await;

        let (server_config, request_config) = config_for(&server);
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        let err = client.fetch_environment().await.unwrap_err();
        assert!(matches!(
            err,
            CloudEnvError::Server(ServerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_environment_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/app/dev/main")
            .with_status(401)
            .create_async()
            .await;

        let (server_config, request_config) = config_for(&server);
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        let err = client.fetch_environment().await.unwrap_err();
        assert!(matches!(
            err,
            CloudEnvError::Server(ServerError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_environment_invalid_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/app/dev/main")
            .with_status(200)
            .with_body("this is no json")
            .create_async()
            .await;

        let (server_config, request_config) = config_for(&server);
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        let err = client.fetch_environment().await.unwrap_err();
        assert!(matches!(
            err,
            CloudEnvError::Server(ServerError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_transient_server_errors_are_retried() {
        let mut server = mockito::Server::new_async().await;
        // max_retries is 2, so the client should hit the server twice
        // before giving up on a 5xx.
        let failing = server
            .mock("GET", "/app/dev/main")
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let (server_config, request_config) = config_for(&server);
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        let err = client.fetch_environment().await.unwrap_err();
        assert!(matches!(
            err,
            CloudEnvError::Server(ServerError::Status { status: 503, .. })
        ));

        failing.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/app/dev/main")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let (server_config, request_config) = config_for(&server);
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        client.fetch_environment().await.unwrap_err();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_file_returns_body_bytes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/app/dev/main/banner.txt")
            .with_status(200)
            .with_body("this is a test!")
            .create_async()
            .await;

        let (server_config, request_config) = config_for(&server);
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        let bytes = client.fetch_file("banner.txt").await.unwrap();
        assert_eq!(bytes, b"this is a test!");
    }

    #[test]
    fn test_environment_url_joins_profiles_with_commas() {
        let server_config = ServerConfig::default();
        let request_config = RequestConfig {
            name: "app".to_string(),
            profiles: vec!["dev".to_string(), "cloud".to_string()],
            label: "main".to_string(),
        };
        let client = HttpConfigServer::new(server_config, request_config).unwrap();

        assert_eq!(
            client.environment_url(),
            "http://127.0.0.1:8888/app/dev,cloud/main"
        );
        assert_eq!(
            client.file_url("app.properties"),
            "http://127.0.0.1:8888/app/dev,cloud/main/app.properties"
        );
    }
}

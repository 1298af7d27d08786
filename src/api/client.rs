//! HTTP client for the Kitab Bazar GraphQL endpoint
//!
//! Queries are plain JSON POSTs of `{ query, variables }`; responses are
//! unwrapped into the typed payload or an [`ApiError`].

use super::types::{GraphQlRequest, GraphQlResponse, RegisterData, REGISTER_MUTATION};
use super::{ApiError, RegisterResponse, RegistrationApi};
use crate::config::AppConfig;
use crate::register::RegistrationFields;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

/// Client for the marketplace GraphQL API
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Build a client for the endpoint and timeout resolved from `config`
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.api_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one GraphQL operation and unwrap its `data`
    async fn execute<V, T>(&self, query: &str, variables: V) -> Result<T, ApiError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body: GraphQlResponse<T> = response.json().await?;
        body.into_data()
    }
}

#[async_trait]
impl RegistrationApi for GraphQlClient {
    async fn register(&self, payload: &RegistrationFields) -> Result<RegisterResponse, ApiError> {
        tracing::debug!(endpoint = %self.endpoint, "sending register mutation");
        let data: RegisterData = self
            .execute(REGISTER_MUTATION, json!({ "data": payload }))
            .await?;
        data.register.ok_or(ApiError::MissingData("register"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn config_for(addr: std::net::SocketAddr) -> AppConfig {
        AppConfig {
            api_endpoint: Some(format!("http://{addr}/graphql/")),
            request_timeout_secs: Some(2),
            ..Default::default()
        }
    }

    /// Read one request, headers and `content-length` body
    async fn read_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }

    /// Serve a single canned HTTP response on a loopback port
    async fn serve_once(status: &'static str, body: &'static str) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        });
        addr
    }

    #[test]
    fn test_client_uses_configured_endpoint() {
        let config = AppConfig {
            api_endpoint: Some("http://books.test/graphql/".to_string()),
            ..Default::default()
        };
        let client = GraphQlClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), config.api_endpoint());
    }

    #[tokio::test]
    async fn test_dropped_connection_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                drop(stream);
            }
        });

        let client = GraphQlClient::new(&config_for(addr)).unwrap();
        let result = client.register(&RegistrationFields::default()).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let addr = serve_once("502 Bad Gateway", "").await;
        let client = GraphQlClient::new(&config_for(addr)).unwrap();
        let result = client.register(&RegistrationFields::default()).await;
        assert!(matches!(
            result,
            Err(ApiError::Status(status)) if status == reqwest::StatusCode::BAD_GATEWAY
        ));
    }

    #[tokio::test]
    async fn test_register_response_is_unwrapped() {
        let addr = serve_once("200 OK", r#"{"data":{"register":{"ok":true,"errors":null}}}"#).await;
        let client = GraphQlClient::new(&config_for(addr)).unwrap();
        let response = client
            .register(&RegistrationFields::default())
            .await
            .unwrap();
        assert_eq!(response, RegisterResponse::success());
    }
}

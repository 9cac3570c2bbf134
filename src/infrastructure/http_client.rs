//! HTTP client for squad page fetching
//!
//! One GET per scrape with a browser-like header set and a fixed timeout.
//! No retries: a failed fetch aborts the scrape.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::constants::http::{
    DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
    MAX_REDIRECTS,
};
use crate::infrastructure::config::ScraperConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request cancelled")]
    Cancelled,

    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

/// Source of squad page bodies
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        url: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<String, FetchError>;
}

/// HTTP client configuration for squad page requests
#[derive(Debug, Clone, serde::Serialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
}

impl HttpClientConfig {
    pub fn from_scraper_config(scraper: &ScraperConfig) -> Self {
        Self {
            user_agent: scraper.user_agent.clone(),
            accept_language: scraper.accept_language.clone(),
            timeout_seconds: scraper.request_timeout_seconds,
            follow_redirects: true,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            follow_redirects: true,
        }
    }
}

pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(MAX_REDIRECTS)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()?;

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn request_error(&self, url: &str, error: &reqwest::Error) -> FetchError {
        let message = if error.is_timeout() {
            format!("timed out after {}s", self.config.timeout_seconds)
        } else {
            error.to_string()
        };
        FetchError::Request {
            url: url.to_string(),
            message,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(
        &self,
        url: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<String, FetchError> {
        if cancellation_token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        info!("Fetching squad page: {}", url);

        let response = tokio::select! {
            result = self.client.get(parsed).send() => {
                result.map_err(|e| self.request_error(url, &e))?
            },
            () = cancellation_token.cancelled() => {
                warn!("🛑 HTTP request cancelled for URL: {}", url);
                return Err(FetchError::Cancelled);
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = tokio::select! {
            result = response.text() => {
                result.map_err(|e| FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                })?
            },
            () = cancellation_token.cancelled() => {
                warn!("🛑 Response reading cancelled for URL: {}", url);
                return Err(FetchError::Cancelled);
            }
        };

        debug!("Successfully fetched: {} ({} chars)", url, body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request with `response` and hand back the raw request head
    async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/clube/elenco"), handle)
    }

    #[tokio::test]
    async fn test_http_client_creation() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        assert_eq!(client.config().timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        let result = client.fetch_page("not a url", &CancellationToken::new()).await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let result = client.fetch_page("https://example.com", &token).await;
        assert_eq!(result, Err(FetchError::Cancelled));
    }

    #[test]
    fn test_rejects_header_unsafe_user_agent() {
        let config = HttpClientConfig {
            user_agent: "bad\nagent".to_string(),
            ..HttpClientConfig::default()
        };
        assert!(HttpClient::new(config).is_err());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (url, server) =
            serve_once("HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await;
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();

        let result = client.fetch_page(&url, &CancellationToken::new()).await;

        assert_eq!(result, Err(FetchError::Status { status: 404, url }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_sends_configured_headers_and_returns_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: 13\r\n\
             connection: close\r\n\r\n<html></html>",
        )
        .await;
        let client = HttpClient::new(HttpClientConfig {
            user_agent: "squad-test-agent/1.0".to_string(),
            accept_language: "pt-BR,pt;q=0.9".to_string(),
            ..HttpClientConfig::default()
        })
        .unwrap();

        let body = client.fetch_page(&url, &CancellationToken::new()).await.unwrap();
        assert_eq!(body, "<html></html>");

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /clube/elenco "), "{request}");
        assert!(request.contains("user-agent: squad-test-agent/1.0"), "{request}");
        assert!(request.contains("accept-language: pt-br,pt;q=0.9"), "{request}");
        assert!(request.contains("upgrade-insecure-requests: 1"), "{request}");
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/clube/elenco", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            // Hold the connection open without ever answering
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });
        let client = HttpClient::new(HttpClientConfig {
            timeout_seconds: 1,
            ..HttpClientConfig::default()
        })
        .unwrap();

        let result = client.fetch_page(&url, &CancellationToken::new()).await;

        match result {
            Err(FetchError::Request { message, .. }) => {
                assert!(message.contains("timed out"), "{message}");
            }
            other => panic!("expected a timeout, got {other:?}"),
        }
        server.abort();
    }
}

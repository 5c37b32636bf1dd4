//! ticktock REST API Client
//!
//! HTTP client for the ticktock backend. One request per call, no retries.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{Task, UnfinishedBody};
use super::error::{ApiError, ApiResult};
use super::TicktockApi;

/// Default backend base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// ticktock REST API client
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Request timeout in milliseconds, 0 disables it
    pub request_timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ApiClientConfig) -> ApiResult<Self> {
        let trimmed = config.base_url.trim_end_matches('/');
        reqwest::Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        config.base_url = trimmed.to_string();

        let mut builder = Client::builder().user_agent(concat!("ticktock/", env!("CARGO_PKG_VERSION")));
        if config.request_timeout_ms > 0 {
            builder = builder.timeout(std::time::Duration::from_millis(config.request_timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Send a request, turning non-2xx answers into [`ApiError::Status`]
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(url = %response.url(), status = status.as_u16(), "API response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }

    async fn get_text(&self, path: &str) -> ApiResult<String> {
        let response = self.send(self.client.get(self.url(path))).await?;
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.get_text(path).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TicktockApi for ApiClient {
    async fn recent_titles(&self) -> ApiResult<Vec<String>> {
        self.get_json("/api/recent/").await
    }

    async fn unfinished(&self) -> ApiResult<Vec<Task>> {
        let path = "/api/unfinished/";
        let body = self.get_text(path).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parsed: Option<UnfinishedBody> =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode {
                endpoint: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(UnfinishedBody::into_tasks(parsed))
    }

    async fn start(&self, title: &str) -> ApiResult<()> {
        let url = self.url(&format!("/api/start/{}", urlencoding::encode(title)));
        self.send(self.client.post(url)).await?;
        Ok(())
    }

    async fn finish(&self, title: &str, notes: &str) -> ApiResult<()> {
        let url = self.url(&format!("/api/finish/{}", urlencoding::encode(title)));
        self.send(self.client.post(url).body(notes.to_string())).await?;
        Ok(())
    }

    async fn report_by_date(
        &self,
        day_start: &str,
        day_end: &str,
        view_type: &str,
    ) -> ApiResult<String> {
        self.get_text(&format!(
            "/api/report-by-date/{}/{}?view_type={}",
            urlencoding::encode(day_start),
            urlencoding::encode(day_end),
            urlencoding::encode(view_type)
        ))
        .await
    }

    async fn latest(&self, title: &str) -> ApiResult<String> {
        self.get_text(&format!("/api/latest/{}", urlencoding::encode(title)))
            .await
    }
}

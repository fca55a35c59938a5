//! HTTP client for the automation backend.
//!
//! This module provides the typed wrapper over the backend's REST surface:
//! stats, analytics, preview generation, post/reject actions, and the
//! paginated post history.

use crate::models::{Analytics, CurrentPreviews, PostsPage, PreviewSet, Stats};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Default backend base URL (the FastAPI service mounts everything under
/// `/api`).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Error type for backend client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: no usable response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-2xx status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// FastAPI error bodies look like `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Client for the automation backend API.
///
/// Holds a reusable [`reqwest::Client`] built without a request timeout:
/// preview generation is long-running and callers wait indefinitely for it
/// to complete. No retries, no caching, no auth headers.
pub struct ApiClient {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new client against the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Fetch the quick stats summary.
    pub async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        let url = format!("{}/stats", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch the aggregated analytics snapshot.
    pub async fn fetch_analytics(&self) -> Result<Analytics, ApiError> {
        let url = format!("{}/analytics", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Trigger server-side preview generation and return the new set.
    ///
    /// This call runs for as long as the backend needs to render images;
    /// there is no client-side timeout.
    pub async fn generate_previews(&self) -> Result<PreviewSet, ApiError> {
        let url = format!("{}/generate-previews", self.base_url);
        let response = self.client.post(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Retrieve the already-generated preview set, if one is pending.
    pub async fn fetch_current_previews(&self) -> Result<Option<PreviewSet>, ApiError> {
        let url = format!("{}/current-previews", self.base_url);
        let response = self.client.get(&url).send().await?;
        let current: CurrentPreviews = Self::check(response).await?.json().await?;
        Ok(current.into_preview_set())
    }

    /// Publish the preview at `index` to Instagram.
    ///
    /// The server clears the live preview set as a side effect.
    pub async fn post_image(&self, index: usize) -> Result<(), ApiError> {
        let url = format!("{}/post-image", self.base_url);
        let body = serde_json::json!({ "image_index": index });
        let response = self.client.post(&url).json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Discard the live preview set server-side.
    pub async fn reject_previews(&self) -> Result<(), ApiError> {
        let url = format!("{}/reject-previews", self.base_url);
        let response = self.client.post(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Fetch a page of post history, newest first.
    pub async fn fetch_posts(&self, limit: usize, offset: usize) -> Result<PostsPage, ApiError> {
        let url = format!("{}/posts?limit={}&offset={}", self.base_url, limit, offset);
        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Map a non-2xx response into [`ApiError::Server`], extracting the
    /// FastAPI `detail` field when the body parses.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let raw = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = match serde_json::from_str::<ErrorBody>(&raw) {
            Ok(body) => body.detail,
            Err(_) => raw,
        };
        Err(ApiError::Server { status, message })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_api_client_with_base_url() {
        let client = ApiClient::with_base_url("http://localhost:9000/api".to_string());
        assert_eq!(client.base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_api_client_strips_trailing_slash() {
        let client = ApiClient::with_base_url("http://localhost:9000/api/".to_string());
        assert_eq!(client.base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Server {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("500"));
        assert!(display.contains("Internal Server Error"));
    }

    // Async failure-path tests against a port nothing listens on.

    #[tokio::test]
    async fn test_fetch_stats_with_unreachable_server() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
        let result = client.fetch_stats().await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }

    #[tokio::test]
    async fn test_post_image_with_unreachable_server() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
        let result = client.post_image(0).await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }

    #[tokio::test]
    async fn test_reject_previews_with_unreachable_server() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
        let result = client.reject_previews().await;
        assert!(result.is_err());
    }
}

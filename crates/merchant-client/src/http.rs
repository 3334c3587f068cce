//! HTTP merchant client
//!
//! A [`MerchantApi`] backed by a real merchant backend:
//!
//! - `GET {base_url}/api/merchants/{merchant_id}/analytics`
//! - `GET {base_url}/api/merchants/{merchant_id}`
//!
//! A 404 maps to [`Error::NotFound`]; any other non-2xx status maps to
//! [`Error::Api`], using the `error` field of the JSON error body when present.

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response as ReqwestResponse, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::MerchantApi;
use crate::types::{AnalyticsResponse, ApiErrorResponse, MerchantInfoResponse};
use crate::{Error, Result};

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the HTTP merchant client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base service URL (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Point-Dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// HTTP implementation of [`MerchantApi`]
#[derive(Debug, Clone)]
pub struct HttpMerchantClient {
    client: ReqwestClient,
    config: HttpClientConfig,
}

impl HttpMerchantClient {
    /// Create a new HTTP merchant client
    ///
    /// # Errors
    ///
    /// - `Error::Network` - The underlying HTTP client could not be built
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Build the URL of a merchant resource
    fn merchant_url(&self, merchant_id: &str, suffix: &str) -> String {
        format!(
            "{}/api/merchants/{}{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(merchant_id),
            suffix
        )
    }

    async fn get_json<T>(&self, url: &str, merchant_id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("API call: GET {}", url);

        let response = self.client.get(url).send().await?;
        let response = check_status(response, merchant_id).await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Map a non-2xx response to an error
async fn check_status(response: ReqwestResponse, merchant_id: &str) -> Result<ReqwestResponse> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound(merchant_id.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(error_response) => error_response.error,
        Err(_) => format!("HTTP {}: {}", status.as_u16(), body),
    };

    tracing::warn!(status = status.as_u16(), "Merchant API error: {}", message);

    Err(Error::Api { status: status.as_u16(), message })
}

#[async_trait]
impl MerchantApi for HttpMerchantClient {
    async fn get_merchant_analytics(&self, merchant_id: &str) -> Result<AnalyticsResponse> {
        let url = self.merchant_url(merchant_id, "/analytics");
        self.get_json(&url, merchant_id).await
    }

    async fn get_merchant_info(&self, merchant_id: &str) -> Result<MerchantInfoResponse> {
        let url = self.merchant_url(merchant_id, "");
        self.get_json(&url, merchant_id).await
    }
}

//! Merchant analytics client library
//!
//! This crate provides the wire types for merchant analytics, the
//! [`MerchantApi`] provider trait the dashboard depends on, a sample in-process
//! service with canned data, and an HTTP client for a real backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod http;
pub mod sample;
pub mod types;

pub use api::{fetch_dashboard, DashboardBundle, MerchantApi};
pub use http::{HttpClientConfig, HttpMerchantClient};
pub use sample::{SampleMerchantService, SampleServiceConfig, SAMPLE_MERCHANT_ID};
pub use types::{
    AnalyticsResponse, AnalyticsSnapshot, ApiErrorResponse, ByPeriod, ChartPoint, MerchantInfo,
    MerchantInfoResponse, Metric, Period, PeriodStats, Transaction, TransactionKind,
};

/// Result type for merchant API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for merchant API operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown merchant identifier
    #[error("Merchant {0} not found")]
    NotFound(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API error with status code and message
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server
        message: String,
    },
}

impl Error {
    /// Check if this error means the merchant does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

//! Wire types for merchant analytics
//!
//! These mirror the JSON bodies of `GET /api/merchants/{id}/analytics` and
//! `GET /api/merchants/{id}`. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Periods and Metrics
// =============================================================================

/// Reporting period for aggregated stats and chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    /// Today, in 4-hour buckets
    Today,
    /// Last 7 days, daily
    Week,
    /// Last 14 days, every second day
    TwoWeeks,
    /// Last month, every fourth day
    Month,
}

impl Period {
    /// All periods in display order
    pub const ALL: [Period; 4] = [Period::Today, Period::Week, Period::TwoWeeks, Period::Month];

    /// Wire key for this period
    pub fn key(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::TwoWeeks => "twoWeeks",
            Period::Month => "month",
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Today
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which figure of a stats entry or chart point to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Number of customers
    Customers,
    /// Number of transactions
    Transactions,
    /// Revenue in whole kroner
    Revenue,
}

impl Metric {
    /// All metrics in display order
    pub const ALL: [Metric; 3] = [Metric::Customers, Metric::Transactions, Metric::Revenue];
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Revenue
    }
}

/// One value per reporting period
///
/// A typed replacement for a `{today, week, twoWeeks, month}` object, so a
/// period can never be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByPeriod<T> {
    /// Today
    pub today: T,
    /// Last 7 days
    pub week: T,
    /// Last 14 days
    pub two_weeks: T,
    /// Last month
    pub month: T,
}

impl<T> ByPeriod<T> {
    /// Get the value for a period
    pub fn get(&self, period: Period) -> &T {
        match period {
            Period::Today => &self.today,
            Period::Week => &self.week,
            Period::TwoWeeks => &self.two_weeks,
            Period::Month => &self.month,
        }
    }
}

// =============================================================================
// Analytics
// =============================================================================

/// Aggregated stats for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Number of customers
    pub customers: u32,
    /// Number of transactions
    pub transactions: u32,
    /// Revenue in whole kroner
    pub revenue: u64,
    /// Human-readable period caption
    pub subtitle: String,
}

impl PeriodStats {
    /// Read one metric
    pub fn value(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Customers => u64::from(self.customers),
            Metric::Transactions => u64::from(self.transactions),
            Metric::Revenue => self.revenue,
        }
    }
}

/// One sample of a period's time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Bucket label (`08:00`, `Man`, `15/1`, ...)
    pub time: String,
    /// Cumulative or per-bucket customers
    pub customers: u32,
    /// Transactions in the bucket
    pub transactions: u32,
    /// Revenue in the bucket
    pub revenue: u64,
}

impl ChartPoint {
    /// Read one metric as a plot value
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Customers => f64::from(self.customers),
            Metric::Transactions => f64::from(self.transactions),
            Metric::Revenue => self.revenue as f64,
        }
    }
}

/// Kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Sale,
    /// Money returned to the customer
    Refund,
}

/// A recent transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID
    pub id: u32,
    /// Local clock time (`14:32`)
    pub time: String,
    /// Amount in whole kroner
    pub amount: u64,
    /// Customer display name
    pub customer: String,
    /// Sale or refund
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the transaction was recorded
    pub timestamp: DateTime<Utc>,
}

/// Everything the dashboard shows, fetched in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Aggregated stats per period
    pub stats: ByPeriod<PeriodStats>,
    /// Time series per period
    pub chart_data: ByPeriod<Vec<ChartPoint>>,
    /// Most recent transactions, newest first
    pub recent_transactions: Vec<Transaction>,
}

/// Response body of the analytics endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Whether the call succeeded
    pub success: bool,
    /// Merchant the data belongs to
    pub merchant_id: String,
    /// The analytics
    pub data: AnalyticsSnapshot,
}

// =============================================================================
// Merchant Profile
// =============================================================================

/// Merchant profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantInfo {
    /// Merchant identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Phone number in international form
    pub phone: String,
    /// Contact email
    pub email: String,
}

/// Response body of the merchant profile endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantInfoResponse {
    /// Whether the call succeeded
    pub success: bool,
    /// The profile
    pub data: MerchantInfo,
}

// =============================================================================
// Error Body
// =============================================================================

/// Standard error body returned by the merchant API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Error message
    pub error: String,
    /// When the error was produced
    pub timestamp: DateTime<Utc>,
}

impl ApiErrorResponse {
    /// Build the error body for a failed call
    pub fn from_error(error: &crate::Error) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            timestamp: Utc::now(),
        }
    }
}

//! Merchant data provider interface
//!
//! The dashboard talks to its data source only through [`MerchantApi`], so the
//! in-process sample service and the HTTP client are interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{AnalyticsResponse, AnalyticsSnapshot, MerchantInfo, MerchantInfoResponse};
use crate::Result;

/// Read operations the dashboard needs from a merchant backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MerchantApi: Send + Sync {
    /// Fetch all analytics for a merchant in one call
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` - Unknown merchant identifier
    async fn get_merchant_analytics(&self, merchant_id: &str) -> Result<AnalyticsResponse>;

    /// Fetch the merchant profile
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` - Unknown merchant identifier
    async fn get_merchant_info(&self, merchant_id: &str) -> Result<MerchantInfoResponse>;
}

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBundle {
    /// Analytics snapshot
    pub analytics: AnalyticsSnapshot,
    /// Merchant profile
    pub merchant: MerchantInfo,
}

/// Fetch analytics and profile concurrently
///
/// Both requests are in flight at the same time. If either fails the whole
/// fetch fails and the other request is dropped.
pub async fn fetch_dashboard<A>(api: &A, merchant_id: &str) -> Result<DashboardBundle>
where
    A: MerchantApi + ?Sized,
{
    let (analytics, info) = tokio::try_join!(
        api.get_merchant_analytics(merchant_id),
        api.get_merchant_info(merchant_id),
    )?;

    tracing::debug!(
        merchant_id,
        transactions = analytics.data.recent_transactions.len(),
        "Dashboard data fetched"
    );

    Ok(DashboardBundle { analytics: analytics.data, merchant: info.data })
}

//! Sample merchant service
//!
//! An in-process [`MerchantApi`] that serves one known merchant from canned
//! data after an artificial latency. It stands in for the backend until a
//! real one is wired up through [`crate::HttpMerchantClient`].

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

use crate::api::MerchantApi;
use crate::types::{
    AnalyticsResponse, AnalyticsSnapshot, ByPeriod, ChartPoint, MerchantInfo,
    MerchantInfoResponse, PeriodStats, Transaction, TransactionKind,
};
use crate::{Error, Result};

/// The only merchant the sample service knows
pub const SAMPLE_MERCHANT_ID: &str = "talent-garden";

/// Latency settings for the sample service
#[derive(Debug, Clone)]
pub struct SampleServiceConfig {
    /// Delay before the analytics call resolves
    pub analytics_delay: Duration,
    /// Delay before the profile call resolves
    pub info_delay: Duration,
}

impl Default for SampleServiceConfig {
    fn default() -> Self {
        Self {
            analytics_delay: Duration::from_millis(800),
            info_delay: Duration::from_millis(200),
        }
    }
}

impl SampleServiceConfig {
    /// Resolve both calls immediately
    pub fn instant() -> Self {
        Self {
            analytics_delay: Duration::ZERO,
            info_delay: Duration::ZERO,
        }
    }

    /// Set the analytics delay
    pub fn with_analytics_delay(mut self, delay: Duration) -> Self {
        self.analytics_delay = delay;
        self
    }

    /// Set the profile delay
    pub fn with_info_delay(mut self, delay: Duration) -> Self {
        self.info_delay = delay;
        self
    }
}

/// Canned merchant backend
#[derive(Debug, Clone, Default)]
pub struct SampleMerchantService {
    config: SampleServiceConfig,
}

impl SampleMerchantService {
    /// Create a sample service with the default latencies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sample service with custom latencies
    pub fn with_config(config: SampleServiceConfig) -> Self {
        Self { config }
    }

    /// Get the service configuration
    pub fn config(&self) -> &SampleServiceConfig {
        &self.config
    }
}

#[async_trait]
impl MerchantApi for SampleMerchantService {
    async fn get_merchant_analytics(&self, merchant_id: &str) -> Result<AnalyticsResponse> {
        tokio::time::sleep(self.config.analytics_delay).await;
        tracing::debug!("API call: GET /merchants/{}/analytics", merchant_id);

        if merchant_id != SAMPLE_MERCHANT_ID {
            return Err(Error::NotFound(merchant_id.to_string()));
        }

        Ok(AnalyticsResponse {
            success: true,
            merchant_id: merchant_id.to_string(),
            data: sample_analytics(),
        })
    }

    async fn get_merchant_info(&self, merchant_id: &str) -> Result<MerchantInfoResponse> {
        tokio::time::sleep(self.config.info_delay).await;
        tracing::debug!("API call: GET /merchants/{}", merchant_id);

        let merchant = sample_merchant(merchant_id)
            .ok_or_else(|| Error::NotFound(merchant_id.to_string()))?;

        Ok(MerchantInfoResponse { success: true, data: merchant })
    }
}

fn sample_merchant(merchant_id: &str) -> Option<MerchantInfo> {
    (merchant_id == SAMPLE_MERCHANT_ID).then(|| MerchantInfo {
        id: SAMPLE_MERCHANT_ID.to_string(),
        name: "Talent Garden".to_string(),
        phone: "+45 12 34 56 78".to_string(),
        email: "contact@talentgarden.dk".to_string(),
    })
}

fn stats(customers: u32, transactions: u32, revenue: u64, subtitle: &str) -> PeriodStats {
    PeriodStats {
        customers,
        transactions,
        revenue,
        subtitle: subtitle.to_string(),
    }
}

fn series(rows: &[(&str, u32, u32, u64)]) -> Vec<ChartPoint> {
    rows.iter()
        .map(|&(time, customers, transactions, revenue)| ChartPoint {
            time: time.to_string(),
            customers,
            transactions,
            revenue,
        })
        .collect()
}

fn transaction(id: u32, time: &str, amount: u64, customer: &str, kind: TransactionKind) -> Transaction {
    Transaction {
        id,
        time: time.to_string(),
        amount,
        customer: customer.to_string(),
        kind,
        timestamp: Utc::now(),
    }
}

/// The canned analytics snapshot for [`SAMPLE_MERCHANT_ID`]
pub fn sample_analytics() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        stats: ByPeriod {
            today: stats(47, 23, 12_450, "I dag"),
            week: stats(234, 156, 67_890, "Sidste 7 dage"),
            two_weeks: stats(445, 298, 134_560, "Sidste 14 dage"),
            month: stats(892, 567, 278_340, "Sidste måned"),
        },
        chart_data: ByPeriod {
            // 4-hour buckets
            today: series(&[
                ("08:00", 8, 5, 1_250),
                ("12:00", 18, 12, 3_680),
                ("16:00", 29, 18, 6_450),
                ("20:00", 35, 21, 8_920),
                ("00:00", 41, 22, 10_650),
                ("04:00", 47, 23, 12_450),
            ]),
            week: series(&[
                ("Man", 42, 28, 8_650),
                ("Tir", 38, 25, 7_890),
                ("Ons", 52, 34, 12_340),
                ("Tor", 45, 31, 9_870),
                ("Fre", 67, 42, 15_680),
                ("Lør", 89, 58, 21_450),
                ("Søn", 71, 46, 17_560),
            ]),
            // every second day
            two_weeks: series(&[
                ("15/1", 45, 32, 9_450),
                ("17/1", 62, 41, 13_680),
                ("19/1", 58, 38, 12_890),
                ("21/1", 71, 48, 16_750),
                ("23/1", 83, 56, 19_320),
                ("25/1", 78, 52, 18_450),
                ("27/1", 91, 61, 22_340),
            ]),
            // every fourth day
            month: series(&[
                ("1/1", 52, 35, 11_230),
                ("5/1", 67, 44, 14_680),
                ("9/1", 71, 48, 16_450),
                ("13/1", 84, 56, 19_870),
                ("17/1", 78, 52, 18_340),
                ("21/1", 95, 63, 23_680),
                ("25/1", 89, 59, 21_560),
                ("29/1", 103, 71, 26_890),
            ]),
        },
        recent_transactions: vec![
            transaction(1, "14:32", 245, "Marie Jensen", TransactionKind::Sale),
            transaction(2, "14:18", 89, "Lars Andersen", TransactionKind::Sale),
            transaction(3, "14:05", 156, "Anna Petersen", TransactionKind::Refund),
            transaction(4, "13:45", 320, "Michael Nielsen", TransactionKind::Sale),
            transaction(5, "13:22", 78, "Sofia Hansen", TransactionKind::Sale),
        ],
    }
}

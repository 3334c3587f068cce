//! Dashboard view data
//!
//! Turns merchant analytics into the labels, cards, and rows the dashboard
//! screen shows. Everything here is plain data; layout and drawing belong to
//! the UI crate.

use merchant_client::{ChartPoint, Metric, Period, PeriodStats, Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

use crate::branding::colors;
use crate::format::{currency, group_thousands, signed_amount};

/// Fixed dashboard copy (Danish)
pub mod text {
    /// Screen title under the store name
    pub const TITLE: &str = "Dashboard";
    /// Recent transactions section header
    pub const RECENT_TRANSACTIONS: &str = "Seneste transaktioner";
    /// Loading indicator caption
    pub const LOADING: &str = "Henter data...";
    /// Error view title
    pub const ERROR_TITLE: &str = "Noget gik galt";
    /// Retry button
    pub const RETRY: &str = "Prøv igen";
}

/// Tab label for a period
pub fn period_label(period: Period) -> &'static str {
    match period {
        Period::Today => "I dag",
        Period::Week => "7 dage",
        Period::TwoWeeks => "14 dage",
        Period::Month => "Måned",
    }
}

/// Card title for a metric
pub fn metric_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Customers => "Kunder",
        Metric::Transactions => "Transaktioner",
        Metric::Revenue => "Omsætning",
    }
}

/// Accent color for a metric
pub fn metric_color(metric: Metric) -> &'static str {
    match metric {
        Metric::Customers => colors::POINT_GREEN,
        Metric::Transactions => colors::CYAN,
        Metric::Revenue => colors::ORANGE,
    }
}

/// Formatted value of a metric (`47`, `12.450 kr`)
pub fn metric_value(stats: &PeriodStats, metric: Metric) -> String {
    let value = stats.value(metric);
    match metric {
        Metric::Revenue => currency(value),
        Metric::Customers | Metric::Transactions => group_thousands(value),
    }
}

/// One metric card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    /// Which metric the card shows
    pub metric: Metric,
    /// Uppercase-rendered title
    pub title: String,
    /// Formatted value
    pub value: String,
    /// Optional caption under the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Left border color
    pub color: String,
}

/// Cards for every metric of a period
pub fn metric_cards(stats: &PeriodStats) -> Vec<MetricCard> {
    Metric::ALL
        .iter()
        .map(|&metric| MetricCard {
            metric,
            title: metric_title(metric).to_string(),
            value: metric_value(stats, metric),
            subtitle: Some(stats.subtitle.clone()).filter(|s| !s.is_empty()),
            color: metric_color(metric).to_string(),
        })
        .collect()
}

/// One row of the recent transactions list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Transaction ID
    pub id: u32,
    /// Clock time
    pub time: String,
    /// Customer name
    pub customer: String,
    /// Signed amount (`+245 kr`)
    pub amount: String,
    /// Amount color
    pub color: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        let color = match tx.kind {
            TransactionKind::Sale => colors::POINT_GREEN,
            TransactionKind::Refund => colors::REFUND_RED,
        };
        Self {
            id: tx.id,
            time: tx.time.clone(),
            customer: tx.customer.clone(),
            amount: signed_amount(tx.amount, tx.kind),
            color: color.to_string(),
        }
    }
}

/// Rows for a transaction list, in the given order
pub fn transaction_rows(transactions: &[Transaction]) -> Vec<TransactionRow> {
    transactions.iter().map(TransactionRow::from).collect()
}

/// `(label, value)` pairs of one metric across a series
pub fn metric_series(points: &[ChartPoint], metric: Metric) -> Vec<(String, f64)> {
    points
        .iter()
        .map(|point| (point.time.clone(), point.value(metric)))
        .collect()
}

/// Human-readable message for a failed dashboard load
pub fn failure_message(merchant_id: &str, not_found: bool) -> String {
    if not_found {
        format!("Butikken \"{}\" blev ikke fundet.", merchant_id)
    } else {
        "Kunne ikke hente data. Tjek forbindelsen og prøv igen.".to_string()
    }
}

//! Number formatting
//!
//! Compact labels for chart axes (`1.5k`, `2M`) and Danish-style grouped
//! amounts for metric cards (`12.450 kr`).

use merchant_client::TransactionKind;

/// Currency suffix for amounts
pub const CURRENCY: &str = "kr";

/// Thousands separator used in amounts
const THOUSANDS_SEPARATOR: char = '.';

/// Format a value with a `k`/`M` suffix
///
/// Values of a million or more are divided by 1e6 and get `M`; values of a
/// thousand or more are divided by 1e3 and get `k`. The scaled value is
/// rounded to one decimal and a trailing `.0` is dropped. Smaller values are
/// rounded to a plain integer. The unit is chosen after rounding, so a value
/// that rounds up to the next unit is shown in it (`999_999` is `1M`).
///
/// ```
/// use app_core::format::compact_number;
///
/// assert_eq!(compact_number(999.0), "999");
/// assert_eq!(compact_number(1500.0), "1.5k");
/// assert_eq!(compact_number(1_000_000.0), "1M");
/// ```
pub fn compact_number(value: f64) -> String {
    if value >= 1_000_000.0 || round_tenth(value / 1_000.0) >= 1_000.0 {
        format!("{}M", one_decimal(value / 1_000_000.0))
    } else if value >= 1_000.0 || value.round() >= 1_000.0 {
        format!("{}k", one_decimal(value / 1_000.0))
    } else {
        format!("{}", value.round() as i64)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn one_decimal(value: f64) -> String {
    let rounded = round_tenth(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Group an integer in thousands (`12450` becomes `12.450`)
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }

    out
}

/// Format an amount with currency (`12.450 kr`)
pub fn currency(value: u64) -> String {
    format!("{} {}", group_thousands(value), CURRENCY)
}

/// Format a transaction amount with its sign (`+245 kr`, `-156 kr`)
pub fn signed_amount(amount: u64, kind: TransactionKind) -> String {
    let sign = match kind {
        TransactionKind::Sale => '+',
        TransactionKind::Refund => '-',
    };
    format!("{}{} {}", sign, group_thousands(amount), CURRENCY)
}

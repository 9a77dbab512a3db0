//! # Currency & Percent Formatting
//!
//! Presentation-boundary adapters. The engine operates on plain integer
//! [`Money`] and [`TaxRate`] values; everything locale-shaped (₩ marks,
//! thousands grouping, percent rendering) lives here and never leaks into
//! the calculation contract.
//!
//! Parsers follow the engine's sentinel convention: malformed input yields
//! the empty value (zero), never an error — a blank cell means "no value".

use maru_core::money::Money;
use maru_core::types::TaxRate;

/// Formats a money value as "₩" plus a thousands-grouped integer.
///
/// The sign precedes the currency mark: `-₩8,000`.
///
/// ```rust
/// use maru_core::money::Money;
/// use maru_store::format::format_krw;
///
/// assert_eq!(format_krw(Money::from_won(65_000)), "₩65,000");
/// assert_eq!(format_krw(Money::from_won(-8_000)), "-₩8,000");
/// ```
pub fn format_krw(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}₩{}", sign, group_thousands(amount.won().unsigned_abs()))
}

/// Parses a currency string, stripping ₩, commas, and whitespace in any
/// combination. Malformed input yields the zero sentinel.
pub fn parse_krw(input: &str) -> Money {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '₩' && *c != ',' && !c.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .map(|value| Money::from_won(value.round() as i64))
        .unwrap_or_default()
}

/// Formats a fraction as a percentage with one decimal: 0.133 → "13.3%".
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Parses a percent string back to a fraction: "13.3%" → 0.133.
/// Malformed input yields 0.0.
pub fn parse_percent(input: &str) -> f64 {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '%' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().map(|v| v / 100.0).unwrap_or(0.0)
}

/// [`format_percent`] over a [`TaxRate`]: 1330 bps → "13.3%".
pub fn format_tax_rate(rate: TaxRate) -> String {
    format_percent(rate.rate())
}

/// Parses a percent string into a [`TaxRate`]: "13.3%" → 1330 bps.
pub fn parse_tax_rate(input: &str) -> TaxRate {
    TaxRate::from_rate(parse_percent(input))
}

/// Groups an unsigned integer into comma-separated thousands.
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push(value % 1_000);
        value /= 1_000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(group) = groups.pop() {
        out.push_str(&format!(",{:03}", group));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Clipboard Import
//!
//! Turns spreadsheet clipboard text (tab-separated cells, newline-delimited
//! records) into settlement rows.
//!
//! ## Import Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "홍길동\tSKT\t50000\n..."                                              │
//! │        │                                                                │
//! │        ▼ parse_clipboard(text, columns)    positional cell → column     │
//! │  [{customerName: "홍길동", carrier: "SKT", priceSettling: "50000"}]      │
//! │        │                                                                │
//! │        ▼ row_from_record(record, profile)                               │
//! │  carrier/type → substring normalizer      (paste auto-correct)          │
//! │  amounts      → sentinel parser           (blank cell = no value)       │
//! │  rate         → percent-or-fraction parse                               │
//! │        │                                                                │
//! │        ▼ calculate()                                                    │
//! │  SettlementRow with derived fields set                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use maru_core::calculate::calculate;
use maru_core::money::Money;
use maru_core::normalize::{normalize_activation_type, normalize_carrier};
use maru_core::types::{DealerProfile, SettlementRow, TaxRate};
use uuid::Uuid;

/// One parsed clipboard record: column name → raw cell text.
pub type Record = BTreeMap<String, String>;

/// Parses clipboard text into flat records.
///
/// Cells map positionally onto the caller-supplied column list: first
/// column ← first tab-cell and so on. Excess cells beyond the column list
/// are dropped silently; short rows leave the remaining columns unset.
/// Blank lines (and the trailing newline Excel appends) are skipped.
/// `\r\n` line endings are tolerated.
///
/// ```rust
/// use maru_store::import::parse_clipboard;
///
/// let records = parse_clipboard("a\tb\tc\nd\te\tf", &["x", "y", "z"]);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0]["x"], "a");
/// assert_eq!(records[1]["z"], "f");
/// ```
pub fn parse_clipboard(text: &str, columns: &[&str]) -> Vec<Record> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            columns
                .iter()
                .zip(line.split('\t'))
                .map(|(column, cell)| (column.to_string(), cell.to_string()))
                .collect()
        })
        .collect()
}

/// Builds a settlement row from a flat record, seeding unset policy fields
/// from the dealer profile when one is supplied.
///
/// Free-text carrier/type cells run through the substring normalizer;
/// unrecognized values survive untouched for the validator to flag.
/// Derived fields are calculated before the row is returned.
pub fn row_from_record(record: &Record, profile: Option<&DealerProfile>) -> SettlementRow {
    let mut row = match profile {
        Some(profile) => seeded_row(profile),
        None => SettlementRow {
            id: Uuid::new_v4().to_string(),
            ..Default::default()
        },
    };

    for (column, cell) in record {
        apply_field(&mut row, column, cell);
    }

    calculate(&mut row);
    row
}

/// Creates a fresh row carrying a dealer profile's default policy values.
pub fn seeded_row(profile: &DealerProfile) -> SettlementRow {
    SettlementRow {
        id: Uuid::new_v4().to_string(),
        dealer: profile.dealer.clone(),
        carrier: profile
            .default_carrier
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
        activation_type: profile
            .default_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        sim_fee: profile.sim_fee,
        mnp_discount: profile.mnp_discount,
        document_cash: profile.document_cash,
        tax_rate: profile.tax_rate,
        ..Default::default()
    }
}

/// Applies one record cell onto a row field, by camelCase column name.
/// Unknown column names are ignored.
fn apply_field(row: &mut SettlementRow, column: &str, cell: &str) {
    match column {
        "seller" => row.seller = cell.trim().to_string(),
        "dealer" => row.dealer = cell.trim().to_string(),
        "carrier" => row.carrier = normalize_carrier(cell),
        "activationType" => row.activation_type = normalize_activation_type(cell),
        "modelName" => row.model_name = cell.trim().to_string(),
        "activationDate" => row.activation_date = cell.trim().to_string(),
        "customerName" => row.customer_name = cell.trim().to_string(),
        "memo" => row.memo = cell.trim().to_string(),
        "priceSettling" => row.price_settling = parse_amount(cell),
        "verbal1" => row.verbal1 = parse_amount(cell),
        "verbal2" => row.verbal2 = parse_amount(cell),
        "gradeAmount" => row.grade_amount = parse_amount(cell),
        "additionalAmount" => row.additional_amount = parse_amount(cell),
        "cashReceived" => row.cash_received = parse_amount(cell),
        "payback" => row.payback = parse_amount(cell),
        "simFee" => row.sim_fee = parse_amount(cell),
        "mnpDiscount" => row.mnp_discount = parse_amount(cell),
        "documentCash" => row.document_cash = parse_amount(cell),
        "taxRate" => row.tax_rate = parse_rate(cell),
        _ => {}
    }
}

/// Sentinel amount parser: strips ₩/commas/whitespace; a blank or malformed
/// cell means "no value" (None), never an error.
pub fn parse_amount(cell: &str) -> Option<Money> {
    let cleaned: String = cell
        .chars()
        .filter(|c| *c != '₩' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .map(|value| Money::from_won(value.round() as i64))
}

/// Rate cells come in two shapes: "13.3%" (percent) or "0.133" (fraction).
/// A bare number ≤ 1 is read as a fraction; anything with a % mark as a
/// percentage. Blank or malformed cells mean "no value".
pub fn parse_rate(cell: &str) -> Option<TaxRate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('%') {
        let cleaned: String = trimmed
            .chars()
            .filter(|c| *c != '%' && !c.is_whitespace())
            .collect();
        return cleaned
            .parse::<f64>()
            .ok()
            .map(|pct| TaxRate::from_rate(pct / 100.0));
    }
    trimmed.parse::<f64>().ok().map(TaxRate::from_rate)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validator
//!
//! Row validation, the save-gate between user edits and persistence.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard frontend                                            │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate per-keystroke feedback                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Required fields, vocabulary membership, date shape                 │
//! │  └── validate_all_rows() gates every save action                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend persistence (external collaborator)                   │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The validator never panics and never returns `Err`: every problem it
//! finds lands in a field→message map and the caller decides what to do.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::normalize::{map_activation_type, map_carrier};
use crate::types::{ActivationType, Carrier, FieldErrors, SettlementRow};

/// Validates one row, returning a field→message map.
///
/// An empty map means the row is valid. All issues are reported at once so
/// the dashboard can highlight every offending cell in a single pass.
/// Field keys are the camelCase wire names the dashboard highlights.
pub fn validate_row(row: &SettlementRow) -> FieldErrors {
    let mut errors = FieldErrors::new();

    // Required non-empty after trim, paired with the Korean label shown
    // in the message
    let required: [(&str, &str, &str); 7] = [
        ("seller", "판매자", &row.seller),
        ("dealer", "대리점", &row.dealer),
        ("carrier", "통신사", &row.carrier),
        ("activationType", "개통유형", &row.activation_type),
        ("modelName", "모델명", &row.model_name),
        ("activationDate", "개통일", &row.activation_date),
        ("customerName", "고객명", &row.customer_name),
    ];
    for (field, label, value) in required {
        if value.trim().is_empty() {
            errors.insert(
                field.to_string(),
                ValidationError::Required {
                    label: label.to_string(),
                }
                .to_string(),
            );
        }
    }

    // Vocabulary membership, checked only when the field is present;
    // the exact-map lookup runs first so short codes like "sk" pass.
    if !row.carrier.trim().is_empty() && Carrier::from_code(&map_carrier(&row.carrier)).is_none() {
        errors.insert(
            "carrier".to_string(),
            ValidationError::InvalidCarrier.to_string(),
        );
    }

    if !row.activation_type.trim().is_empty()
        && ActivationType::from_code(&map_activation_type(&row.activation_type)).is_none()
    {
        errors.insert(
            "activationType".to_string(),
            ValidationError::InvalidActivationType.to_string(),
        );
    }

    if !row.activation_date.trim().is_empty() && !is_valid_activation_date(&row.activation_date) {
        errors.insert(
            "activationDate".to_string(),
            ValidationError::InvalidDate.to_string(),
        );
    }

    if let Some(price) = row.price_settling {
        if price.is_negative() {
            errors.insert(
                "priceSettling".to_string(),
                ValidationError::MustBeNonNegative {
                    label: "액면가".to_string(),
                }
                .to_string(),
            );
        }
    }

    // Rate range is checked only when set and non-zero; zero means
    // "use the default rate" and is not an input error.
    if let Some(rate) = row.tax_rate {
        if !rate.is_zero() && !rate.in_range() {
            errors.insert(
                "taxRate".to_string(),
                ValidationError::TaxRateOutOfRange.to_string(),
            );
        }
    }

    errors
}

/// Save-gate: true iff every row validates cleanly.
pub fn validate_all_rows(rows: &[SettlementRow]) -> bool {
    rows.iter().all(|row| validate_row(row).is_empty())
}

/// Strict `YYYY-MM-DD` calendar-date check.
///
/// Three gates, in order:
/// 1. Shape: exactly 10 bytes, digits everywhere, hyphens at 4 and 7.
///    (chrono alone would accept unpadded forms like "2024-2-3".)
/// 2. Parse: must be a real calendar date (rejects 2024-02-30).
/// 3. Round-trip: re-serializing the parsed date must reproduce the input.
pub fn is_valid_activation_date(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return false;
    }

    match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string() == input,
        Err(_) => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Domain Types
//!
//! Core domain types for the settlement engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │  SettlementRow   │   │  DealerProfile   │   │ SettlementTotals │    │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │    │
//! │  │  id (UUID)       │   │  dealer          │   │  count           │    │
//! │  │  input fields    │   │  policy defaults │   │  five sums       │    │
//! │  │  policy fields   │   │  default carrier │   │  avg_margin      │    │
//! │  │  derived fields  │   │  default type    │   └──────────────────┘    │
//! │  └──────────────────┘   └──────────────────┘                           │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │     TaxRate      │   │     Carrier      │   │  ActivationType  │    │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │    │
//! │  │  bps (i32)       │   │  SKT / KT /      │   │  신규 / MNP /     │    │
//! │  │  1330 = 13.3%    │   │  LGU+ / MVNO     │   │  기변             │    │
//! │  └──────────────────┘   └──────────────────┘   └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Absent-Means-Zero Contract
//! Every monetary input on [`SettlementRow`] is an `Option<Money>`: a blank
//! cell in the dashboard or a short clipboard row means "no value", and the
//! calculator reads it as zero through one explicit boundary helper instead
//! of null-coalescing scattered through formulas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1330 bps = 13.3%, the standard withholding applied to settlements.
///
/// ## Why Signed?
/// Rates are parsed from user input. A negative rate must survive
/// construction so the validator can reject it with a message rather than
/// the constructor silently clamping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(i32);

/// Withholding rate applied when a row carries no rate of its own: 13.3%.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(1330);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: i32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a fraction (0.133 → 1330 bps).
    pub fn from_rate(rate: f64) -> Self {
        TaxRate((rate * 10_000.0).round() as i32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> i32 {
        self.0
    }

    /// Returns the rate as a fraction (1330 bps → 0.133).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Returns the rate as a percentage (1330 bps → 13.3, display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks the rate is a valid fraction: 0 ≤ rate ≤ 1.
    #[inline]
    pub const fn in_range(&self) -> bool {
        self.0 >= 0 && self.0 <= 10_000
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Carrier
// =============================================================================

/// Mobile carrier, the closed vocabulary persisted to the backend.
///
/// Free-text input (paste import, quick typing) is mapped onto this set by
/// [`crate::normalize`]; the validator is the gate that enforces membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Carrier {
    #[serde(rename = "SKT")]
    Skt,
    #[serde(rename = "KT")]
    Kt,
    #[serde(rename = "LGU+")]
    LguPlus,
    #[serde(rename = "MVNO")]
    Mvno,
}

impl Carrier {
    /// All carriers, in display order.
    pub const ALL: [Carrier; 4] = [Carrier::Skt, Carrier::Kt, Carrier::LguPlus, Carrier::Mvno];

    /// Canonical wire string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Carrier::Skt => "SKT",
            Carrier::Kt => "KT",
            Carrier::LguPlus => "LGU+",
            Carrier::Mvno => "MVNO",
        }
    }

    /// Strict exact-match lookup table (CARRIER_MAP).
    ///
    /// Accepts the canonical strings plus the short codes clerks actually
    /// type. Returns `None` for anything else; callers decide whether that
    /// is a passthrough (normalizer) or an error (validator).
    pub fn from_code(code: &str) -> Option<Carrier> {
        match code.trim().to_lowercase().as_str() {
            "sk" | "skt" => Some(Carrier::Skt),
            "kt" => Some(Carrier::Kt),
            "lg" | "lgu" | "lgu+" | "lg u+" => Some(Carrier::LguPlus),
            "mvno" | "알뜰" | "알뜰폰" => Some(Carrier::Mvno),
            _ => None,
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Activation Type
// =============================================================================

/// How the handset was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ActivationType {
    /// 신규 - brand new line
    #[serde(rename = "신규")]
    New,
    /// MNP - number portability from another carrier
    #[serde(rename = "MNP")]
    Mnp,
    /// 기변 - device change on an existing line
    #[serde(rename = "기변")]
    DeviceChange,
}

impl ActivationType {
    /// All activation types, in display order.
    pub const ALL: [ActivationType; 3] = [
        ActivationType::New,
        ActivationType::Mnp,
        ActivationType::DeviceChange,
    ];

    /// Canonical wire string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActivationType::New => "신규",
            ActivationType::Mnp => "MNP",
            ActivationType::DeviceChange => "기변",
        }
    }

    /// Strict exact-match lookup table (typeMap).
    pub fn from_code(code: &str) -> Option<ActivationType> {
        match code.trim().to_lowercase().as_str() {
            "신규" | "new" => Some(ActivationType::New),
            "mnp" | "번호이동" | "번이" => Some(ActivationType::Mnp),
            "기변" | "기기변경" => Some(ActivationType::DeviceChange),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Settlement Row
// =============================================================================

/// Field-keyed validation messages; an empty map means the row is valid.
pub type FieldErrors = BTreeMap<String, String>;

/// One commission/settlement transaction.
///
/// ## Field Groups
/// - **Input fields**: user-supplied, mutable until saved. Carrier and
///   activation type stay `String` here so unrecognized free text survives
///   normalization untouched and is caught by the validator, not lost.
/// - **Policy fields**: per-dealer defaults seeded by [`DealerProfile`].
/// - **Derived fields**: overwritten by [`crate::calculate::calculate`] on
///   every call; never authoritative, always recomputable from the inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SettlementRow {
    /// Unique identifier (UUID v4).
    #[serde(default)]
    pub id: String,

    // --- input fields -------------------------------------------------------
    /// Salesperson who closed the activation.
    #[serde(default)]
    pub seller: String,

    /// Dealer/branch the activation settles against.
    #[serde(default)]
    pub dealer: String,

    /// Carrier code; canonical values are "SKT", "KT", "LGU+", "MVNO".
    #[serde(default)]
    pub carrier: String,

    /// Activation type; canonical values are "신규", "MNP", "기변".
    #[serde(default)]
    pub activation_type: String,

    /// Handset model name.
    #[serde(default)]
    pub model_name: String,

    /// Activation date, always the literal form `YYYY-MM-DD`.
    #[serde(default)]
    pub activation_date: String,

    /// Customer name.
    #[serde(default)]
    pub customer_name: String,

    /// Face-value settlement price (액면가), must be ≥ 0.
    #[serde(default)]
    pub price_settling: Option<Money>,

    /// First verbal/unofficial rebate (구두1).
    #[serde(default)]
    pub verbal1: Option<Money>,

    /// Second verbal/unofficial rebate (구두2).
    #[serde(default)]
    pub verbal2: Option<Money>,

    /// Grade incentive (그레이드).
    #[serde(default)]
    pub grade_amount: Option<Money>,

    /// Additional incentive (부가추가).
    #[serde(default)]
    pub additional_amount: Option<Money>,

    /// Cash collected from the customer; magnitude used, forced positive.
    #[serde(default)]
    pub cash_received: Option<Money>,

    /// Payback promised to the customer; magnitude used, forced negative.
    #[serde(default)]
    pub payback: Option<Money>,

    /// Free-form note.
    #[serde(default)]
    pub memo: String,

    // --- policy fields ------------------------------------------------------
    /// SIM fee (유심비); magnitude used, forced positive.
    #[serde(default)]
    pub sim_fee: Option<Money>,

    /// MNP discount (차감); magnitude used, forced negative.
    #[serde(default)]
    pub mnp_discount: Option<Money>,

    /// Document cash (서류상현금), deducted from the settlement.
    #[serde(default)]
    pub document_cash: Option<Money>,

    /// Withholding rate; falls back to [`DEFAULT_TAX_RATE`] when unset or zero.
    #[serde(default)]
    pub tax_rate: Option<TaxRate>,

    // --- derived fields -----------------------------------------------------
    /// 총 리베이트: sum of the five rebate components.
    #[serde(default)]
    pub total_rebate: Money,

    /// 정산금: rebate net of document cash and SIM/MNP adjustments.
    #[serde(default)]
    pub settlement_amount: Money,

    /// 세금: settlement × rate, the one rounded line.
    #[serde(default)]
    pub tax: Money,

    /// 세전마진: settlement − tax + cash-in − payback.
    #[serde(default)]
    pub margin_before_tax: Money,

    /// 세후마진: alias of `margin_before_tax` (tax is already netted in
    /// step 4). Downstream consumers read both names; keep both.
    #[serde(default)]
    pub margin_after_tax: Money,

    // --- validation ---------------------------------------------------------
    /// Field-keyed validation messages; empty means the row is valid.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: FieldErrors,
}

// =============================================================================
// Dealer Profile
// =============================================================================

/// Per-branch/dealer default policy values.
///
/// Applied once when a new row is created for the dealer; never mutates
/// rows that already exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DealerProfile {
    /// Dealer/branch name this profile belongs to.
    pub dealer: String,

    /// Default SIM fee.
    #[serde(default)]
    pub sim_fee: Option<Money>,

    /// Default MNP discount.
    #[serde(default)]
    pub mnp_discount: Option<Money>,

    /// Default document cash.
    #[serde(default)]
    pub document_cash: Option<Money>,

    /// Default withholding rate.
    #[serde(default)]
    pub tax_rate: Option<TaxRate>,

    /// Default carrier for this dealer's activations.
    #[serde(default)]
    pub default_carrier: Option<Carrier>,

    /// Default activation type.
    #[serde(default)]
    pub default_type: Option<ActivationType>,
}

// =============================================================================
// Settlement Totals
// =============================================================================

/// Summary totals over a row set, as shown on the dashboard footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SettlementTotals {
    /// Number of rows aggregated.
    pub count: usize,

    /// Sum of total rebates.
    pub total_rebate: Money,

    /// Sum of settlement amounts.
    pub settlement_amount: Money,

    /// Sum of tax lines.
    pub tax: Money,

    /// Sum of pre-tax margins.
    pub margin_before_tax: Money,

    /// Sum of post-tax margins.
    pub margin_after_tax: Money,

    /// Average post-tax margin per row; 0 when the set is empty.
    pub avg_margin: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_conversions() {
        let rate = TaxRate::from_rate(0.133);
        assert_eq!(rate.bps(), 1330);
        assert!((rate.rate() - 0.133).abs() < 1e-9);
        assert!((rate.percentage() - 13.3).abs() < 1e-9);
    }

    #[test]
    fn test_tax_rate_range() {
        assert!(TaxRate::from_bps(0).in_range());
        assert!(TaxRate::from_bps(10_000).in_range());
        assert!(!TaxRate::from_bps(10_001).in_range());
        assert!(!TaxRate::from_bps(-1).in_range());
    }

    #[test]
    fn test_carrier_codes() {
        assert_eq!(Carrier::from_code("sk"), Some(Carrier::Skt));
        assert_eq!(Carrier::from_code("SKT"), Some(Carrier::Skt));
        assert_eq!(Carrier::from_code("lgu+"), Some(Carrier::LguPlus));
        assert_eq!(Carrier::from_code("알뜰"), Some(Carrier::Mvno));
        assert_eq!(Carrier::from_code("xyz"), None);
        assert_eq!(Carrier::LguPlus.as_str(), "LGU+");
    }

    #[test]
    fn test_activation_type_codes() {
        assert_eq!(ActivationType::from_code("번호이동"), Some(ActivationType::Mnp));
        assert_eq!(ActivationType::from_code("번이"), Some(ActivationType::Mnp));
        assert_eq!(
            ActivationType::from_code("기기변경"),
            Some(ActivationType::DeviceChange)
        );
        assert_eq!(ActivationType::from_code("new"), Some(ActivationType::New));
        assert_eq!(ActivationType::from_code("??"), None);
    }

    #[test]
    fn test_enum_wire_strings() {
        let json = serde_json::to_string(&Carrier::LguPlus).unwrap();
        assert_eq!(json, "\"LGU+\"");
        let json = serde_json::to_string(&ActivationType::DeviceChange).unwrap();
        assert_eq!(json, "\"기변\"");
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = SettlementRow {
            price_settling: Some(Money::from_won(50_000)),
            ..Default::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("priceSettling").is_some());
        assert!(json.get("marginAfterTax").is_some());
        // empty error map is omitted from the wire format
        assert!(json.get("errors").is_none());
    }
}

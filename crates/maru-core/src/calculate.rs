//! # Settlement Calculator
//!
//! The five-step pipeline that turns a row's raw commission inputs into its
//! derived monetary fields.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. total_rebate      = price + verbal1 + verbal2 + grade + additional  │
//! │                                                                         │
//! │  2. settlement_amount = total_rebate − document_cash                    │
//! │                           + |sim_fee| − |mnp_discount|                  │
//! │                         (signs FORCED, whatever the clerk typed)        │
//! │                                                                         │
//! │  3. tax               = round(settlement_amount × rate)                 │
//! │                         rate defaults to 13.3% when unset or zero       │
//! │                                                                         │
//! │  4. margin_before_tax = settlement_amount − tax                         │
//! │                           + |cash_received| − |payback|                 │
//! │                                                                         │
//! │  5. margin_after_tax  = margin_before_tax   (alias, kept on purpose)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - **Total**: never fails. Absent numeric inputs read as zero.
//! - **Pure**: reads only input/policy fields, writes only derived fields,
//!   so calling it on its own output changes nothing (idempotent).
//! - **Cheap**: a handful of integer adds per row; safe to run on every
//!   keystroke.

use crate::money::Money;
use crate::types::{SettlementRow, DEFAULT_TAX_RATE};

/// The absent-means-zero boundary: every optional amount crosses into the
/// formulas through this one helper.
#[inline]
fn amount(value: Option<Money>) -> Money {
    value.unwrap_or_default()
}

/// Computes and overwrites the five derived fields on a row.
///
/// All five are rewritten on every call; previously stored derived values
/// are discarded, never read. The aggregator relies on this to ignore stale
/// derived data on imported rows.
///
/// ```rust
/// use maru_core::calculate::calculate;
/// use maru_core::money::Money;
/// use maru_core::types::SettlementRow;
///
/// let mut row = SettlementRow {
///     price_settling: Some(Money::from_won(50_000)),
///     verbal1: Some(Money::from_won(10_000)),
///     ..Default::default()
/// };
/// calculate(&mut row);
/// assert_eq!(row.total_rebate.won(), 60_000);
/// ```
pub fn calculate(row: &mut SettlementRow) {
    // 1. Gross rebate: the five commission components
    let total_rebate = amount(row.price_settling)
        + amount(row.verbal1)
        + amount(row.verbal2)
        + amount(row.grade_amount)
        + amount(row.additional_amount);

    // 2. Settlement: document cash comes off, SIM fee is forced positive,
    //    MNP discount forced negative, regardless of stored sign
    let settlement_amount = total_rebate - amount(row.document_cash)
        + amount(row.sim_fee).abs()
        - amount(row.mnp_discount).abs();

    // 3. Tax line, the single rounding step. Unset or zero rate → default.
    let rate = row
        .tax_rate
        .filter(|r| !r.is_zero())
        .unwrap_or(DEFAULT_TAX_RATE);
    let tax = settlement_amount.apply_tax_rate(rate);

    // 4. Margin: same sign-forcing pattern for cash-in / payback
    let margin_before_tax =
        settlement_amount - tax + amount(row.cash_received).abs() - amount(row.payback).abs();

    row.total_rebate = total_rebate;
    row.settlement_amount = settlement_amount;
    row.tax = tax;
    row.margin_before_tax = margin_before_tax;
    // 5. Tax is already netted in step 4; downstream consumers read both
    //    margin names, so the alias is written, not derived differently.
    row.margin_after_tax = margin_before_tax;
}

/// Convenience: calculates on a clone and returns it, leaving the original
/// untouched. Used where the caller only has a shared reference.
pub fn calculated(row: &SettlementRow) -> SettlementRow {
    let mut computed = row.clone();
    calculate(&mut computed);
    computed
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxRate;

    fn reference_row() -> SettlementRow {
        SettlementRow {
            price_settling: Some(Money::from_won(50_000)),
            verbal1: Some(Money::from_won(10_000)),
            verbal2: Some(Money::zero()),
            grade_amount: Some(Money::from_won(5_000)),
            additional_amount: Some(Money::zero()),
            document_cash: Some(Money::from_won(10_000)),
            sim_fee: Some(Money::from_won(5_500)),
            mnp_discount: Some(Money::from_won(-8_000)),
            tax_rate: Some(TaxRate::from_rate(0.133)),
            cash_received: Some(Money::zero()),
            payback: Some(Money::zero()),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_case_end_to_end() {
        let mut row = reference_row();
        calculate(&mut row);

        assert_eq!(row.total_rebate.won(), 65_000);
        // 65,000 − 10,000 + |5,500| − |−8,000| = 52,500
        assert_eq!(row.settlement_amount.won(), 52_500);
        // round(52,500 × 0.133) = round(6,982.5) = 6,983
        assert_eq!(row.tax.won(), 6_983);
        assert_eq!(row.margin_before_tax.won(), 45_517);
        assert_eq!(row.margin_after_tax.won(), 45_517);
    }

    #[test]
    fn test_idempotent() {
        let mut once = reference_row();
        calculate(&mut once);
        let mut twice = once.clone();
        calculate(&mut twice);

        assert_eq!(once.total_rebate, twice.total_rebate);
        assert_eq!(once.settlement_amount, twice.settlement_amount);
        assert_eq!(once.tax, twice.tax);
        assert_eq!(once.margin_before_tax, twice.margin_before_tax);
        assert_eq!(once.margin_after_tax, twice.margin_after_tax);
    }

    #[test]
    fn test_stale_derived_fields_are_overwritten() {
        let mut row = reference_row();
        row.total_rebate = Money::from_won(999_999);
        row.tax = Money::from_won(-1);
        calculate(&mut row);

        assert_eq!(row.total_rebate.won(), 65_000);
        assert_eq!(row.tax.won(), 6_983);
    }

    #[test]
    fn test_sign_forcing_sim_fee_and_mnp_discount() {
        let mut positive = reference_row();
        positive.sim_fee = Some(Money::from_won(5_500));
        positive.mnp_discount = Some(Money::from_won(8_000));
        calculate(&mut positive);

        let mut negative = reference_row();
        negative.sim_fee = Some(Money::from_won(-5_500));
        negative.mnp_discount = Some(Money::from_won(-8_000));
        calculate(&mut negative);

        // same settlement either way: +|sim_fee| − |mnp_discount|
        assert_eq!(positive.settlement_amount, negative.settlement_amount);
        assert_eq!(positive.settlement_amount.won(), 52_500);
    }

    #[test]
    fn test_sign_forcing_cash_received_and_payback() {
        let mut row = reference_row();
        row.cash_received = Some(Money::from_won(-30_000));
        row.payback = Some(Money::from_won(-20_000));
        calculate(&mut row);

        // 45,517 + |−30,000| − |−20,000|
        assert_eq!(row.margin_before_tax.won(), 55_517);
        assert_eq!(row.margin_after_tax.won(), 55_517);
    }

    #[test]
    fn test_absent_inputs_read_as_zero() {
        let mut row = SettlementRow::default();
        calculate(&mut row);

        assert_eq!(row.total_rebate, Money::zero());
        assert_eq!(row.settlement_amount, Money::zero());
        assert_eq!(row.tax, Money::zero());
        assert_eq!(row.margin_before_tax, Money::zero());
        assert_eq!(row.margin_after_tax, Money::zero());
    }

    #[test]
    fn test_default_rate_when_unset_or_zero() {
        let mut unset = reference_row();
        unset.tax_rate = None;
        calculate(&mut unset);
        assert_eq!(unset.tax.won(), 6_983); // default 13.3%

        let mut zeroed = reference_row();
        zeroed.tax_rate = Some(TaxRate::zero());
        calculate(&mut zeroed);
        assert_eq!(zeroed.tax.won(), 6_983);

        let mut custom = reference_row();
        custom.tax_rate = Some(TaxRate::from_rate(0.1));
        calculate(&mut custom);
        assert_eq!(custom.tax.won(), 5_250);
    }

    #[test]
    fn test_calculated_leaves_original_untouched() {
        let row = reference_row();
        let computed = calculated(&row);

        assert_eq!(row.total_rebate, Money::zero());
        assert_eq!(computed.total_rebate.won(), 65_000);
    }
}

//! # Aggregator
//!
//! Rolls a row set up into the dashboard footer totals.
//!
//! Every row is recalculated before accumulation: rows often arrive from a
//! paste or a backend fetch carrying derived fields computed elsewhere, and
//! the aggregator never trusts them. Sums are plain integer sums, so
//! accumulation order cannot affect the result.

use crate::calculate::calculated;
use crate::types::{SettlementRow, SettlementTotals};

/// Aggregates a row set into summary totals.
///
/// - Recomputes each row's derived fields before summing.
/// - `avg_margin` is the mean post-tax margin; 0 for an empty set (no
///   division-by-zero path).
///
/// ```rust
/// use maru_core::aggregate::aggregate_totals;
///
/// let totals = aggregate_totals(&[]);
/// assert_eq!(totals.count, 0);
/// assert_eq!(totals.avg_margin, 0.0);
/// ```
pub fn aggregate_totals(rows: &[SettlementRow]) -> SettlementTotals {
    let mut totals = SettlementTotals {
        count: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let computed = calculated(row);
        totals.total_rebate += computed.total_rebate;
        totals.settlement_amount += computed.settlement_amount;
        totals.tax += computed.tax;
        totals.margin_before_tax += computed.margin_before_tax;
        totals.margin_after_tax += computed.margin_after_tax;
    }

    totals.avg_margin = if totals.count > 0 {
        totals.margin_after_tax.won() as f64 / totals.count as f64
    } else {
        0.0
    };

    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

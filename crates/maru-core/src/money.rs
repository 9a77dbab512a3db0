//! # Money Module
//!
//! Provides the `Money` type for handling Korean won amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Settlement rows add and subtract five to ten amounts per row and      │
//! │  thousands of rows per month. Drift compounds.                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Won                                              │
//! │    KRW has no minor unit, so i64 won is exact for every amount a       │
//! │    branch will ever settle. The single rounding step in the pipeline   │
//! │    (the tax line) is explicit and tested.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use maru_core::money::Money;
//!
//! let rebate = Money::from_won(65_000);
//! let doc_cash = Money::from_won(10_000);
//! assert_eq!((rebate - doc_cash).won(), 55_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Korean won.
///
/// ## Design Decisions
/// - **i64 (signed)**: rebate deductions, paybacks, and negative margins are
///   all legitimate values in a settlement row
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for the dashboard wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    ///
    /// ## Example
    /// ```rust
    /// use maru_core::money::Money;
    ///
    /// let price = Money::from_won(50_000);
    /// assert_eq!(price.won(), 50_000);
    /// ```
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
    }

    /// Returns zero won.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// Sign-forced fields (SIM fee, MNP discount, cash received, payback)
    /// go through this before entering a formula, so a clerk typing
    /// `-8000` or `8000` for an MNP discount produces the same settlement.
    ///
    /// ## Example
    /// ```rust
    /// use maru_core::money::Money;
    ///
    /// let discount = Money::from_won(-8_000);
    /// assert_eq!(discount.abs().won(), 8_000);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates the tax line: `round(amount × rate)`.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF AWAY FROM ZERO                                          │
    /// │                                                                     │
    /// │  This is the only rounding step in the whole pipeline.             │
    /// │  52,500 × 0.133 = 6,982.5 → 6,983 won                              │
    /// │  Negative settlements mirror:  -6,982.5 → -6,983 won               │
    /// │                                                                     │
    /// │  Matches how the branch ledgers have always rounded the tax line;  │
    /// │  truncation or round-half-to-even would drift from the books.      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps ± 5000) / 10000` with the
    /// correction signed like the numerator.
    ///
    /// ## Example
    /// ```rust
    /// use maru_core::money::Money;
    /// use maru_core::types::TaxRate;
    ///
    /// let settlement = Money::from_won(52_500);
    /// let tax = settlement.apply_tax_rate(TaxRate::from_bps(1330)); // 13.3%
    /// assert_eq!(tax.won(), 6_983);
    /// ```
    pub fn apply_tax_rate(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large settlements
        let numerator = self.0 as i128 * rate.bps() as i128;
        let tax = if numerator >= 0 {
            (numerator + 5_000) / 10_000
        } else {
            (numerator - 5_000) / 10_000
        };
        Money::from_won(tax as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use `maru_store::format::format_krw` for actual
/// UI display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}원", self.0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation (for forced-negative policy fields).
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Summation over iterators (used by the aggregator).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # maru-core: Pure Settlement Engine for Maru Settle
//!
//! This crate is the **heart** of Maru Settle. It turns raw mobile-phone
//! commission rows into settlement amounts and margins as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Maru Settle Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard Frontend (React)                       │   │
//! │  │    Row grid ──► Paste import ──► Totals footer ──► Save         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST / IPC                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    maru-store                                    │   │
//! │  │    working-set container, clipboard import, ₩/％ formatting      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ maru-core (THIS CRATE) ★                         │   │
//! │  │                                                                  │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐       │   │
//! │  │   │ normalize │ │ validate  │ │ calculate │ │ aggregate │       │   │
//! │  │   │ carriers  │ │ save-gate │ │ 5 derived │ │  totals   │       │   │
//! │  │   │ & types   │ │ field map │ │  fields   │ │ avg margin│       │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘ └───────────┘       │   │
//! │  │                                                                  │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (SettlementRow, DealerProfile, TaxRate, …)
//! - [`money`] - Money type with integer won arithmetic (no floating point!)
//! - [`normalize`] - Free-text carrier/type normalization, passthrough on miss
//! - [`validate`] - Row validation producing field→message maps
//! - [`calculate`] - The five-step derived-field pipeline
//! - [`aggregate`] - Row-set totals for the dashboard footer
//! - [`error`] - Typed validation messages
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same row in, same derived fields out
//! 2. **No I/O**: persistence and HTTP are external collaborators
//! 3. **Integer Money**: whole won in i64; one explicit rounding step (tax)
//! 4. **Never throw at the user**: the calculator is total, the normalizer
//!    passes unknown input through, the validator reports a map
//!
//! ## Example Usage
//!
//! ```rust
//! use maru_core::calculate::calculate;
//! use maru_core::money::Money;
//! use maru_core::types::SettlementRow;
//!
//! let mut row = SettlementRow {
//!     price_settling: Some(Money::from_won(50_000)),
//!     verbal1: Some(Money::from_won(10_000)),
//!     grade_amount: Some(Money::from_won(5_000)),
//!     document_cash: Some(Money::from_won(10_000)),
//!     sim_fee: Some(Money::from_won(5_500)),
//!     mnp_discount: Some(Money::from_won(-8_000)),
//!     ..Default::default()
//! };
//!
//! calculate(&mut row);
//! assert_eq!(row.settlement_amount.won(), 52_500);
//! assert_eq!(row.margin_after_tax.won(), 45_517);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod calculate;
pub mod error;
pub mod money;
pub mod normalize;
pub mod types;
pub mod validate;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use maru_core::Money` instead of
// `use maru_core::money::Money`

pub use aggregate::aggregate_totals;
pub use calculate::{calculate, calculated};
pub use error::ValidationError;
pub use money::Money;
pub use types::*;
pub use validate::{validate_all_rows, validate_row};

//! # maru-store: Working-Set Store for Maru Settle
//!
//! The stateful layer between the dashboard frontend and the pure
//! settlement engine in `maru-core`.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          maru-store                                     │
//! │                                                                         │
//! │   ┌───────────┐  ┌───────────┐  ┌───────────┐                          │
//! │   │   store   │  │  import   │  │  format   │                          │
//! │   │ working   │  │ clipboard │  │ ₩ / ％    │                          │
//! │   │   set     │  │   TSV     │  │ adapters  │                          │
//! │   └───────────┘  └───────────┘  └───────────┘                          │
//! │                                                                         │
//! │  Rows in, snapshots and totals out. Persistence (save/load against     │
//! │  the backend API) is an external collaborator that consumes the        │
//! │  snapshot AFTER the save-gate passes.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod format;
pub mod import;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{SettlementStore, StoreState, WorkingSetSnapshot};

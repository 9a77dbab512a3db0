//! # Settlement Store
//!
//! The working set of settlement rows, owned by the UI layer.
//!
//! ## Store Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Working-Set Operations                                  │
//! │                                                                         │
//! │  Frontend Action          Store Call               State Change         │
//! │  ───────────────          ──────────               ────────────         │
//! │                                                                         │
//! │  New row button ─────────► new_row(dealer) ───────► push seeded row     │
//! │                                                                         │
//! │  Edit a cell ────────────► update(id, edit) ──────► edit + recalculate  │
//! │                                                                         │
//! │  Paste from Excel ───────► import_clipboard() ────► push parsed rows    │
//! │                                                                         │
//! │  Delete button ──────────► remove(id) ────────────► drop the row        │
//! │                                                                         │
//! │  Totals footer ──────────► totals() ──────────────► (read only)         │
//! │                                                                         │
//! │  Save button ────────────► validate_all() ────────► error maps written, │
//! │                                                     gate pass/fail      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine itself stays stateless: the store passes rows in and gets
//! rows/aggregates out. Every mutation path re-runs the calculator, so the
//! derived fields a snapshot exposes are never stale.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use maru_core::aggregate::aggregate_totals;
use maru_core::calculate::calculate;
use maru_core::types::{DealerProfile, SettlementRow, SettlementTotals};
use maru_core::validate::validate_row;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::import::{parse_clipboard, row_from_record, seeded_row};

/// The settlement working set plus the dealer profile registry.
#[derive(Debug, Default)]
pub struct SettlementStore {
    rows: Vec<SettlementRow>,
    profiles: BTreeMap<String, DealerProfile>,
}

impl SettlementStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- dealer profiles ----------------------------------------------------

    /// Registers (or replaces) a dealer profile.
    ///
    /// Profiles only affect rows created afterwards; existing rows are
    /// never mutated by a profile change.
    pub fn register_profile(&mut self, profile: DealerProfile) {
        debug!(dealer = %profile.dealer, "registered dealer profile");
        self.profiles.insert(profile.dealer.clone(), profile);
    }

    /// Looks up a dealer's profile.
    pub fn profile(&self, dealer: &str) -> Option<&DealerProfile> {
        self.profiles.get(dealer)
    }

    // --- row lifecycle ------------------------------------------------------

    /// Creates a blank row and returns its id.
    pub fn blank_row(&mut self) -> String {
        let row = SettlementRow {
            id: Uuid::new_v4().to_string(),
            ..Default::default()
        };
        self.push(row)
    }

    /// Creates a row for a dealer, seeding policy defaults from the
    /// dealer's profile when one is registered.
    pub fn new_row(&mut self, dealer: &str) -> String {
        let row = match self.profiles.get(dealer) {
            Some(profile) => seeded_row(profile),
            None => SettlementRow {
                id: Uuid::new_v4().to_string(),
                dealer: dealer.to_string(),
                ..Default::default()
            },
        };
        self.push(row)
    }

    /// Adds an externally built row (assigning an id if it has none) and
    /// returns its id. Derived fields are recomputed on entry; the store
    /// never trusts derived data it did not compute.
    pub fn add_row(&mut self, mut row: SettlementRow) -> String {
        if row.id.is_empty() {
            row.id = Uuid::new_v4().to_string();
        }
        self.push(row)
    }

    fn push(&mut self, mut row: SettlementRow) -> String {
        calculate(&mut row);
        let id = row.id.clone();
        debug!(id = %id, dealer = %row.dealer, "row added");
        self.rows.push(row);
        id
    }

    /// Applies an edit to a row and recalculates its derived fields.
    ///
    /// Every edit path goes through here, so a snapshot taken right after
    /// an update always carries fresh derived values.
    pub fn update<F>(&mut self, id: &str, edit: F) -> StoreResult<()>
    where
        F: FnOnce(&mut SettlementRow),
    {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| StoreError::RowNotFound { id: id.to_string() })?;

        edit(row);
        calculate(row);
        debug!(id = %id, "row updated and recalculated");
        Ok(())
    }

    /// Removes a row from the working set. No soft-delete semantics.
    pub fn remove(&mut self, id: &str) -> StoreResult<()> {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);

        if self.rows.len() == before {
            Err(StoreError::RowNotFound { id: id.to_string() })
        } else {
            debug!(id = %id, "row removed");
            Ok(())
        }
    }

    // --- clipboard import ---------------------------------------------------

    /// Imports clipboard text, one row per non-blank line, cells mapped
    /// positionally onto `columns`. Returns how many rows were added.
    ///
    /// Each record's dealer cell selects the profile whose defaults seed
    /// the unset policy fields.
    pub fn import_clipboard(&mut self, text: &str, columns: &[&str]) -> usize {
        let records = parse_clipboard(text, columns);
        let count = records.len();

        for record in &records {
            let profile = record
                .get("dealer")
                .and_then(|dealer| self.profiles.get(dealer.trim()));
            let row = row_from_record(record, profile);
            self.rows.push(row);
        }

        info!(rows = count, "clipboard import");
        count
    }

    // --- snapshots & aggregates ----------------------------------------------

    /// Read-only snapshot of the working set.
    pub fn rows(&self) -> &[SettlementRow] {
        &self.rows
    }

    /// Looks up one row by id.
    pub fn row(&self, id: &str) -> Option<&SettlementRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Number of rows in the working set.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks if the working set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dashboard footer totals over the current working set.
    pub fn totals(&self) -> SettlementTotals {
        aggregate_totals(&self.rows)
    }

    /// Serializable snapshot for the IPC/REST boundary: the rows as they
    /// stand plus the footer totals, in one payload.
    pub fn snapshot(&self) -> WorkingSetSnapshot {
        WorkingSetSnapshot {
            rows: self.rows.clone(),
            totals: self.totals(),
        }
    }

    // --- save-gate ------------------------------------------------------------

    /// Validates every row, writing each row's field→message map, and
    /// gates the save: `Err(ValidationFailed)` if any row has errors.
    ///
    /// Callers MUST run this before handing the snapshot to persistence.
    pub fn validate_all(&mut self) -> StoreResult<()> {
        let mut invalid_rows = 0;
        for row in &mut self.rows {
            row.errors = validate_row(row);
            if !row.errors.is_empty() {
                invalid_rows += 1;
            }
        }

        if invalid_rows > 0 {
            warn!(invalid_rows, "save blocked by validation");
            Err(StoreError::ValidationFailed { invalid_rows })
        } else {
            Ok(())
        }
    }
}

/// Working-set snapshot for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingSetSnapshot {
    pub rows: Vec<SettlementRow>,
    pub totals: SettlementTotals,
}

// =============================================================================
// Shared State Wrapper
// =============================================================================

/// UI-managed store state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<SettlementStore>>` because:
/// - `Arc`: shared ownership across UI command handlers
/// - `Mutex`: one mutation at a time; edits and totals reads are quick
///
/// ## Why Not RwLock?
/// Store operations are short, and most of them mutate (every edit
/// recalculates). A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    store: Arc<Mutex<SettlementStore>>,
}

impl StoreState {
    /// Creates a new empty store state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SettlementStore) -> R,
    {
        let store = self.store.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SettlementStore) -> R,
    {
        let mut store = self.store.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use maru_core::money::Money;
    use maru_core::types::{Carrier, TaxRate};

    fn test_profile() -> DealerProfile {
        DealerProfile {
            dealer: "본점".to_string(),
            sim_fee: Some(Money::from_won(5_500)),
            mnp_discount: Some(Money::from_won(8_000)),
            document_cash: Some(Money::from_won(10_000)),
            tax_rate: Some(TaxRate::from_bps(1330)),
            default_carrier: Some(Carrier::Skt),
            default_type: None,
        }
    }

    fn fill_valid(row: &mut SettlementRow) {
        row.seller = "김사원".to_string();
        row.dealer = "본점".to_string();
        row.carrier = "SKT".to_string();
        row.activation_type = "신규".to_string();
        row.model_name = "갤럭시 S24".to_string();
        row.activation_date = "2024-03-15".to_string();
        row.customer_name = "홍길동".to_string();
    }

    #[test]
    fn test_new_row_applies_profile_defaults() {
        let mut store = SettlementStore::new();
        store.register_profile(test_profile());

        let id = store.new_row("본점");
        let row = store.row(&id).unwrap();

        assert_eq!(row.dealer, "본점");
        assert_eq!(row.carrier, "SKT");
        assert_eq!(row.sim_fee, Some(Money::from_won(5_500)));
        assert_eq!(row.tax_rate, Some(TaxRate::from_bps(1330)));
    }

    #[test]
    fn test_profile_change_does_not_touch_existing_rows() {
        let mut store = SettlementStore::new();
        store.register_profile(test_profile());
        let id = store.new_row("본점");

        let mut changed = test_profile();
        changed.sim_fee = Some(Money::from_won(7_700));
        store.register_profile(changed);

        assert_eq!(store.row(&id).unwrap().sim_fee, Some(Money::from_won(5_500)));

        let new_id = store.new_row("본점");
        assert_eq!(
            store.row(&new_id).unwrap().sim_fee,
            Some(Money::from_won(7_700))
        );
    }

    #[test]
    fn test_new_row_without_profile_is_blank_for_dealer() {
        let mut store = SettlementStore::new();
        let id = store.new_row("신규지점");
        let row = store.row(&id).unwrap();
        assert_eq!(row.dealer, "신규지점");
        assert_eq!(row.sim_fee, None);
    }

    #[test]
    fn test_update_triggers_recalculation() {
        let mut store = SettlementStore::new();
        let id = store.blank_row();

        store
            .update(&id, |row| {
                row.price_settling = Some(Money::from_won(50_000));
                row.verbal1 = Some(Money::from_won(10_000));
            })
            .unwrap();

        assert_eq!(store.row(&id).unwrap().total_rebate.won(), 60_000);

        store
            .update(&id, |row| row.verbal1 = Some(Money::from_won(20_000)))
            .unwrap();

        assert_eq!(store.row(&id).unwrap().total_rebate.won(), 70_000);
    }

    #[test]
    fn test_update_unknown_row() {
        let mut store = SettlementStore::new();
        let err = store.update("missing", |_| {}).unwrap_err();
        assert!(matches!(err, StoreError::RowNotFound { .. }));
    }

    #[test]
    fn test_remove() {
        let mut store = SettlementStore::new();
        let id = store.blank_row();
        assert_eq!(store.len(), 1);

        store.remove(&id).unwrap();
        assert!(store.is_empty());
        assert!(store.remove(&id).is_err());
    }

    #[test]
    fn test_add_row_recomputes_derived_fields() {
        let mut store = SettlementStore::new();
        let mut row = SettlementRow {
            price_settling: Some(Money::from_won(50_000)),
            ..Default::default()
        };
        // stale derived value the store must not trust
        row.total_rebate = Money::from_won(1);

        let id = store.add_row(row);
        assert_eq!(store.row(&id).unwrap().total_rebate.won(), 50_000);
    }

    #[test]
    fn test_import_clipboard_end_to_end() {
        let mut store = SettlementStore::new();
        store.register_profile(test_profile());

        let text = "홍길동\t본점\tsk\t번호이동\t50000\n김철수\t본점\tLG\t신규\t30000";
        let columns = [
            "customerName",
            "dealer",
            "carrier",
            "activationType",
            "priceSettling",
        ];
        let added = store.import_clipboard(text, &columns);

        assert_eq!(added, 2);
        assert_eq!(store.len(), 2);

        let first = &store.rows()[0];
        assert_eq!(first.carrier, "SKT");
        assert_eq!(first.activation_type, "MNP");
        // profile defaults seeded via the dealer cell
        assert_eq!(first.sim_fee, Some(Money::from_won(5_500)));
        // 50,000 − 10,000 + 5,500 − 8,000 = 37,500
        assert_eq!(first.settlement_amount.won(), 37_500);

        let second = &store.rows()[1];
        assert_eq!(second.carrier, "LGU+");
        assert_eq!(second.activation_type, "신규");
    }

    #[test]
    fn test_totals_follow_edits() {
        let mut store = SettlementStore::new();
        let id = store.blank_row();
        store
            .update(&id, |row| row.price_settling = Some(Money::from_won(50_000)))
            .unwrap();

        let totals = store.totals();
        assert_eq!(totals.count, 1);
        assert_eq!(totals.total_rebate.won(), 50_000);

        store.remove(&id).unwrap();
        assert_eq!(store.totals(), SettlementTotals::default());
    }

    #[test]
    fn test_save_gate_writes_row_errors() {
        let mut store = SettlementStore::new();
        let good = store.blank_row();
        store.update(&good, fill_valid).unwrap();

        let bad = store.blank_row();
        store
            .update(&bad, |row| {
                fill_valid(row);
                row.activation_date = "2024-02-30".to_string();
            })
            .unwrap();

        let err = store.validate_all().unwrap_err();
        assert!(matches!(
            err,
            StoreError::ValidationFailed { invalid_rows: 1 }
        ));
        assert!(store.row(&good).unwrap().errors.is_empty());
        assert!(store
            .row(&bad)
            .unwrap()
            .errors
            .contains_key("activationDate"));

        // fix the date and the gate opens
        store
            .update(&bad, |row| row.activation_date = "2024-02-29".to_string())
            .unwrap();
        assert!(store.validate_all().is_ok());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut store = SettlementStore::new();
        let id = store.blank_row();
        store
            .update(&id, |row| row.price_settling = Some(Money::from_won(50_000)))
            .unwrap();

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["totals"]["count"], 1);
        assert_eq!(json["rows"][0]["totalRebate"], 50_000);
    }

    #[test]
    fn test_store_state_shared_access() {
        let state = StoreState::new();
        let handle = state.clone();

        let id = handle.with_store_mut(|store| store.blank_row());
        handle.with_store_mut(|store| {
            store
                .update(&id, |row| row.price_settling = Some(Money::from_won(1_000)))
                .unwrap();
        });

        let total = state.with_store(|store| store.totals().total_rebate);
        assert_eq!(total.won(), 1_000);
    }
}

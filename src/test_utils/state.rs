use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    local_storage::{DEFAULT_STORAGE_QUOTA, LocalStorage, create_local_storage_table},
    transaction::{EntryForm, LedgerStore, TrackerState},
};

/// Local storage backed by a fresh in-memory database.
pub(crate) fn get_test_storage(quota_bytes: usize) -> LocalStorage {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    create_local_storage_table(&connection).expect("Could not create local storage table");

    LocalStorage::new(Arc::new(Mutex::new(connection)), quota_bytes)
}

/// An empty ledger backed by a fresh in-memory database.
pub(crate) fn get_test_ledger() -> LedgerStore {
    LedgerStore::initialize(get_test_storage(DEFAULT_STORAGE_QUOTA))
}

/// Tracker state with an empty ledger, a closed entry form, UTC dates and
/// rupee amounts.
pub(crate) fn get_tracker_state() -> TrackerState {
    TrackerState {
        ledger: Arc::new(Mutex::new(get_test_ledger())),
        entry_form: Arc::new(Mutex::new(EntryForm::default())),
        local_timezone: "Etc/UTC".to_owned(),
        currency_symbol: "₹".to_owned(),
    }
}

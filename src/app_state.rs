//! Implements a struct that holds the state of the web server.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    Config, Error,
    db::initialize,
    local_storage::LocalStorage,
    offline_cache::OfflineCache,
    transaction::{EntryForm, LedgerStore},
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection that backs local storage.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The ledger of recorded transactions.
    pub ledger: Arc<Mutex<LedgerStore>>,

    /// The draft transaction and whether the entry form is open.
    pub entry_form: Arc<Mutex<EntryForm>>,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The symbol shown in front of amounts, e.g. "₹".
    pub currency_symbol: String,

    /// The directory the manifest and static files are served from.
    pub asset_dir: PathBuf,

    /// Static assets cached for offline use.
    pub offline_cache: OfflineCache,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database and load the ledger from
    /// local storage. The offline cache starts empty; see
    /// [OfflineCache::install].
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, config: &Config) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));
        let storage = LocalStorage::new(connection.clone(), config.storage_quota);
        let ledger = LedgerStore::initialize(storage);

        Ok(Self {
            db_connection: connection,
            ledger: Arc::new(Mutex::new(ledger)),
            entry_form: Arc::new(Mutex::new(EntryForm::default())),
            local_timezone: config.timezone.clone(),
            currency_symbol: config.currency_symbol.clone(),
            asset_dir: config.asset_dir.clone(),
            offline_cache: OfflineCache::new(&config.cache_name),
        })
    }

    /// Save the ledger before the server exits.
    pub fn teardown(&self) {
        match self.ledger.lock() {
            Ok(ledger) => ledger.teardown(),
            Err(error) => tracing::error!("could not acquire ledger lock for teardown: {error}"),
        }
    }
}

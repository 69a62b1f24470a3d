//! The ledger store: the ordered list of transactions and its persistence.
//!
//! The ledger lives in memory and is written back to [LocalStorage] as a
//! single JSON array after every mutation. Storage failures never reach the
//! caller: they are logged and the in-memory ledger stays authoritative.

use time::OffsetDateTime;

use crate::{
    Error,
    local_storage::LocalStorage,
    transaction::core::{Transaction, TransactionId},
};

/// The key the serialized ledger is stored under.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Serialize `transactions` as a JSON array.
///
/// # Errors
/// Returns an [Error::JSONSerializationError] if serialization fails.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String, Error> {
    serde_json::to_string(transactions)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))
}

/// Parse a JSON array of transactions.
///
/// Records that are not valid transactions (e.g. a record with an amount of
/// zero) are logged and skipped, the rest are kept in order.
///
/// # Errors
/// Returns an [Error::MalformedLedger] if `json` is not valid JSON or is not
/// an array.
pub fn decode_transactions(json: &str) -> Result<Vec<Transaction>, Error> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|error| Error::MalformedLedger(error.to_string()))?;

    let transactions = records
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, record)| match serde_json::from_value::<Transaction>(record) {
                Ok(transaction) => Some(transaction),
                Err(error) => {
                    tracing::error!("Skipping stored transaction at index {index}: {error}");
                    None
                }
            },
        )
        .collect();

    Ok(transactions)
}

/// The in-memory ledger synchronised with local storage.
#[derive(Debug)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    storage: LocalStorage,
}

impl LedgerStore {
    /// Load the ledger from `storage`.
    ///
    /// A missing ledger loads as empty. A ledger that is not a JSON array is
    /// logged and also loads as empty. Invalid records are skipped.
    pub fn initialize(storage: LocalStorage) -> Self {
        let transactions = load_transactions(&storage);
        tracing::info!("Loaded {} transactions", transactions.len());

        Self {
            transactions,
            storage,
        }
    }

    /// All transactions in the order they were created.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All transactions, most recent first.
    pub fn transactions_newest_first(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The sum of all income minus the sum of all expenses.
    pub fn total_balance(&self) -> f64 {
        self.transactions
            .iter()
            .fold(0.0, |balance, transaction| {
                balance + transaction.signed_amount()
            })
    }

    /// The ID to give a transaction created at `now`.
    pub fn next_id(&self, now: OffsetDateTime) -> TransactionId {
        TransactionId::generate(now, self.transactions.last().map(Transaction::id))
    }

    /// Add `transaction` to the end of the ledger and save the ledger.
    pub fn append(&mut self, transaction: Transaction) {
        tracing::debug!(
            "Appending {} transaction {}",
            transaction.type_(),
            transaction.id()
        );
        self.transactions.push(transaction);
        self.save();
    }

    /// Remove every transaction and erase the whole of local storage.
    ///
    /// This cannot be undone.
    pub fn clear(&mut self) {
        self.transactions.clear();

        match self.storage.clear() {
            Ok(()) => tracing::info!("Cleared all transactions"),
            Err(error) => tracing::error!("Error clearing local storage: {error}"),
        }
    }

    /// Save the ledger one last time before the application exits.
    pub fn teardown(&self) {
        tracing::debug!("Saving {} transactions before exit", self.transactions.len());
        self.save();
    }

    fn save(&self) {
        let result = encode_transactions(&self.transactions)
            .and_then(|json| self.storage.set_item(TRANSACTIONS_KEY, &json));

        if let Err(error) = result {
            tracing::error!("Error saving transactions: {error}");
        }
    }
}

fn load_transactions(storage: &LocalStorage) -> Vec<Transaction> {
    let json = match storage.get_item(TRANSACTIONS_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::error!("Error loading transactions: {error}");
            return Vec::new();
        }
    };

    decode_transactions(&json).unwrap_or_else(|error| {
        tracing::error!("Error loading transactions: {error}");
        Vec::new()
    })
}

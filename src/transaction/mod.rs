//! Income and expense tracking.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its validation
//! - The `LedgerStore` that holds transactions and persists them to local storage
//! - The `EntryForm` that holds the draft transaction
//! - View handlers for the tracker page and its htmx endpoints

mod core;
mod create_endpoint;
mod draft_endpoints;
mod entry_form;
mod ledger;
mod reset_endpoint;
mod tracker_page;
mod view;

pub use core::{Transaction, TransactionId, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use draft_endpoints::{
    cancel_draft_endpoint, select_type_endpoint, update_draft_fields_endpoint,
};
pub use entry_form::{Draft, EntryForm, FormState};
pub use ledger::{LedgerStore, TRANSACTIONS_KEY, decode_transactions, encode_transactions};
pub use reset_endpoint::reset_ledger_endpoint;
pub use tracker_page::{TrackerState, get_tracker_page};

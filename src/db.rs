/*! This module sets up the application's database. */

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, local_storage::create_local_storage_table};

/// Create the application tables if they do not exist yet.
///
/// This function is safe to call on a database that has already been
/// initialized.
///
/// # Errors
/// Returns an error if a table could not be created or there is some other
/// SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_local_storage_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

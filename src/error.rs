//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    internal_server_error::{InternalServerError, invalid_timezone_fix},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was submitted with a description that is empty or only
    /// whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The amount text could not be parsed as a positive, finite number.
    ///
    /// Holds the raw text that was submitted.
    #[error("\"{0}\" is not a valid amount, enter a number greater than zero")]
    InvalidAmount(String),

    /// The string is not one of the two transaction types.
    #[error("\"{0}\" is not a transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// A draft field was addressed by a name that the entry form does not have.
    #[error("the entry form has no field named \"{0}\"")]
    UnknownDraftField(String),

    /// The draft was edited or submitted while the entry form was closed.
    ///
    /// The client should pick a transaction type first to open the form.
    #[error("the entry form is not open")]
    EntryFormClosed,

    /// Writing to local storage would exceed the storage quota.
    #[error("storage quota of {quota} bytes exceeded, {requested} bytes requested")]
    StorageQuotaExceeded {
        /// The maximum number of bytes the store may hold.
        quota: usize,
        /// The number of bytes the store would hold after the write.
        requested: usize,
    },

    /// The persisted ledger could not be parsed.
    #[error("could not parse the stored ledger: {0}")]
    MalformedLedger(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// A static asset could not be fetched while installing the offline cache.
    #[error("could not cache \"{path}\": {reason}")]
    AssetFetchFailed {
        /// The request path of the asset.
        path: String,
        /// Why the fetch failed, e.g. the status code of the response.
        reason: String,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the lock on the ledger or the entry form.
    #[error("could not acquire the tracker state lock")]
    StateLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", error);
        Error::SqlError(error)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => {
                InternalServerError::invalid_timezone(&timezone).into_response()
            }
            Error::DatabaseLockError | Error::StateLockError => {
                InternalServerError::default().into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: invalid_timezone_fix(&timezone),
                },
            ),
            Error::EntryFormClosed => (
                StatusCode::CONFLICT,
                Alert {
                    message: "The entry form is closed".to_owned(),
                    details: "Choose income or expense before entering a transaction. \
                    Try refreshing the page."
                        .to_owned(),
                },
            ),
            Error::UnknownDraftField(name) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Unknown form field".to_owned(),
                    details: format!("The entry form does not have a field called \"{name}\"."),
                },
            ),
            Error::InvalidTransactionType(type_) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid transaction type".to_owned(),
                    details: format!(
                        "\"{type_}\" is not a transaction type. Choose income or expense."
                    ),
                },
            ),
            error @ (Error::EmptyDescription | Error::InvalidAmount(_)) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid transaction".to_owned(),
                    details: error.to_string(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    },
                )
            }
        };

        alert.into_response(status_code)
    }
}

//! Route handlers that edit the draft transaction.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error,
    transaction::{
        core::TransactionType,
        tracker_page::{Rendering, TrackerState, render_tracker},
    },
};

/// The form data for choosing the type of the next transaction.
#[derive(Debug, Deserialize)]
pub struct SelectTypeForm {
    pub type_: String,
}

/// Set the draft's type, open the entry form and return the tracker fragment.
pub async fn select_type_endpoint(
    State(state): State<TrackerState>,
    Form(form): Form<SelectTypeForm>,
) -> Response {
    let type_: TransactionType = match form.type_.parse() {
        Ok(type_) => type_,
        Err(error) => return error.into_alert_response(),
    };

    match state.entry_form.lock() {
        Ok(mut entry_form) => entry_form.select_type(type_),
        Err(error) => {
            tracing::error!("could not acquire entry form lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    }

    render_tracker(&state, Rendering::Fragment, None)
}

/// Update the draft fields named in the form data.
///
/// Returns an empty 200 response since the inputs already show the new values.
pub async fn update_draft_fields_endpoint(
    State(state): State<TrackerState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut entry_form = match state.entry_form.lock() {
        Ok(entry_form) => entry_form,
        Err(error) => {
            tracing::error!("could not acquire entry form lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    };

    match entry_form.update_fields(&fields) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => {
            tracing::debug!("Rejected draft update {fields:?}: {error}");
            error.into_alert_response()
        }
    }
}

/// Discard the draft, close the entry form and return the tracker fragment.
pub async fn cancel_draft_endpoint(State(state): State<TrackerState>) -> Response {
    match state.entry_form.lock() {
        Ok(mut entry_form) => entry_form.cancel(),
        Err(error) => {
            tracing::error!("could not acquire entry form lock: {error}");
            return Error::StateLockError.into_alert_response();
        }
    }

    render_tracker(&state, Rendering::Fragment, None)
}

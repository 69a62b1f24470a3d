//! The route handler that clears every recorded transaction.

use axum::{extract::State, response::Response};

use crate::transaction::tracker_page::{Rendering, TrackerState, render_tracker};

/// Remove all transactions, erase local storage, close the entry form and
/// return the tracker fragment.
///
/// The confirmation prompt is shown by the client before this request is sent.
pub async fn reset_ledger_endpoint(State(state): State<TrackerState>) -> Response {
    match state.lock() {
        Ok((mut ledger, mut entry_form)) => {
            ledger.clear();
            entry_form.cancel();
        }
        Err(error) => return error.into_alert_response(),
    }

    render_tracker(&state, Rendering::Fragment, None)
}

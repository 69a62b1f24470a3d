//! The tracker page and the state shared by the tracker's route handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;

use crate::{
    AppState, Error,
    timezone::get_local_offset,
    transaction::{entry_form::EntryForm, ledger::LedgerStore, view::TrackerView},
};

/// The state needed to render the tracker and act on it.
#[derive(Debug, Clone)]
pub struct TrackerState {
    /// The ledger of recorded transactions.
    pub ledger: Arc<Mutex<LedgerStore>>,
    /// The draft transaction being composed.
    pub entry_form: Arc<Mutex<EntryForm>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
    /// The symbol shown in front of amounts, e.g. "₹".
    pub currency_symbol: String,
}

impl FromRef<AppState> for TrackerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            entry_form: state.entry_form.clone(),
            local_timezone: state.local_timezone.clone(),
            currency_symbol: state.currency_symbol.clone(),
        }
    }
}

impl TrackerState {
    /// Lock the ledger and then the entry form.
    ///
    /// Handlers that need both must use this method so the locks are always
    /// taken in the same order.
    pub(crate) fn lock(
        &self,
    ) -> Result<(MutexGuard<'_, LedgerStore>, MutexGuard<'_, EntryForm>), Error> {
        let ledger = self.ledger.lock().map_err(|error| {
            tracing::error!("could not acquire ledger lock: {error}");
            Error::StateLockError
        })?;
        let entry_form = self.entry_form.lock().map_err(|error| {
            tracing::error!("could not acquire entry form lock: {error}");
            Error::StateLockError
        })?;

        Ok((ledger, entry_form))
    }
}

/// Whether to render the whole page or just the tracker element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rendering {
    Page,
    Fragment,
}

/// Render the tracker from the current ledger and entry form.
///
/// Errors are rendered as an error page for [Rendering::Page] and as an alert
/// for [Rendering::Fragment].
pub(crate) fn render_tracker(
    state: &TrackerState,
    rendering: Rendering,
    error_message: Option<&str>,
) -> Response {
    let into_error_response = |error: Error| match rendering {
        Rendering::Page => error.into_response(),
        Rendering::Fragment => error.into_alert_response(),
    };

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return into_error_response(Error::InvalidTimezoneError(state.local_timezone.clone()));
    };

    let (ledger, entry_form) = match state.lock() {
        Ok(guards) => guards,
        Err(error) => return into_error_response(error),
    };

    let view = TrackerView {
        ledger: &ledger,
        entry_form: &entry_form,
        currency_symbol: &state.currency_symbol,
        local_offset,
        error_message,
    };

    match rendering {
        Rendering::Page => view.into_page().into_response(),
        Rendering::Fragment => view.into_fragment().into_response(),
    }
}

/// Render the tracker page, or only the tracker element for htmx requests.
pub async fn get_tracker_page(
    HxRequest(is_htmx_request): HxRequest,
    State(state): State<TrackerState>,
) -> Response {
    let rendering = if is_htmx_request {
        Rendering::Fragment
    } else {
        Rendering::Page
    };

    render_tracker(&state, rendering, None)
}

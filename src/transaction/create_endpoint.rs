//! The route handler for recording the draft as a transaction.

use axum::{Form, extract::State, response::Response};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{
        core::Transaction,
        tracker_page::{Rendering, TrackerState, render_tracker},
    },
};

/// The form data submitted by the entry form.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub description: String,
    /// The raw text of the amount input.
    pub amount: String,
}

/// Apply the submitted fields to the draft, submit it and return the tracker
/// fragment.
///
/// A draft that fails validation is kept and rendered again with the error
/// message so the user can correct it.
pub async fn create_transaction_endpoint(
    State(state): State<TrackerState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let result = submit_draft(&state, &form, OffsetDateTime::now_utc());

    match result {
        Ok(transaction) => {
            tracing::info!(
                "Recorded {} transaction {}",
                transaction.type_(),
                transaction.id()
            );
            render_tracker(&state, Rendering::Fragment, None)
        }
        Err(error @ (Error::EmptyDescription | Error::InvalidAmount(_))) => {
            tracing::debug!("Rejected transaction: {error}");
            let error_message = format!("Error: {error}");
            render_tracker(&state, Rendering::Fragment, Some(&error_message))
        }
        Err(error) => error.into_alert_response(),
    }
}

fn submit_draft(
    state: &TrackerState,
    form: &TransactionForm,
    now: OffsetDateTime,
) -> Result<Transaction, Error> {
    let (mut ledger, mut entry_form) = state.lock()?;

    entry_form.update_field("description", &form.description)?;
    entry_form.update_field("amount", &form.amount)?;
    entry_form.submit(&mut ledger, now)
}

#[cfg(test)]
mod tests {
    use axum::{Form, extract::State, http::StatusCode};
    use axum_test::TestServer;
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{
            assert_form_error_message, assert_status_ok, assert_valid_html, balance_text,
            get_tracker_state, must_get_form, parse_html_fragment,
        },
        transaction::{core::TransactionType, entry_form::FormState, tracker_page::TrackerState},
    };

    use super::{TransactionForm, create_transaction_endpoint};

    fn open_form(state: &TrackerState, type_: TransactionType) {
        state.entry_form.lock().unwrap().select_type(type_);
    }

    fn transaction_form(description: &str, amount: &str) -> Form<TransactionForm> {
        Form(TransactionForm {
            description: description.to_owned(),
            amount: amount.to_owned(),
        })
    }

    #[tokio::test]
    async fn records_transaction_and_closes_form() {
        let state = get_tracker_state();
        open_form(&state, TransactionType::Income);

        let response =
            create_transaction_endpoint(State(state.clone()), transaction_form("Salary", "1000"))
                .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(balance_text(&html), "₹1000.00");
        assert_eq!(state.ledger.lock().unwrap().len(), 1);
        assert_eq!(state.entry_form.lock().unwrap().state(), FormState::Closed);
    }

    #[tokio::test]
    async fn income_then_expense_updates_balance() {
        let state = get_tracker_state();

        open_form(&state, TransactionType::Income);
        create_transaction_endpoint(State(state.clone()), transaction_form("Salary", "1000"))
            .await;
        open_form(&state, TransactionType::Expense);
        let response =
            create_transaction_endpoint(State(state.clone()), transaction_form("Rent", "200"))
                .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(balance_text(&html), "₹800.00");
        let rows = html
            .select(&Selector::parse("#transactions li").unwrap())
            .count();
        assert_eq!(rows, 2);
    }

    #[tokio::test]
    async fn invalid_amount_renders_form_with_error() {
        let state = get_tracker_state();
        open_form(&state, TransactionType::Expense);

        let response =
            create_transaction_endpoint(State(state.clone()), transaction_form("Rent", "-5"))
                .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(
            &form,
            "Error: \"-5\" is not a valid amount, enter a number greater than zero",
        );
        assert!(state.ledger.lock().unwrap().is_empty());
        assert_eq!(
            state.entry_form.lock().unwrap().state(),
            FormState::Open(TransactionType::Expense)
        );
    }

    #[tokio::test]
    async fn blank_description_renders_form_with_error() {
        let state = get_tracker_state();
        open_form(&state, TransactionType::Income);

        let response =
            create_transaction_endpoint(State(state.clone()), transaction_form("   ", "10"))
                .await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: description cannot be empty");
        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_while_closed_is_a_conflict() {
        let state = get_tracker_state();

        let response =
            create_transaction_endpoint(State(state.clone()), transaction_form("Salary", "1000"))
                .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn form_post_through_router() {
        let state = get_tracker_state();
        open_form(&state, TransactionType::Income);
        let app = axum::Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                axum::routing::post(create_transaction_endpoint),
            )
            .with_state(state.clone());
        let server = TestServer::new(app).expect("Could not create test server");

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .form(&[("description", "Salary"), ("amount", "1000")])
            .await;

        response.assert_status_ok();
        assert_eq!(state.ledger.lock().unwrap().len(), 1);
    }
}

//! HTML rendering for the tracker: balance header, entry form and transaction list.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    endpoints,
    html::{
        BUTTON_EXPENSE_STYLE, BUTTON_INCOME_STYLE, BUTTON_LINK_STYLE, BUTTON_SECONDARY_STYLE,
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, NEGATIVE_AMOUNT_STYLE,
        PAGE_CONTAINER_STYLE, POSITIVE_AMOUNT_STYLE, base, currency_input_styles,
        format_currency,
    },
    transaction::{
        core::{Transaction, TransactionType},
        entry_form::{Draft, EntryForm, FormState},
        ledger::LedgerStore,
    },
};

/// The id of the element that htmx swaps after every tracker action.
pub const TRACKER_ID: &str = "tracker";

const RESET_CONFIRMATION: &str =
    "Are you sure you want to clear all transactions? This cannot be undone.";

/// Everything needed to render the tracker.
pub struct TrackerView<'a> {
    pub ledger: &'a LedgerStore,
    pub entry_form: &'a EntryForm,
    pub currency_symbol: &'a str,
    /// The offset used to show transaction dates in local time.
    pub local_offset: UtcOffset,
    /// A validation message to show in the entry form.
    pub error_message: Option<&'a str>,
}

impl TrackerView<'_> {
    /// Render the full HTML page.
    pub fn into_page(self) -> Markup {
        let head_elements = [currency_input_styles(self.currency_symbol)];
        let content = html! {
            main class=(PAGE_CONTAINER_STYLE)
            {
                h1 class="text-3xl font-bold mb-8 text-center" { "Income & Expense Tracker" }

                (self.into_fragment())
            }
        };

        base("Tracker", &head_elements, &content)
    }

    /// Render only the part of the page that changes, for htmx swaps.
    pub fn into_fragment(self) -> Markup {
        let target = format!("#{TRACKER_ID}");

        html! {
            div id=(TRACKER_ID) class="w-full"
            {
                (balance_header(self.ledger.total_balance(), self.currency_symbol, &target))

                @match self.entry_form.state() {
                    FormState::Closed => (type_buttons(&target)),
                    FormState::Open(type_) => (entry_form(
                        type_,
                        self.entry_form.draft(),
                        self.error_message,
                        &target,
                    )),
                }

                @if !self.ledger.is_empty() {
                    (transaction_list(self.ledger, self.currency_symbol, self.local_offset))
                }
            }
        }
    }
}

fn amount_style(amount: f64) -> &'static str {
    if amount >= 0.0 {
        POSITIVE_AMOUNT_STYLE
    } else {
        NEGATIVE_AMOUNT_STYLE
    }
}

fn balance_header(balance: f64, currency_symbol: &str, target: &str) -> Markup {
    html! {
        div class="mb-8 text-center"
        {
            div class="flex justify-between items-center mb-2"
            {
                h2 class="text-xl font-semibold" { "Total Balance" }

                button
                    type="button"
                    hx-post=(endpoints::RESET_API)
                    hx-confirm=(RESET_CONFIRMATION)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Reset All"
                }
            }

            p id="balance" class={ "text-4xl mt-2 " (amount_style(balance)) }
            {
                (format_currency(currency_symbol, balance))
            }
        }
    }
}

fn type_buttons(target: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::DRAFT_TYPE_API)
            hx-target=(target)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="flex flex-col sm:flex-row gap-4 justify-center mb-6 sm:mb-8"
        {
            button
                type="submit"
                name="type_"
                value=(TransactionType::Income.as_str())
                class=(BUTTON_INCOME_STYLE)
            {
                (TransactionType::Income.label())
            }

            button
                type="submit"
                name="type_"
                value=(TransactionType::Expense.as_str())
                class=(BUTTON_EXPENSE_STYLE)
            {
                (TransactionType::Expense.label())
            }
        }
    }
}

fn entry_form(
    type_: TransactionType,
    draft: &Draft,
    error_message: Option<&str>,
    target: &str,
) -> Markup {
    let submit_style = match type_ {
        TransactionType::Income => "w-full text-white py-2 rounded bg-green-500 hover:bg-green-600",
        TransactionType::Expense => "w-full text-white py-2 rounded bg-red-500 hover:bg-red-600",
    };

    html! {
        section class=(FORM_CONTAINER_STYLE)
        {
            div class="flex justify-between items-center mb-4"
            {
                h2 class="text-xl font-semibold" { "Add " (type_.label()) }

                button
                    type="button"
                    hx-post=(endpoints::DRAFT_CANCEL_API)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_LINK_STYLE)
                {
                    "Cancel"
                }
            }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target=(target)
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        type="text"
                        name="description"
                        id="description"
                        value=(draft.description)
                        placeholder="Enter description"
                        required
                        autofocus
                        hx-post=(endpoints::DRAFT_FIELDS_API)
                        hx-trigger="input changed delay:300ms"
                        hx-swap="none"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            type="number"
                            name="amount"
                            id="amount"
                            value=(draft.amount)
                            placeholder="Enter amount"
                            step="0.01"
                            min="0.01"
                            required
                            hx-post=(endpoints::DRAFT_FIELDS_API)
                            hx-trigger="input changed delay:300ms"
                            hx-swap="none"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                @if let Some(error_message) = error_message {
                    p class="text-red-600 dark:text-red-400" { (error_message) }
                }

                button type="submit" class=(submit_style) { "Add " (type_.label()) }
            }
        }
    }
}

fn transaction_list(
    ledger: &LedgerStore,
    currency_symbol: &str,
    local_offset: UtcOffset,
) -> Markup {
    html! {
        section
            id="transactions"
            class="w-full max-w-md mx-auto mt-8 p-6 bg-white dark:bg-gray-800 rounded-lg shadow"
        {
            h2 class="text-xl font-semibold mb-4" { "Recent Transactions" }

            ul class="space-y-2"
            {
                @for transaction in ledger.transactions_newest_first() {
                    (transaction_row(transaction, currency_symbol, local_offset))
                }
            }
        }
    }
}

fn transaction_row(
    transaction: &Transaction,
    currency_symbol: &str,
    local_offset: UtcOffset,
) -> Markup {
    let sign = match transaction.type_() {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };
    let local_date = transaction.date().to_offset(local_offset).date();

    html! {
        li
            data-transaction-id=(transaction.id().as_str())
            class="flex justify-between items-center p-2 border rounded dark:border-gray-700"
        {
            div class="overflow-hidden"
            {
                p class="truncate" { (transaction.description()) }
                p class="text-sm text-gray-500 dark:text-gray-400" { time { (local_date) } }
            }

            span class={ "ml-2 whitespace-nowrap " (amount_style(transaction.signed_amount())) }
            {
                (sign) (format_currency(currency_symbol, transaction.amount()))
            }
        }
    }
}

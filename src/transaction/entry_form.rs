//! The entry form controller: the draft transaction and its open/closed state.

use std::str::FromStr;

use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{
        core::{Transaction, TransactionType},
        ledger::LedgerStore,
    },
};

/// The unsaved input for the transaction being composed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    pub description: String,
    /// The raw text of the amount input, parsed on submit.
    pub amount: String,
    pub type_: TransactionType,
}

/// The fields of a [Draft] that can be edited by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Description,
    Amount,
    Type,
}

impl FromStr for DraftField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(DraftField::Description),
            "amount" => Ok(DraftField::Amount),
            "type" | "type_" => Ok(DraftField::Type),
            other => Err(Error::UnknownDraftField(other.to_owned())),
        }
    }
}

/// Whether the entry form is shown, and for which kind of transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// The type buttons are shown.
    Closed,
    /// The description and amount inputs are shown.
    Open(TransactionType),
}

/// Holds the draft and moves between [FormState::Closed] and [FormState::Open].
///
/// Only an open form accepts edits. Submitting or cancelling closes it.
#[derive(Debug, Default)]
pub struct EntryForm {
    draft: Draft,
    is_open: bool,
}

impl EntryForm {
    pub fn state(&self) -> FormState {
        if self.is_open {
            FormState::Open(self.draft.type_)
        } else {
            FormState::Closed
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Set the draft's type and open the form.
    pub fn select_type(&mut self, type_: TransactionType) {
        self.draft.type_ = type_;
        self.is_open = true;
    }

    /// Set the draft field called `name` to `value`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EntryFormClosed] if the form is closed,
    /// - [Error::UnknownDraftField] if `name` is not a draft field,
    /// - or [Error::InvalidTransactionType] if `name` is the type and `value` is not a type.
    pub fn update_field(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.update_fields(&[(name, value)])
    }

    /// Set each named draft field to its value.
    ///
    /// Every name and value is checked before any field is changed, so the
    /// draft is left untouched if one of them is invalid.
    ///
    /// # Errors
    /// Returns the same errors as [EntryForm::update_field].
    pub fn update_fields<N, V>(&mut self, fields: &[(N, V)]) -> Result<(), Error>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        if !self.is_open {
            return Err(Error::EntryFormClosed);
        }

        let mut updated = self.draft.clone();
        for (name, value) in fields {
            let value = value.as_ref();
            match name.as_ref().parse()? {
                DraftField::Description => updated.description = value.to_owned(),
                DraftField::Amount => updated.amount = value.to_owned(),
                DraftField::Type => updated.type_ = value.parse()?,
            }
        }

        self.draft = updated;
        Ok(())
    }

    /// Create a transaction from the draft and append it to `ledger`.
    ///
    /// On success the draft is reset and the form is closed. On failure the
    /// draft is kept so the user can correct it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EntryFormClosed] if the form is closed,
    /// - [Error::InvalidAmount] if the amount text is not a number greater than zero,
    /// - or [Error::EmptyDescription] if the description is blank.
    pub fn submit(
        &mut self,
        ledger: &mut LedgerStore,
        now: OffsetDateTime,
    ) -> Result<Transaction, Error> {
        if !self.is_open {
            return Err(Error::EntryFormClosed);
        }

        let amount = parse_amount(&self.draft.amount)?;
        let transaction = Transaction::new(
            ledger.next_id(now),
            &self.draft.description,
            amount,
            self.draft.type_,
            now,
        )?;

        ledger.append(transaction.clone());
        self.reset();

        Ok(transaction)
    }

    /// Discard the draft and close the form. The ledger is not touched.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.draft = Draft::default();
        self.is_open = false;
    }
}

fn parse_amount(text: &str) -> Result<f64, Error> {
    let invalid_amount = || Error::InvalidAmount(text.to_owned());

    let amount: f64 = text.trim().parse().map_err(|_| invalid_amount())?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(invalid_amount());
    }

    Ok(amount)
}

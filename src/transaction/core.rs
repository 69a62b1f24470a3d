//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction adds money to the balance or takes it away.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. a salary.
    #[default]
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The capitalised name for headings and buttons, e.g. "Income".
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque identifier for a transaction.
///
/// New IDs are the creation time in milliseconds since the Unix epoch, written
/// as a decimal string. IDs loaded from storage are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate the ID for a transaction created at `now`.
    ///
    /// `newest` is the ID of the most recently created transaction, if any.
    /// When two transactions are created within the same millisecond (or the
    /// clock goes backwards) the new ID is one more than `newest`, so IDs never
    /// repeat within a ledger. A stored ID too large to increment is ignored.
    pub fn generate(now: OffsetDateTime, newest: Option<&TransactionId>) -> Self {
        let millis = now.unix_timestamp_nanos() / 1_000_000;

        let millis = match newest.and_then(TransactionId::as_millis) {
            Some(newest_millis) if newest_millis >= millis => {
                newest_millis.checked_add(1).unwrap_or_else(|| {
                    tracing::warn!("Transaction ID {newest_millis} cannot be incremented");
                    millis
                })
            }
            _ => millis,
        };

        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_millis(&self) -> Option<i128> {
        self.0.parse().ok()
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable. Use [Transaction::new] to create one, which
/// checks that the description is not empty and that the amount is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: TransactionId,
    description: String,
    amount: f64,
    #[serde(rename = "type")]
    type_: TransactionType,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
}

impl Transaction {
    /// Create a transaction.
    ///
    /// Leading and trailing whitespace is removed from `description`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyDescription] if `description` is empty or only whitespace,
    /// - or [Error::InvalidAmount] if `amount` is not a finite number greater than zero.
    pub fn new(
        id: TransactionId,
        description: &str,
        amount: f64,
        type_: TransactionType,
        date: OffsetDateTime,
    ) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        Ok(Self {
            id,
            description: description.to_owned(),
            amount,
            type_,
            date,
        })
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount of money, always positive.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn type_(&self) -> TransactionType {
        self.type_
    }

    /// When the transaction was recorded.
    pub fn date(&self) -> OffsetDateTime {
        self.date
    }

    /// The amount with the sign of its effect on the balance: positive for
    /// income, negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.type_ {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The stored shape of a [Transaction], validated on the way in.
#[derive(Deserialize)]
struct TransactionRecord {
    id: TransactionId,
    description: String,
    amount: f64,
    #[serde(rename = "type")]
    type_: TransactionType,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(
            record.id,
            &record.description,
            record.amount,
            record.type_,
            record.date,
        )
    }
}

//! Money Pro is a personal finance tracker for a single user.
//!
//! Transactions are recorded against named balance accounts, funds can be
//! transferred between accounts, and simple budgets can be sketched out from
//! planned income and expense items. All state lives in a local key-value
//! store where each collection is saved as one encoded blob.

#![warn(missing_docs)]

use time::OffsetDateTime;

mod balance;
mod budget;
pub mod cli;
mod config;
mod csv_export;
mod currency;
mod dashboard;
mod database_id;
mod ledger;
mod logging;
mod profile;
pub mod stores;
mod timezone;
mod transaction;
mod transfer;

pub use balance::{Balance, total_balance};
pub use budget::{
    Budget, BudgetItem, BudgetItemBuilder, BudgetPeriod, BudgetType, ItemFrequency, ItemType,
    NewBudget, debt_budgets,
};
pub use config::{AppConfig, DEFAULT_CURRENCY_SYMBOL, DEFAULT_TIMEZONE, RECENT_TRANSACTION_LIMIT};
pub use csv_export::export_transactions;
pub use currency::{CurrencyFormatter, format_currency};
pub use dashboard::{AccountsOverview, MonthlyReport, MonthlyReportRow, Summary};
pub use database_id::{BalanceId, BudgetId, BudgetItemId, DatabaseId, TransactionId};
pub use ledger::Ledger;
pub use logging::setup_logging;
pub use profile::Profile;
pub use timezone::{get_local_offset, now_local};
pub use transaction::{
    SortOrder, Transaction, TransactionBuilder, TransactionQuery, TransactionType, TransferFilter,
    total_expenses, total_income,
};
pub use transfer::Transfer;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A balance account was given an empty name.
    #[error("balance name cannot be empty")]
    EmptyBalanceName,

    /// The specified balance name is already used by another account.
    #[error("the balance \"{0}\" already exists")]
    DuplicateBalanceName(String),

    /// A transaction was given an empty title.
    #[error("transaction title cannot be empty")]
    EmptyTransactionTitle,

    /// A budget was given an empty name.
    #[error("budget name cannot be empty")]
    EmptyBudgetName,

    /// A budget item was given an empty name.
    #[error("budget item name cannot be empty")]
    EmptyBudgetItemName,

    /// A budget item was given an empty category.
    #[error("budget item category cannot be empty")]
    EmptyBudgetItemCategory,

    /// An amount was NaN, infinite or not allowed in its context (e.g., a
    /// transaction amount that is zero or negative).
    #[error("{0} is not a valid amount")]
    InvalidAmount(f64),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(OffsetDateTime),

    /// The balance ID used to create a transaction or transfer did not match
    /// an existing balance account.
    #[error("the balance ID {0} does not refer to a valid balance")]
    InvalidBalance(BalanceId),

    /// A transfer was requested from an account to itself.
    #[error("cannot transfer funds from an account to itself")]
    SameAccountTransfer,

    /// A custom budget is missing its end date, a non-custom budget was given
    /// one, or the end date is not after the start date.
    #[error("invalid budget dates: {0}")]
    InvalidBudgetDates(String),

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the ledger")]
    DeleteMissingTransaction,

    /// Tried to delete a balance that does not exist
    #[error("tried to delete a balance that is not in the ledger")]
    DeleteMissingBalance,

    /// Tried to delete a budget that does not exist
    #[error("tried to delete a budget that is not in the ledger")]
    DeleteMissingBudget,

    /// Tried to delete a budget item that does not exist
    #[error("tried to delete a budget item that is not in the budget")]
    DeleteMissingBudgetItem,

    /// Tried to update a budget that does not exist
    #[error("tried to update a budget that is not in the ledger")]
    UpdateMissingBudget,

    /// A collection already holds the largest possible ID, so a new record
    /// cannot be given one.
    #[error("ran out of record IDs")]
    IdOverflow,

    /// The currency symbol cannot be used to format amounts.
    #[error("\"{0}\" cannot be used as a currency symbol")]
    InvalidCurrencySymbol(String),

    /// The requested record was not found.
    #[error("the requested record could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing a collection as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Transactions could not be written as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::IoError(value.to_string())
    }
}

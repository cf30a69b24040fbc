//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The rules for how recording and deleting transactions change balances
//! - Queries and totals over the list of transactions

mod core;
mod query;

pub use core::{Transaction, TransactionBuilder, TransactionType};
pub use query::{
    SortOrder, TransactionQuery, TransferFilter, query_transactions, recent, sorted_by_date_desc,
    total_expenses, total_income,
};

pub(crate) use core::{delete_transaction, record_transaction};

#[cfg(test)]
pub(crate) use core::test_utils;

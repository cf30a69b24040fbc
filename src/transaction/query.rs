//! Filtering, sorting and totals over the list of transactions.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    database_id::BalanceId,
    transaction::{Transaction, TransactionType},
};

/// How to treat transfer legs in a [TransactionQuery].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TransferFilter {
    /// Keep transfers alongside other transactions.
    #[default]
    Include,
    /// Keep only transfers.
    Only,
    /// Drop transfers.
    Exclude,
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

/// Defines which transactions [query_transactions] selects and how.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Keep only income or only expenses.
    pub kind: Option<TransactionType>,
    /// Keep only transactions recorded against this account.
    pub account: Option<BalanceId>,
    /// Whether to keep, drop, or only keep transfers.
    pub transfers: TransferFilter,
    /// Keep transactions whose title contains this text, ignoring case.
    pub search: Option<String>,
    /// Include transactions within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<Date>>,
    /// Orders transactions by date. None keeps the order they were recorded in.
    pub sort_date: Option<SortOrder>,
    /// Selects up to the first N (`limit`) transactions after sorting.
    pub limit: Option<usize>,
}

impl TransactionQuery {
    fn matches(&self, transaction: &Transaction, search: Option<&str>) -> bool {
        if self.kind.is_some_and(|kind| kind != transaction.kind) {
            return false;
        }

        if self
            .account
            .is_some_and(|account| account != transaction.balance_account_id)
        {
            return false;
        }

        let keep_transfer = match self.transfers {
            TransferFilter::Include => true,
            TransferFilter::Only => transaction.is_transfer(),
            TransferFilter::Exclude => !transaction.is_transfer(),
        };

        if !keep_transfer {
            return false;
        }

        let in_range = self
            .date_range
            .as_ref()
            .is_none_or(|range| range.contains(&transaction.date.date()));

        if !in_range {
            return false;
        }

        search.is_none_or(|needle| transaction.title.to_lowercase().contains(needle))
    }
}

/// Select the transactions described by `query`.
pub fn query_transactions<'a>(
    transactions: &'a [Transaction],
    query: &TransactionQuery,
) -> Vec<&'a Transaction> {
    let search = query.search.as_ref().map(|text| text.to_lowercase());

    let mut selected: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| query.matches(transaction, search.as_deref()))
        .collect();

    match query.sort_date {
        Some(SortOrder::Ascending) => selected.sort_by(|a, b| a.date.cmp(&b.date)),
        Some(SortOrder::Descending) => selected.sort_by(|a, b| b.date.cmp(&a.date)),
        None => {}
    }

    if let Some(limit) = query.limit {
        selected.truncate(limit);
    }

    selected
}

/// All transactions, newest first.
pub fn sorted_by_date_desc(transactions: &[Transaction]) -> Vec<&Transaction> {
    query_transactions(
        transactions,
        &TransactionQuery {
            sort_date: Some(SortOrder::Descending),
            ..Default::default()
        },
    )
}

/// The `limit` most recent transactions, newest first.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    query_transactions(
        transactions,
        &TransactionQuery {
            sort_date: Some(SortOrder::Descending),
            limit: Some(limit),
            ..Default::default()
        },
    )
}

/// The sum of all income, optionally ignoring transfers.
pub fn total_income<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    include_transfers: bool,
) -> f64 {
    transactions
        .into_iter()
        .filter(|transaction| transaction.kind == TransactionType::Income)
        .filter(|transaction| include_transfers || !transaction.is_transfer())
        .map(|transaction| transaction.amount.abs())
        .sum()
}

/// The sum of the magnitudes of all expenses, optionally ignoring transfers.
pub fn total_expenses<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    include_transfers: bool,
) -> f64 {
    transactions
        .into_iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
        .filter(|transaction| include_transfers || !transaction.is_transfer())
        .map(|transaction| transaction.amount.abs())
        .sum()
}

//! The accounts overview: every balance plus transfers and other activity.

use crate::{
    balance::{Balance, total_balance},
    transaction::{
        Transaction, TransactionType, sorted_by_date_desc, total_expenses, total_income,
    },
};

/// Balances with the transactions split into transfers and everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountsOverview {
    /// Every balance account.
    pub balances: Vec<Balance>,
    /// The total across all balances.
    pub total_balance: f64,
    /// The withdrawal leg of each transfer, newest first.
    pub transfers: Vec<Transaction>,
    /// Transactions that are not part of a transfer, newest first.
    pub other: Vec<Transaction>,
    /// The sum of all income, transfers included.
    pub total_income: f64,
    /// The sum of all expenses, transfers included.
    pub total_expenses: f64,
}

impl AccountsOverview {
    /// Build the overview of `balances` and `transactions`.
    pub fn new(transactions: &[Transaction], balances: &[Balance]) -> Self {
        let (transfers, other): (Vec<&Transaction>, Vec<&Transaction>) =
            sorted_by_date_desc(transactions)
                .into_iter()
                .partition(|transaction| transaction.is_transfer());

        Self {
            balances: balances.to_vec(),
            total_balance: total_balance(balances),
            // One row per transfer, not one per leg.
            transfers: transfers
                .into_iter()
                .filter(|transaction| transaction.kind == TransactionType::Expense)
                .cloned()
                .collect(),
            other: other.into_iter().cloned().collect(),
            total_income: total_income(transactions, true),
            total_expenses: total_expenses(transactions, true),
        }
    }
}

//! Defines the core data model for transactions and the rules for how
//! recording and deleting them changes account balances.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    balance::{Balance, apply_delta, find_balance},
    database_id::{BalanceId, TransactionId, next_id},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money flowing into an account.
    Income,
    /// Money flowing out of an account.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in exports and listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount as it was recorded.
    ///
    /// User entered amounts are positive and [Transaction::kind] gives the
    /// direction. Withdrawal legs of transfers are stored as negative amounts.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The account this transaction was recorded against.
    pub balance_account_id: BalanceId,
    /// Whether this transaction is one leg of a transfer between accounts.
    #[serde(default)]
    pub transfer: bool,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        amount: f64,
        kind: TransactionType,
        balance_account_id: BalanceId,
        date: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            amount,
            kind,
            balance_account_id,
            date,
        }
    }

    /// The change this transaction makes to its account's balance.
    ///
    /// Income adds the magnitude of the amount and expenses subtract it,
    /// regardless of the sign the amount was stored with.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount.abs(),
            TransactionType::Expense => -self.amount.abs(),
        }
    }

    /// Whether this is one leg of a transfer.
    pub fn is_transfer(&self) -> bool {
        self.transfer
    }
}

/// A builder for creating [Transaction] instances.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// A short description, e.g. "Groceries". Must not be empty.
    pub title: String,
    /// The amount of money, which must be greater than zero.
    ///
    /// The direction of the money is given by `kind`, not the sign.
    pub amount: f64,
    /// Whether this is income or an expense.
    pub kind: TransactionType,
    /// The account to record the transaction against.
    pub balance_account_id: BalanceId,
    /// When the transaction happened. Must not be in the future.
    pub date: OffsetDateTime,
}

impl TransactionBuilder {
    /// Set the date of the transaction.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = date;
        self
    }

    /// Check the builder and create the transaction with `id`.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::EmptyTransactionTitle] if the title is empty or only whitespace,
    /// - [Error::InvalidAmount] if the amount is not a finite number greater than zero,
    /// - or [Error::FutureDate] if the date is later than `now`.
    fn finalise(self, id: TransactionId, now: OffsetDateTime) -> Result<Transaction, Error> {
        let title = self.title.trim();

        if title.is_empty() {
            return Err(Error::EmptyTransactionTitle);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        if self.date > now {
            return Err(Error::FutureDate(self.date));
        }

        Ok(Transaction {
            id,
            title: title.to_owned(),
            amount: self.amount,
            date: self.date,
            kind: self.kind,
            balance_account_id: self.balance_account_id,
            transfer: false,
        })
    }
}

// ============================================================================
// BOOKKEEPING
// ============================================================================

/// Record a new transaction and apply it to its account.
///
/// The account's amount changes by [Transaction::signed_amount].
///
/// # Errors
/// Returns the validation errors of the builder,
/// [Error::InvalidBalance] if the account does not exist,
/// [Error::InvalidAmount] if the account's new amount would not be finite,
/// or [Error::IdOverflow] if no ID is left. Nothing is changed on error.
pub(crate) fn record_transaction(
    builder: TransactionBuilder,
    now: OffsetDateTime,
    transactions: &mut Vec<Transaction>,
    balances: &mut [Balance],
) -> Result<Transaction, Error> {
    let account_id = builder.balance_account_id;

    if find_balance(account_id, balances).is_none() {
        return Err(Error::InvalidBalance(account_id));
    }

    let id = next_id(transactions.iter().map(|transaction| transaction.id))?;
    let transaction = builder.finalise(id, now)?;

    apply_delta(account_id, transaction.signed_amount(), balances)?;
    transactions.push(transaction.clone());

    Ok(transaction)
}

/// Delete a transaction and reverse its effect on its account.
///
/// If the account has since been deleted, only the transaction is removed.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if no transaction has the ID `id`,
/// or [Error::InvalidAmount] if the account's new amount would not be finite.
/// Nothing is changed on error.
pub(crate) fn delete_transaction(
    id: TransactionId,
    transactions: &mut Vec<Transaction>,
    balances: &mut [Balance],
) -> Result<Transaction, Error> {
    let index = transactions
        .iter()
        .position(|transaction| transaction.id == id)
        .ok_or(Error::DeleteMissingTransaction)?;

    let transaction = &transactions[index];

    match apply_delta(
        transaction.balance_account_id,
        -transaction.signed_amount(),
        balances,
    ) {
        Ok(()) => {}
        Err(Error::InvalidBalance(account_id)) => {
            tracing::debug!(
                "Transaction {id} belonged to deleted account {account_id}, no balance to update"
            );
        }
        Err(error) => return Err(error),
    }

    Ok(transactions.remove(index))
}

#[cfg(test)]
pub(crate) mod test_utils {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        balance::Balance,
        transaction::{Transaction, TransactionType},
    };

    pub const NOW: OffsetDateTime = datetime!(2025-03-18 12:00 UTC);

    pub fn balance(id: i64, name: &str, amount: f64) -> Balance {
        Balance {
            id,
            name: name.to_owned(),
            amount,
        }
    }

    pub fn transaction(
        id: i64,
        title: &str,
        amount: f64,
        kind: TransactionType,
        date: OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id,
            title: title.to_owned(),
            amount,
            date,
            kind,
            balance_account_id: 1,
            transfer: false,
        }
    }
}


#[cfg(test)]
mod record_transaction_tests {
    use time::Duration;

    use crate::{
        Error,
        transaction::{
            Transaction, TransactionType,
            core::test_utils::{NOW, balance, transaction},
        },
    };

    use super::record_transaction;

    #[test]
    fn income_increases_balance() {
        let mut transactions = Vec::new();
        let mut balances = vec![balance(1, "Cheque", 100.0)];

        let transaction = record_transaction(
            Transaction::build("Salary", 50.0, TransactionType::Income, 1, NOW),
            NOW,
            &mut transactions,
            &mut balances,
        )
        .unwrap();

        assert_eq!(transaction.id, 1);
        assert!(!transaction.is_transfer());
        assert_eq!(transactions, vec![transaction]);
        assert_eq!(balances[0].amount, 150.0);
    }

    #[test]
    fn expense_decreases_balance() {
        let mut transactions = Vec::new();
        let mut balances = vec![balance(1, "Cheque", 100.0), balance(2, "Cash", 10.0)];

        record_transaction(
            Transaction::build("Groceries", 30.25, TransactionType::Expense, 2, NOW),
            NOW,
            &mut transactions,
            &mut balances,
        )
        .unwrap();

        assert_eq!(balances[0].amount, 100.0);
        assert_eq!(balances[1].amount, -20.25);
    }

    #[test]
    fn trims_title() {
        let mut transactions = Vec::new();
        let mut balances = vec![balance(1, "Cheque", 0.0)];

        let transaction = record_transaction(
            Transaction::build(" Coffee ", 3.0, TransactionType::Expense, 1, NOW),
            NOW,
            &mut transactions,
            &mut balances,
        )
        .unwrap();

        assert_eq!(transaction.title, "Coffee");
    }

    #[test]
    fn unknown_account_changes_nothing() {
        let mut transactions = Vec::new();
        let mut balances = vec![balance(1, "Cheque", 100.0)];

        let result = record_transaction(
            Transaction::build("Salary", 50.0, TransactionType::Income, 2, NOW),
            NOW,
            &mut transactions,
            &mut balances,
        );

        assert_eq!(result, Err(Error::InvalidBalance(2)));
        assert!(transactions.is_empty());
        assert_eq!(balances[0].amount, 100.0);
    }

    #[test]
    fn rejects_empty_title() {
        let mut balances = vec![balance(1, "Cheque", 100.0)];

        let result = record_transaction(
            Transaction::build("", 50.0, TransactionType::Income, 1, NOW),
            NOW,
            &mut Vec::new(),
            &mut balances,
        );

        assert_eq!(result, Err(Error::EmptyTransactionTitle));
        assert_eq!(balances[0].amount, 100.0);
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        let mut balances = vec![balance(1, "Cheque", 100.0)];

        for amount in [0.0, -5.0, f64::NAN] {
            let result = record_transaction(
                Transaction::build("Refund", amount, TransactionType::Income, 1, NOW),
                NOW,
                &mut Vec::new(),
                &mut balances,
            );

            assert!(matches!(result, Err(Error::InvalidAmount(_))));
        }

        assert_eq!(balances[0].amount, 100.0);
    }

    #[test]
    fn rejects_future_date() {
        let mut balances = vec![balance(1, "Cheque", 100.0)];
        let tomorrow = NOW + Duration::days(1);

        let result = record_transaction(
            Transaction::build("Salary", 50.0, TransactionType::Income, 1, tomorrow),
            NOW,
            &mut Vec::new(),
            &mut balances,
        );

        assert_eq!(result, Err(Error::FutureDate(tomorrow)));
    }

    #[test]
    fn date_overrides_build_date() {
        let mut balances = vec![balance(1, "Cheque", 100.0)];
        let last_week = NOW - Duration::weeks(1);

        let transaction = record_transaction(
            Transaction::build("Salary", 50.0, TransactionType::Income, 1, NOW).date(last_week),
            NOW,
            &mut Vec::new(),
            &mut balances,
        )
        .unwrap();

        assert_eq!(transaction.date, last_week);
    }

    #[test]
    fn infinite_balance_changes_nothing() {
        let mut transactions = Vec::new();
        let mut balances = vec![balance(1, "Cheque", 1.7e308)];

        let result = record_transaction(
            Transaction::build("Windfall", 1.7e308, TransactionType::Income, 1, NOW),
            NOW,
            &mut transactions,
            &mut balances,
        );

        assert_eq!(result, Err(Error::InvalidAmount(1.7e308)));
        assert!(transactions.is_empty());
        assert_eq!(balances[0].amount, 1.7e308);
    }

    #[test]
    fn no_id_left_changes_nothing() {
        let mut transactions = vec![transaction(
            i64::MAX,
            "Salary",
            10.0,
            TransactionType::Income,
            NOW,
        )];
        let mut balances = vec![balance(1, "Cheque", 100.0)];

        let result = record_transaction(
            Transaction::build("Coffee", 3.0, TransactionType::Expense, 1, NOW),
            NOW,
            &mut transactions,
            &mut balances,
        );

        assert_eq!(result, Err(Error::IdOverflow));
        assert_eq!(transactions.len(), 1);
        assert_eq!(balances[0].amount, 100.0);
    }
}

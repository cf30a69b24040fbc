//! The home screen summary.

use crate::{
    balance::{Balance, total_balance},
    profile::Profile,
    transaction::{Transaction, recent, total_expenses, total_income},
};

/// Totals and recent activity shown when the user opens the app.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// "Hello, {name}", or just "Hello" if the user has not set a name.
    pub greeting: String,
    /// The total across all balances.
    pub total_balance: f64,
    /// The sum of all income, transfers excluded.
    pub total_income: f64,
    /// The sum of all expenses, transfers excluded.
    pub total_expenses: f64,
    /// The most recent transactions, newest first.
    pub recent: Vec<Transaction>,
}

impl Summary {
    /// Summarise `transactions` and `balances`, listing up to `recent_limit`
    /// recent transactions.
    pub fn new(
        profile: &Profile,
        transactions: &[Transaction],
        balances: &[Balance],
        recent_limit: usize,
    ) -> Self {
        Self {
            greeting: profile.greeting(),
            total_balance: total_balance(balances),
            total_income: total_income(transactions, false),
            total_expenses: total_expenses(transactions, false),
            recent: recent(transactions, recent_limit)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, macros::datetime};

    use crate::{
        Profile,
        dashboard::Summary,
        transaction::{
            TransactionType,
            test_utils::{NOW, balance, transaction},
        },
    };

    #[test]
    fn totals_exclude_transfers() {
        let mut withdrawal =
            transaction(3, "Transfer to Savings", -200.0, TransactionType::Expense, NOW);
        withdrawal.transfer = true;
        let mut deposit =
            transaction(4, "Transfer from Cheque", 200.0, TransactionType::Income, NOW);
        deposit.transfer = true;
        let transactions = vec![
            transaction(1, "Salary", 1000.0, TransactionType::Income, NOW),
            transaction(2, "Rent", 400.0, TransactionType::Expense, NOW),
            withdrawal,
            deposit,
        ];
        let balances = vec![balance(1, "Cheque", 400.0), balance(2, "Savings", 200.0)];

        let summary = Summary::new(&Profile::default(), &transactions, &balances, 5);

        assert_eq!(summary.greeting, "Hello");
        assert_eq!(summary.total_balance, 600.0);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expenses, 400.0);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let start = datetime!(2025-03-01 08:00 UTC);
        let transactions: Vec<_> = (1..=7)
            .map(|i| {
                transaction(
                    i,
                    &format!("Coffee #{i}"),
                    3.5,
                    TransactionType::Expense,
                    start + Duration::days(i),
                )
            })
            .collect();

        let summary = Summary::new(&Profile::default(), &transactions, &[], 5);

        let ids: Vec<i64> = summary.recent.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn greets_by_name() {
        let profile = Profile {
            user_name: Some("Xolani".to_owned()),
            initial_balance: None,
        };

        let summary = Summary::new(&profile, &[], &[], 5);

        assert_eq!(summary.greeting, "Hello, Xolani");
        assert!(summary.recent.is_empty());
    }
}

//! Monthly aggregation of transactions for the report.
//!
//! Totals are grouped by the calendar month of each transaction's local date,
//! and running balances are worked backwards from the current total.

use std::collections::BTreeMap;

use time::{Date, Month};

use crate::transaction::Transaction;

/// One month of the [MonthlyReport].
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReportRow {
    /// The first day of the month.
    pub month: Date,
    /// The month formatted like "Mar 2025".
    pub label: String,
    /// Income minus expenses for the month, transfers excluded.
    pub net: f64,
    /// The total balance across all accounts at the end of the month.
    pub closing_balance: f64,
}

/// Net amounts and closing balances for every month that has transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyReport {
    /// Rows in chronological order.
    pub rows: Vec<MonthlyReportRow>,
}

impl MonthlyReport {
    /// Build the report for `transactions`, ending at `total_balance`.
    ///
    /// Transfers are left out of the monthly nets since they do not change the
    /// total balance.
    pub fn new(transactions: &[Transaction], total_balance: f64) -> Self {
        let monthly_totals = aggregate_by_month(transactions);
        let closing_balances = calculate_running_balances(total_balance, &monthly_totals);

        let rows = monthly_totals
            .into_iter()
            .zip(closing_balances)
            .map(|((month, net), closing_balance)| MonthlyReportRow {
                month,
                label: format_month_label(month),
                net,
                closing_balance,
            })
            .collect();

        Self { rows }
    }
}

/// Sums the signed amounts of non-transfer transactions by month.
///
/// # Returns
/// Map from each month (as Date with day=1) to the net amount, in
/// chronological order.
fn aggregate_by_month(transactions: &[Transaction]) -> BTreeMap<Date, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| !t.is_transfer()) {
        let date = transaction.date.date();
        let month = first_of_month(date);
        *totals.entry(month).or_insert(0.0) += transaction.signed_amount();
    }

    totals
}

/// Calculates the closing balance of each month by working backwards from the
/// current total.
///
/// # Returns
/// One balance per entry in `monthly_totals`, in the same order.
fn calculate_running_balances(
    total_balance: f64,
    monthly_totals: &BTreeMap<Date, f64>,
) -> Vec<f64> {
    let mut balances = Vec::with_capacity(monthly_totals.len());
    let mut cumulative = 0.0;

    for net in monthly_totals.values().rev() {
        balances.push(total_balance - cumulative);
        cumulative += net;
    }

    balances.reverse();
    balances
}

fn first_of_month(date: Date) -> Date {
    // Day 1 exists in every month.
    date.replace_day(1).unwrap_or(date)
}

fn format_month_label(month: Date) -> String {
    let name = match month.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{name} {}", month.year())
}

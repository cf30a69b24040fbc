//! Writing transactions out as CSV.

use std::io::Write;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::{
    Error,
    balance::{Balance, find_balance},
    database_id::TransactionId,
    transaction::Transaction,
};

#[derive(Serialize)]
struct CsvRow<'a> {
    id: TransactionId,
    date: String,
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: f64,
    account: &'a str,
    transfer: bool,
}

/// Write `transactions` to `writer` as CSV, one row per transaction.
///
/// The header is `id,date,title,type,amount,account,transfer`. Dates are
/// RFC 3339 timestamps, amounts are stored values as-is, and the account
/// column holds the account name, or nothing if the account was deleted.
///
/// # Errors
/// Returns [Error::CsvError] if a row could not be written, or
/// [Error::IoError] if `writer` could not be flushed.
pub fn export_transactions<'a, W: Write>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    balances: &[Balance],
    writer: W,
) -> Result<usize, Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut count = 0;

    for transaction in transactions {
        let date = transaction
            .date
            .format(&Rfc3339)
            .map_err(|error| Error::CsvError(error.to_string()))?;
        let account = find_balance(transaction.balance_account_id, balances)
            .map(|balance| balance.name.as_str())
            .unwrap_or_default();

        csv_writer.serialize(CsvRow {
            id: transaction.id,
            date,
            title: &transaction.title,
            kind: transaction.kind.as_str(),
            amount: transaction.amount,
            account,
            transfer: transaction.transfer,
        })?;
        count += 1;
    }

    // An empty export still gets a header.
    if count == 0 {
        csv_writer.write_record([
            "id", "date", "title", "type", "amount", "account", "transfer",
        ])?;
    }

    csv_writer.flush()?;
    tracing::debug!("Exported {count} transactions as CSV");

    Ok(count)
}

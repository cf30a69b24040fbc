//! Moving funds between two balance accounts.

use time::OffsetDateTime;

use crate::{
    Error,
    balance::{Balance, amount_after_delta, apply_delta, find_balance},
    database_id::{BalanceId, next_id},
    transaction::{Transaction, TransactionType},
};

/// The pair of transactions recorded by a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    /// The expense recorded against the source account, stored with a
    /// negative amount.
    pub withdrawal: Transaction,
    /// The income recorded against the destination account.
    pub deposit: Transaction,
}

/// Move `amount` from the account `from` to the account `to`.
///
/// The source balance decreases and the destination balance increases by
/// `amount`, so the total across all accounts does not change. Two
/// transfer-flagged transactions are appended to `transactions`: an expense
/// titled "Transfer to {destination}" on the source account and an income
/// titled "Transfer from {source}" on the destination account.
///
/// The source account may go negative.
///
/// # Errors
/// Returns:
/// - [Error::SameAccountTransfer] if `from` and `to` are the same account,
/// - [Error::InvalidAmount] if `amount` is not a finite number greater than zero,
/// - [Error::InvalidBalance] if either account does not exist,
/// - [Error::InvalidAmount] if either account's new amount would not be finite,
/// - or [Error::IdOverflow] if no IDs are left for the two transactions.
///
/// Nothing is changed on error.
pub(crate) fn transfer(
    from: BalanceId,
    to: BalanceId,
    amount: f64,
    date: OffsetDateTime,
    transactions: &mut Vec<Transaction>,
    balances: &mut [Balance],
) -> Result<Transfer, Error> {
    if from == to {
        return Err(Error::SameAccountTransfer);
    }

    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount(amount));
    }

    let source_name = find_balance(from, balances)
        .ok_or(Error::InvalidBalance(from))?
        .name
        .clone();
    let destination_name = find_balance(to, balances)
        .ok_or(Error::InvalidBalance(to))?
        .name
        .clone();

    amount_after_delta(from, -amount, balances)?;
    amount_after_delta(to, amount, balances)?;

    let withdrawal_id = next_id(transactions.iter().map(|transaction| transaction.id))?;
    let deposit_id = withdrawal_id.checked_add(1).ok_or(Error::IdOverflow)?;

    apply_delta(from, -amount, balances)?;
    apply_delta(to, amount, balances)?;

    let withdrawal = Transaction {
        id: withdrawal_id,
        title: format!("Transfer to {destination_name}"),
        amount: -amount,
        date,
        kind: TransactionType::Expense,
        balance_account_id: from,
        transfer: true,
    };
    let deposit = Transaction {
        id: deposit_id,
        title: format!("Transfer from {source_name}"),
        amount,
        date,
        kind: TransactionType::Income,
        balance_account_id: to,
        transfer: true,
    };

    transactions.push(withdrawal.clone());
    transactions.push(deposit.clone());

    Ok(Transfer {
        withdrawal,
        deposit,
    })
}

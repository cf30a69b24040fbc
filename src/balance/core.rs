use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{BalanceId, next_id},
};

/// The amount of money available in a named account, e.g. a bank account or
/// cash on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// The id for the account balance.
    pub id: BalanceId,
    /// The display name of the account.
    pub name: String,
    /// The running balance.
    pub amount: f64,
}

/// Validate and append a new balance to `balances`.
///
/// Leading and trailing whitespace is removed from `name`.
///
/// # Errors
/// Returns:
/// - [Error::EmptyBalanceName] if `name` is empty or only whitespace,
/// - [Error::DuplicateBalanceName] if another balance already uses `name`,
/// - [Error::InvalidAmount] if `amount` is NaN or infinite,
/// - or [Error::IdOverflow] if no ID is left for the new balance.
pub(crate) fn add_balance(
    name: &str,
    amount: f64,
    balances: &mut Vec<Balance>,
) -> Result<Balance, Error> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::EmptyBalanceName);
    }

    if !amount.is_finite() {
        return Err(Error::InvalidAmount(amount));
    }

    if balances.iter().any(|balance| balance.name == name) {
        return Err(Error::DuplicateBalanceName(name.to_owned()));
    }

    let balance = Balance {
        id: next_id(balances.iter().map(|balance| balance.id))?,
        name: name.to_owned(),
        amount,
    };
    balances.push(balance.clone());

    Ok(balance)
}

/// Remove the balance with `id` from `balances`.
///
/// # Errors
/// Returns [Error::DeleteMissingBalance] if no balance has the ID `id`.
pub(crate) fn delete_balance(id: BalanceId, balances: &mut Vec<Balance>) -> Result<Balance, Error> {
    let index = balances
        .iter()
        .position(|balance| balance.id == id)
        .ok_or(Error::DeleteMissingBalance)?;

    Ok(balances.remove(index))
}

/// Find the balance with `id`.
pub(crate) fn find_balance(id: BalanceId, balances: &[Balance]) -> Option<&Balance> {
    balances.iter().find(|balance| balance.id == id)
}

/// The amount the balance with `id` would hold after adding `delta`.
///
/// # Errors
/// Returns [Error::InvalidBalance] if no balance has the ID `id`, or
/// [Error::InvalidAmount] if the new amount would be NaN or infinite.
pub(crate) fn amount_after_delta(
    id: BalanceId,
    delta: f64,
    balances: &[Balance],
) -> Result<f64, Error> {
    let balance = find_balance(id, balances).ok_or(Error::InvalidBalance(id))?;
    let amount = balance.amount + delta;

    if !amount.is_finite() {
        return Err(Error::InvalidAmount(delta));
    }

    Ok(amount)
}

/// Add the signed `delta` to the balance with `id`.
///
/// # Errors
/// Returns the errors of [amount_after_delta]. The balance is unchanged on error.
pub(crate) fn apply_delta(id: BalanceId, delta: f64, balances: &mut [Balance]) -> Result<(), Error> {
    let amount = amount_after_delta(id, delta, balances)?;

    if let Some(balance) = balances.iter_mut().find(|balance| balance.id == id) {
        balance.amount = amount;
    }

    Ok(())
}

/// Get the total balance across all accounts.
pub fn total_balance(balances: &[Balance]) -> f64 {
    balances.iter().map(|balance| balance.amount).sum()
}

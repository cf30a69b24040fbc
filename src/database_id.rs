//! Record ID type definitions.

use crate::Error;

/// Alias for the integer type used for record IDs.
pub type DatabaseId = i64;
/// The ID of a [Balance](crate::Balance).
pub type BalanceId = DatabaseId;
/// The ID of a [Transaction](crate::Transaction).
pub type TransactionId = DatabaseId;
/// The ID of a [Budget](crate::Budget).
pub type BudgetId = DatabaseId;
/// The ID of a [BudgetItem](crate::BudgetItem), unique within its budget.
pub type BudgetItemId = DatabaseId;

/// The ID to give the next record appended to a collection with `ids`.
///
/// Returns one more than the largest existing ID, or `1` for an empty collection.
///
/// # Errors
/// Returns [Error::IdOverflow] if the largest existing ID is [DatabaseId::MAX].
pub(crate) fn next_id(ids: impl IntoIterator<Item = DatabaseId>) -> Result<DatabaseId, Error> {
    ids.into_iter()
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(Error::IdOverflow)
}

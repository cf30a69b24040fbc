//! Defines the key-value store trait and the blob encoding of collections.

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// The key for the JSON encoded list of transactions.
pub const TRANSACTIONS_KEY: &str = "SavedTransactions";
/// The key for the JSON encoded list of balances.
pub const BALANCES_KEY: &str = "SavedBalances";
/// The key for the JSON encoded list of budgets.
pub const BUDGETS_KEY: &str = "SavedBudgets";
/// The key for the user's preferred name, stored as raw UTF-8.
pub const USER_NAME_KEY: &str = "userName";
/// The key for the opening balance entered by the user, stored as JSON.
pub const INITIAL_BALANCE_KEY: &str = "initialBalance";

/// Stores opaque byte blobs under string keys.
///
/// Writes always overwrite the whole value stored under a key.
pub trait KeyValueStore {
    /// Retrieve the blob stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Store `value` under `key`, replacing any existing blob.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), Error>;

    /// Remove the blob stored under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), Error>;

    /// Store several blobs at once.
    ///
    /// Implementers that support it should write either all of `entries` or
    /// none of them.
    fn set_many(&mut self, entries: &[(&str, Vec<u8>)]) -> Result<(), Error> {
        self.write_batch(entries, &[])
    }

    /// Store `entries` and then remove the blobs under `removals`.
    ///
    /// Implementers that support it should apply the whole batch or none of
    /// it. Otherwise the removals only run once every entry has been stored.
    fn write_batch(&mut self, entries: &[(&str, Vec<u8>)], removals: &[&str]) -> Result<(), Error> {
        for (key, value) in entries {
            self.set(key, value)?;
        }

        for key in removals {
            self.remove(key)?;
        }

        Ok(())
    }
}

/// Load the collection stored under `key`.
///
/// A missing key yields an empty collection. So does a blob that cannot be
/// decoded, in which case a warning is logged and the blob will be replaced on
/// the next save.
///
/// # Errors
/// Returns an error only if the store itself fails.
pub fn load_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(blob) = store.get(key)? else {
        tracing::debug!("Nothing stored under {key}, starting with an empty collection");
        return Ok(Vec::new());
    };

    match serde_json::from_slice::<Vec<T>>(&blob) {
        Ok(items) => {
            tracing::debug!("Loaded {} records from {key}", items.len());
            Ok(items)
        }
        Err(error) => {
            tracing::warn!("Discarding undecodable data stored under {key}: {error}");
            Ok(Vec::new())
        }
    }
}

/// Encode a whole collection as one JSON blob.
pub fn encode_collection<T: Serialize>(items: &[T]) -> Result<Vec<u8>, Error> {
    Ok(serde_json::to_vec(items)?)
}

//! The user's preferred name and opening balance.

use crate::{
    Error,
    stores::{INITIAL_BALANCE_KEY, KeyValueStore, USER_NAME_KEY},
};

/// Details the user entered when they started tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    /// The name to greet the user with.
    pub user_name: Option<String>,
    /// The bank balance plus cash on hand the user started with.
    pub initial_balance: Option<f64>,
}

impl Profile {
    /// Load the profile from `store`.
    ///
    /// Values that cannot be decoded are treated as missing.
    ///
    /// # Errors
    /// Returns an error only if the store itself fails.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, Error> {
        let user_name = store
            .get(USER_NAME_KEY)?
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .filter(|name| !name.is_empty());

        let initial_balance = match store.get(INITIAL_BALANCE_KEY)? {
            Some(bytes) => match serde_json::from_slice::<f64>(&bytes) {
                Ok(amount) => Some(amount),
                Err(error) => {
                    tracing::warn!("Discarding undecodable initial balance: {error}");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            user_name,
            initial_balance,
        })
    }

    /// Write the profile to `store` in one batch. Missing values are removed
    /// from the store.
    pub(crate) fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), Error> {
        let mut entries = Vec::new();
        let mut removals = Vec::new();

        match &self.user_name {
            Some(name) => entries.push((USER_NAME_KEY, name.as_bytes().to_vec())),
            None => removals.push(USER_NAME_KEY),
        }

        match self.initial_balance {
            Some(amount) => entries.push((INITIAL_BALANCE_KEY, serde_json::to_vec(&amount)?)),
            None => removals.push(INITIAL_BALANCE_KEY),
        }

        store.write_batch(&entries, &removals)
    }

    /// The greeting shown at the top of the summary.
    pub fn greeting(&self) -> String {
        match &self.user_name {
            Some(name) => format!("Hello, {name}"),
            None => "Hello".to_owned(),
        }
    }
}

//! Contains the key-value store trait, its implementations, and helpers for
//! saving whole collections as single blobs.

mod key_value;
mod memory;

pub mod sqlite;

pub use key_value::{
    BALANCES_KEY, BUDGETS_KEY, INITIAL_BALANCE_KEY, KeyValueStore, TRANSACTIONS_KEY, USER_NAME_KEY,
    encode_collection, load_collection,
};
pub use memory::MemoryStore;
pub use sqlite::SQLiteStore;

//! Implements a SQLite backed key-value store.

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, stores::KeyValueStore};

/// Stores blobs in a single `key_value` table of a SQLite database.
#[derive(Debug)]
pub struct SQLiteStore {
    connection: Connection,
}

impl SQLiteStore {
    /// Create a new store from the SQLite `connection`.
    ///
    /// This function will create the `key_value` table if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_key_value_table(&connection)?;

        Ok(Self { connection })
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened as a SQLite database.
    pub fn open(path: &str) -> Result<Self, Error> {
        tracing::debug!("Opening database at {path}");
        Self::new(Connection::open(path)?)
    }

    /// Create a store backed by a fresh in-memory database.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialised.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::new(Connection::open_in_memory()?)
    }
}

/// Create the table that holds every stored blob.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
            key TEXT PRIMARY KEY,
            value BLOB NOT NULL
        )",
        (),
    )?;

    Ok(())
}

const UPSERT_QUERY: &str = "INSERT INTO key_value (key, value) VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value";

const DELETE_QUERY: &str = "DELETE FROM key_value WHERE key = ?1";

impl KeyValueStore for SQLiteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let value = self
            .connection
            .prepare("SELECT value FROM key_value WHERE key = ?1")?
            .query_row([key], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), Error> {
        self.connection.execute(UPSERT_QUERY, (key, value))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.connection.execute(DELETE_QUERY, [key])?;

        Ok(())
    }

    /// Apply the whole batch in one SQL transaction.
    fn write_batch(&mut self, entries: &[(&str, Vec<u8>)], removals: &[&str]) -> Result<(), Error> {
        let transaction = self.connection.transaction()?;

        for (key, value) in entries {
            transaction.execute(UPSERT_QUERY, (key, value))?;
        }

        for key in removals {
            transaction.execute(DELETE_QUERY, [key])?;
        }

        transaction.commit()?;

        Ok(())
    }
}


#[cfg(test)]
mod store_tests {
    use rusqlite::Connection;

    use crate::stores::{KeyValueStore, SQLiteStore};

    use super::create_key_value_table;

    fn get_test_store() -> SQLiteStore {
        SQLiteStore::open_in_memory().unwrap()
    }

    /// A store whose database aborts any insert of `key`.
    fn get_store_rejecting(key: &str) -> SQLiteStore {
        let connection = Connection::open_in_memory().unwrap();
        create_key_value_table(&connection).unwrap();
        connection
            .execute_batch(&format!(
                "CREATE TRIGGER reject_key BEFORE INSERT ON key_value
                WHEN NEW.key = '{key}'
                BEGIN SELECT RAISE(ABORT, 'rejected'); END;"
            ))
            .unwrap();

        SQLiteStore::new(connection).unwrap()
    }

    #[test]
    fn get_missing_key_returns_none() {
        let store = get_test_store();

        assert_eq!(store.get("SavedBalances"), Ok(None));
    }

    #[test]
    fn set_then_get() {
        let mut store = get_test_store();

        store.set("SavedBalances", b"[]").unwrap();

        assert_eq!(store.get("SavedBalances"), Ok(Some(b"[]".to_vec())));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut store = get_test_store();

        store.set("SavedBalances", b"[1]").unwrap();
        store.set("SavedBalances", b"[1,2]").unwrap();

        assert_eq!(store.get("SavedBalances"), Ok(Some(b"[1,2]".to_vec())));
    }

    #[test]
    fn remove_deletes_value() {
        let mut store = get_test_store();
        store.set("userName", b"Thandi").unwrap();

        store.remove("userName").unwrap();

        assert_eq!(store.get("userName"), Ok(None));
    }

    #[test]
    fn set_many_writes_all_entries() {
        let mut store = get_test_store();

        store
            .set_many(&[("a", b"1".to_vec()), ("b", b"2".to_vec())])
            .unwrap();

        assert_eq!(store.get("a"), Ok(Some(b"1".to_vec())));
        assert_eq!(store.get("b"), Ok(Some(b"2".to_vec())));
    }

    #[test]
    fn set_many_writes_nothing_when_an_entry_fails() {
        let mut store = get_store_rejecting("b");

        let result = store.set_many(&[("a", b"1".to_vec()), ("b", b"2".to_vec())]);

        assert!(result.is_err());
        assert_eq!(store.get("a"), Ok(None));
        assert_eq!(store.get("b"), Ok(None));
    }

    #[test]
    fn write_batch_stores_and_removes() {
        let mut store = get_test_store();
        store.set("old", b"0").unwrap();

        store.write_batch(&[("new", b"1".to_vec())], &["old"]).unwrap();

        assert_eq!(store.get("new"), Ok(Some(b"1".to_vec())));
        assert_eq!(store.get("old"), Ok(None));
    }

    #[test]
    fn write_batch_keeps_removals_when_an_entry_fails() {
        let mut store = get_store_rejecting("new");
        store.set("old", b"0").unwrap();

        let result = store.write_batch(&[("new", b"1".to_vec())], &["old"]);

        assert!(result.is_err());
        assert_eq!(store.get("old"), Ok(Some(b"0".to_vec())));
    }
}

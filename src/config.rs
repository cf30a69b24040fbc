//! Application settings shared by the command line tools.

use crate::{Error, timezone::get_local_offset};

/// The timezone used when none is given.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";
/// The currency symbol used when none is given (South African rand).
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R";
/// How many transactions the summary lists.
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

/// Settings for opening and presenting a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// File path to the application SQLite database.
    pub db_path: String,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    pub local_timezone: String,
    /// The symbol to print in front of amounts.
    pub currency_symbol: String,
    /// How many transactions the summary lists.
    pub recent_limit: usize,
}

impl AppConfig {
    /// Create a new [AppConfig] with the default currency and recent
    /// transaction limit.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a valid,
    /// canonical timezone name.
    pub fn new(db_path: &str, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            db_path: db_path.to_owned(),
            local_timezone: local_timezone.to_owned(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
            recent_limit: RECENT_TRANSACTION_LIMIT,
        })
    }

    /// Set the currency symbol.
    pub fn currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_owned();
        self
    }
}

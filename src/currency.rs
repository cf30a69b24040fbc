//! Formatting amounts of money for display.

use numfmt::{Formatter, Precision};

use crate::Error;

/// Formats amounts with a fixed currency symbol, two decimal places and
/// thousands separators.
pub struct CurrencyFormatter {
    symbol: String,
    positive: Formatter,
    negative: Formatter,
}

impl CurrencyFormatter {
    /// Create a formatter that puts `symbol` in front of amounts.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if `symbol` is too long to be
    /// used as a prefix.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        let invalid_symbol = |_| Error::InvalidCurrencySymbol(symbol.to_owned());

        let positive = Formatter::currency(symbol)
            .map_err(invalid_symbol)?
            .precision(Precision::Decimals(2));
        let negative = Formatter::currency(&format!("-{symbol}"))
            .map_err(invalid_symbol)?
            .precision(Precision::Decimals(2));

        Ok(Self {
            symbol: symbol.to_owned(),
            positive,
            negative,
        })
    }

    /// Format `amount`, e.g. `R1,234.50` or `-R20.00`.
    ///
    /// Amounts are rounded to cents first, so amounts that round to zero are
    /// shown without a sign.
    pub fn format(&self, amount: f64) -> String {
        let cents = (amount * 100.0).round() / 100.0;

        let formatted = if cents < 0.0 {
            self.negative.fmt_string(cents.abs())
        } else if cents > 0.0 {
            self.positive.fmt_string(cents)
        } else {
            // numfmt renders zero as a bare "0"
            return format!("{}0.00", self.symbol);
        };

        pad_cents(formatted)
    }
}

/// Format `amount` with `symbol`, two decimal places and thousands separators.
///
/// Negative amounts put the minus sign before the symbol, e.g. `-R1,200.00`.
///
/// # Errors
/// Returns [Error::InvalidCurrencySymbol] if `symbol` cannot be used as a prefix.
pub fn format_currency(amount: f64, symbol: &str) -> Result<String, Error> {
    Ok(CurrencyFormatter::new(symbol)?.format(amount))
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3".
fn pad_cents(mut formatted: String) -> String {
    let decimals = match formatted.rfind('.') {
        Some(point) => formatted.len() - point - 1,
        None => {
            formatted.push('.');
            0
        }
    };

    for _ in decimals..2 {
        formatted.push('0');
    }

    formatted
}

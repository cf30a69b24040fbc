//! Named accounts and their running balances.

mod core;

pub use core::{Balance, total_balance};

pub(crate) use core::{
    add_balance, amount_after_delta, apply_delta, delete_balance, find_balance,
};

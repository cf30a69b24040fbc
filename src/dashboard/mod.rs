//! Dashboard module
//!
//! Read-only views computed from the ledger: the home summary, the accounts
//! overview, and the monthly report.

mod aggregation;
mod overview;
mod summary;

pub use aggregation::{MonthlyReport, MonthlyReportRow};
pub use overview::AccountsOverview;
pub use summary::Summary;

//! Financial periods and lock rules.

pub mod period;

pub use period::{validate_posting_permission, FinancialPeriod, PeriodKey};

//! Shared types used across all Tally crates.

mod amount;
mod id;

pub use amount::{round_money, MONEY_SCALE};
pub use id::{AccountId, JournalEntryId, LedgerEntryId, PeriodId, TenantId, UserId};


#[cfg(test)]
mod amount_tests;

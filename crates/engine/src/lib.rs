//! Posting engine for Tally.
//!
//! This crate owns the mutable state: the per-tenant books holding the
//! chart of accounts, the journal, the append-only ledger rows, and the
//! financial period registry. All writes go through [`PostingEngine`],
//! which commits each posting atomically under the tenant book's
//! exclusive guard.
//!
//! # Modules
//!
//! - `store` - In-memory tenant books behind a concurrent map
//! - `engine` - The posting engine and its atomic commit path
//! - `accounts` - Chart of accounts registry
//! - `period` - Financial period registry and lock management
//! - `postings` - Derived postings (invoice, expense, payment, payroll, ...)
//! - `reversal` - Journal entry reversal
//! - `reports` - Balance, trial-balance, and period summary queries

pub mod accounts;
pub mod engine;
pub mod period;
pub mod postings;
pub mod reports;
pub mod reversal;
pub mod store;

pub use engine::{NewJournalEntry, PostedEntry, PostingEngine};
pub use reports::{BalanceCheck, TrialBalance, TrialBalanceRow};
pub use store::LedgerStore;

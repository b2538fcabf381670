//! Double-entry journal and ledger logic.
//!
//! This module implements the core bookkeeping functionality:
//! - Journal entry and ledger entry domain types
//! - Line-set balancing validation
//! - Reversal construction
//! - Error types for ledger operations

pub mod entry;
pub mod error;
pub mod reversal;
pub mod types;
pub mod validation;

#[cfg(test)]
mod reversal_props;
#[cfg(test)]
mod validation_props;

pub use entry::{JournalEntry, LedgerEntry};
pub use error::{LedgerError, LedgerResult};
pub use reversal::{
    build_reversal_lines, reversal_description, reversal_reference, validate_reversible,
    REVERSAL_REFERENCE_PREFIX,
};
pub use types::{
    AccountRef, EntrySide, JournalEntryType, JournalLine, JournalStatus, LineTotals,
    SourceDocument,
};
pub use validation::{validate_lines, BALANCE_TOLERANCE, MIN_LINES};

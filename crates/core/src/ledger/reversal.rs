//! Reversal construction.
//!
//! Posted entries are never edited; a mistake is corrected by posting a
//! mirror entry that swaps every line's side. The functions here build the
//! mirror material; the engine owns the atomic linking of both entries.

use super::entry::{JournalEntry, LedgerEntry};
use super::error::LedgerError;
use super::types::{EntrySide, JournalLine};

/// Prefix marking a reversal's reference.
pub const REVERSAL_REFERENCE_PREFIX: &str = "REV-";

/// Checks that an entry is eligible for reversal.
///
/// An entry cannot be reversed twice, and a reversal cannot itself be
/// reversed (re-post the original instead).
pub fn validate_reversible(entry: &JournalEntry) -> Result<(), LedgerError> {
    if entry.is_reversed() {
        return Err(LedgerError::AlreadyReversed {
            entry_number: entry.entry_number.clone(),
        });
    }
    if entry.is_reversal() {
        return Err(LedgerError::InvalidReversal {
            entry_number: entry.entry_number.clone(),
            reason: "entry is itself a reversal".to_string(),
        });
    }
    Ok(())
}

/// Builds mirror lines for a set of ledger rows: same accounts and amounts,
/// opposite sides, line memos prefixed "Reversal of".
#[must_use]
pub fn build_reversal_lines(rows: &[LedgerEntry]) -> Vec<JournalLine> {
    rows.iter()
        .map(|row| {
            let description = row
                .description
                .as_ref()
                .map(|text| format!("Reversal of {text}"));
            match row.side {
                EntrySide::Debit => JournalLine::credit(row.account_id, row.amount, description),
                EntrySide::Credit => JournalLine::debit(row.account_id, row.amount, description),
            }
        })
        .collect()
}

/// Builds the reference for a reversal of the given entry number.
#[must_use]
pub fn reversal_reference(entry_number: &str) -> String {
    format!("{REVERSAL_REFERENCE_PREFIX}{entry_number}")
}

/// Builds the description for a reversal of the given entry.
#[must_use]
pub fn reversal_description(entry: &JournalEntry) -> String {
    format!("Reversal of {}: {}", entry.entry_number, entry.description)
}

//! Journal entry reversal.

use chrono::Utc;
use tracing::info;

use tally_core::auth::Actor;
use tally_core::ledger::error::LedgerError;
use tally_core::ledger::reversal::{
    build_reversal_lines, reversal_description, reversal_reference, validate_reversible,
};
use tally_core::ledger::types::JournalEntryType;
use tally_shared::types::{JournalEntryId, TenantId};

use crate::engine::{NewJournalEntry, PostedEntry, PostingEngine};

impl PostingEngine {
    /// Reverses a posted journal entry.
    ///
    /// Posts a mirror entry (same accounts and amounts, opposite sides)
    /// dated today, and links both entries. The fetch, the mirror posting,
    /// and the linking all happen under one tenant guard, so the ledger is
    /// never visible with a half-linked reversal and the same entry can
    /// never be reversed twice.
    pub fn reverse_journal_entry(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        entry_id: JournalEntryId,
    ) -> Result<PostedEntry, LedgerError> {
        let mut book = self.store.book_mut(tenant_id);

        let original = book
            .entries
            .get(&entry_id)
            .ok_or_else(|| LedgerError::EntryNotFound {
                entry_number: entry_id.to_string(),
            })?
            .clone();
        validate_reversible(&original)?;

        let rows = book.rows_for_entry(entry_id);
        let mut input = NewJournalEntry::new(
            Utc::now().date_naive(),
            reversal_description(&original),
            build_reversal_lines(&rows),
        )
        .with_type(JournalEntryType::Reversal)
        .with_reference(reversal_reference(&original.entry_number));
        input.original_entry_id = Some(original.id);

        let posted = Self::post_locked(&mut book, tenant_id, actor, input)?;

        // Link the original inside the same critical section.
        if let Some(entry) = book.entries.get_mut(&original.id) {
            entry.reversed_by = Some(posted.entry.id);
        }
        drop(book);

        info!(
            tenant = %tenant_id,
            original = %original.entry_number,
            reversal = %posted.entry.entry_number,
            "journal entry reversed"
        );
        Ok(posted)
    }

    /// Fetches a posted entry with its ledger rows.
    pub fn get_journal_entry(
        &self,
        tenant_id: TenantId,
        entry_id: JournalEntryId,
    ) -> Result<PostedEntry, LedgerError> {
        let book = self.store.book(tenant_id)?;
        let entry = book
            .entries
            .get(&entry_id)
            .ok_or_else(|| LedgerError::EntryNotFound {
                entry_number: entry_id.to_string(),
            })?
            .clone();
        let rows = book.rows_for_entry(entry_id);
        Ok(PostedEntry { entry, rows })
    }
}

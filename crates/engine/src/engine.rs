//! The posting engine and its atomic commit path.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use tally_core::account::NormalBalance;
use tally_core::auth::Actor;
use tally_core::fiscal::period::{validate_posting_permission, PeriodKey};
use tally_core::ledger::entry::{JournalEntry, LedgerEntry};
use tally_core::ledger::error::LedgerError;
use tally_core::ledger::types::{
    AccountRef, EntrySide, JournalEntryType, JournalLine, JournalStatus, SourceDocument,
};
use tally_core::ledger::validation::validate_lines;
use tally_shared::types::{AccountId, JournalEntryId, LedgerEntryId, TenantId};

use crate::store::{LedgerStore, TenantBook};

/// Maximum total posting attempts when transient conflicts occur.
const MAX_POST_ATTEMPTS: u32 = 3;

/// Input for posting a journal entry.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    /// Effective accounting date.
    pub entry_date: chrono::NaiveDate,
    /// What this entry records.
    pub description: String,
    /// The debit/credit lines.
    pub lines: Vec<JournalLine>,
    /// Entry classification.
    pub entry_type: JournalEntryType,
    /// External reference.
    pub reference: Option<String>,
    /// Business document that produced this entry.
    pub source: Option<SourceDocument>,
    /// Placeholder for an approval workflow; not enforced by the engine.
    pub requires_approval: bool,
    /// Set by the reversal path, linking back to the reversed entry.
    pub(crate) original_entry_id: Option<JournalEntryId>,
}

impl NewJournalEntry {
    /// Creates a manual entry with the given date, description, and lines.
    #[must_use]
    pub fn new(
        entry_date: chrono::NaiveDate,
        description: impl Into<String>,
        lines: Vec<JournalLine>,
    ) -> Self {
        Self {
            entry_date,
            description: description.into(),
            lines,
            entry_type: JournalEntryType::Manual,
            reference: None,
            source: None,
            requires_approval: false,
            original_entry_id: None,
        }
    }

    /// Sets the entry classification.
    #[must_use]
    pub fn with_type(mut self, entry_type: JournalEntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    /// Sets the external reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the source document.
    #[must_use]
    pub fn with_source(mut self, source: SourceDocument) -> Self {
        self.source = Some(source);
        self
    }
}

/// A posted journal entry with its ledger rows.
#[derive(Debug, Clone)]
pub struct PostedEntry {
    /// The posted header.
    pub entry: JournalEntry,
    /// One ledger row per line, in input order.
    pub rows: Vec<LedgerEntry>,
}

/// A journal line resolved against the chart of accounts.
struct ResolvedLine {
    account_id: AccountId,
    account_code: String,
    account_name: String,
    normal_balance: NormalBalance,
    side: EntrySide,
    amount: Decimal,
    description: Option<String>,
}

/// The posting engine.
///
/// Cheap to share behind an `Arc`; every method takes `&self` and scopes
/// its locking to the tenant involved.
#[derive(Debug, Default)]
pub struct PostingEngine {
    pub(crate) store: LedgerStore,
}

impl PostingEngine {
    /// Creates an engine over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and posts a journal entry atomically.
    ///
    /// Validation short-circuits in order: line structure and balancing,
    /// period lock, account resolution. The commit itself (entry number,
    /// header, ledger rows, cached balances) happens under the tenant
    /// book's exclusive guard, so either everything lands or nothing does.
    ///
    /// Transient `Conflict` errors are retried up to a total of
    /// [`MAX_POST_ATTEMPTS`] attempts; every other error surfaces
    /// immediately.
    pub fn create_journal_entry(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        input: NewJournalEntry,
    ) -> Result<PostedEntry, LedgerError> {
        let mut attempt = 1;
        loop {
            let result = {
                let mut book = self.store.book_mut(tenant_id);
                Self::post_locked(&mut book, tenant_id, actor, input.clone())
            };
            match result {
                Err(err) if err.is_retryable() && attempt < MAX_POST_ATTEMPTS => {
                    attempt += 1;
                    warn!(
                        tenant = %tenant_id,
                        attempt,
                        error = %err,
                        "retrying posting after conflict"
                    );
                }
                Ok(posted) => {
                    info!(
                        tenant = %tenant_id,
                        entry = %posted.entry.entry_number,
                        total = %posted.entry.total_debits,
                        "journal entry posted"
                    );
                    return Ok(posted);
                }
                Err(err) => {
                    debug!(tenant = %tenant_id, error = %err, "posting rejected");
                    return Err(err);
                }
            }
        }
    }

    /// Posts an entry against an already-held tenant book.
    ///
    /// Shared by the direct posting path and the reversal path, which must
    /// mirror and link inside one critical section.
    pub(crate) fn post_locked(
        book: &mut TenantBook,
        tenant_id: TenantId,
        actor: Actor,
        input: NewJournalEntry,
    ) -> Result<PostedEntry, LedgerError> {
        let totals = validate_lines(&input.lines)?;

        let period_key = PeriodKey::from_date(input.entry_date);
        validate_posting_permission(book.period_for(tenant_id, period_key), actor.role)?;

        let resolved = Self::resolve_lines(book, &input.lines)?;

        // Commit. Everything below is infallible under the held guard.
        let entry_number = book.next_entry_number();
        let now = Utc::now();
        let entry = JournalEntry {
            id: JournalEntryId::new(),
            tenant_id,
            entry_number,
            entry_date: input.entry_date,
            period: period_key,
            description: input.description,
            entry_type: input.entry_type,
            status: JournalStatus::Posted,
            reference: input.reference,
            source: input.source.clone(),
            requires_approval: input.requires_approval,
            total_debits: totals.total_debits,
            total_credits: totals.total_credits,
            reversed_by: None,
            original_entry_id: input.original_entry_id,
            posted_by: actor.user_id,
            posted_at: now,
        };

        let rows: Vec<LedgerEntry> = resolved
            .iter()
            .map(|line| LedgerEntry {
                id: LedgerEntryId::new(),
                tenant_id,
                journal_entry_id: entry.id,
                account_id: line.account_id,
                account_code: line.account_code.clone(),
                account_name: line.account_name.clone(),
                transaction_date: input.entry_date,
                period: period_key,
                side: line.side,
                amount: line.amount,
                description: line.description.clone(),
                source: input.source.clone(),
                is_reconciled: false,
                reconciled_at: None,
                reconciled_by: None,
                created_at: now,
            })
            .collect();

        for line in &resolved {
            let account = book
                .accounts
                .get_mut(&line.account_id)
                .ok_or_else(|| LedgerError::AccountNotFound {
                    reference: line.account_code.clone(),
                })?;
            let (debit, credit) = match line.side {
                EntrySide::Debit => (line.amount, Decimal::ZERO),
                EntrySide::Credit => (Decimal::ZERO, line.amount),
            };
            account.current_balance += line.normal_balance.balance_change(debit, credit);
        }

        book.period_for(tenant_id, period_key).journal_entry_count += 1;
        book.rows.extend(rows.iter().cloned());
        book.entries.insert(entry.id, entry.clone());

        Ok(PostedEntry { entry, rows })
    }

    /// Resolves every line's account reference within the tenant,
    /// requiring active accounts.
    fn resolve_lines(
        book: &TenantBook,
        lines: &[JournalLine],
    ) -> Result<Vec<ResolvedLine>, LedgerError> {
        lines
            .iter()
            .map(|line| {
                let account = match &line.account {
                    AccountRef::Id(id) => book.accounts.get(id),
                    AccountRef::Code(code) => book.account_by_code(code),
                }
                .ok_or_else(|| LedgerError::AccountNotFound {
                    reference: line.account.to_string(),
                })?;
                if !account.is_active {
                    return Err(LedgerError::AccountInactive {
                        code: account.code.clone(),
                    });
                }
                Ok(ResolvedLine {
                    account_id: account.id,
                    account_code: account.code.clone(),
                    account_name: account.name.clone(),
                    normal_balance: account.normal_balance,
                    side: line.side(),
                    amount: line.amount(),
                    description: line.description.clone(),
                })
            })
            .collect()
    }
}

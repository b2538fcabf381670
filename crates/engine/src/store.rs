//! In-memory tenant books.
//!
//! All state for a tenant lives in one [`TenantBook`]. The books sit in a
//! [`dashmap::DashMap`], so an exclusive reference to one book is exactly
//! the per-tenant critical section the posting path needs: entry-number
//! allocation, journal insert, ledger appends, balance updates, and the
//! period-lock check all happen under a single guard. Reads take shared
//! guards and run concurrently with postings to other tenants.

use std::collections::HashMap;

use dashmap::mapref::one::{Ref, RefMut};
use dashmap::DashMap;
use tally_core::account::Account;
use tally_core::fiscal::period::{FinancialPeriod, PeriodKey};
use tally_core::ledger::entry::{JournalEntry, LedgerEntry};
use tally_core::ledger::error::LedgerError;
use tally_core::postings::PostingAccounts;
use tally_shared::types::{AccountId, JournalEntryId, TenantId};

/// Everything the engine knows about one tenant.
#[derive(Debug)]
pub struct TenantBook {
    /// Chart of accounts by id.
    pub accounts: HashMap<AccountId, Account>,
    /// Tenant-scoped code index into `accounts`.
    pub codes: HashMap<String, AccountId>,
    /// Journal entry headers by id.
    pub entries: HashMap<JournalEntryId, JournalEntry>,
    /// Append-only ledger rows, in posting order.
    pub rows: Vec<LedgerEntry>,
    /// Financial periods by calendar month.
    pub periods: HashMap<PeriodKey, FinancialPeriod>,
    /// Posting role to account code mapping.
    pub posting_accounts: PostingAccounts,
    /// Last allocated journal entry sequence number.
    pub entry_seq: u64,
}

impl Default for TenantBook {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            codes: HashMap::new(),
            entries: HashMap::new(),
            rows: Vec::new(),
            periods: HashMap::new(),
            posting_accounts: PostingAccounts::standard(),
            entry_seq: 0,
        }
    }
}

impl TenantBook {
    /// Allocates the next sequential entry number (e.g. "JE-000042").
    pub fn next_entry_number(&mut self) -> String {
        self.entry_seq += 1;
        format!("JE-{:06}", self.entry_seq)
    }

    /// Looks up an account by its tenant-scoped code.
    pub fn account_by_code(&self, code: &str) -> Option<&Account> {
        self.codes.get(code).and_then(|id| self.accounts.get(id))
    }

    /// Returns the period for the given key, creating it open if absent.
    pub fn period_for(&mut self, tenant_id: TenantId, key: PeriodKey) -> &mut FinancialPeriod {
        self.periods
            .entry(key)
            .or_insert_with(|| FinancialPeriod::open(tenant_id, key))
    }

    /// Returns all ledger rows belonging to one journal entry.
    pub fn rows_for_entry(&self, entry_id: JournalEntryId) -> Vec<LedgerEntry> {
        self.rows
            .iter()
            .filter(|row| row.journal_entry_id == entry_id)
            .cloned()
            .collect()
    }
}

/// Concurrent map of tenant books.
#[derive(Debug, Default)]
pub struct LedgerStore {
    books: DashMap<TenantId, TenantBook>,
}

impl LedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the exclusive guard for a tenant's book, creating the book on
    /// first reference.
    pub fn book_mut(&self, tenant_id: TenantId) -> RefMut<'_, TenantId, TenantBook> {
        self.books.entry(tenant_id).or_default()
    }

    /// Takes a shared guard for a tenant's book.
    ///
    /// Fails with `AccountNotFound` when the tenant has no book yet, since
    /// every read resolves at least one account.
    pub fn book(&self, tenant_id: TenantId) -> Result<Ref<'_, TenantId, TenantBook>, LedgerError> {
        self.books
            .get(&tenant_id)
            .ok_or_else(|| LedgerError::AccountNotFound {
                reference: format!("tenant {tenant_id} has no accounts"),
            })
    }
}

//! Derived postings.
//!
//! Each method maps one business event onto journal lines through the
//! tenant's `PostingAccounts` table and posts them through the ordinary
//! entry path, so derived postings get the same validation, locking, and
//! atomicity as manual entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use tally_core::auth::Actor;
use tally_core::ledger::error::LedgerError;
use tally_core::ledger::types::{AccountRef, JournalEntryType, SourceDocument};
use tally_core::postings::{
    expense_lines, invoice_lines, opening_balance_lines, payment_received_lines, payroll_lines,
    DeductionKind, ExpenseCategory, PostingAccounts,
};
use tally_shared::types::TenantId;

use crate::engine::{NewJournalEntry, PostedEntry, PostingEngine};

impl PostingEngine {
    /// Replaces the tenant's posting role table after validating every
    /// mapped code against the chart.
    pub fn configure_posting_accounts(
        &self,
        tenant_id: TenantId,
        table: PostingAccounts,
    ) -> Result<(), LedgerError> {
        let mut book = self.store.book_mut(tenant_id);
        let accounts: Vec<_> = book.accounts.values().cloned().collect();
        table.validate_against(&accounts)?;
        book.posting_accounts = table;
        drop(book);

        info!(tenant = %tenant_id, "posting accounts configured");
        Ok(())
    }

    fn posting_accounts(&self, tenant_id: TenantId) -> Result<PostingAccounts, LedgerError> {
        Ok(self.store.book(tenant_id)?.posting_accounts.clone())
    }

    /// Posts a sales invoice: AR debit for the total, revenue and tax
    /// credits.
    #[allow(clippy::too_many_arguments)]
    pub fn post_invoice(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        entry_date: NaiveDate,
        description: impl Into<String>,
        subtotal: Decimal,
        tax: Decimal,
        total: Decimal,
        source: Option<SourceDocument>,
    ) -> Result<PostedEntry, LedgerError> {
        let accounts = self.posting_accounts(tenant_id)?;
        let lines = invoice_lines(&accounts, subtotal, tax, total)?;
        let mut input = NewJournalEntry::new(entry_date, description, lines)
            .with_type(JournalEntryType::Invoice);
        input.source = source;
        self.create_journal_entry(tenant_id, actor, input)
    }

    /// Posts an expense on credit against the category's expense account.
    #[allow(clippy::too_many_arguments)]
    pub fn post_expense(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        entry_date: NaiveDate,
        description: impl Into<String>,
        category: ExpenseCategory,
        amount: Decimal,
        source: Option<SourceDocument>,
    ) -> Result<PostedEntry, LedgerError> {
        let accounts = self.posting_accounts(tenant_id)?;
        let lines = expense_lines(&accounts, category, amount)?;
        let mut input = NewJournalEntry::new(entry_date, description, lines)
            .with_type(JournalEntryType::Expense);
        input.source = source;
        self.create_journal_entry(tenant_id, actor, input)
    }

    /// Posts a customer payment: cash debit, AR credit.
    pub fn post_payment_received(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        entry_date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        source: Option<SourceDocument>,
    ) -> Result<PostedEntry, LedgerError> {
        let accounts = self.posting_accounts(tenant_id)?;
        let lines = payment_received_lines(&accounts, amount)?;
        let mut input = NewJournalEntry::new(entry_date, description, lines)
            .with_type(JournalEntryType::Payment);
        input.source = source;
        self.create_journal_entry(tenant_id, actor, input)
    }

    /// Posts a payroll run: gross salary expense, net cash out, one
    /// payable per nonzero deduction.
    #[allow(clippy::too_many_arguments)]
    pub fn post_payroll(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        entry_date: NaiveDate,
        description: impl Into<String>,
        gross: Decimal,
        net: Decimal,
        deductions: &[(DeductionKind, Decimal)],
        source: Option<SourceDocument>,
    ) -> Result<PostedEntry, LedgerError> {
        let accounts = self.posting_accounts(tenant_id)?;
        let lines = payroll_lines(&accounts, gross, net, deductions)?;
        let mut input = NewJournalEntry::new(entry_date, description, lines)
            .with_type(JournalEntryType::Payroll);
        input.source = source;
        self.create_journal_entry(tenant_id, actor, input)
    }

    /// Posts an account's opening balance against Opening Balance Equity,
    /// mirrored by the account's normal side.
    pub fn post_opening_balance(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        entry_date: NaiveDate,
        account: &AccountRef,
        amount: Decimal,
    ) -> Result<PostedEntry, LedgerError> {
        let target = self.get_account(tenant_id, account)?;
        let accounts = self.posting_accounts(tenant_id)?;
        let lines = opening_balance_lines(&accounts, &target.code, target.normal_balance, amount)?;
        let input = NewJournalEntry::new(
            entry_date,
            format!("Opening balance for {} {}", target.code, target.name),
            lines,
        )
        .with_type(JournalEntryType::OpeningBalance);
        self.create_journal_entry(tenant_id, actor, input)
    }
}

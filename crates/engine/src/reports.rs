//! Balance, trial-balance, and period summary queries.
//!
//! Reads take shared guards; they never block postings to other tenants.
//! The ledger rows are the source of truth: every cached figure here can
//! be recomputed from them, and `verify_account_balance` checks that the
//! cache agrees.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use tally_core::account::{Account, AccountType, NormalBalance};
use tally_core::fiscal::period::{FinancialPeriod, PeriodKey};
use tally_core::ledger::error::LedgerError;
use tally_core::ledger::types::AccountRef;
use tally_core::ledger::validation::BALANCE_TOLERANCE;
use tally_shared::types::{AccountId, TenantId};

use crate::engine::PostingEngine;
use crate::store::TenantBook;

/// Outcome of checking a cached balance against the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceCheck {
    /// The checked account.
    pub account_id: AccountId,
    /// The cached running balance.
    pub cached: Decimal,
    /// The balance recomputed from opening balance plus ledger rows.
    pub recomputed: Decimal,
    /// True when the two agree exactly.
    pub matches: bool,
}

/// One account's line on a trial balance.
#[derive(Debug, Clone, Serialize)]
pub struct TrialBalanceRow {
    /// The account.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance presented on the debit column.
    pub debit: Decimal,
    /// Balance presented on the credit column.
    pub credit: Decimal,
}

/// A trial balance as of a date.
#[derive(Debug, Clone, Serialize)]
pub struct TrialBalance {
    /// The as-of date.
    pub as_of: NaiveDate,
    /// One row per active account, ordered by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Debit column total.
    pub total_debits: Decimal,
    /// Credit column total.
    pub total_credits: Decimal,
    /// True when the columns agree within tolerance. An out-of-balance
    /// trial balance is reported, never hidden.
    pub is_balanced: bool,
}

impl TrialBalance {
    /// Signed difference between the columns, for drift monitoring.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debits - self.total_credits
    }
}

fn recomputed_balance(book: &TenantBook, account: &Account, as_of: NaiveDate) -> Decimal {
    let movement: Decimal = book
        .rows
        .iter()
        .filter(|row| row.account_id == account.id && row.transaction_date <= as_of)
        .map(|row| row.signed_amount(account.normal_balance))
        .sum();
    account.opening_balance + movement
}

impl PostingEngine {
    /// Returns an account's balance, signed per its normal side.
    ///
    /// Without a date the cached running balance is returned; with a date
    /// the balance is recomputed from the ledger rows. The two paths must
    /// agree for `as_of = today`.
    pub fn account_balance(
        &self,
        tenant_id: TenantId,
        account: &AccountRef,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, LedgerError> {
        let book = self.store.book(tenant_id)?;
        let found = match account {
            AccountRef::Id(id) => book.accounts.get(id),
            AccountRef::Code(code) => book.account_by_code(code),
        }
        .ok_or_else(|| LedgerError::AccountNotFound {
            reference: account.to_string(),
        })?;

        Ok(match as_of {
            None => found.current_balance,
            Some(date) => recomputed_balance(&book, found, date),
        })
    }

    /// Recomputes an account's balance from the ledger and compares it to
    /// the cache.
    pub fn verify_account_balance(
        &self,
        tenant_id: TenantId,
        account: &AccountRef,
    ) -> Result<BalanceCheck, LedgerError> {
        let book = self.store.book(tenant_id)?;
        let found = match account {
            AccountRef::Id(id) => book.accounts.get(id),
            AccountRef::Code(code) => book.account_by_code(code),
        }
        .ok_or_else(|| LedgerError::AccountNotFound {
            reference: account.to_string(),
        })?;

        let recomputed = recomputed_balance(&book, found, NaiveDate::MAX);
        let check = BalanceCheck {
            account_id: found.id,
            cached: found.current_balance,
            recomputed,
            matches: found.current_balance == recomputed,
        };
        if !check.matches {
            debug!(
                tenant = %tenant_id,
                code = %found.code,
                cached = %check.cached,
                recomputed = %check.recomputed,
                "cached balance disagrees with ledger"
            );
        }
        Ok(check)
    }

    /// Builds a trial balance as of a date.
    ///
    /// Each active account is presented on its normal-balance column; a
    /// negative balance flips to the opposite column.
    pub fn trial_balance(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<TrialBalance, LedgerError> {
        let book = self.store.book(tenant_id)?;

        let mut accounts: Vec<&Account> = book
            .accounts
            .values()
            .filter(|account| account.is_active)
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));

        let mut rows = Vec::with_capacity(accounts.len());
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;
        for account in accounts {
            let balance = recomputed_balance(&book, account, as_of);
            let (debit, credit) = match (account.normal_balance, balance >= Decimal::ZERO) {
                (NormalBalance::Debit, true) | (NormalBalance::Credit, false) => {
                    (balance.abs(), Decimal::ZERO)
                }
                (NormalBalance::Credit, true) | (NormalBalance::Debit, false) => {
                    (Decimal::ZERO, balance.abs())
                }
            };
            total_debits += debit;
            total_credits += credit;
            rows.push(TrialBalanceRow {
                account_id: account.id,
                code: account.code.clone(),
                name: account.name.clone(),
                debit,
                credit,
            });
        }

        Ok(TrialBalance {
            as_of,
            rows,
            total_debits,
            total_credits,
            is_balanced: (total_debits - total_credits).abs() < BALANCE_TOLERANCE,
        })
    }

    /// Recomputes a period's cached summary from the ledger.
    pub fn refresh_period_summary(
        &self,
        tenant_id: TenantId,
        key: PeriodKey,
    ) -> Result<FinancialPeriod, LedgerError> {
        let mut book = self.store.book_mut(tenant_id);

        let mut revenue = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for row in book.rows.iter().filter(|row| row.period == key) {
            let Some(account) = book.accounts.get(&row.account_id) else {
                continue;
            };
            match account.account_type {
                AccountType::Revenue => {
                    revenue += row.signed_amount(NormalBalance::Credit);
                }
                AccountType::Expense => {
                    expenses += row.signed_amount(NormalBalance::Debit);
                }
                _ => {}
            }
        }
        let entry_count = book
            .entries
            .values()
            .filter(|entry| entry.period == key)
            .count() as u64;

        let period = book.period_for(tenant_id, key);
        period.total_revenue = revenue;
        period.total_expenses = expenses;
        period.net_income = revenue - expenses;
        period.journal_entry_count = entry_count;
        Ok(period.clone())
    }
}

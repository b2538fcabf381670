//! Chart of accounts registry.

use chrono::Utc;
use tracing::info;

use tally_core::account::{Account, AccountType, NewAccount, NormalBalance};
use tally_core::ledger::error::LedgerError;
use tally_core::ledger::types::AccountRef;
use tally_shared::types::{AccountId, TenantId};

use crate::engine::PostingEngine;
use crate::store::TenantBook;

impl PostingEngine {
    /// Registers a new account in the tenant's chart.
    ///
    /// Codes are unique per tenant. The normal balance derives from the
    /// account type unless the input overrides it (contra accounts). A
    /// parent must already exist and its ancestor chain must be acyclic.
    pub fn register_account(
        &self,
        tenant_id: TenantId,
        input: NewAccount,
    ) -> Result<Account, LedgerError> {
        let mut book = self.store.book_mut(tenant_id);
        let account = Self::register_locked(&mut book, tenant_id, input)?;
        info!(
            tenant = %tenant_id,
            code = %account.code,
            account_type = %account.account_type,
            "account registered"
        );
        Ok(account)
    }

    pub(crate) fn register_locked(
        book: &mut TenantBook,
        tenant_id: TenantId,
        input: NewAccount,
    ) -> Result<Account, LedgerError> {
        if book.codes.contains_key(&input.code) {
            return Err(LedgerError::DuplicateAccountCode { code: input.code });
        }
        if let Some(parent_id) = input.parent_id {
            Self::check_parent_chain(book, parent_id, None, &input.code)?;
        }

        let normal_balance = input
            .normal_balance
            .unwrap_or_else(|| NormalBalance::for_account_type(input.account_type));
        let account = Account {
            id: AccountId::new(),
            tenant_id,
            code: input.code,
            name: input.name,
            account_type: input.account_type,
            normal_balance,
            opening_balance: input.opening_balance,
            current_balance: input.opening_balance,
            is_active: true,
            is_system: input.is_system,
            parent_id: input.parent_id,
            created_at: Utc::now(),
        };
        book.codes.insert(account.code.clone(), account.id);
        book.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    /// Re-parents an account for hierarchical regrouping.
    ///
    /// The new parent must exist and its ancestor chain must not pass
    /// through the account being moved, so the hierarchy stays acyclic.
    pub fn set_account_parent(
        &self,
        tenant_id: TenantId,
        account: &AccountRef,
        parent: &AccountRef,
    ) -> Result<Account, LedgerError> {
        let mut book = self.store.book_mut(tenant_id);

        let child_id = Self::resolve_id(&book, account)?;
        let parent_id = Self::resolve_id(&book, parent)?;
        let child_code = book
            .accounts
            .get(&child_id)
            .map(|entry| entry.code.clone())
            .ok_or_else(|| LedgerError::AccountNotFound {
                reference: account.to_string(),
            })?;
        Self::check_parent_chain(&book, parent_id, Some(child_id), &child_code)?;

        let entry = book
            .accounts
            .get_mut(&child_id)
            .ok_or_else(|| LedgerError::AccountNotFound {
                reference: account.to_string(),
            })?;
        entry.parent_id = Some(parent_id);
        let snapshot = entry.clone();
        drop(book);

        info!(tenant = %tenant_id, code = %snapshot.code, "account re-parented");
        Ok(snapshot)
    }

    fn resolve_id(book: &TenantBook, account: &AccountRef) -> Result<AccountId, LedgerError> {
        match account {
            AccountRef::Id(id) if book.accounts.contains_key(id) => Ok(*id),
            AccountRef::Code(code) => {
                book.codes
                    .get(code)
                    .copied()
                    .ok_or_else(|| LedgerError::AccountNotFound {
                        reference: code.clone(),
                    })
            }
            AccountRef::Id(id) => Err(LedgerError::AccountNotFound {
                reference: id.to_string(),
            }),
        }
    }

    /// Walks the ancestor chain from `parent_id`, rejecting a missing
    /// parent or a chain that passes through `child` (which would close a
    /// loop once the assignment lands).
    fn check_parent_chain(
        book: &TenantBook,
        parent_id: AccountId,
        child: Option<AccountId>,
        code: &str,
    ) -> Result<(), LedgerError> {
        let mut seen = std::collections::HashSet::new();
        let mut current = Some(parent_id);
        while let Some(id) = current {
            if Some(id) == child || !seen.insert(id) {
                return Err(LedgerError::ParentCycle {
                    code: code.to_string(),
                });
            }
            let parent = book
                .accounts
                .get(&id)
                .ok_or_else(|| LedgerError::AccountNotFound {
                    reference: id.to_string(),
                })?;
            current = parent.parent_id;
        }
        Ok(())
    }

    /// Deactivates an account so it rejects new postings.
    ///
    /// Accounts are never removed; deactivation keeps historical rows
    /// resolvable. System accounts may also only be deactivated.
    pub fn deactivate_account(
        &self,
        tenant_id: TenantId,
        account: &AccountRef,
    ) -> Result<Account, LedgerError> {
        let mut book = self.store.book_mut(tenant_id);
        let id = match account {
            AccountRef::Id(id) => *id,
            AccountRef::Code(code) => {
                *book
                    .codes
                    .get(code)
                    .ok_or_else(|| LedgerError::AccountNotFound {
                        reference: code.clone(),
                    })?
            }
        };
        let entry = book
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::AccountNotFound {
                reference: account.to_string(),
            })?;
        entry.is_active = false;
        info!(tenant = %tenant_id, code = %entry.code, "account deactivated");
        Ok(entry.clone())
    }

    /// Fetches one account.
    pub fn get_account(
        &self,
        tenant_id: TenantId,
        account: &AccountRef,
    ) -> Result<Account, LedgerError> {
        let book = self.store.book(tenant_id)?;
        let found = match account {
            AccountRef::Id(id) => book.accounts.get(id),
            AccountRef::Code(code) => book.account_by_code(code),
        };
        found
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound {
                reference: account.to_string(),
            })
    }

    /// Lists the tenant's accounts ordered by code.
    pub fn list_accounts(&self, tenant_id: TenantId) -> Result<Vec<Account>, LedgerError> {
        let book = self.store.book(tenant_id)?;
        let mut accounts: Vec<Account> = book.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    /// Seeds the standard onboarding chart for a new tenant.
    ///
    /// Codes line up with `PostingAccounts::standard()` so derived
    /// postings work out of the box.
    pub fn seed_chart(&self, tenant_id: TenantId) -> Result<Vec<Account>, LedgerError> {
        let defs = [
            NewAccount::new("1000", "Cash", AccountType::Asset).system(),
            NewAccount::new("1100", "Accounts Receivable", AccountType::Asset).system(),
            NewAccount::new("1500", "Accumulated Depreciation", AccountType::Asset)
                .contra(NormalBalance::Credit),
            NewAccount::new("2000", "Accounts Payable", AccountType::Liability).system(),
            NewAccount::new("2200", "Tax Payable", AccountType::Liability).system(),
            NewAccount::new("2300", "Pension Payable", AccountType::Liability),
            NewAccount::new("2400", "Insurance Payable", AccountType::Liability),
            NewAccount::new("3000", "Owner's Equity", AccountType::Equity).system(),
            NewAccount::new("3100", "Opening Balance Equity", AccountType::Equity).system(),
            NewAccount::new("4000", "Sales Revenue", AccountType::Revenue).system(),
            NewAccount::new("5100", "Rent Expense", AccountType::Expense),
            NewAccount::new("5200", "Utilities Expense", AccountType::Expense),
            NewAccount::new("5300", "Office Supplies Expense", AccountType::Expense),
            NewAccount::new("5400", "Travel Expense", AccountType::Expense),
            NewAccount::new("5500", "Marketing Expense", AccountType::Expense),
            NewAccount::new("5600", "Insurance Expense", AccountType::Expense),
            NewAccount::new("5700", "Professional Services Expense", AccountType::Expense),
            NewAccount::new("5900", "Other Expenses", AccountType::Expense),
            NewAccount::new("6000", "Salaries Expense", AccountType::Expense).system(),
        ];

        let mut book = self.store.book_mut(tenant_id);
        let mut created = Vec::with_capacity(defs.len());
        for def in defs {
            created.push(Self::register_locked(&mut book, tenant_id, def)?);
        }
        drop(book);

        info!(tenant = %tenant_id, accounts = created.len(), "standard chart seeded");
        Ok(created)
    }
}

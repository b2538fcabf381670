//! Derived posting line builders.
//!
//! Business events (invoices, expenses, payments, payroll, opening
//! balances) map onto journal lines through a tenant-scoped
//! [`PostingAccounts`] table. Call sites never hard-code account lookups;
//! a missing mapping fails loudly with `MissingPostingAccount`.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::types::round_money;

use crate::account::{Account, NormalBalance};
use crate::ledger::error::LedgerError;
use crate::ledger::types::JournalLine;

/// Roles an account can play in derived postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingRole {
    /// Cash / bank account.
    Cash,
    /// Accounts receivable.
    AccountsReceivable,
    /// Accounts payable.
    AccountsPayable,
    /// Sales revenue.
    Revenue,
    /// Sales tax collected, owed to the authority.
    SalesTaxPayable,
    /// Opening balance offset in equity.
    OpeningBalanceEquity,
    /// Gross salary expense.
    SalaryExpense,
    /// Withheld payroll tax.
    PayrollTaxPayable,
    /// Withheld pension contributions.
    PensionPayable,
    /// Withheld insurance premiums.
    InsurancePayable,
    /// Expense account for a category.
    Expense(ExpenseCategory),
}

impl std::fmt::Display for PostingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::AccountsReceivable => write!(f, "accounts_receivable"),
            Self::AccountsPayable => write!(f, "accounts_payable"),
            Self::Revenue => write!(f, "revenue"),
            Self::SalesTaxPayable => write!(f, "sales_tax_payable"),
            Self::OpeningBalanceEquity => write!(f, "opening_balance_equity"),
            Self::SalaryExpense => write!(f, "salary_expense"),
            Self::PayrollTaxPayable => write!(f, "payroll_tax_payable"),
            Self::PensionPayable => write!(f, "pension_payable"),
            Self::InsurancePayable => write!(f, "insurance_payable"),
            Self::Expense(category) => write!(f, "expense_{category}"),
        }
    }
}

/// Closed set of expense categories for derived expense postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Rent and leases.
    Rent,
    /// Electricity, water, internet.
    Utilities,
    /// Office supplies.
    OfficeSupplies,
    /// Travel and lodging.
    Travel,
    /// Marketing and advertising.
    Marketing,
    /// Business insurance premiums.
    Insurance,
    /// Legal, accounting, consulting fees.
    ProfessionalServices,
    /// Fallback for anything uncategorized.
    Other,
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Rent => "rent",
            Self::Utilities => "utilities",
            Self::OfficeSupplies => "office_supplies",
            Self::Travel => "travel",
            Self::Marketing => "marketing",
            Self::Insurance => "insurance",
            Self::ProfessionalServices => "professional_services",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl ExpenseCategory {
    /// All categories, for iteration at configuration time.
    pub const ALL: [Self; 8] = [
        Self::Rent,
        Self::Utilities,
        Self::OfficeSupplies,
        Self::Travel,
        Self::Marketing,
        Self::Insurance,
        Self::ProfessionalServices,
        Self::Other,
    ];
}

/// Statutory payroll deduction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Income tax withheld.
    Tax,
    /// Pension contribution withheld.
    Pension,
    /// Insurance premium withheld.
    Insurance,
}

impl DeductionKind {
    /// The posting role credited for this deduction.
    #[must_use]
    pub const fn payable_role(self) -> PostingRole {
        match self {
            Self::Tax => PostingRole::PayrollTaxPayable,
            Self::Pension => PostingRole::PensionPayable,
            Self::Insurance => PostingRole::InsurancePayable,
        }
    }
}

/// Tenant-scoped mapping from posting roles to account codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingAccounts {
    codes: HashMap<PostingRole, String>,
}

impl PostingAccounts {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table matching the seeded onboarding chart.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.set(PostingRole::Cash, "1000");
        table.set(PostingRole::AccountsReceivable, "1100");
        table.set(PostingRole::AccountsPayable, "2000");
        table.set(PostingRole::SalesTaxPayable, "2200");
        table.set(PostingRole::PayrollTaxPayable, "2200");
        table.set(PostingRole::PensionPayable, "2300");
        table.set(PostingRole::InsurancePayable, "2400");
        table.set(PostingRole::OpeningBalanceEquity, "3100");
        table.set(PostingRole::Revenue, "4000");
        table.set(PostingRole::Expense(ExpenseCategory::Rent), "5100");
        table.set(PostingRole::Expense(ExpenseCategory::Utilities), "5200");
        table.set(PostingRole::Expense(ExpenseCategory::OfficeSupplies), "5300");
        table.set(PostingRole::Expense(ExpenseCategory::Travel), "5400");
        table.set(PostingRole::Expense(ExpenseCategory::Marketing), "5500");
        table.set(PostingRole::Expense(ExpenseCategory::Insurance), "5600");
        table.set(
            PostingRole::Expense(ExpenseCategory::ProfessionalServices),
            "5700",
        );
        table.set(PostingRole::Expense(ExpenseCategory::Other), "5900");
        table.set(PostingRole::SalaryExpense, "6000");
        table
    }

    /// Maps a role to an account code, replacing any previous mapping.
    pub fn set(&mut self, role: PostingRole, code: impl Into<String>) {
        self.codes.insert(role, code.into());
    }

    /// Resolves a role to its account code.
    pub fn code_for(&self, role: PostingRole) -> Result<&str, LedgerError> {
        self.codes
            .get(&role)
            .map(String::as_str)
            .ok_or_else(|| LedgerError::MissingPostingAccount {
                role: role.to_string(),
            })
    }

    /// Checks every mapped code against a chart of accounts.
    ///
    /// Each mapped code must resolve to an active account. Run at
    /// configuration time so posting paths fail only on genuinely missing
    /// mappings, never on stale ones.
    pub fn validate_against(&self, accounts: &[Account]) -> Result<(), LedgerError> {
        for (role, code) in &self.codes {
            let account = accounts
                .iter()
                .find(|account| &account.code == code)
                .ok_or_else(|| LedgerError::MissingPostingAccount {
                    role: role.to_string(),
                })?;
            if !account.is_active {
                return Err(LedgerError::AccountInactive {
                    code: account.code.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builds lines for a sales invoice.
///
/// Amounts are normalized to money scale first. Debits Accounts
/// Receivable for the total; credits Revenue for the subtotal and Sales
/// Tax Payable for a nonzero tax. Requires `total == subtotal + tax`.
pub fn invoice_lines(
    accounts: &PostingAccounts,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
) -> Result<Vec<JournalLine>, LedgerError> {
    let subtotal = round_money(subtotal);
    let tax = round_money(tax);
    let total = round_money(total);
    if total != subtotal + tax {
        return Err(LedgerError::Unbalanced {
            debits: total,
            credits: subtotal + tax,
        });
    }

    let mut lines = vec![
        JournalLine::debit(accounts.code_for(PostingRole::AccountsReceivable)?, total, None),
        JournalLine::credit(accounts.code_for(PostingRole::Revenue)?, subtotal, None),
    ];
    if tax > Decimal::ZERO {
        lines.push(JournalLine::credit(
            accounts.code_for(PostingRole::SalesTaxPayable)?,
            tax,
            None,
        ));
    }
    Ok(lines)
}

/// Builds lines for recording an expense on credit.
///
/// Debits the category's expense account; credits Accounts Payable.
pub fn expense_lines(
    accounts: &PostingAccounts,
    category: ExpenseCategory,
    amount: Decimal,
) -> Result<Vec<JournalLine>, LedgerError> {
    let amount = round_money(amount);
    Ok(vec![
        JournalLine::debit(
            accounts.code_for(PostingRole::Expense(category))?,
            amount,
            None,
        ),
        JournalLine::credit(accounts.code_for(PostingRole::AccountsPayable)?, amount, None),
    ])
}

/// Builds lines for a customer payment: debit Cash, credit Accounts
/// Receivable.
pub fn payment_received_lines(
    accounts: &PostingAccounts,
    amount: Decimal,
) -> Result<Vec<JournalLine>, LedgerError> {
    let amount = round_money(amount);
    Ok(vec![
        JournalLine::debit(accounts.code_for(PostingRole::Cash)?, amount, None),
        JournalLine::credit(
            accounts.code_for(PostingRole::AccountsReceivable)?,
            amount,
            None,
        ),
    ])
}

/// Builds lines for a payroll run.
///
/// Debits Salary Expense for gross pay; credits Cash for net pay and one
/// payable per nonzero deduction. Requires `gross == net + Σ deductions`.
pub fn payroll_lines(
    accounts: &PostingAccounts,
    gross: Decimal,
    net: Decimal,
    deductions: &[(DeductionKind, Decimal)],
) -> Result<Vec<JournalLine>, LedgerError> {
    let gross = round_money(gross);
    let net = round_money(net);
    let deductions: Vec<(DeductionKind, Decimal)> = deductions
        .iter()
        .map(|(kind, amount)| (*kind, round_money(*amount)))
        .collect();
    let deduction_total: Decimal = deductions.iter().map(|(_, amount)| *amount).sum();
    if gross != net + deduction_total {
        return Err(LedgerError::Unbalanced {
            debits: gross,
            credits: net + deduction_total,
        });
    }

    let mut lines = vec![
        JournalLine::debit(accounts.code_for(PostingRole::SalaryExpense)?, gross, None),
        JournalLine::credit(accounts.code_for(PostingRole::Cash)?, net, None),
    ];
    for (kind, amount) in deductions {
        if amount > Decimal::ZERO {
            lines.push(JournalLine::credit(
                accounts.code_for(kind.payable_role())?,
                amount,
                None,
            ));
        }
    }
    Ok(lines)
}

/// Builds lines for seeding an account's opening balance.
///
/// Debit-normal accounts are debited with the offset credited to Opening
/// Balance Equity; credit-normal accounts are mirrored.
pub fn opening_balance_lines(
    accounts: &PostingAccounts,
    account_code: &str,
    normal_balance: NormalBalance,
    amount: Decimal,
) -> Result<Vec<JournalLine>, LedgerError> {
    let amount = round_money(amount);
    let equity = accounts.code_for(PostingRole::OpeningBalanceEquity)?;
    let lines = match normal_balance {
        NormalBalance::Debit => vec![
            JournalLine::debit(account_code, amount, None),
            JournalLine::credit(equity, amount, None),
        ],
        NormalBalance::Credit => vec![
            JournalLine::debit(equity, amount, None),
            JournalLine::credit(account_code, amount, None),
        ],
    };
    Ok(lines)
}

//! Chart of accounts types and normal-balance arithmetic.
//!
//! In double-entry bookkeeping every account carries a "normal balance"
//! side: the side on which its balance naturally increases. Asset and
//! expense accounts are debit-normal; liability, equity, and revenue
//! accounts are credit-normal. Contra accounts (e.g. accumulated
//! depreciation) override the derived side.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, TenantId};

/// The five fundamental account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned (cash, receivables, equipment).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The side on which an account's balance naturally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Balance increases with debits (assets, expenses).
    Debit,
    /// Balance increases with credits (liabilities, equity, revenue).
    Credit,
}

impl NormalBalance {
    /// Derives the conventional normal balance from an account type.
    ///
    /// Contra accounts override this at registration.
    #[must_use]
    pub const fn for_account_type(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Asset | AccountType::Expense => Self::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => Self::Credit,
        }
    }

    /// Calculates the signed balance change produced by a debit/credit pair.
    ///
    /// Debit-normal: balance += debit - credit.
    /// Credit-normal: balance += credit - debit.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// A chart of accounts entry.
///
/// `current_balance` is a cache maintained exclusively by the posting
/// engine; the ledger rows remain the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Tenant this account belongs to.
    pub tenant_id: TenantId,
    /// Tenant-scoped unique account code (e.g. "1000").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Fundamental account type.
    pub account_type: AccountType,
    /// Normal balance side; derived from the type unless overridden.
    pub normal_balance: NormalBalance,
    /// Balance at the start of bookkeeping, signed per the normal side.
    pub opening_balance: Decimal,
    /// Cached running balance, signed per the normal side.
    pub current_balance: Decimal,
    /// Inactive accounts reject new postings.
    pub is_active: bool,
    /// System accounts can be deactivated but never removed.
    pub is_system: bool,
    /// Optional parent for hierarchical grouping (no cycles).
    pub parent_id: Option<AccountId>,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Returns true if the account is a contra account (its normal balance
    /// differs from the conventional side for its type).
    #[must_use]
    pub fn is_contra(&self) -> bool {
        self.normal_balance != NormalBalance::for_account_type(self.account_type)
    }
}

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Tenant-scoped unique code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Fundamental account type.
    pub account_type: AccountType,
    /// Override for contra accounts; `None` derives from the type.
    pub normal_balance: Option<NormalBalance>,
    /// Balance at the start of bookkeeping.
    pub opening_balance: Decimal,
    /// System accounts can only be deactivated, never removed.
    pub is_system: bool,
    /// Optional parent account.
    pub parent_id: Option<AccountId>,
}

impl NewAccount {
    /// Creates a plain active account with a zero opening balance.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            normal_balance: None,
            opening_balance: Decimal::ZERO,
            is_system: false,
            parent_id: None,
        }
    }

    /// Overrides the normal balance side (contra accounts).
    #[must_use]
    pub fn contra(mut self, normal_balance: NormalBalance) -> Self {
        self.normal_balance = Some(normal_balance);
        self
    }

    /// Marks the account as a system account.
    #[must_use]
    pub fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    /// Sets the opening balance.
    #[must_use]
    pub fn with_opening_balance(mut self, opening_balance: Decimal) -> Self {
        self.opening_balance = opening_balance;
        self
    }

    /// Sets the parent account.
    #[must_use]
    pub fn with_parent(mut self, parent_id: AccountId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normal_balance_derivation() {
        assert_eq!(
            NormalBalance::for_account_type(AccountType::Asset),
            NormalBalance::Debit
        );
        assert_eq!(
            NormalBalance::for_account_type(AccountType::Expense),
            NormalBalance::Debit
        );
        assert_eq!(
            NormalBalance::for_account_type(AccountType::Liability),
            NormalBalance::Credit
        );
        assert_eq!(
            NormalBalance::for_account_type(AccountType::Equity),
            NormalBalance::Credit
        );
        assert_eq!(
            NormalBalance::for_account_type(AccountType::Revenue),
            NormalBalance::Credit
        );
    }

    #[test]
    fn test_debit_normal_balance_change() {
        let normal = NormalBalance::Debit;

        // Debit increases balance
        assert_eq!(normal.balance_change(dec!(100), dec!(0)), dec!(100));
        // Credit decreases balance
        assert_eq!(normal.balance_change(dec!(0), dec!(50)), dec!(-50));
        // Net effect
        assert_eq!(normal.balance_change(dec!(100), dec!(30)), dec!(70));
    }

    #[test]
    fn test_credit_normal_balance_change() {
        let normal = NormalBalance::Credit;

        // Credit increases balance
        assert_eq!(normal.balance_change(dec!(0), dec!(100)), dec!(100));
        // Debit decreases balance
        assert_eq!(normal.balance_change(dec!(50), dec!(0)), dec!(-50));
        // Net effect
        assert_eq!(normal.balance_change(dec!(30), dec!(100)), dec!(70));
    }

    #[test]
    fn test_contra_account_detection() {
        let mut account = Account {
            id: AccountId::new(),
            tenant_id: TenantId::new(),
            code: "1500".to_string(),
            name: "Accumulated Depreciation".to_string(),
            account_type: AccountType::Asset,
            normal_balance: NormalBalance::Credit,
            opening_balance: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            is_active: true,
            is_system: false,
            parent_id: None,
            created_at: Utc::now(),
        };
        assert!(account.is_contra());

        account.normal_balance = NormalBalance::Debit;
        assert!(!account.is_contra());
    }

    #[test]
    fn test_new_account_builder() {
        let input = NewAccount::new("1500", "Accumulated Depreciation", AccountType::Asset)
            .contra(NormalBalance::Credit)
            .system()
            .with_opening_balance(dec!(250.00));

        assert_eq!(input.code, "1500");
        assert_eq!(input.normal_balance, Some(NormalBalance::Credit));
        assert!(input.is_system);
        assert_eq!(input.opening_balance, dec!(250.00));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any debit/credit pair, the two normal sides produce exactly
        /// opposite balance changes.
        #[test]
        fn prop_normal_sides_are_mirrored(
            debit in amount_strategy(),
            credit in amount_strategy(),
        ) {
            let debit_normal = NormalBalance::Debit.balance_change(debit, credit);
            let credit_normal = NormalBalance::Credit.balance_change(debit, credit);
            prop_assert_eq!(debit_normal, -credit_normal);
        }

        /// A pure debit always increases a debit-normal balance and
        /// decreases a credit-normal balance.
        #[test]
        fn prop_debit_direction(debit in amount_strategy()) {
            prop_assume!(debit > Decimal::ZERO);
            prop_assert!(NormalBalance::Debit.balance_change(debit, Decimal::ZERO) > Decimal::ZERO);
            prop_assert!(NormalBalance::Credit.balance_change(debit, Decimal::ZERO) < Decimal::ZERO);
        }
    }
}

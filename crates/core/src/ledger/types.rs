//! Journal domain types for entry creation and validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;
use uuid::Uuid;

use super::validation::BALANCE_TOLERANCE;

/// Side of a ledger entry: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl EntrySide {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Journal entry type classification.
///
/// Categorizes entries for reporting and audit purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEntryType {
    /// Manually keyed general journal entry.
    Manual,
    /// Sales invoice issuance.
    Invoice,
    /// Expense recording.
    Expense,
    /// Payment received or made.
    Payment,
    /// Opening balance seeding.
    OpeningBalance,
    /// Adjustment entry.
    Adjustment,
    /// Depreciation charge.
    Depreciation,
    /// Period closing entry.
    Closing,
    /// Reversal of a previous entry.
    Reversal,
    /// Inventory movement.
    Inventory,
    /// Payroll run.
    Payroll,
    /// Anything else.
    Other,
}

/// Journal entry lifecycle status.
///
/// The engine creates entries already `Posted`; `Draft` and `Voided` exist
/// for completeness of the audit model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been voided (immutable).
    Voided,
}

impl JournalStatus {
    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Voided)
    }
}

/// Reference to an account, by id or by tenant-scoped code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRef {
    /// Resolve by account id.
    Id(AccountId),
    /// Resolve by account code within the tenant.
    Code(String),
}

impl From<AccountId> for AccountRef {
    fn from(id: AccountId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for AccountRef {
    fn from(code: &str) -> Self {
        Self::Code(code.to_string())
    }
}

impl std::fmt::Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

/// Link back to the business document that produced a posting.
///
/// Kept on both the journal entry and its ledger rows so the audit trail
/// survives even if the originating document is renamed or archived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Document kind (e.g. "invoice", "payment", "payroll_run").
    pub doc_type: String,
    /// Identifier of the originating document.
    pub doc_id: Uuid,
    /// Optional human-readable number (e.g. "INV-2041").
    pub number: Option<String>,
}

impl SourceDocument {
    /// Creates a source document link.
    #[must_use]
    pub fn new(doc_type: impl Into<String>, doc_id: Uuid, number: Option<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            doc_id,
            number,
        }
    }
}

/// Input for a single line in a journal entry.
///
/// Exactly one of `debit` / `credit` must be a positive amount; the other
/// must be zero. Sign is carried by the side, never by a negative amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// The account to post to.
    pub account: AccountRef,
    /// Debit amount (zero for credit lines).
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    pub credit: Decimal,
    /// Optional memo for this line.
    pub description: Option<String>,
}

impl JournalLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(
        account: impl Into<AccountRef>,
        amount: Decimal,
        description: Option<String>,
    ) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: Decimal::ZERO,
            description,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(
        account: impl Into<AccountRef>,
        amount: Decimal,
        description: Option<String>,
    ) -> Self {
        Self {
            account: account.into(),
            debit: Decimal::ZERO,
            credit: amount,
            description,
        }
    }

    /// Returns the side this line posts on.
    ///
    /// Only meaningful for lines that passed validation (exactly one side
    /// set); a zero/zero line reports as a debit.
    #[must_use]
    pub fn side(&self) -> EntrySide {
        if self.credit > Decimal::ZERO {
            EntrySide::Credit
        } else {
            EntrySide::Debit
        }
    }

    /// Returns the posted amount, regardless of side.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self.side() {
            EntrySide::Debit => self.debit,
            EntrySide::Credit => self.credit,
        }
    }
}

/// Computed totals for a line set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineTotals {
    /// Sum of all debit amounts.
    pub total_debits: Decimal,
    /// Sum of all credit amounts.
    pub total_credits: Decimal,
}

impl LineTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub const fn new(total_debits: Decimal, total_credits: Decimal) -> Self {
        Self {
            total_debits,
            total_credits,
        }
    }

    /// Returns the signed difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debits - self.total_credits
    }

    /// Returns true if debits equal credits within [`BALANCE_TOLERANCE`].
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.difference().abs() < BALANCE_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_entry_side_opposite() {
        assert_eq!(EntrySide::Debit.opposite(), EntrySide::Credit);
        assert_eq!(EntrySide::Credit.opposite(), EntrySide::Debit);
    }

    #[test]
    fn test_journal_status_immutable() {
        assert!(!JournalStatus::Draft.is_immutable());
        assert!(JournalStatus::Posted.is_immutable());
        assert!(JournalStatus::Voided.is_immutable());
    }

    #[test]
    fn test_line_constructors() {
        let line = JournalLine::debit("1000", dec!(100.00), None);
        assert_eq!(line.side(), EntrySide::Debit);
        assert_eq!(line.amount(), dec!(100.00));
        assert_eq!(line.credit, Decimal::ZERO);

        let line = JournalLine::credit("4000", dec!(100.00), Some("Sale".to_string()));
        assert_eq!(line.side(), EntrySide::Credit);
        assert_eq!(line.amount(), dec!(100.00));
    }

    #[test]
    fn test_totals_balanced_within_tolerance() {
        let totals = LineTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced());
        assert_eq!(totals.difference(), Decimal::ZERO);

        // A half-cent of rounding drift is tolerated.
        let totals = LineTotals::new(dec!(100.005), dec!(100.00));
        assert!(totals.is_balanced());

        // A full cent is not.
        let totals = LineTotals::new(dec!(100.01), dec!(100.00));
        assert!(!totals.is_balanced());
    }

    #[test]
    fn test_account_ref_conversions() {
        let by_code: AccountRef = "1000".into();
        assert_eq!(by_code, AccountRef::Code("1000".to_string()));

        let id = AccountId::new();
        let by_id: AccountRef = id.into();
        assert_eq!(by_id, AccountRef::Id(id));
    }
}

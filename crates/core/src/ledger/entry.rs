//! Posted journal entries and their ledger rows.
//!
//! A [`JournalEntry`] is the header of a posted transaction; its
//! [`LedgerEntry`] rows are the append-only facts. Once posted, neither is
//! ever updated in place; corrections go through reversals.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, JournalEntryId, LedgerEntryId, TenantId, UserId};

use super::types::{EntrySide, JournalEntryType, JournalStatus, SourceDocument};
use crate::account::NormalBalance;
use crate::fiscal::period::PeriodKey;

/// Header of a posted journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Tenant this entry belongs to.
    pub tenant_id: TenantId,
    /// Human-readable sequential number, unique per tenant (e.g. "JE-000042").
    pub entry_number: String,
    /// Effective accounting date.
    pub entry_date: NaiveDate,
    /// Financial period derived from the entry date.
    pub period: PeriodKey,
    /// What this entry records.
    pub description: String,
    /// Entry classification.
    pub entry_type: JournalEntryType,
    /// Lifecycle status.
    pub status: JournalStatus,
    /// External reference (invoice number, reversal marker, ...).
    pub reference: Option<String>,
    /// Business document that produced this entry, if any.
    pub source: Option<SourceDocument>,
    /// Placeholder for an approval workflow; not enforced by the engine.
    pub requires_approval: bool,
    /// Sum of debit amounts across the entry's rows.
    pub total_debits: Decimal,
    /// Sum of credit amounts across the entry's rows.
    pub total_credits: Decimal,
    /// Set on the original when a reversal is posted against it.
    pub reversed_by: Option<JournalEntryId>,
    /// Set on a reversal, pointing at the entry it undoes.
    pub original_entry_id: Option<JournalEntryId>,
    /// Who posted the entry.
    pub posted_by: UserId,
    /// When the entry was posted.
    pub posted_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Returns true if this entry has been reversed.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed_by.is_some()
    }

    /// Returns true if this entry is itself a reversal.
    #[must_use]
    pub const fn is_reversal(&self) -> bool {
        self.original_entry_id.is_some()
    }
}

/// A single append-only ledger row.
///
/// Rows are the source of truth for every balance; cached account balances
/// are recomputable from them at any time. Account code and name are
/// denormalized at posting so the audit trail survives later renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: LedgerEntryId,
    /// Tenant this row belongs to.
    pub tenant_id: TenantId,
    /// The journal entry this row belongs to.
    pub journal_entry_id: JournalEntryId,
    /// The account posted to.
    pub account_id: AccountId,
    /// Account code at the time of posting.
    pub account_code: String,
    /// Account name at the time of posting.
    pub account_name: String,
    /// Effective accounting date, copied from the header.
    pub transaction_date: NaiveDate,
    /// Financial period, copied from the header.
    pub period: PeriodKey,
    /// Which side this row posts on.
    pub side: EntrySide,
    /// Posted amount, always positive.
    pub amount: Decimal,
    /// Optional line memo.
    pub description: Option<String>,
    /// Business document copied from the header for the audit trail.
    pub source: Option<SourceDocument>,
    /// Set by an external reconciliation process, never by this engine.
    pub is_reconciled: bool,
    /// When the row was reconciled.
    pub reconciled_at: Option<DateTime<Utc>>,
    /// Who reconciled the row.
    pub reconciled_by: Option<UserId>,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Returns the debit amount of this row (zero for credit rows).
    #[must_use]
    pub fn debit_amount(&self) -> Decimal {
        match self.side {
            EntrySide::Debit => self.amount,
            EntrySide::Credit => Decimal::ZERO,
        }
    }

    /// Returns the credit amount of this row (zero for debit rows).
    #[must_use]
    pub fn credit_amount(&self) -> Decimal {
        match self.side {
            EntrySide::Debit => Decimal::ZERO,
            EntrySide::Credit => self.amount,
        }
    }

    /// Returns this row's effect on a balance with the given normal side.
    ///
    /// Positive when the row increases the balance, negative when it
    /// decreases it.
    #[must_use]
    pub fn signed_amount(&self, normal_balance: NormalBalance) -> Decimal {
        normal_balance.balance_change(self.debit_amount(), self.credit_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(side: EntrySide, amount: Decimal) -> LedgerEntry {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        LedgerEntry {
            id: LedgerEntryId::new(),
            tenant_id: TenantId::new(),
            journal_entry_id: JournalEntryId::new(),
            account_id: AccountId::new(),
            account_code: "1000".to_string(),
            account_name: "Cash".to_string(),
            transaction_date: date,
            period: PeriodKey::from_date(date),
            side,
            amount,
            description: None,
            source: None,
            is_reconciled: false,
            reconciled_at: None,
            reconciled_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_side_projection() {
        let debit = row(EntrySide::Debit, dec!(250.00));
        assert_eq!(debit.debit_amount(), dec!(250.00));
        assert_eq!(debit.credit_amount(), Decimal::ZERO);

        let credit = row(EntrySide::Credit, dec!(250.00));
        assert_eq!(credit.debit_amount(), Decimal::ZERO);
        assert_eq!(credit.credit_amount(), dec!(250.00));
    }

    #[test]
    fn test_signed_amount_respects_normal_balance() {
        let debit = row(EntrySide::Debit, dec!(100.00));
        assert_eq!(debit.signed_amount(NormalBalance::Debit), dec!(100.00));
        assert_eq!(debit.signed_amount(NormalBalance::Credit), dec!(-100.00));

        let credit = row(EntrySide::Credit, dec!(100.00));
        assert_eq!(credit.signed_amount(NormalBalance::Debit), dec!(-100.00));
        assert_eq!(credit.signed_amount(NormalBalance::Credit), dec!(100.00));
    }

    #[test]
    fn test_row_carries_period_of_its_date() {
        let r = row(EntrySide::Debit, dec!(10.00));
        assert_eq!(r.period, PeriodKey::new(2025, 3));
    }
}

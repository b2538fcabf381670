//! Property tests for reversal construction.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, JournalEntryId, LedgerEntryId, TenantId};

use super::entry::LedgerEntry;
use super::reversal::build_reversal_lines;
use super::types::EntrySide;
use super::validation::validate_lines;

fn row(side: EntrySide, amount: Decimal) -> LedgerEntry {
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    LedgerEntry {
        id: LedgerEntryId::new(),
        tenant_id: TenantId::new(),
        journal_entry_id: JournalEntryId::new(),
        account_id: AccountId::new(),
        account_code: "1000".to_string(),
        account_name: "Cash".to_string(),
        transaction_date: date,
        period: crate::fiscal::period::PeriodKey::from_date(date),
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

fn balanced_rows() -> impl Strategy<Value = Vec<LedgerEntry>> {
    proptest::collection::vec(1i64..1_000_000i64, 1..6).prop_map(|amounts| {
        let total: i64 = amounts.iter().sum();
        let mut rows: Vec<LedgerEntry> = amounts
            .into_iter()
            .map(|cents| row(EntrySide::Debit, Decimal::new(cents, 2)))
            .collect();
        rows.push(row(EntrySide::Credit, Decimal::new(total, 2)));
        rows
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The mirror of a balanced row set is itself a valid, balanced line
    /// set with debit and credit totals swapped.
    #[test]
    fn prop_mirror_of_balanced_rows_is_balanced(rows in balanced_rows()) {
        let original_debits: Decimal = rows
            .iter()
            .map(LedgerEntry::debit_amount)
            .sum();
        let original_credits: Decimal = rows
            .iter()
            .map(LedgerEntry::credit_amount)
            .sum();

        let lines = build_reversal_lines(&rows);
        let totals = validate_lines(&lines).unwrap();

        prop_assert_eq!(totals.total_debits, original_credits);
        prop_assert_eq!(totals.total_credits, original_debits);
    }

    /// Every mirrored line posts the same amount to the same account as
    /// the row it undoes, on the opposite side.
    #[test]
    fn prop_mirror_preserves_accounts_and_amounts(rows in balanced_rows()) {
        let lines = build_reversal_lines(&rows);
        prop_assert_eq!(lines.len(), rows.len());

        for (row, line) in rows.iter().zip(&lines) {
            prop_assert_eq!(line.amount(), row.amount);
            prop_assert_eq!(line.side(), row.side.opposite());
        }
    }
}

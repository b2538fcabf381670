//! Period locking integration tests.

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tally_core::fiscal::period::PeriodKey;
use tally_core::ledger::types::JournalLine;
use tally_engine::NewJournalEntry;

use common::{clerk, seeded_engine};

fn march() -> PeriodKey {
    PeriodKey::new(2025, 3)
}

fn march_entry() -> NewJournalEntry {
    NewJournalEntry::new(
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
        "March sale",
        vec![
            JournalLine::debit("1000", dec!(150.00), None),
            JournalLine::credit("4000", dec!(150.00), None),
        ],
    )
}

#[test]
fn get_or_create_period_is_idempotent() {
    let (engine, tenant, _) = seeded_engine();

    let first = engine.get_or_create_period(tenant, march());
    let second = engine.get_or_create_period(tenant, march());
    assert_eq!(first.id, second.id);
    assert!(!first.is_locked);
}

#[test]
fn clerk_cannot_lock_periods() {
    let (engine, tenant, _) = seeded_engine();

    let err = engine.lock_period(tenant, clerk(), march()).unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");
}

#[test]
fn locked_period_rejects_ordinary_postings() {
    let (engine, tenant, accountant) = seeded_engine();
    engine.lock_period(tenant, accountant, march()).unwrap();

    let err = engine
        .create_journal_entry(tenant, clerk(), march_entry())
        .unwrap_err();
    assert_eq!(err.error_code(), "PERIOD_LOCKED");
    assert_eq!(
        err.to_string(),
        "financial period 2025-03 is locked"
    );
}

#[test]
fn privileged_roles_post_into_locked_periods() {
    let (engine, tenant, accountant) = seeded_engine();
    let period = engine.lock_period(tenant, accountant, march()).unwrap();
    assert!(period.is_locked);
    assert_eq!(period.locked_by, Some(accountant.user_id));
    assert!(period.locked_at.is_some());

    let posted = engine
        .create_journal_entry(tenant, accountant, march_entry())
        .unwrap();
    assert_eq!(posted.entry.period, march());
}

#[test]
fn unlock_requires_a_reason() {
    let (engine, tenant, accountant) = seeded_engine();
    engine.lock_period(tenant, accountant, march()).unwrap();

    let err = engine
        .unlock_period(tenant, accountant, march(), "   ")
        .unwrap_err();
    assert_eq!(err.error_code(), "UNLOCK_REASON_REQUIRED");

    let period = engine
        .unlock_period(tenant, accountant, march(), "late supplier invoice")
        .unwrap();
    assert!(!period.is_locked);
    assert_eq!(period.unlocked_by, Some(accountant.user_id));
    assert_eq!(
        period.unlock_reason.as_deref(),
        Some("late supplier invoice")
    );

    // Ordinary postings work again after unlock.
    engine
        .create_journal_entry(tenant, clerk(), march_entry())
        .unwrap();
}

#[test]
fn clerk_cannot_unlock_periods() {
    let (engine, tenant, accountant) = seeded_engine();
    engine.lock_period(tenant, accountant, march()).unwrap();

    let err = engine
        .unlock_period(tenant, clerk(), march(), "trying anyway")
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_AUTHORIZED");
}

#[test]
fn lock_only_affects_its_own_month() {
    let (engine, tenant, accountant) = seeded_engine();
    engine.lock_period(tenant, accountant, march()).unwrap();

    let april_entry = NewJournalEntry::new(
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        "April sale",
        vec![
            JournalLine::debit("1000", dec!(60.00), None),
            JournalLine::credit("4000", dec!(60.00), None),
        ],
    );
    engine
        .create_journal_entry(tenant, clerk(), april_entry)
        .unwrap();
}

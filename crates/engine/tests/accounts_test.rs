//! Chart of accounts registry integration tests.

mod common;

use tally_core::account::{AccountType, NewAccount, NormalBalance};
use tally_engine::PostingEngine;
use tally_shared::types::{AccountId, TenantId};

use common::seeded_engine;

#[test]
fn duplicate_codes_are_rejected_per_tenant() {
    let (engine, tenant, _) = seeded_engine();

    let err = engine
        .register_account(tenant, NewAccount::new("1000", "Cash Again", AccountType::Asset))
        .unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_ACCOUNT_CODE");

    // The same code is free in another tenant's chart.
    let other = TenantId::new();
    engine
        .register_account(other, NewAccount::new("1000", "Cash", AccountType::Asset))
        .unwrap();
}

#[test]
fn seeding_a_chart_twice_is_rejected() {
    let (engine, tenant, _) = seeded_engine();

    let err = engine.seed_chart(tenant).unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_ACCOUNT_CODE");
}

#[test]
fn registering_under_a_ghost_parent_is_rejected() {
    let (engine, tenant, _) = seeded_engine();

    let input = NewAccount::new("1010", "Petty Cash", AccountType::Asset)
        .with_parent(AccountId::new());
    let err = engine.register_account(tenant, input).unwrap_err();
    assert_eq!(err.error_code(), "ACCOUNT_NOT_FOUND");

    // The rejected registration left no trace.
    let err = engine.get_account(tenant, &"1010".into()).unwrap_err();
    assert_eq!(err.error_code(), "ACCOUNT_NOT_FOUND");
}

#[test]
fn registering_under_an_existing_parent_succeeds() {
    let (engine, tenant, _) = seeded_engine();

    let cash = engine.get_account(tenant, &"1000".into()).unwrap();
    let petty = engine
        .register_account(
            tenant,
            NewAccount::new("1010", "Petty Cash", AccountType::Asset).with_parent(cash.id),
        )
        .unwrap();
    assert_eq!(petty.parent_id, Some(cash.id));
    assert_eq!(petty.normal_balance, NormalBalance::Debit);
}

fn chart_with_children(engine: &PostingEngine, tenant: TenantId) {
    let cash = engine.get_account(tenant, &"1000".into()).unwrap();
    engine
        .register_account(
            tenant,
            NewAccount::new("1010", "Petty Cash", AccountType::Asset).with_parent(cash.id),
        )
        .unwrap();
    let petty = engine.get_account(tenant, &"1010".into()).unwrap();
    engine
        .register_account(
            tenant,
            NewAccount::new("1011", "Petty Cash - Office", AccountType::Asset)
                .with_parent(petty.id),
        )
        .unwrap();
}

#[test]
fn reparenting_cannot_close_a_loop() {
    let (engine, tenant, _) = seeded_engine();
    chart_with_children(&engine, tenant);

    // 1000 <- 1010 <- 1011; hanging 1000 under 1011 would be a cycle.
    let err = engine
        .set_account_parent(tenant, &"1000".into(), &"1011".into())
        .unwrap_err();
    assert_eq!(err.error_code(), "PARENT_CYCLE");

    // An account cannot be its own parent either.
    let err = engine
        .set_account_parent(tenant, &"1010".into(), &"1010".into())
        .unwrap_err();
    assert_eq!(err.error_code(), "PARENT_CYCLE");
}

#[test]
fn reparenting_to_an_unrelated_account_succeeds() {
    let (engine, tenant, _) = seeded_engine();
    chart_with_children(&engine, tenant);

    let receivable = engine.get_account(tenant, &"1100".into()).unwrap();
    let moved = engine
        .set_account_parent(tenant, &"1011".into(), &"1100".into())
        .unwrap();
    assert_eq!(moved.parent_id, Some(receivable.id));
}

#[test]
fn deactivating_an_unknown_account_fails() {
    let (engine, tenant, _) = seeded_engine();

    let err = engine.deactivate_account(tenant, &"9999".into()).unwrap_err();
    assert_eq!(err.error_code(), "ACCOUNT_NOT_FOUND");
}

#[test]
fn contra_override_survives_registration() {
    let (engine, tenant, _) = seeded_engine();

    let allowance = engine
        .register_account(
            tenant,
            NewAccount::new("1110", "Allowance for Doubtful Accounts", AccountType::Asset)
                .contra(NormalBalance::Credit),
        )
        .unwrap();
    assert_eq!(allowance.normal_balance, NormalBalance::Credit);
    assert!(allowance.is_contra());
}

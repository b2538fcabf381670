//! Shared test fixtures.
#![allow(dead_code)]

use tally_core::auth::{Actor, ActorRole};
use tally_engine::PostingEngine;
use tally_shared::types::{TenantId, UserId};

/// An engine with one tenant seeded with the standard chart, plus an
/// accountant actor for that tenant.
pub fn seeded_engine() -> (PostingEngine, TenantId, Actor) {
    let engine = PostingEngine::new();
    let tenant = TenantId::new();
    engine.seed_chart(tenant).expect("seeding standard chart");
    let actor = Actor::new(UserId::new(), ActorRole::Accountant);
    (engine, tenant, actor)
}

/// A clerk actor in the same tenant.
pub fn clerk() -> Actor {
    Actor::new(UserId::new(), ActorRole::Clerk)
}

//! Financial period registry and lock management.
//!
//! Locking is advisory state consumed by the posting path; because the
//! lock flag lives in the same tenant book as the journal, the lock check
//! and the posting commit share one guard and there is no
//! check-then-write gap.

use chrono::Utc;
use tracing::info;

use tally_core::auth::Actor;
use tally_core::fiscal::period::{FinancialPeriod, PeriodKey};
use tally_core::ledger::error::LedgerError;
use tally_shared::types::TenantId;

use crate::engine::PostingEngine;

impl PostingEngine {
    /// Fetches the period for a calendar month, creating it open if
    /// absent. Idempotent.
    pub fn get_or_create_period(
        &self,
        tenant_id: TenantId,
        key: PeriodKey,
    ) -> FinancialPeriod {
        let mut book = self.store.book_mut(tenant_id);
        book.period_for(tenant_id, key).clone()
    }

    /// Locks a period against ordinary postings.
    ///
    /// Requires a period-management role. Locking an already locked
    /// period is a no-op that refreshes nothing.
    pub fn lock_period(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        key: PeriodKey,
    ) -> Result<FinancialPeriod, LedgerError> {
        if !actor.role.can_manage_periods() {
            return Err(LedgerError::NotAuthorized {
                role: actor.role.to_string(),
                action: "lock period".to_string(),
            });
        }

        let mut book = self.store.book_mut(tenant_id);
        let period = book.period_for(tenant_id, key);
        if !period.is_locked {
            period.is_locked = true;
            period.locked_by = Some(actor.user_id);
            period.locked_at = Some(Utc::now());
        }
        let snapshot = period.clone();
        drop(book);

        info!(tenant = %tenant_id, period = %key, by = %actor.user_id, "period locked");
        Ok(snapshot)
    }

    /// Unlocks a period, recording who, when, and why.
    ///
    /// Requires a period-management role and a non-empty reason for the
    /// audit trail.
    pub fn unlock_period(
        &self,
        tenant_id: TenantId,
        actor: Actor,
        key: PeriodKey,
        reason: &str,
    ) -> Result<FinancialPeriod, LedgerError> {
        if !actor.role.can_manage_periods() {
            return Err(LedgerError::NotAuthorized {
                role: actor.role.to_string(),
                action: "unlock period".to_string(),
            });
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LedgerError::UnlockReasonRequired);
        }

        let mut book = self.store.book_mut(tenant_id);
        let period = book.period_for(tenant_id, key);
        period.is_locked = false;
        period.unlocked_by = Some(actor.user_id);
        period.unlocked_at = Some(Utc::now());
        period.unlock_reason = Some(reason.to_string());
        let snapshot = period.clone();
        drop(book);

        info!(
            tenant = %tenant_id,
            period = %key,
            by = %actor.user_id,
            reason,
            "period unlocked"
        );
        Ok(snapshot)
    }
}

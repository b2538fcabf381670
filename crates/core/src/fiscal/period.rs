//! Calendar-month financial periods.
//!
//! A period is identified by its calendar year and month. Locking a period
//! freezes its entries against ordinary postings; privileged roles may
//! still post into a locked period, and unlocking requires an audit reason.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{PeriodId, TenantId, UserId};

use crate::auth::ActorRole;
use crate::ledger::error::LedgerError;

/// A calendar month identifying a financial period within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

impl PeriodKey {
    /// Creates a period key from its parts.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns the period containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// A financial period with its lock state and cached summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialPeriod {
    /// Unique identifier.
    pub id: PeriodId,
    /// Tenant this period belongs to.
    pub tenant_id: TenantId,
    /// The calendar month this period covers.
    pub key: PeriodKey,
    /// True once the period has been locked.
    pub is_locked: bool,
    /// Who locked the period.
    pub locked_by: Option<UserId>,
    /// When the period was locked.
    pub locked_at: Option<DateTime<Utc>>,
    /// Who last unlocked the period.
    pub unlocked_by: Option<UserId>,
    /// When the period was last unlocked.
    pub unlocked_at: Option<DateTime<Utc>>,
    /// Mandatory audit reason recorded at unlock.
    pub unlock_reason: Option<String>,
    /// Cached revenue posted in this period, recomputed on demand.
    pub total_revenue: Decimal,
    /// Cached expenses posted in this period, recomputed on demand.
    pub total_expenses: Decimal,
    /// Cached revenue minus expenses.
    pub net_income: Decimal,
    /// Number of journal entries dated in this period.
    pub journal_entry_count: u64,
}

impl FinancialPeriod {
    /// Creates an open period with empty summary totals.
    #[must_use]
    pub fn open(tenant_id: TenantId, key: PeriodKey) -> Self {
        Self {
            id: PeriodId::new(),
            tenant_id,
            key,
            is_locked: false,
            locked_by: None,
            locked_at: None,
            unlocked_by: None,
            unlocked_at: None,
            unlock_reason: None,
            total_revenue: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            net_income: Decimal::ZERO,
            journal_entry_count: 0,
        }
    }
}

/// Checks that an actor may post into the given period.
///
/// Open periods accept postings from any posting-capable role. Locked
/// periods reject all postings except from roles with lock-override
/// privileges.
pub fn validate_posting_permission(
    period: &FinancialPeriod,
    role: ActorRole,
) -> Result<(), LedgerError> {
    if period.is_locked && !role.can_override_period_lock() {
        return Err(LedgerError::PeriodLocked {
            year: period.key.year,
            month: period.key.month,
        });
    }
    Ok(())
}

//! Error types for ledger operations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by validation and posting.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A journal entry needs at least two lines.
    #[error("journal entry requires at least {minimum} lines, got {actual}")]
    InsufficientLines {
        /// Required minimum line count.
        minimum: usize,
        /// Lines actually supplied.
        actual: usize,
    },

    /// Debits and credits do not match within tolerance.
    #[error("journal entry is not balanced: debits {debits} != credits {credits}")]
    Unbalanced {
        /// Sum of debit amounts.
        debits: Decimal,
        /// Sum of credit amounts.
        credits: Decimal,
    },

    /// A line carries neither a debit nor a credit amount.
    #[error("line {index} has no amount: exactly one of debit/credit must be positive")]
    ZeroAmount {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// A line carries a negative amount.
    #[error("line {index} has a negative amount; sign is carried by the side")]
    NegativeAmount {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// A line sets both a debit and a credit amount.
    #[error("line {index} sets both debit and credit; split it into two lines")]
    BothSidesSet {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// Referenced account does not exist for this tenant.
    #[error("account not found: {reference}")]
    AccountNotFound {
        /// The id or code that failed to resolve.
        reference: String,
    },

    /// Referenced account exists but is inactive.
    #[error("account {code} is inactive and rejects new postings")]
    AccountInactive {
        /// Code of the inactive account.
        code: String,
    },

    /// Account code already in use within the tenant.
    #[error("account code {code} already exists for this tenant")]
    DuplicateAccountCode {
        /// The conflicting code.
        code: String,
    },

    /// Parent chain would form a cycle.
    #[error("account {code} cannot be its own ancestor")]
    ParentCycle {
        /// Code of the account whose parent assignment was rejected.
        code: String,
    },

    /// A posting role has no account configured for this tenant.
    #[error("no account configured for posting role {role}")]
    MissingPostingAccount {
        /// The posting role (e.g. "accounts_receivable").
        role: String,
    },

    /// The target financial period is locked.
    #[error("financial period {year}-{month:02} is locked")]
    PeriodLocked {
        /// Calendar year.
        year: i32,
        /// Calendar month (1-12).
        month: u32,
    },

    /// The actor's role does not permit the operation.
    #[error("role {role} is not authorized to {action}")]
    NotAuthorized {
        /// The actor's role.
        role: String,
        /// The attempted action.
        action: String,
    },

    /// Unlocking a period requires an audit reason.
    #[error("unlocking a period requires a non-empty reason")]
    UnlockReasonRequired,

    /// Referenced journal entry does not exist for this tenant.
    #[error("journal entry not found: {entry_number}")]
    EntryNotFound {
        /// The entry number or id that failed to resolve.
        entry_number: String,
    },

    /// The entry has already been reversed.
    #[error("journal entry {entry_number} has already been reversed")]
    AlreadyReversed {
        /// Number of the already-reversed entry.
        entry_number: String,
    },

    /// The entry cannot be reversed (e.g. it is itself a reversal).
    #[error("journal entry {entry_number} cannot be reversed: {reason}")]
    InvalidReversal {
        /// Number of the entry.
        entry_number: String,
        /// Why the reversal was rejected.
        reason: String,
    },

    /// Concurrent modification detected; the operation may be retried.
    #[error("concurrent modification detected: {detail}")]
    Conflict {
        /// What conflicted.
        detail: String,
    },
}

impl LedgerError {
    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines { .. } => "INSUFFICIENT_LINES",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::ZeroAmount { .. } => "ZERO_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::BothSidesSet { .. } => "BOTH_SIDES_SET",
            Self::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive { .. } => "ACCOUNT_INACTIVE",
            Self::DuplicateAccountCode { .. } => "DUPLICATE_ACCOUNT_CODE",
            Self::ParentCycle { .. } => "PARENT_CYCLE",
            Self::MissingPostingAccount { .. } => "MISSING_POSTING_ACCOUNT",
            Self::PeriodLocked { .. } => "PERIOD_LOCKED",
            Self::NotAuthorized { .. } => "NOT_AUTHORIZED",
            Self::UnlockReasonRequired => "UNLOCK_REASON_REQUIRED",
            Self::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            Self::AlreadyReversed { .. } => "ALREADY_REVERSED",
            Self::InvalidReversal { .. } => "INVALID_REVERSAL",
            Self::Conflict { .. } => "CONFLICT",
        }
    }

    /// Returns true if retrying the same operation could succeed.
    ///
    /// Only transient concurrency conflicts are retryable; every other
    /// variant reflects invalid input or state that a retry cannot fix.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Convenience alias for ledger results.
pub type LedgerResult<T> = Result<T, LedgerError>;

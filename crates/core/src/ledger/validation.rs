//! Line-set validation for journal entries.
//!
//! Every journal entry must satisfy the fundamental accounting equation:
//! total debits equal total credits. Validation here is purely structural;
//! account resolution and period checks belong to the posting engine.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{JournalLine, LineTotals};

/// Maximum tolerated difference between total debits and credits.
///
/// One cent of headroom absorbs rounding drift from derived amounts
/// (tax splits, payroll deductions) without admitting real imbalance.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Minimum number of lines in a journal entry.
pub const MIN_LINES: usize = 2;

/// Validates a set of journal lines structurally.
///
/// Checks, in order:
/// 1. At least [`MIN_LINES`] lines.
/// 2. Per line: no negative amounts, not both sides set, not both zero.
/// 3. Total debits equal total credits within [`BALANCE_TOLERANCE`].
///
/// Returns the computed totals on success so callers need not re-sum.
pub fn validate_lines(lines: &[JournalLine]) -> Result<LineTotals, LedgerError> {
    if lines.len() < MIN_LINES {
        return Err(LedgerError::InsufficientLines {
            minimum: MIN_LINES,
            actual: lines.len(),
        });
    }

    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { index });
        }
        if line.debit > Decimal::ZERO && line.credit > Decimal::ZERO {
            return Err(LedgerError::BothSidesSet { index });
        }
        if line.debit == Decimal::ZERO && line.credit == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount { index });
        }
        total_debits += line.debit;
        total_credits += line.credit;
    }

    let totals = LineTotals::new(total_debits, total_credits);
    if !totals.is_balanced() {
        return Err(LedgerError::Unbalanced {
            debits: total_debits,
            credits: total_credits,
        });
    }

    Ok(totals)
}

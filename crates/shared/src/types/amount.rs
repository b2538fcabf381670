//! Money rounding helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` rounded to two decimal places
//! with banker's rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary amount to [`MONEY_SCALE`] decimal places using
/// banker's rounding (midpoint rounds to the nearest even digit).
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

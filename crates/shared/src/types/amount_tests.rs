use rust_decimal_macros::dec;
use rstest::rstest;

use super::*;

#[rstest]
#[case(dec!(10.005), dec!(10.00))] // midpoint rounds to even
#[case(dec!(10.015), dec!(10.02))]
#[case(dec!(10.004), dec!(10.00))]
#[case(dec!(10.006), dec!(10.01))]
#[case(dec!(-10.005), dec!(-10.00))]
#[case(dec!(42), dec!(42))]
fn test_round_money(#[case] input: rust_decimal::Decimal, #[case] expected: rust_decimal::Decimal) {
    assert_eq!(round_money(input), expected);
}

#[test]
fn test_round_money_is_idempotent() {
    let rounded = round_money(dec!(3.14159));
    assert_eq!(round_money(rounded), rounded);
}

//! Property tests for line-set validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::JournalLine;
use super::validation::validate_lines;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn amount_vec() -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec(positive_amount(), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Mirroring an arbitrary set of debits with a single credit for their
    /// sum always validates, and the returned totals match.
    #[test]
    fn prop_mirrored_debits_validate(debits in amount_vec()) {
        let total: Decimal = debits.iter().copied().sum();
        let mut lines: Vec<JournalLine> = debits
            .iter()
            .map(|amount| JournalLine::debit("5100", *amount, None))
            .collect();
        lines.push(JournalLine::credit("1000", total, None));

        let totals = validate_lines(&lines).unwrap();
        prop_assert_eq!(totals.total_debits, total);
        prop_assert_eq!(totals.total_credits, total);
    }

    /// Skewing one side by a cent or more always fails with Unbalanced.
    #[test]
    fn prop_skewed_totals_rejected(
        amount in positive_amount(),
        skew_cents in 1i64..1_000i64,
    ) {
        let skew = Decimal::new(skew_cents, 2);
        let lines = vec![
            JournalLine::debit("1000", amount + skew, None),
            JournalLine::credit("4000", amount, None),
        ];
        let err = validate_lines(&lines).unwrap_err();
        prop_assert_eq!(err.error_code(), "UNBALANCED");
    }

    /// Validation never panics on arbitrary debit/credit pairs, including
    /// negative and zero amounts.
    #[test]
    fn prop_validation_total_function(
        pairs in proptest::collection::vec(
            (-1_000_000i64..1_000_000i64, -1_000_000i64..1_000_000i64),
            0..6,
        ),
    ) {
        let lines: Vec<JournalLine> = pairs
            .into_iter()
            .map(|(d, c)| JournalLine {
                account: "1000".into(),
                debit: Decimal::new(d, 2),
                credit: Decimal::new(c, 2),
                description: None,
            })
            .collect();
        let _ = validate_lines(&lines);
    }
}

//! Unit tests for Money, Rate and percentage helpers
//!
//! Tests cover creation, arithmetic, display formatting and the
//! zero-denominator guard on percentages.

use core_kernel::{percentage, Money, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_zero_is_default() {
        assert_eq!(Money::default(), Money::zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_negative_amount_creation() {
        let m = Money::new(dec!(-100.00));
        assert!(m.is_negative());
        assert!(!m.is_positive());
        assert_eq!(m.to_string(), "-$100.00");
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(7_550).amount(), dec!(75.50));
        assert_eq!(Money::from_cents(7_550).to_string(), "$75.50");
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_add_assign() {
        let mut total = Money::zero();
        total += Money::new(dec!(20));
        total += Money::new(dec!(0.05));
        assert_eq!(total.amount(), dec!(20.05));
    }

    #[test]
    fn test_multiply_by_quantity() {
        let m = Money::new(dec!(0.18)) * dec!(500);
        assert_eq!(m.amount(), dec!(90));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_prices_usage() {
        let rate = Rate::new(dec!(1.0));
        assert_eq!(rate.apply(dec!(80)), Money::new(dec!(80.0)));
    }

    #[test]
    fn test_rate_positivity() {
        assert!(Rate::new(dec!(0.22)).is_positive());
        assert!(!Rate::new(Decimal::ZERO).is_positive());
        assert!(!Rate::new(dec!(-1)).is_positive());
    }
}

mod percentages {
    use super::*;

    #[test]
    fn test_percentage_rounds_to_two_places() {
        assert_eq!(percentage(dec!(2), dec!(3)), dec!(66.67));
    }

    #[test]
    fn test_percentage_guards_zero_whole() {
        assert_eq!(percentage(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }
}

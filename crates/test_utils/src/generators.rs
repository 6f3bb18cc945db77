//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{Money, Rate};
use domain_billing::EnergyCategory;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating energy categories
pub fn energy_category_strategy() -> impl Strategy<Value = EnergyCategory> {
    prop_oneof![
        Just(EnergyCategory::CrudeOil),
        Just(EnergyCategory::Solar),
        Just(EnergyCategory::Nuclear),
        Just(EnergyCategory::NaturalGas),
    ]
}

/// Strategy for generating valid allocations (1.00 to 2000.00 units)
pub fn allocation_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..200_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating usage amounts (0.00 to 500.00 units)
///
/// Amounts may exceed an allocation; tests use them to exercise rejection.
pub fn usage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..50_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating a sequence of usage amounts
pub fn usage_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(usage_strategy(), 0..max_len)
}

/// Strategy for generating non-negative Money values in cents
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (0i64..10_000_000i64).prop_map(Money::from_cents)
}

/// Strategy for generating positive per-unit rates (0.01 to 5.00)
pub fn rate_strategy() -> impl Strategy<Value = Rate> {
    (1i64..500i64).prop_map(|n| Rate::new(Decimal::new(n, 2)))
}

/// Strategy for generating province names
pub fn province_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Ontario"),
        Just("Quebec"),
        Just("Alberta"),
        Just("British Columbia"),
        Just("Manitoba"),
    ]
}

/// Strategy for generating bill ages in days (0 to 120)
pub fn bill_age_days_strategy() -> impl Strategy<Value = i64> {
    0i64..=120i64
}

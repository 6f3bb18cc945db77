//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for ledger types that give
//! more meaningful error messages than standard assertions.

use chrono::{DateTime, Utc};
use core_kernel::Money;
use domain_billing::{Account, Ledger};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::builders::total_unpaid;

/// Asserts that money values sum to a total
pub fn assert_money_sum_equals(parts: &[Money], total: Money) {
    let sum: Money = parts.iter().sum();
    assert_eq!(
        sum, total,
        "Sum of parts ({}) doesn't equal total ({})",
        sum, total
    );
}

/// Asserts that a decimal value is within a range
pub fn assert_decimal_in_range(value: Decimal, min: Decimal, max: Decimal) {
    assert!(
        value >= min && value <= max,
        "Decimal {} is not in range [{}, {}]",
        value,
        min,
        max
    );
}

/// Asserts `0 <= usage <= allocation` for an account
pub fn assert_usage_within_allocation(account: &Account) {
    assert!(
        account.usage() >= Decimal::ZERO && account.usage() <= account.allocation(),
        "Account {} usage {} outside allocation {}",
        account.id(),
        account.usage(),
        account.allocation()
    );
}

/// Asserts that an account's total owed equals the sum of its unpaid bills
pub fn assert_total_owed_consistent(account: &Account) {
    let unpaid: Money = account
        .bills()
        .iter()
        .filter(|b| !b.paid)
        .map(|b| b.amount)
        .sum();
    assert_eq!(
        account.total_owed(),
        unpaid,
        "Account {} total owed disagrees with its unpaid bills",
        account.id()
    );
}

/// Asserts that the per-province statistics add up to the ledger totals
///
/// # Panics
///
/// Panics if customer counts, allocations, usage, unpaid totals or overdue
/// counts disagree between provinces and accounts, or if a province
/// percentage falls outside `[0, 100]`
pub fn assert_statistics_consistent(ledger: &Ledger, now: DateTime<Utc>) {
    let stats = ledger.statistics(now);

    let customers: usize = stats.iter().map(|s| s.customer_count).sum();
    assert_eq!(customers, ledger.len(), "Province customer counts disagree with ledger size");

    for province in &stats {
        assert_decimal_in_range(province.usage_percentage(), Decimal::ZERO, dec!(100));
        assert_decimal_in_range(province.overdue_percentage(), Decimal::ZERO, dec!(100));
        assert_eq!(
            province.total_used + province.total_remaining,
            province.total_allocated,
            "{}: used + remaining != allocated",
            province.province
        );
    }

    let unpaid: Vec<Money> = stats.iter().map(|s| s.total_unpaid).collect();
    assert_money_sum_equals(&unpaid, total_unpaid(ledger));

    let overdue: usize = stats.iter().map(|s| s.overdue_count).sum();
    assert_eq!(
        overdue,
        ledger.overdue_accounts(now).len(),
        "Province overdue counts disagree with overdue accounts"
    );
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{AccountBuilder, LedgerBuilder};
    use crate::fixtures::TemporalFixtures;

    #[test]
    #[should_panic(expected = "is not in range")]
    fn test_assert_decimal_in_range_fails() {
        assert_decimal_in_range(dec!(100.01), Decimal::ZERO, dec!(100));
    }

    #[test]
    fn test_assert_money_sum_equals() {
        let parts = [
            Money::new(dec!(33.34)),
            Money::new(dec!(33.33)),
            Money::new(dec!(33.33)),
        ];
        assert_money_sum_equals(&parts, Money::new(dec!(100.00)));
    }

    #[test]
    fn test_assert_usage_within_allocation() {
        let account = AccountBuilder::new().with_allocation(dec!(10)).with_usage(dec!(10)).build();
        assert_usage_within_allocation(&account);
    }

    #[test]
    fn test_assert_statistics_consistent() {
        let ledger = LedgerBuilder::new()
            .with(|a| a.with_id(1).in_province("Ontario"))
            .with(|a| a.with_id(2).in_province("Quebec").with_usage(dec!(20)))
            .with_standard_bill(1, dec!(40))
            .build();

        assert_statistics_consistent(&ledger, TemporalFixtures::first_overdue_day());
        assert_total_owed_consistent(ledger.account(core_kernel::CustomerId::new(1)).unwrap());
    }
}

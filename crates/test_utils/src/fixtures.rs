//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the billing ledger. These fixtures
//! are fixed and predictable, so tests can assert exact values.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{CustomerId, Rate};
use domain_billing::{CustomerProfile, EnergyCategory, RateTable};
use fake::faker::address::en::{BuildingNumber, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal_macros::dec;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard billing date (Mar 1, 2024, noon UTC)
    pub fn billing_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    /// Exactly 30 days after billing; bills are not yet overdue
    pub fn last_day_before_overdue() -> DateTime<Utc> {
        Self::billing_date() + Duration::days(30)
    }

    /// 31 days after billing; unpaid bills are 1 day overdue
    pub fn first_overdue_day() -> DateTime<Utc> {
        Self::billing_date() + Duration::days(31)
    }

    /// Report date in the same month as the billing date
    pub fn report_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 28, 9, 0, 0).unwrap()
    }
}

/// Fixture for rates and amounts
pub struct RateFixtures;

impl RateFixtures {
    /// The standard rate table
    pub fn standard() -> RateTable {
        RateTable::standard()
    }

    /// A rate table charging one dollar per unit for every category
    pub fn flat_dollar() -> RateTable {
        RateTable::new(EnergyCategory::ALL.map(|c| (c, Rate::new(dec!(1))))).unwrap()
    }
}

/// Fixture for customer data
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// First customer number handed out by the sample data
    pub fn first_id() -> CustomerId {
        CustomerId::new(1001)
    }

    /// A fixed Ontario customer
    pub fn john_smith() -> CustomerProfile {
        CustomerProfile::new("John Smith", "jsmith@email.com", "120 Howard Ave", "Ontario")
    }

    /// A fixed Quebec customer
    pub fn marie_roy() -> CustomerProfile {
        CustomerProfile::new("Marie Roy", "mroy@email.com", "45 Rue Laval", "Quebec")
    }

    /// A randomly named customer in `province`
    pub fn random_in(province: &str) -> CustomerProfile {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let number: String = BuildingNumber().fake();
        let street: String = StreetName().fake();
        let initial: String = first.chars().take(1).collect();
        let email = format!("{initial}{last}@email.com").to_lowercase();

        CustomerProfile::new(
            format!("{first} {last}"),
            email,
            format!("{number} {street}"),
            province,
        )
    }
}

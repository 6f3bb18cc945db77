//! Deterministic sample data
//!
//! Generates a populated ledger from an injected random source. The same
//! seed and `now` always produce the same customers, bills and trades.

use chrono::{DateTime, Duration, Utc};
use fake::faker::address::en::StreetName;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use core_kernel::{CustomerId, Money, Rate};
use domain_billing::{
    Account, BillingError, CustomerProfile, EnergyCategory, Ledger, TradeDirection, TradeRecord,
};

/// Provinces populated by the sample data, in generation order
pub const PROVINCES: [&str; 5] = ["Ontario", "Quebec", "Alberta", "British Columbia", "Manitoba"];

/// Customer number of the first generated customer
pub const FIRST_CUSTOMER_ID: u32 = 1001;

/// Description used for generated maintenance entries
pub const MAINTENANCE_DESCRIPTION: &str = "Equipment check";

/// Counts of what a population run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: usize,
    pub bills: usize,
    pub unpaid_bills: usize,
    pub maintenance_entries: usize,
    pub trades: usize,
}

/// Sample data generator over an injected random source
pub struct SampleData<R> {
    rng: R,
    customers_per_province: u32,
    trade_count: u32,
}

impl SampleData<StdRng> {
    /// A generator seeded with `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SampleData<R> {
    /// Creates a generator with 100 customers per province and 30 trades
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            customers_per_province: 100,
            trade_count: 30,
        }
    }

    pub fn with_customers_per_province(mut self, count: u32) -> Self {
        self.customers_per_province = count;
        self
    }

    pub fn with_trade_count(mut self, count: u32) -> Self {
        self.trade_count = count;
        self
    }

    /// Adds generated customers and trades to `ledger`
    ///
    /// Every third customer in a province gets a bill issued up to 60 days
    /// before `now`; it is paid unless the customer's position is a
    /// multiple of nine. Every fifteenth gets a maintenance entry. A third
    /// of the trades are exports.
    ///
    /// # Errors
    ///
    /// Returns the first error the ledger reports, e.g. `DuplicateId` when
    /// `ledger` already holds one of the generated customer numbers
    pub fn populate(&mut self, ledger: &mut Ledger, now: DateTime<Utc>) -> Result<SeedSummary, BillingError> {
        let mut summary = SeedSummary::default();
        let mut next_id = CustomerId::new(FIRST_CUSTOMER_ID);

        for province in PROVINCES {
            for position in 0..self.customers_per_province {
                let category = self.category();
                let rate = ledger.rates().rate_for(category);
                let account = self.customer(next_id, province, position, category, rate, now)?;

                summary.customers += 1;
                summary.bills += account.bills().len();
                summary.unpaid_bills += account.bills().iter().filter(|b| !b.paid).count();
                summary.maintenance_entries += account.maintenance_log().len();
                ledger.add_account(account)?;
                next_id = next_id.next();
            }
        }

        for position in 0..self.trade_count {
            let trade = self.trade(ledger, position, now)?;
            ledger.record_trade(trade)?;
            summary.trades += 1;
        }

        tracing::info!(
            customers = summary.customers,
            bills = summary.bills,
            unpaid_bills = summary.unpaid_bills,
            trades = summary.trades,
            "Sample data generated"
        );
        Ok(summary)
    }

    fn category(&mut self) -> EnergyCategory {
        EnergyCategory::ALL[self.rng.gen_range(0..EnergyCategory::ALL.len())]
    }

    /// A random amount between `low` and `high` hundredths, inclusive
    fn hundredths(&mut self, low: i64, high: i64) -> Decimal {
        Decimal::new(self.rng.gen_range(low..=high), 2)
    }

    fn profile(&mut self, province: &str) -> CustomerProfile {
        let first: String = FirstName().fake_with_rng(&mut self.rng);
        let last: String = LastName().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        let number = self.rng.gen_range(100..=9999);

        let initial: String = first.chars().take(1).collect();
        let email = format!("{initial}{last}@email.com").to_lowercase();

        CustomerProfile::new(
            format!("{first} {last}"),
            email,
            format!("{number} {street}, {province}"),
            province,
        )
    }

    fn customer(
        &mut self,
        id: CustomerId,
        province: &str,
        position: u32,
        category: EnergyCategory,
        rate: Rate,
        now: DateTime<Utc>,
    ) -> Result<Account, BillingError> {
        let profile = self.profile(province);
        let allocation_cents = self.rng.gen_range(25_000..=100_000);
        let allocation = Decimal::new(allocation_cents, 2);

        let mut account = Account::new(id, profile, category, allocation)?;
        account.record_usage(self.hundredths(5_000, allocation_cents * 8 / 10))?;

        if position % 3 == 0 {
            let issued_at = now - Duration::days(self.rng.gen_range(0..=60));
            let amount = account.issue_bill(rate, issued_at).amount;
            if position % 9 != 0 {
                account.apply_payment(0, amount, issued_at)?;
            }
        }

        if position % 15 == 0 {
            let cost = Money::from_cents(self.rng.gen_range(5_000..=20_000));
            account.add_maintenance(MAINTENANCE_DESCRIPTION, cost, now)?;
        }

        Ok(account)
    }

    fn trade(&mut self, ledger: &Ledger, position: u32, now: DateTime<Utc>) -> Result<TradeRecord, BillingError> {
        let category = self.category();
        let base = ledger.rates().rate_for(category).as_decimal();
        let quantity = self.hundredths(100_000, 1_000_000);
        let factor = Decimal::new(self.rng.gen_range(7_000..=13_000), 4);
        let price = Rate::new((base * factor).round_dp(4));

        let direction = if position % 3 != 0 {
            TradeDirection::Import
        } else {
            TradeDirection::Export
        };
        TradeRecord::new(category, quantity, price, direction, now)
    }
}

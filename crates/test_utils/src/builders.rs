//! Test Data Builders
//!
//! Provides builder patterns for constructing test accounts and ledgers with
//! sensible defaults. Tests specify only the relevant fields.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, Money};
use domain_billing::{Account, CustomerProfile, EnergyCategory, Ledger, RateTable};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{CustomerFixtures, RateFixtures, TemporalFixtures};

/// Builder for constructing test accounts
pub struct AccountBuilder {
    id: CustomerId,
    profile: CustomerProfile,
    category: EnergyCategory,
    allocation: Decimal,
    usage: Decimal,
}

impl Default for AccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountBuilder {
    /// Creates a new builder: John Smith, Solar, 500 units allocated
    pub fn new() -> Self {
        Self {
            id: CustomerFixtures::first_id(),
            profile: CustomerFixtures::john_smith(),
            category: EnergyCategory::Solar,
            allocation: dec!(500),
            usage: Decimal::ZERO,
        }
    }

    /// Sets the customer number
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = CustomerId::new(id);
        self
    }

    /// Sets the customer profile
    pub fn with_profile(mut self, profile: CustomerProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the customer name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = name.into();
        self
    }

    /// Sets the customer email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.profile.email = email.into();
        self
    }

    /// Sets the province
    pub fn in_province(mut self, province: impl Into<String>) -> Self {
        self.profile.province = province.into();
        self
    }

    /// Sets the energy category
    pub fn with_category(mut self, category: EnergyCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the allocation
    pub fn with_allocation(mut self, allocation: Decimal) -> Self {
        self.allocation = allocation;
        self
    }

    /// Records usage after the account is opened
    pub fn with_usage(mut self, usage: Decimal) -> Self {
        self.usage = usage;
        self
    }

    /// Builds the account
    ///
    /// # Panics
    ///
    /// Panics if the allocation or usage is invalid
    pub fn build(self) -> Account {
        let (mut account, usage) = self.build_unused();
        account.record_usage(usage).expect("usage within allocation");
        account
    }

    /// Builds the account with no usage, returning the usage still to record
    fn build_unused(self) -> (Account, Decimal) {
        let account = Account::new(self.id, self.profile, self.category, self.allocation)
            .expect("valid test account");
        (account, self.usage)
    }
}

/// Builder for constructing populated test ledgers
pub struct LedgerBuilder {
    rates: RateTable,
    accounts: Vec<(Account, Decimal)>,
    bills: Vec<(CustomerId, Decimal, DateTime<Utc>)>,
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerBuilder {
    /// Creates an empty builder using the flat one-dollar rate table
    pub fn new() -> Self {
        Self {
            rates: RateFixtures::flat_dollar(),
            accounts: Vec::new(),
            bills: Vec::new(),
        }
    }

    /// Sets the rate table
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    /// Adds an account built by `build`
    pub fn with(mut self, build: impl FnOnce(AccountBuilder) -> AccountBuilder) -> Self {
        self.accounts.push(build(AccountBuilder::new()).build_unused());
        self
    }

    /// Issues an unpaid bill for `units` of usage on account `id` at `issued_at`
    pub fn with_bill(mut self, id: u32, units: Decimal, issued_at: DateTime<Utc>) -> Self {
        self.bills.push((CustomerId::new(id), units, issued_at));
        self
    }

    /// Issues an unpaid bill at the standard billing date
    pub fn with_standard_bill(self, id: u32, units: Decimal) -> Self {
        self.with_bill(id, units, TemporalFixtures::billing_date())
    }

    /// Builds the ledger
    ///
    /// Bills are issued first, in the order they were added, each by its own
    /// billing cycle. Account usage set through [`AccountBuilder::with_usage`]
    /// is recorded afterwards and stays unbilled.
    ///
    /// # Panics
    ///
    /// Panics on duplicate ids, unknown ids, or usage beyond the allocation
    pub fn build(self) -> Ledger {
        let mut ledger = Ledger::new(self.rates);
        let mut pending = Vec::new();
        for (account, usage) in self.accounts {
            pending.push((account.id(), usage));
            ledger.add_account(account).expect("unique test account");
        }

        for (id, units, issued_at) in self.bills {
            ledger.record_usage(id, units).expect("usage within allocation");
            ledger.run_billing_cycle(issued_at);
        }

        for (id, usage) in pending {
            ledger.record_usage(id, usage).expect("usage within allocation");
        }

        ledger
    }
}

/// Total of all unpaid bills across `ledger`
pub fn total_unpaid(ledger: &Ledger) -> Money {
    ledger.accounts().iter().map(|a| a.total_owed()).sum()
}

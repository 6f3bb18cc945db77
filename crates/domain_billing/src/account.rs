//! Customer accounts
//!
//! An account tracks one customer's energy allocation for the current
//! period, the usage drawn against it, and every bill ever issued.
//!
//! # Invariants
//!
//! - `0 < allocation <= MAX_ALLOCATION`
//! - `0 <= usage <= allocation` after every operation
//! - Bills are kept in issue order and never removed
//! - A rejected operation leaves the account unchanged

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, Money, Rate};
use crate::bill::Bill;
use crate::energy::EnergyCategory;
use crate::error::BillingError;
use crate::maintenance::MaintenanceEntry;
use crate::reminder::{OverdueNotice, Reminder, REMINDER_SUBJECT};

/// Contact and location details of a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub email: String,
    pub address: String,
    pub province: String,
}

impl CustomerProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
            province: province.into(),
        }
    }
}

/// Largest per-period allocation an account may hold, in energy units
pub const MAX_ALLOCATION: Decimal = dec!(1000000000);

/// A customer's billing and usage record
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: CustomerId,
    profile: CustomerProfile,
    category: EnergyCategory,
    allocation: Decimal,
    usage: Decimal,
    bills: Vec<Bill>,
    reminder_sent: bool,
    maintenance_log: Vec<MaintenanceEntry>,
}

impl Account {
    /// Opens an account with no usage and no bills
    ///
    /// # Arguments
    ///
    /// * `id` - Customer number
    /// * `profile` - Contact details and province
    /// * `category` - Energy category the customer is supplied with
    /// * `allocation` - Energy units the customer may draw per period
    ///
    /// # Errors
    ///
    /// Returns `InvalidAllocation` if `allocation` is not strictly positive
    /// or exceeds [`MAX_ALLOCATION`]
    pub fn new(
        id: CustomerId,
        profile: CustomerProfile,
        category: EnergyCategory,
        allocation: Decimal,
    ) -> Result<Self, BillingError> {
        if allocation <= Decimal::ZERO || allocation > MAX_ALLOCATION {
            return Err(BillingError::InvalidAllocation(allocation));
        }

        Ok(Self {
            id,
            profile,
            category,
            allocation,
            usage: Decimal::ZERO,
            bills: Vec::new(),
            reminder_sent: false,
            maintenance_log: Vec::new(),
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn profile(&self) -> &CustomerProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn address(&self) -> &str {
        &self.profile.address
    }

    pub fn province(&self) -> &str {
        &self.profile.province
    }

    pub fn category(&self) -> EnergyCategory {
        self.category
    }

    /// Energy cap for the current period
    pub fn allocation(&self) -> Decimal {
        self.allocation
    }

    /// Energy drawn in the current period
    pub fn usage(&self) -> Decimal {
        self.usage
    }

    /// Energy still available in the current period
    pub fn remaining(&self) -> Decimal {
        self.allocation - self.usage
    }

    /// Bills in issue order
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn maintenance_log(&self) -> &[MaintenanceEntry] {
        &self.maintenance_log
    }

    /// Whether a reminder has gone out for the current overdue episode
    pub fn reminder_sent(&self) -> bool {
        self.reminder_sent
    }

    /// Draws energy against the allocation
    ///
    /// # Errors
    ///
    /// - `InvalidUsage` if `amount` is negative
    /// - `UsageExceeded` if `amount` is more than the remaining allocation
    pub fn record_usage(&mut self, amount: Decimal) -> Result<(), BillingError> {
        if amount < Decimal::ZERO {
            return Err(BillingError::InvalidUsage(amount));
        }

        let remaining = self.remaining();
        if amount > remaining {
            return Err(BillingError::UsageExceeded {
                requested: amount,
                remaining,
            });
        }

        self.usage += amount;
        Ok(())
    }

    /// Converts the current usage into a bill and starts a new period
    ///
    /// A zero-usage account still gets a (zero) bill; callers that want to
    /// skip idle accounts must filter before calling.
    pub fn issue_bill(&mut self, rate: Rate, now: DateTime<Utc>) -> &Bill {
        let bill = Bill::issue(rate.apply(self.usage), now);
        self.usage = Decimal::ZERO;
        self.bills.push(bill);
        &self.bills[self.bills.len() - 1]
    }

    /// Settles a bill in full
    ///
    /// Settlement is all-or-nothing: a payment below the bill amount is
    /// refused and nothing changes. A successful payment clears the
    /// reminder flag even if other bills remain overdue.
    ///
    /// # Returns
    ///
    /// `true` if the bill was marked paid, `false` if the payment was short
    ///
    /// # Errors
    ///
    /// Returns `InvalidBillIndex` if there is no bill at `bill_index`
    pub fn apply_payment(
        &mut self,
        bill_index: usize,
        amount: Money,
        now: DateTime<Utc>,
    ) -> Result<bool, BillingError> {
        let bill_count = self.bills.len();
        let bill = self
            .bills
            .get_mut(bill_index)
            .ok_or(BillingError::InvalidBillIndex {
                index: bill_index,
                bill_count,
            })?;

        if amount < bill.amount {
            return Ok(false);
        }

        bill.settle(now);
        self.reminder_sent = false;
        Ok(true)
    }

    /// Appends an entry to the maintenance log
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaintenanceCost` if `cost` is negative
    pub fn add_maintenance(
        &mut self,
        description: impl Into<String>,
        cost: Money,
        now: DateTime<Utc>,
    ) -> Result<(), BillingError> {
        if cost.is_negative() {
            return Err(BillingError::InvalidMaintenanceCost(cost));
        }

        self.maintenance_log.push(MaintenanceEntry {
            recorded_at: now,
            description: description.into(),
            cost,
        });
        Ok(())
    }

    /// Bills that are unpaid and past the 30-day window
    pub fn overdue_bills(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Bill> + '_ {
        self.bills.iter().filter(move |bill| bill.is_overdue(now))
    }

    pub fn has_overdue_bills(&self, now: DateTime<Utc>) -> bool {
        self.bills.iter().any(|bill| bill.is_overdue(now))
    }

    /// Sum of every unpaid bill, overdue or not
    pub fn total_owed(&self) -> Money {
        self.bills
            .iter()
            .filter(|bill| !bill.paid)
            .map(|bill| bill.amount)
            .sum()
    }

    /// Sum of overdue bills only
    pub fn overdue_amount(&self, now: DateTime<Utc>) -> Money {
        self.overdue_bills(now).map(|bill| bill.amount).sum()
    }

    /// Produces a reminder for the current overdue episode
    ///
    /// At most one reminder is produced per episode: once produced, no
    /// further reminder is generated until a payment is applied, even if
    /// more bills fall overdue in the meantime.
    pub fn generate_reminder(&mut self, now: DateTime<Utc>) -> Option<Reminder> {
        if self.reminder_sent || !self.has_overdue_bills(now) {
            return None;
        }

        self.reminder_sent = true;

        let notices = self
            .overdue_bills(now)
            .map(|bill| OverdueNotice {
                bill_id: bill.id,
                issued_at: bill.issued_at,
                amount: bill.amount,
                days_overdue: bill.days_overdue(now),
            })
            .collect();

        Some(Reminder {
            customer_id: self.id,
            recipient: self.profile.email.clone(),
            name: self.profile.name.clone(),
            subject: REMINDER_SUBJECT.to_string(),
            notices,
            generated_at: now,
        })
    }

    /// True if `query` occurs in the customer number, name or email
    pub fn matches_query(&self, query: &str) -> bool {
        self.id.to_string().contains(query)
            || self.profile.name.contains(query)
            || self.profile.email.contains(query)
    }
}

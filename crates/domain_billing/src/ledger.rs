//! The customer ledger
//!
//! The ledger owns every account, indexes them by customer number and by
//! province, prices usage through the rate table, and keeps the company's
//! trade history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use core_kernel::{percentage, CustomerId, Money};
use crate::account::Account;
use crate::energy::RateTable;
use crate::error::BillingError;
use crate::ports::ReminderNotifier;
use crate::trade::TradeRecord;

/// The aggregate collection of customer accounts
///
/// # Invariants
///
/// - Customer numbers are unique
/// - Every id in the province index refers to an existing account
/// - Every account's province is a key of the province index
/// - Accounts are never removed
#[derive(Debug)]
pub struct Ledger {
    /// Accounts in insertion order
    accounts: Vec<Account>,
    /// Position of each account in `accounts`
    index: HashMap<CustomerId, usize>,
    /// Customer numbers per province, provinces in name order
    provinces: BTreeMap<String, Vec<CustomerId>>,
    /// Price per unit for each energy category
    rates: RateTable,
    /// Trade history in recording order
    trades: Vec<TradeRecord>,
}

impl Ledger {
    /// Creates an empty ledger priced with the given rate table
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_billing::{Ledger, RateTable};
    ///
    /// let ledger = Ledger::new(RateTable::standard());
    /// assert!(ledger.is_empty());
    /// ```
    pub fn new(rates: RateTable) -> Self {
        Self {
            accounts: Vec::new(),
            index: HashMap::new(),
            provinces: BTreeMap::new(),
            rates,
            trades: Vec::new(),
        }
    }

    /// Adds an account to the ledger
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the customer number is already present
    pub fn add_account(&mut self, account: Account) -> Result<(), BillingError> {
        let id = account.id();
        if self.index.contains_key(&id) {
            return Err(BillingError::DuplicateId(id));
        }

        tracing::debug!(customer_id = %id, province = %account.province(), "Account added");

        self.provinces
            .entry(account.province().to_string())
            .or_default()
            .push(id);
        self.index.insert(id, self.accounts.len());
        self.accounts.push(account);

        Ok(())
    }

    /// Gets an account by customer number
    pub fn account(&self, id: CustomerId) -> Option<&Account> {
        self.index.get(&id).map(|&pos| &self.accounts[pos])
    }

    fn account_mut(&mut self, id: CustomerId) -> Result<&mut Account, BillingError> {
        let pos = *self.index.get(&id).ok_or(BillingError::AccountNotFound(id))?;
        Ok(&mut self.accounts[pos])
    }

    /// All accounts in insertion order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Provinces in name order, with their customer numbers in insertion order
    pub fn provinces(&self) -> impl Iterator<Item = (&str, &[CustomerId])> + '_ {
        self.provinces
            .iter()
            .map(|(province, ids)| (province.as_str(), ids.as_slice()))
    }

    fn accounts_in<'a>(&'a self, ids: &'a [CustomerId]) -> impl Iterator<Item = &'a Account> + 'a {
        ids.iter().filter_map(move |id| self.account(*id))
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Trades in recording order
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Records energy usage on an account
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` for an unknown customer number
    /// - Any error from [`Account::record_usage`]
    pub fn record_usage(&mut self, id: CustomerId, amount: Decimal) -> Result<(), BillingError> {
        let account = self.account_mut(id)?;
        account.record_usage(amount).map_err(|error| {
            tracing::warn!(customer_id = %id, %amount, %error, "Usage rejected");
            error
        })
    }

    /// Applies a payment to one of an account's bills
    ///
    /// # Returns
    ///
    /// `true` if the bill was settled, `false` if the payment was short
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` for an unknown customer number
    /// - `InvalidBillIndex` if the account has no such bill
    pub fn apply_payment(
        &mut self,
        id: CustomerId,
        bill_index: usize,
        amount: Money,
        now: DateTime<Utc>,
    ) -> Result<bool, BillingError> {
        let settled = self.account_mut(id)?.apply_payment(bill_index, amount, now)?;
        tracing::debug!(customer_id = %id, bill_index, %amount, settled, "Payment applied");
        Ok(settled)
    }

    /// Logs maintenance work against an account
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` for an unknown customer number
    /// - `InvalidMaintenanceCost` for a negative cost
    pub fn add_maintenance(
        &mut self,
        id: CustomerId,
        description: impl Into<String>,
        cost: Money,
        now: DateTime<Utc>,
    ) -> Result<(), BillingError> {
        self.account_mut(id)?.add_maintenance(description, cost, now)
    }

    /// Bills every account with usage in the current period
    ///
    /// Accounts with zero usage are skipped; they receive no bill.
    pub fn run_billing_cycle(&mut self, now: DateTime<Utc>) -> BillingCycleSummary {
        let mut summary = BillingCycleSummary::default();

        for account in self.accounts.iter_mut().filter(|a| a.usage() > Decimal::ZERO) {
            let rate = self.rates.rate_for(account.category());
            let bill = account.issue_bill(rate, now);
            summary.accounts_billed += 1;
            summary.total_billed += bill.amount;
        }

        tracing::info!(
            accounts_billed = summary.accounts_billed,
            total_billed = %summary.total_billed,
            "Billing cycle complete"
        );
        summary
    }

    /// Generates reminders for accounts with overdue bills and hands them
    /// to `notifier`
    ///
    /// # Returns
    ///
    /// The number of reminders generated
    pub fn dispatch_reminders<N>(&mut self, now: DateTime<Utc>, notifier: &mut N) -> usize
    where
        N: ReminderNotifier + ?Sized,
    {
        let mut sent = 0;
        for account in &mut self.accounts {
            if let Some(reminder) = account.generate_reminder(now) {
                notifier.deliver(&reminder);
                sent += 1;
            }
        }

        tracing::info!(reminders = sent, "Reminder dispatch complete");
        sent
    }

    /// Records an import or export
    ///
    /// # Errors
    ///
    /// Returns `InvalidTrade` for a negative quantity or price
    pub fn record_trade(&mut self, trade: TradeRecord) -> Result<(), BillingError> {
        trade.validate()?;
        tracing::debug!(
            trade_id = %trade.id,
            category = %trade.category,
            direction = ?trade.direction,
            value = %trade.value(),
            "Trade recorded"
        );
        self.trades.push(trade);
        Ok(())
    }

    /// Searches accounts by customer number, name or email
    ///
    /// An empty `query` matches every account. When `province` is given and
    /// non-empty, only accounts in that province are returned. Matching is
    /// case-sensitive substring search.
    pub fn find_accounts(&self, query: &str, province: Option<&str>) -> Vec<&Account> {
        let province = province.filter(|p| !p.is_empty());
        self.accounts
            .iter()
            .filter(|a| province.map_or(true, |p| a.province() == p))
            .filter(|a| a.matches_query(query))
            .collect()
    }

    /// Accounts holding at least one overdue bill
    pub fn overdue_accounts(&self, now: DateTime<Utc>) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.has_overdue_bills(now))
            .collect()
    }

    /// Per-province totals, provinces in name order
    pub fn statistics(&self, now: DateTime<Utc>) -> Vec<ProvinceStats> {
        self.provinces
            .iter()
            .map(|(province, ids)| ProvinceStats::collect(province, self.accounts_in(ids), now))
            .collect()
    }
}

/// Outcome of a billing cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycleSummary {
    /// Number of bills issued
    pub accounts_billed: usize,
    /// Sum of the issued bills
    pub total_billed: Money,
}

/// Aggregated figures for one province
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceStats {
    pub province: String,
    pub customer_count: usize,
    /// Sum of allocations
    pub total_allocated: Decimal,
    /// Sum of current-period usage
    pub total_used: Decimal,
    /// Sum of unused allocation
    pub total_remaining: Decimal,
    /// Sum of unpaid bills
    pub total_unpaid: Money,
    /// Customers with at least one overdue bill
    pub overdue_count: usize,
}

impl ProvinceStats {
    fn collect<'a>(
        province: &str,
        accounts: impl Iterator<Item = &'a Account>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut stats = Self {
            province: province.to_string(),
            customer_count: 0,
            total_allocated: Decimal::ZERO,
            total_used: Decimal::ZERO,
            total_remaining: Decimal::ZERO,
            total_unpaid: Money::zero(),
            overdue_count: 0,
        };

        for account in accounts {
            stats.customer_count += 1;
            stats.total_allocated += account.allocation();
            stats.total_used += account.usage();
            stats.total_remaining += account.remaining();
            stats.total_unpaid += account.total_owed();
            if account.has_overdue_bills(now) {
                stats.overdue_count += 1;
            }
        }

        stats
    }

    /// Share of the allocation used, zero when nothing is allocated
    pub fn usage_percentage(&self) -> Decimal {
        percentage(self.total_used, self.total_allocated)
    }

    /// Share of customers with overdue bills, zero for an empty province
    pub fn overdue_percentage(&self) -> Decimal {
        percentage(Decimal::from(self.overdue_count), Decimal::from(self.customer_count))
    }
}

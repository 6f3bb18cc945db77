//! Billing Domain - Energy Usage Ledger
//!
//! This crate tracks customer energy allocations and usage, turns usage into
//! bills, settles payments, flags overdue accounts, and aggregates province
//! and company-level figures.
//!
//! # Billing Rules
//!
//! - Usage accumulates against an allocation and never exceeds it
//! - A billing cycle bills every account with usage at its category rate,
//!   then resets that usage to zero
//! - A bill is overdue once it is unpaid and more than 30 days old
//! - A customer receives at most one reminder per overdue episode; the
//!   episode ends with the next successful payment
//!
//! Every time-sensitive operation takes an explicit `now`.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use core_kernel::{CustomerId, Money, Timezone};
//! use domain_billing::{Account, CustomerProfile, EnergyCategory, Ledger, RateTable, ReportBuilder};
//! use rust_decimal_macros::dec;
//!
//! let mut ledger = Ledger::new(RateTable::standard());
//! let profile = CustomerProfile::new("John Smith", "jsmith@email.com", "120 Howard Ave", "Ontario");
//! let account = Account::new(CustomerId::new(1001), profile, EnergyCategory::Solar, dec!(500))?;
//! ledger.add_account(account)?;
//!
//! let now = Utc::now();
//! ledger.record_usage(CustomerId::new(1001), dec!(100))?;
//! let summary = ledger.run_billing_cycle(now);
//! assert_eq!(summary.total_billed, Money::new(dec!(18)));
//!
//! let report = ReportBuilder::new(&ledger, Timezone::default()).build(now);
//! assert_eq!(report.overall.customer_count, 1);
//! # Ok::<(), domain_billing::BillingError>(())
//! ```

pub mod account;
pub mod bill;
pub mod energy;
pub mod error;
pub mod ledger;
pub mod maintenance;
pub mod ports;
pub mod reminder;
pub mod report;
pub mod trade;

pub use account::{Account, CustomerProfile, MAX_ALLOCATION};
pub use bill::{Bill, OVERDUE_AFTER_DAYS};
pub use energy::{EnergyCategory, RateTable, MAX_RATE};
pub use error::BillingError;
pub use ledger::{BillingCycleSummary, Ledger, ProvinceStats};
pub use maintenance::MaintenanceEntry;
pub use ports::{Outbox, ReminderNotifier, TracingNotifier};
pub use reminder::{OverdueNotice, Reminder, REMINDER_SUBJECT};
pub use report::{
    CategoryRate, CategoryTotal, MonthlyReport, OverallStats, ProvinceBreakdown, ProvinceCount,
    ReportBuilder, SystemOverview, TradeSummary,
};
pub use trade::{TradeDirection, TradeRecord, MAX_TRADE_QUANTITY};

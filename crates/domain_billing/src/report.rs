//! Report snapshots derived from the ledger
//!
//! Reports are read-only views: building one never mutates the ledger.
//! [`MonthlyReport`] renders to the monthly report text document through
//! `Display` and to JSON through `Serialize`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use core_kernel::{percentage, Money, Rate, Timezone};
use crate::energy::EnergyCategory;
use crate::ledger::{Ledger, ProvinceStats};
use crate::trade::TradeRecord;

/// Builds reports from a ledger
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    ledger: &'a Ledger,
    timezone: Timezone,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a builder rendering dates in `timezone`
    pub fn new(ledger: &'a Ledger, timezone: Timezone) -> Self {
        Self { ledger, timezone }
    }

    /// Builds the monthly report as of `now`
    pub fn build(&self, now: DateTime<Utc>) -> MonthlyReport {
        let provinces = self
            .ledger
            .statistics(now)
            .into_iter()
            .map(ProvinceBreakdown::from)
            .collect();

        MonthlyReport {
            period_label: self.timezone.period_label(now),
            generated_at: now,
            overall: self.overall(now),
            provinces,
            trade: TradeSummary::from_trades(self.ledger.trades()),
        }
    }

    /// Builds the system overview as of `now`
    pub fn overview(&self, now: DateTime<Utc>) -> SystemOverview {
        let overall = self.overall(now);
        let overdue_amount = self
            .ledger
            .overdue_accounts(now)
            .into_iter()
            .map(|a| a.total_owed())
            .sum();
        let trade = TradeSummary::from_trades(self.ledger.trades());

        SystemOverview {
            customer_count: overall.customer_count,
            customers_by_province: self
                .ledger
                .provinces()
                .map(|(province, ids)| ProvinceCount {
                    province: province.to_string(),
                    customer_count: ids.len(),
                })
                .collect(),
            rates: self
                .ledger
                .rates()
                .iter()
                .map(|(category, rate)| CategoryRate { category, rate })
                .collect(),
            overdue_count: overall.overdue_count,
            overdue_percentage: overall.overdue_percentage,
            overdue_amount,
            total_imports: trade.total_imports,
            total_exports: trade.total_exports,
            balance: trade.net_balance,
        }
    }

    fn overall(&self, now: DateTime<Utc>) -> OverallStats {
        let accounts = self.ledger.accounts();
        let customer_count = accounts.len();
        let total_unpaid = accounts.iter().map(|a| a.total_owed()).sum();
        let overdue_count = accounts.iter().filter(|a| a.has_overdue_bills(now)).count();

        OverallStats {
            customer_count,
            total_unpaid,
            overdue_count,
            overdue_percentage: percentage(
                Decimal::from(overdue_count),
                Decimal::from(customer_count),
            ),
        }
    }
}

/// Company-wide customer totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    pub customer_count: usize,
    /// Sum of unpaid bills across all accounts
    pub total_unpaid: Money,
    pub overdue_count: usize,
    /// Zero when there are no customers
    pub overdue_percentage: Decimal,
}

/// One province's section of the monthly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceBreakdown {
    #[serde(flatten)]
    pub stats: ProvinceStats,
    pub usage_percentage: Decimal,
    pub overdue_percentage: Decimal,
}

impl From<ProvinceStats> for ProvinceBreakdown {
    fn from(stats: ProvinceStats) -> Self {
        Self {
            usage_percentage: stats.usage_percentage(),
            overdue_percentage: stats.overdue_percentage(),
            stats,
        }
    }
}

/// Trade value for one energy category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: EnergyCategory,
    pub total: Money,
}

/// Imports and exports by value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeSummary {
    pub total_imports: Money,
    pub total_exports: Money,
    /// Imports minus exports
    pub net_balance: Money,
    /// Categories with at least one import, by category name
    pub imports_by_category: Vec<CategoryTotal>,
    /// Categories with at least one export, by category name
    pub exports_by_category: Vec<CategoryTotal>,
}

impl TradeSummary {
    /// Totals `trades` by direction and category
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        let mut imports: HashMap<EnergyCategory, Money> = HashMap::new();
        let mut exports: HashMap<EnergyCategory, Money> = HashMap::new();

        for trade in trades {
            let bucket = if trade.is_import() { &mut imports } else { &mut exports };
            *bucket.entry(trade.category).or_default() += trade.value();
        }

        let total_imports: Money = imports.values().sum();
        let total_exports: Money = exports.values().sum();

        Self {
            total_imports,
            total_exports,
            net_balance: total_imports - total_exports,
            imports_by_category: by_category_name(imports),
            exports_by_category: by_category_name(exports),
        }
    }
}

fn by_category_name(totals: HashMap<EnergyCategory, Money>) -> Vec<CategoryTotal> {
    let mut totals: Vec<_> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    totals.sort_by_key(|t| t.category.display_name());
    totals
}

/// The monthly report snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    /// Local month and year, e.g. "October 2026"
    pub period_label: String,
    pub generated_at: DateTime<Utc>,
    pub overall: OverallStats,
    /// Provinces in name order
    pub provinces: Vec<ProvinceBreakdown>,
    pub trade: TradeSummary,
}

impl fmt::Display for MonthlyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Energy Provider Monthly Report - {}", self.period_label)?;
        writeln!(f)?;

        let overall = &self.overall;
        writeln!(f, "Overall Stats:")?;
        writeln!(f, "Total Customers: {}", overall.customer_count)?;
        writeln!(f, "Total Unpaid: {}", overall.total_unpaid)?;
        writeln!(
            f,
            "Overdue Customers: {} ({:.1}%)",
            overall.overdue_count, overall.overdue_percentage
        )?;
        writeln!(f)?;

        writeln!(f, "Province Breakdown:")?;
        for province in &self.provinces {
            let stats = &province.stats;
            writeln!(f, "{}:", stats.province)?;
            writeln!(f, "  Customers: {}", stats.customer_count)?;
            writeln!(f, "  Energy Allocated: {:.2} units", stats.total_allocated)?;
            writeln!(
                f,
                "  Energy Used: {:.2} ({:.2}%)",
                stats.total_used, province.usage_percentage
            )?;
            writeln!(f, "  Unpaid Bills: {}", stats.total_unpaid)?;
            writeln!(
                f,
                "  Overdue: {} ({:.2}%)",
                stats.overdue_count, province.overdue_percentage
            )?;
            writeln!(f)?;
        }

        let trade = &self.trade;
        writeln!(f, "Import/Export Summary:")?;
        writeln!(f, "Total Imports: {}", trade.total_imports)?;
        writeln!(f, "Total Exports: {}", trade.total_exports)?;
        writeln!(f, "Net Balance: {}", trade.net_balance)?;
        writeln!(f)?;

        writeln!(f, "Imports by Type:")?;
        for entry in &trade.imports_by_category {
            writeln!(f, "  {}: {}", entry.category, entry.total)?;
        }
        writeln!(f)?;

        writeln!(f, "Exports by Type:")?;
        for entry in &trade.exports_by_category {
            writeln!(f, "  {}: {}", entry.category, entry.total)?;
        }
        writeln!(f)?;

        writeln!(f, "--- End of Report ---")
    }
}

/// Number of customers in a province
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceCount {
    pub province: String,
    pub customer_count: usize,
}

/// The configured price of one energy category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryRate {
    pub category: EnergyCategory,
    pub rate: Rate,
}

/// At-a-glance system figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemOverview {
    pub customer_count: usize,
    /// Provinces in name order
    pub customers_by_province: Vec<ProvinceCount>,
    pub rates: Vec<CategoryRate>,
    pub overdue_count: usize,
    pub overdue_percentage: Decimal,
    /// Everything owed by customers with at least one overdue bill
    pub overdue_amount: Money,
    pub total_imports: Money,
    pub total_exports: Money,
    /// Imports minus exports
    pub balance: Money,
}

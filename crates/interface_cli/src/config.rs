//! CLI configuration

use std::path::PathBuf;

use core_kernel::{CoreError, Rate, Timezone};
use domain_billing::{BillingError, EnergyCategory, RateTable};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Upper bound on generated customers per province
pub const MAX_CUSTOMERS_PER_PROVINCE: u32 = 100_000;

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Seed for the sample data generator
    pub seed: u64,
    /// Sample customers generated in each province
    pub customers_per_province: u32,
    /// Sample trades generated
    pub trade_count: u32,
    /// Timezone used for dates in reminders and reports
    pub timezone: Timezone,
    /// Where `report` writes the monthly report
    pub report_path: PathBuf,
    /// Log level
    pub log_level: String,
    /// Per-category rate overrides
    pub rates: RateOverrides,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            seed: 3400,
            customers_per_province: 100,
            trade_count: 30,
            timezone: Timezone::new(chrono_tz::America::Toronto),
            report_path: PathBuf::from("monthly_report.txt"),
            log_level: "info".to_string(),
            rates: RateOverrides::default(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from `LEDGER_` environment variables
    ///
    /// Nested keys use a double underscore, e.g. `LEDGER_RATES__SOLAR=0.2`.
    /// Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("LEDGER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Checks values the type system cannot
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.customers_per_province > MAX_CUSTOMERS_PER_PROVINCE {
            return Err(CoreError::configuration(format!(
                "customers_per_province {} exceeds {}",
                self.customers_per_province, MAX_CUSTOMERS_PER_PROVINCE
            )));
        }
        if self.report_path.as_os_str().is_empty() {
            return Err(CoreError::configuration("report_path is empty"));
        }
        Ok(())
    }

    /// The standard rate table with overrides applied
    pub fn rate_table(&self) -> Result<RateTable, BillingError> {
        self.rates.apply(RateTable::standard())
    }
}

/// Optional replacement rates, one per energy category
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateOverrides {
    pub crude_oil: Option<Decimal>,
    pub solar: Option<Decimal>,
    pub nuclear: Option<Decimal>,
    pub natural_gas: Option<Decimal>,
}

impl RateOverrides {
    fn get(&self, category: EnergyCategory) -> Option<Decimal> {
        match category {
            EnergyCategory::CrudeOil => self.crude_oil,
            EnergyCategory::Solar => self.solar,
            EnergyCategory::Nuclear => self.nuclear,
            EnergyCategory::NaturalGas => self.natural_gas,
        }
    }

    /// Replaces the rates in `table` that have an override
    pub fn apply(&self, mut table: RateTable) -> Result<RateTable, BillingError> {
        for category in EnergyCategory::ALL {
            if let Some(rate) = self.get(category) {
                table = table.with_rate(category, Rate::new(rate))?;
            }
        }
        Ok(table)
    }
}

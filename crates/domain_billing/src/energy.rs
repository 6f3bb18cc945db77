//! Energy categories and the rate table
//!
//! The company sells a fixed set of energy categories, each billed at a
//! single per-unit rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::Rate;
use crate::error::BillingError;

/// Categories of energy supplied to customers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyCategory {
    /// Crude oil, priced per barrel-equivalent unit
    CrudeOil,
    /// Solar, priced per kWh
    Solar,
    /// Nuclear, priced per kWh
    Nuclear,
    /// Natural gas, priced per cubic-metre unit
    NaturalGas,
}

impl EnergyCategory {
    /// Every category, in declaration order
    pub const ALL: [EnergyCategory; 4] = [
        EnergyCategory::CrudeOil,
        EnergyCategory::Solar,
        EnergyCategory::Nuclear,
        EnergyCategory::NaturalGas,
    ];

    /// Human-readable name used on statements and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            EnergyCategory::CrudeOil => "Crude Oil",
            EnergyCategory::Solar => "Solar",
            EnergyCategory::Nuclear => "Nuclear",
            EnergyCategory::NaturalGas => "Natural Gas",
        }
    }
}

impl fmt::Display for EnergyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for EnergyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "crudeoil" | "oil" => Ok(EnergyCategory::CrudeOil),
            "solar" => Ok(EnergyCategory::Solar),
            "nuclear" => Ok(EnergyCategory::Nuclear),
            "naturalgas" | "gas" => Ok(EnergyCategory::NaturalGas),
            _ => Err(format!("Unknown energy category: {}", s)),
        }
    }
}

/// Highest per-unit price a rate table or trade may carry
pub const MAX_RATE: Decimal = dec!(1000000);

/// Per-unit price for every energy category
///
/// # Invariants
///
/// - Every category has a rate
/// - Every rate is strictly positive and at most [`MAX_RATE`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    rates: HashMap<EnergyCategory, Rate>,
}

impl RateTable {
    /// Builds a rate table from category/rate pairs
    ///
    /// Later pairs override earlier ones for the same category.
    ///
    /// # Errors
    ///
    /// - `InvalidRate` if any rate is zero, negative or above [`MAX_RATE`]
    /// - `MissingRate` if any category has no rate
    pub fn new(rates: impl IntoIterator<Item = (EnergyCategory, Rate)>) -> Result<Self, BillingError> {
        let mut table = HashMap::new();
        for (category, rate) in rates {
            check_rate(category, rate)?;
            table.insert(category, rate);
        }

        for category in EnergyCategory::ALL {
            if !table.contains_key(&category) {
                return Err(BillingError::MissingRate(category));
            }
        }

        Ok(Self { rates: table })
    }

    /// The company's standard tariff
    pub fn standard() -> Self {
        let rates = HashMap::from([
            (EnergyCategory::CrudeOil, Rate::new(dec!(1.25))),
            (EnergyCategory::Solar, Rate::new(dec!(0.18))),
            (EnergyCategory::Nuclear, Rate::new(dec!(0.22))),
            (EnergyCategory::NaturalGas, Rate::new(dec!(0.85))),
        ]);
        Self { rates }
    }

    /// Returns a copy of this table with one category repriced
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` if the new rate is not in `(0, MAX_RATE]`
    pub fn with_rate(mut self, category: EnergyCategory, rate: Rate) -> Result<Self, BillingError> {
        check_rate(category, rate)?;
        self.rates.insert(category, rate);
        Ok(self)
    }

    /// Returns the rate for a category
    pub fn rate_for(&self, category: EnergyCategory) -> Rate {
        // Construction guarantees every category is present
        self.rates[&category]
    }

    /// Iterates rates in declaration order of the categories
    pub fn iter(&self) -> impl Iterator<Item = (EnergyCategory, Rate)> + '_ {
        EnergyCategory::ALL
            .into_iter()
            .map(move |category| (category, self.rate_for(category)))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_rate(category: EnergyCategory, rate: Rate) -> Result<(), BillingError> {
    if !rate.is_positive() || rate.as_decimal() > MAX_RATE {
        return Err(BillingError::InvalidRate { category, rate });
    }
    Ok(())
}

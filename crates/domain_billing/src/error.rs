//! Billing domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{CustomerId, Money, Rate};
use crate::energy::EnergyCategory;

/// Errors that can occur in the billing domain
///
/// Every variant describes a rejected operation. A rejected operation
/// leaves the ledger unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// Usage would push the account past its allocation
    #[error("Usage of {requested} units exceeds remaining allocation of {remaining} units")]
    UsageExceeded {
        requested: Decimal,
        remaining: Decimal,
    },

    /// Usage amounts must not be negative
    #[error("Invalid usage amount: {0}")]
    InvalidUsage(Decimal),

    /// Bill index out of range
    #[error("Invalid bill index {index}: account has {bill_count} bills")]
    InvalidBillIndex {
        index: usize,
        bill_count: usize,
    },

    /// Maintenance cost must not be negative
    #[error("Invalid maintenance cost: {0}")]
    InvalidMaintenanceCost(Money),

    /// Account already exists
    #[error("Duplicate customer id: {0}")]
    DuplicateId(CustomerId),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(CustomerId),

    /// Allocation must be strictly positive and at most `MAX_ALLOCATION`
    #[error("Invalid allocation: {0}")]
    InvalidAllocation(Decimal),

    /// Rate table entries must be strictly positive and at most `MAX_RATE`
    #[error("Invalid rate for {category}: {rate}")]
    InvalidRate {
        category: EnergyCategory,
        rate: Rate,
    },

    /// Rate table is missing an energy category
    #[error("No rate configured for {0}")]
    MissingRate(EnergyCategory),

    /// Trade quantity or price is negative or out of range
    #[error("Invalid trade: {0}")]
    InvalidTrade(String),
}

//! Company-level energy trades
//!
//! Imports and exports affect the company's trade balance only. They are
//! independent of customer accounts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate, TradeId};
use crate::energy::{EnergyCategory, MAX_RATE};
use crate::error::BillingError;

/// Largest quantity a single trade may move, in energy units
pub const MAX_TRADE_QUANTITY: Decimal = dec!(1000000000);

/// Direction of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    /// Energy bought in
    Import,
    /// Energy sold out
    Export,
}

/// An energy import or export transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique identifier
    pub id: TradeId,
    /// Energy category traded
    pub category: EnergyCategory,
    /// Units traded
    pub quantity: Decimal,
    /// Agreed price per unit
    pub price_per_unit: Rate,
    /// Import or export
    pub direction: TradeDirection,
    /// When the trade was recorded
    pub recorded_at: DateTime<Utc>,
}

impl TradeRecord {
    /// Creates a trade record
    ///
    /// # Errors
    ///
    /// Returns `InvalidTrade` if the quantity or price is negative or above
    /// its bound
    pub fn new(
        category: EnergyCategory,
        quantity: Decimal,
        price_per_unit: Rate,
        direction: TradeDirection,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, BillingError> {
        let trade = Self {
            id: TradeId::new_v7(),
            category,
            quantity,
            price_per_unit,
            direction,
            recorded_at,
        };
        trade.validate()?;
        Ok(trade)
    }

    /// Checks that quantity and price are within `[0, max]`
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.quantity < Decimal::ZERO {
            return Err(BillingError::InvalidTrade(format!("negative quantity {}", self.quantity)));
        }
        if self.quantity > MAX_TRADE_QUANTITY {
            return Err(BillingError::InvalidTrade(format!("quantity {} above {}", self.quantity, MAX_TRADE_QUANTITY)));
        }
        if self.price_per_unit.per_unit().is_negative() {
            return Err(BillingError::InvalidTrade(format!("negative price {}", self.price_per_unit)));
        }
        if self.price_per_unit.as_decimal() > MAX_RATE {
            return Err(BillingError::InvalidTrade(format!("price {} above {}", self.price_per_unit, MAX_RATE)));
        }
        Ok(())
    }

    /// Shorthand for an import
    pub fn import(
        category: EnergyCategory,
        quantity: Decimal,
        price_per_unit: Rate,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, BillingError> {
        Self::new(category, quantity, price_per_unit, TradeDirection::Import, recorded_at)
    }

    /// Shorthand for an export
    pub fn export(
        category: EnergyCategory,
        quantity: Decimal,
        price_per_unit: Rate,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, BillingError> {
        Self::new(category, quantity, price_per_unit, TradeDirection::Export, recorded_at)
    }

    pub fn is_import(&self) -> bool {
        self.direction == TradeDirection::Import
    }

    /// Total value of the trade
    pub fn value(&self) -> Money {
        self.price_per_unit.apply(self.quantity)
    }
}

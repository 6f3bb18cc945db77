//! Core Kernel - Foundational types for the energy billing ledger
//!
//! This crate provides the building blocks shared by the billing domain
//! and its collaborators:
//! - Money and per-unit rates with precise decimal arithmetic
//! - Temporal helpers with an injectable clock
//! - Customer, bill and trade identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Rate};
pub use temporal::{elapsed_days, Clock, FixedClock, SystemClock, TemporalError, Timezone};
pub use identifiers::{BillId, CustomerId, TradeId};
pub use error::CoreError;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Precision used for reported percentages
pub const PERCENT_PRECISION: u32 = 2;

/// Expresses `part` as a percentage of `whole`
///
/// # Returns
///
/// `part / whole * 100` rounded to 2 decimal places, or zero when
/// `whole` is zero
///
/// # Example
///
/// ```rust
/// use core_kernel::percentage;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(percentage(dec!(1), dec!(4)), dec!(25));
/// assert_eq!(percentage(dec!(3), dec!(0)), dec!(0));
/// ```
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * dec!(100)).round_dp(PERCENT_PRECISION)
}

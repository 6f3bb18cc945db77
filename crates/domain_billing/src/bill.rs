//! Bills issued at the end of a billing cycle
//!
//! A bill is created once, when an account's usage is converted into a
//! charge. After that the only change it ever sees is settlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{elapsed_days, BillId, Money};

/// Days after issue before an unpaid bill becomes overdue
pub const OVERDUE_AFTER_DAYS: i64 = 30;

/// A billing record for one cycle of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,
    /// Amount charged
    pub amount: Money,
    /// When the bill was issued
    pub issued_at: DateTime<Utc>,
    /// Whether the bill has been settled
    pub paid: bool,
    /// When the bill was settled
    pub paid_at: Option<DateTime<Utc>>,
}

impl Bill {
    pub(crate) fn issue(amount: Money, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: BillId::new_v7(),
            amount,
            issued_at,
            paid: false,
            paid_at: None,
        }
    }

    /// Whole days since the bill was issued
    pub fn days_since_issue(&self, now: DateTime<Utc>) -> i64 {
        elapsed_days(self.issued_at, now)
    }

    /// True once the bill is unpaid and more than 30 days old
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.paid && self.days_since_issue(now) > OVERDUE_AFTER_DAYS
    }

    /// Days past the overdue threshold, zero if not yet past it
    pub fn days_overdue(&self, now: DateTime<Utc>) -> i64 {
        (self.days_since_issue(now) - OVERDUE_AFTER_DAYS).max(0)
    }

    pub(crate) fn settle(&mut self, now: DateTime<Utc>) {
        if !self.paid {
            self.paid = true;
            self.paid_at = Some(now);
        }
    }
}

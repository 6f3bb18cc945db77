//! Maintenance log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// A record of maintenance work performed for a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    /// When the work was logged
    pub recorded_at: DateTime<Utc>,
    /// What was done
    pub description: String,
    /// Cost of the work (never negative)
    pub cost: Money,
}

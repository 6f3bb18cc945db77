//! Overdue payment reminders
//!
//! Reminders are plain data. Delivering them is the job of a
//! [`ReminderNotifier`](crate::ports::ReminderNotifier).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

use core_kernel::{BillId, CustomerId, Money, Timezone};

/// Subject line used for every overdue reminder
pub const REMINDER_SUBJECT: &str = "Your energy payment is overdue";

/// One overdue bill listed in a reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueNotice {
    pub bill_id: BillId,
    pub issued_at: DateTime<Utc>,
    pub amount: Money,
    /// Days beyond the 30-day payment window
    pub days_overdue: i64,
}

/// A payment reminder addressed to one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub customer_id: CustomerId,
    /// Customer email address
    pub recipient: String,
    /// Customer name used in the greeting
    pub name: String,
    pub subject: String,
    pub notices: Vec<OverdueNotice>,
    pub generated_at: DateTime<Utc>,
}

impl Reminder {
    /// Total of all overdue bills listed in the reminder
    pub fn total_overdue(&self) -> Money {
        self.notices.iter().map(|n| n.amount).sum()
    }

    /// Renders the reminder as email text, with bill dates in `timezone`
    pub fn render(&self, timezone: &Timezone) -> String {
        let mut body = String::new();
        // Writing into a String cannot fail
        let _ = write!(
            body,
            "To: {}\nSubject: {}\n\nHi {},\n\n\
             Just a reminder that you have unpaid bills that are now overdue:\n\n",
            self.recipient, self.subject, self.name
        );

        for notice in &self.notices {
            let _ = writeln!(
                body,
                "Bill from {} - Amount: {} - {} days overdue",
                timezone.format_date(notice.issued_at),
                notice.amount,
                notice.days_overdue
            );
        }

        body.push_str(
            "\nPlease pay ASAP to avoid service interruption.\n\n\
             Thanks,\nCustomer Service Team",
        );
        body
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Timezone::default()))
    }
}

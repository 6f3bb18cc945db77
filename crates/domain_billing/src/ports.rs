//! Outbound port for reminder delivery
//!
//! The ledger decides *whether* a customer is reminded. Where the reminder
//! goes (email gateway, console, a test outbox) is up to the adapter.

use core_kernel::Timezone;
use crate::reminder::Reminder;

/// Receives reminders produced by [`Ledger::dispatch_reminders`](crate::Ledger::dispatch_reminders)
pub trait ReminderNotifier {
    fn deliver(&mut self, reminder: &Reminder);
}

impl<N: ReminderNotifier + ?Sized> ReminderNotifier for &mut N {
    fn deliver(&mut self, reminder: &Reminder) {
        (**self).deliver(reminder);
    }
}

/// Collects reminders in memory
#[derive(Debug, Default)]
pub struct Outbox {
    reminders: Vec<Reminder>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn into_reminders(self) -> Vec<Reminder> {
        self.reminders
    }
}

impl ReminderNotifier for Outbox {
    fn deliver(&mut self, reminder: &Reminder) {
        self.reminders.push(reminder.clone());
    }
}

/// Logs each reminder through `tracing` instead of sending it
#[derive(Debug, Default)]
pub struct TracingNotifier {
    timezone: Timezone,
}

impl TracingNotifier {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl ReminderNotifier for TracingNotifier {
    fn deliver(&mut self, reminder: &Reminder) {
        tracing::info!(
            customer_id = %reminder.customer_id,
            recipient = %reminder.recipient,
            overdue_bills = reminder.notices.len(),
            total_overdue = %reminder.total_overdue(),
            "Reminder sent"
        );
        tracing::debug!(body = %reminder.render(&self.timezone), "Reminder body");
    }
}

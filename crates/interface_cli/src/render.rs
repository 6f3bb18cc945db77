//! Console rendering
//!
//! Every function returns the text to print; callers own the output stream.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use core_kernel::Timezone;
use domain_billing::{Account, BillingCycleSummary, Reminder, SystemOverview};

/// Separator printed between accounts in a listing
pub const SEPARATOR: &str = "-------------------------";

/// Full details of one account: profile, usage, bill history, maintenance
pub fn account_details(account: &Account, now: DateTime<Utc>, timezone: &Timezone) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Customer Info ---");
    let _ = writeln!(out, "ID: {}", account.id());
    let _ = writeln!(out, "Name: {}", account.name());
    let _ = writeln!(out, "Province: {}", account.province());
    let _ = writeln!(out, "Email: {}", account.email());
    let _ = writeln!(out, "Address: {}", account.address());
    let _ = writeln!(out, "Energy Type: {}", account.category());
    let _ = writeln!(out, "Allocation: {:.2} units", account.allocation());
    let _ = writeln!(out, "Current Usage: {:.2} units", account.usage());
    let _ = writeln!(out, "Remaining: {:.2} units", account.remaining());
    out.push('\n');

    if account.bills().is_empty() {
        let _ = writeln!(out, "No bills yet.");
    } else {
        let _ = writeln!(out, "Payment History:");
        for (i, bill) in account.bills().iter().enumerate() {
            let _ = write!(
                out,
                "  Bill #{} ({}): {} - {} - {} days ago",
                i + 1,
                timezone.format_date(bill.issued_at),
                bill.amount,
                if bill.paid { "Paid" } else { "Unpaid" },
                bill.days_since_issue(now)
            );
            if bill.is_overdue(now) {
                out.push_str(" (OVERDUE!)");
            }
            out.push('\n');
        }
    }

    if !account.maintenance_log().is_empty() {
        let _ = writeln!(out, "\nMaintenance Records:");
        for entry in account.maintenance_log() {
            let _ = writeln!(
                out,
                "  {}: {} - Cost: {}",
                timezone.format_date(entry.recorded_at),
                entry.description,
                entry.cost
            );
        }
    }

    out
}

/// A titled listing of accounts, each followed by a separator
pub fn account_list(title: &str, accounts: &[&Account], now: DateTime<Utc>, timezone: &Timezone) -> String {
    let mut out = format!("{title}\n");
    for account in accounts {
        out.push_str(&account_details(account, now, timezone));
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    out
}

/// One line acknowledging a delivered reminder
pub fn reminder_sent(reminder: &Reminder) -> String {
    format!("Sent reminder to {} (ID: {})", reminder.name, reminder.customer_id)
}

pub fn billing_summary(summary: &BillingCycleSummary) -> String {
    format!(
        "Billing completed for all customers: {} bills issued totalling {}",
        summary.accounts_billed, summary.total_billed
    )
}

/// The system stats screen
pub fn overview(overview: &SystemOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "+++ Energy Provider System Stats +++");
    let _ = writeln!(out, "Total Customers: {}\n", overview.customer_count);

    let _ = writeln!(out, "By Province:");
    for province in &overview.customers_by_province {
        let _ = writeln!(out, "  {}: {} customers", province.province, province.customer_count);
    }

    let _ = writeln!(out, "\nEnergy Rates:");
    for entry in &overview.rates {
        let _ = writeln!(out, "  {}: {}", entry.category, entry.rate);
    }

    let _ = writeln!(out, "\nOverdue Payments:");
    let _ = writeln!(
        out,
        "  Customers with overdue bills: {} ({:.1}%)",
        overview.overdue_count, overview.overdue_percentage
    );
    let _ = writeln!(out, "  Total overdue amount: {}", overview.overdue_amount);

    let _ = writeln!(out, "\nImport/Export:");
    let _ = writeln!(out, "  Total imports: {}", overview.total_imports);
    let _ = writeln!(out, "  Total exports: {}", overview.total_exports);
    let _ = writeln!(out, "  Balance: {}", overview.balance);
    out
}

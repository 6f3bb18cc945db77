//! Command Line Interface
//!
//! This crate is the outer layer of the energy billing ledger. It seeds a
//! ledger with deterministic sample data, runs one command against it, and
//! prints the result.
//!
//! # Architecture
//!
//! - **Config**: `LEDGER_` environment variables with defaults
//! - **Seed**: sample customers, bills and trades from a seeded RNG
//! - **Render**: console text for accounts and statistics
//! - **Cli**: `clap` argument parsing
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{build_ledger, run, cli::Command, config::LedgerConfig};
//!
//! let config = LedgerConfig::default();
//! let mut ledger = build_ledger(&config, now)?;
//! run(&Command::Stats, &config, &mut ledger, now, &mut std::io::stdout())?;
//! ```

pub mod cli;
pub mod config;
pub mod render;
pub mod seed;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use domain_billing::{Ledger, Outbox, ReminderNotifier, ReportBuilder, TracingNotifier};

use crate::cli::Command;
use crate::config::LedgerConfig;
use crate::seed::SampleData;

/// Builds a ledger populated with sample data as of `now`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the sample data is
/// rejected by the ledger
pub fn build_ledger(config: &LedgerConfig, now: DateTime<Utc>) -> anyhow::Result<Ledger> {
    config.validate()?;
    let rates = config.rate_table().context("invalid rate override")?;
    let mut ledger = Ledger::new(rates);

    SampleData::seeded(config.seed)
        .with_customers_per_province(config.customers_per_province)
        .with_trade_count(config.trade_count)
        .populate(&mut ledger, now)
        .context("failed to generate sample data")?;

    Ok(ledger)
}

/// Runs `command` against `ledger`, writing console output to `out`
///
/// # Errors
///
/// Returns an error if writing output or the report file fails
pub fn run<W: Write>(
    command: &Command,
    config: &LedgerConfig,
    ledger: &mut Ledger,
    now: DateTime<Utc>,
    out: &mut W,
) -> anyhow::Result<()> {
    let timezone = &config.timezone;

    match command {
        Command::Search { query, province } => {
            let found = ledger.find_accounts(query, province.as_deref());
            let title = format!("Found {} customers:", found.len());
            write!(out, "{}", render::account_list(&title, &found, now, timezone))?;
        }
        Command::Overdue => {
            let overdue = ledger.overdue_accounts(now);
            let title = format!("Found {} customers with overdue bills:", overdue.len());
            write!(out, "{}", render::account_list(&title, &overdue, now, timezone))?;
        }
        Command::Remind => {
            let mut outbox = Outbox::new();
            let sent = ledger.dispatch_reminders(now, &mut outbox);

            let mut notifier = TracingNotifier::new(*timezone);
            for reminder in outbox.into_reminders() {
                notifier.deliver(&reminder);
                writeln!(out, "{}", render::reminder_sent(&reminder))?;
            }
            writeln!(out, "Payment reminders have been sent! ({sent} total)")?;
        }
        Command::Bill => {
            let summary = ledger.run_billing_cycle(now);
            writeln!(out, "{}", render::billing_summary(&summary))?;
        }
        Command::Stats => {
            let overview = ReportBuilder::new(ledger, *timezone).overview(now);
            write!(out, "{}", render::overview(&overview))?;
        }
        Command::Report { json, .. } => {
            let report = ReportBuilder::new(ledger, *timezone).build(now);
            let contents = if *json {
                serde_json::to_string_pretty(&report)?
            } else {
                report.to_string()
            };
            write_report(&config.report_path, &contents)?;
            writeln!(out, "Report saved to {}", config.report_path.display())?;
        }
    }

    Ok(())
}

fn write_report(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("couldn't open report file: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "Report written");
    Ok(())
}
